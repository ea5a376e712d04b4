use crate::record::AddressRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Serialize records as a JSON array, pretty-printed with 2-space indentation
/// unless `compact` is set
pub fn render(records: &[AddressRecord], compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(records)
    } else {
        serde_json::to_string_pretty(records)
    };
    json.context("Failed to serialize address records")
}

/// Write rendered JSON plus a trailing newline to a file, or stdout when
/// no path is given
pub fn write_to(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            writeln!(file, "{}", json)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
