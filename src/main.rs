use addrmerge::{DEFAULT_MAX_FILE_SIZE, IngestConfig, Ingestor, ParserRegistry, output};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Parse US names and addresses from XML, TSV and TXT files and output them as JSON
#[derive(Parser, Debug)]
#[command(name = "addrmerge", version, about)]
struct Cli {
    /// Input file(s) to parse
    #[arg(value_name = "FILE", required = true)]
    files: Vec<String>,

    /// Write JSON to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Emit single-line JSON instead of pretty-printing
    #[arg(long)]
    compact: bool,

    /// Skip input files larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = IngestConfig::new().max_file_size(cli.max_file_size);
    let ingestor = Ingestor::new(ParserRegistry::standard(), config);

    let aggregate = ingestor.ingest_all(&cli.files);
    for diagnostic in &aggregate.diagnostics {
        eprintln!("{}", diagnostic);
    }

    if aggregate.is_empty() {
        tracing::info!(files = cli.files.len(), "no address records found");
        return Ok(ExitCode::FAILURE);
    }

    tracing::info!(
        files = cli.files.len(),
        records = aggregate.records.len(),
        "writing address records"
    );
    let json = output::render(&aggregate.records, cli.compact)?;
    output::write_to(cli.output.as_deref(), &json)?;

    Ok(ExitCode::SUCCESS)
}
