use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge { size: u64, max: u64 },
}
