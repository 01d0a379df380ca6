use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcgError {
    #[error("Ingestion failed for {path}: {reason}")]
    Ingestion { path: String, reason: String },

    #[error("Signal must contain at least two samples")]
    EmptySignal,

    #[error("Sample count mismatch: {timestamps} timestamps, {voltages} voltages")]
    MismatchedSamples { timestamps: usize, voltages: usize },

    #[error("Invalid peak detection input: {0}")]
    InvalidPeakInput(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Zero-width range: start and end timestamps are equal")]
    ZeroRange,

    #[error("Report I/O failed: {0}")]
    Report(#[from] std::io::Error),

    #[error("Report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EcgError>;
