pub mod analysis;
pub mod config;
pub mod error;
pub mod ingest;
pub mod report;
pub mod signal;

pub use analysis::{Beat, BeatDetector, BeatSet, analyze, analyze_range};
pub use config::AnalysisConfig;
pub use error::{EcgError, Result};
pub use report::AnalysisReport;
pub use signal::{Signal, VoltageExtremes};
