use thiserror::Error;

/// Errors raised by the yoga engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum YogaError {
    #[error("Invalid chart input: {0}")]
    InvalidChartInput(String),
    #[error("Invalid house number: {0} (expected 1-12)")]
    InvalidHouseNumber(u8),
    #[error("Invalid sign number: {0} (expected 1-12)")]
    InvalidSign(u8),
    #[error("Unknown yoga name: {0}")]
    UnknownYogaName(String),
    #[error("Classification failed for {name}: {message}")]
    Classification { name: String, message: String },
    #[error("Timing unavailable: {0}")]
    Timing(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Malformed data table {table}: {message}")]
    Data { table: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, YogaError>;
