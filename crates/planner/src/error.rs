use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Site '{site_id}' has no position, required by the proximity-chain policy")]
    MissingPosition { site_id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV Header: {0}")]
    CsvHeader(String),

    #[error("Invalid CSV row {row}: expected at least 3 columns, got {got}")]
    CsvRow { row: usize, got: usize },

    #[error("Invalid risk at row {row}: {value}")]
    RiskParse {
        row: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Risk out of range for site '{site_id}': {risk} (expected 0..=100)")]
    RiskRange { site_id: String, risk: i64 },

    #[error("Invalid coordinate at row {row}: {value}")]
    Coordinate { row: usize, value: String },

    #[error("Site '{site_id}' at row {row} has only one of Lon/Lat")]
    PartialPosition { row: usize, site_id: String },

    #[error("Duplicate site id: {0}")]
    DuplicateSite(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for PlannerError {
    fn from(err: toml::de::Error) -> Self {
        PlannerError::Config(format!("TOML parse error: {}", err))
    }
}
