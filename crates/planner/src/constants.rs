/// Upper bound of a risk score
pub const MAX_RISK: u8 = 100;

/// Default display bands
pub const DEFAULT_HIGH_RISK: u8 = 75; // red at or above
pub const DEFAULT_MEDIUM_RISK: u8 = 50; // amber at or above

/// Planner defaults (the demo's "top 5 sites, one crew")
pub const DEFAULT_CREW_COUNT: i64 = 1;
pub const DEFAULT_TOP_N: usize = 5;

/// Expected headers in site CSV files
pub const EXPECTED_ID_HEADER: &str = "Id";
pub const EXPECTED_LABEL_HEADER: &str = "Label";
pub const EXPECTED_RISK_HEADER: &str = "Risk";
pub const EXPECTED_LON_HEADER: &str = "Lon";
pub const EXPECTED_LAT_HEADER: &str = "Lat";

/// Default paths
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "plans";

/// Report formats
pub const REPORT_TEXT: &str = "text";
pub const REPORT_JSON: &str = "json";
pub const REPORT_CSV: &str = "csv";
pub const REPORT_HTML: &str = "html";
pub const REPORT_FORMATS: [&str; 4] = [REPORT_TEXT, REPORT_JSON, REPORT_CSV, REPORT_HTML];
