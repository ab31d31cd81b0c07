use crate::{
    constants::{DEFAULT_CREW_COUNT, DEFAULT_OUTPUT_DIR, DEFAULT_TOP_N, REPORT_FORMATS, REPORT_TEXT},
    error::{PlannerError, Result},
    plan::{Policy, PlanningRequest},
    risk::RiskThresholds,
    site::Site,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub planner: PlannerConfig,
    #[serde(default)]
    pub display: RiskThresholds,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlannerConfig {
    #[serde(default = "default_crew_count")]
    pub crew_count: i64,
    #[serde(default)]
    pub policy: Policy, // "round-robin" | "proximity-chain"
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub risk_threshold: Option<f64>,
    /// Site data file (.csv / .json). Mock assets when absent.
    #[serde(default)]
    pub sites: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_report_format")]
    pub report_format: String, // "text" | "json" | "csv" | "html"
}

fn default_crew_count() -> i64 {
    DEFAULT_CREW_COUNT
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_report_format() -> String {
    REPORT_TEXT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            planner: PlannerConfig {
                crew_count: DEFAULT_CREW_COUNT,
                policy: Policy::RoundRobin,
                top_n: Some(DEFAULT_TOP_N),
                risk_threshold: None,
                sites: None,
                output_dir: default_output_dir(),
                report_format: default_report_format(),
            },
            display: RiskThresholds::default(),
        }
    }
}

impl Config {
    /// Read, parse and validate a TOML configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlannerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            PlannerError::Config(msg) => {
                PlannerError::Config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let planner = &self.planner;
        if planner.crew_count < 1 {
            return Err(PlannerError::InvalidArgument(format!(
                "crew_count must be at least 1, got {}",
                planner.crew_count
            )));
        }

        if let Some(t) = planner.risk_threshold
            && !t.is_finite()
        {
            return Err(PlannerError::InvalidArgument(format!(
                "risk_threshold must be a finite number, got {}",
                t
            )));
        }

        if !REPORT_FORMATS.contains(&planner.report_format.as_str()) {
            return Err(PlannerError::Config(format!(
                "Invalid report format: {}. Must be one of {}",
                planner.report_format,
                REPORT_FORMATS.join(", ")
            )));
        }

        if !self.display.is_valid() {
            return Err(PlannerError::Config(format!(
                "display thresholds must satisfy medium <= high <= 100, got medium={} high={}",
                self.display.medium, self.display.high
            )));
        }

        Ok(())
    }

    /// Apply command-line `overrides`, then validate the merged configuration
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<()> {
        let planner = &mut self.planner;
        if let Some(sites) = overrides.sites {
            planner.sites = Some(sites);
        }
        if let Some(crews) = overrides.crew_count {
            planner.crew_count = crews;
        }
        if let Some(policy) = overrides.policy {
            planner.policy = policy;
        }
        if let Some(top_n) = overrides.top_n {
            planner.top_n = Some(top_n);
        }
        if let Some(threshold) = overrides.risk_threshold {
            planner.risk_threshold = Some(threshold);
        }
        if let Some(format) = overrides.report_format {
            planner.report_format = format;
        }
        if let Some(dir) = overrides.output_dir {
            planner.output_dir = dir.display().to_string();
        }
        self.validate()
    }

    /// Build a planning request over `sites` from the planner section
    pub fn to_request(&self, sites: Vec<Site>) -> PlanningRequest {
        PlanningRequest {
            sites,
            crew_count: self.planner.crew_count,
            policy: self.planner.policy,
            top_n: self.planner.top_n,
            risk_threshold: self.planner.risk_threshold,
        }
    }
}

/// Command-line values; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sites: Option<PathBuf>,
    pub crew_count: Option<i64>,
    pub policy: Option<Policy>,
    pub top_n: Option<usize>,
    pub risk_threshold: Option<f64>,
    pub report_format: Option<String>,
    pub output_dir: Option<PathBuf>,
}
