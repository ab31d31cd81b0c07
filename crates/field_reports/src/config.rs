use crate::error::{ReportError, Result};
use std::{env, path::PathBuf};

const ENV_OUTPUT_DIR: &str = "FIELD_REPORTS_OUTPUT_DIR";
const ENV_SITES: &str = "FIELD_REPORTS_SITES";
const DEFAULT_OUTPUT_DIR: &str = "reports";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    /// Site data file; mock assets when unset
    pub sites: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(output_dir) = env::var(ENV_OUTPUT_DIR)
            && !output_dir.trim().is_empty()
        {
            let path = PathBuf::from(output_dir);

            // If the path already exists but is not a directory, reject early.
            if path.exists() && !path.is_dir() {
                return Err(ReportError::InvalidConfiguration(format!(
                    "Output path is not a directory: {}",
                    path.display()
                )));
            }
            config.output_dir = Some(path);
        } else {
            config.output_dir = Some(PathBuf::from(DEFAULT_OUTPUT_DIR));
        }

        if let Ok(sites) = env::var(ENV_SITES)
            && !sites.trim().is_empty()
        {
            let path = PathBuf::from(sites.trim());
            if !path.is_file() {
                return Err(ReportError::InvalidConfiguration(format!(
                    "Site file not found: {}",
                    path.display()
                )));
            }
            config.sites = Some(path);
        }

        Ok(config)
    }
}
