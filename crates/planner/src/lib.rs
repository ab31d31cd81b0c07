pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod plan;
pub mod report;
pub mod risk;
pub mod site;

pub use config::{Config, Overrides};
pub use constants::{DEFAULT_CONFIG_PATH, DEFAULT_HIGH_RISK, DEFAULT_MEDIUM_RISK, MAX_RISK};
pub use error::{PlannerError, Result};
pub use loader::load_sites;
pub use plan::{CrewAssignment, Policy, PlanningRequest, PlanningResult, plan};
pub use report::PlanReport;
pub use risk::{RiskBand, RiskThresholds};
pub use site::{Position, Site, mock_assets};
