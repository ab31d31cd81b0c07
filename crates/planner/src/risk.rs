use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::constants::{DEFAULT_HIGH_RISK, DEFAULT_MEDIUM_RISK, MAX_RISK};
use crate::site::Site;

/// Display band of a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskBand {
    High,
    Medium,
    Low,
}

impl RiskBand {
    /// Hex color used by renderers
    pub fn color(&self) -> &'static str {
        match self {
            RiskBand::High => "#e74c3c",   // red
            RiskBand::Medium => "#f39c12", // amber
            RiskBand::Low => "#27ae60",    // green
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub high: u8,
    pub medium: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_RISK,
            medium: DEFAULT_MEDIUM_RISK,
        }
    }
}

impl RiskThresholds {
    pub fn band(&self, risk: u8) -> RiskBand {
        if risk >= self.high {
            RiskBand::High
        } else if risk >= self.medium {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub fn is_valid(&self) -> bool {
        self.medium <= self.high && self.high <= MAX_RISK
    }
}

/// Continuous marker color, green at 0 through red at 100
pub fn marker_color(risk: u8) -> String {
    let intensity = (f64::from(risk) / f64::from(MAX_RISK)).min(1.0);
    let r = (255.0 * intensity).round() as u8;
    let g = (200.0 * (1.0 - intensity)).round() as u8;
    format!("rgb({},{},80)", r, g)
}

/// Sites ordered for the risk panel: risk descending, ties in input order
pub fn ranked_sites(sites: &[Site]) -> Vec<&Site> {
    let mut sorted: Vec<&Site> = sites.iter().collect();
    sorted.sort_by(|a, b| b.risk.cmp(&a.risk));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let t = RiskThresholds::default();
        assert_eq!(t.band(100), RiskBand::High);
        assert_eq!(t.band(75), RiskBand::High);
        assert_eq!(t.band(74), RiskBand::Medium);
        assert_eq!(t.band(50), RiskBand::Medium);
        assert_eq!(t.band(49), RiskBand::Low);
        assert_eq!(t.band(0), RiskBand::Low);
    }

    #[test]
    fn test_threshold_validity() {
        assert!(RiskThresholds::default().is_valid());
        assert!(!RiskThresholds { high: 40, medium: 60 }.is_valid());
        assert!(!RiskThresholds { high: 120, medium: 60 }.is_valid());
    }

    #[test]
    fn test_marker_color_endpoints() {
        assert_eq!(marker_color(0), "rgb(0,200,80)");
        assert_eq!(marker_color(100), "rgb(255,0,80)");
        assert_eq!(marker_color(50), "rgb(128,100,80)");
    }

    #[test]
    fn test_band_names() {
        assert_eq!(RiskBand::High.to_string(), "high");
        assert_eq!(RiskBand::Low.as_ref(), "low");
    }

    #[test]
    fn test_ranked_sites_stable() {
        let sites = vec![
            Site::new("a", "a", 40),
            Site::new("b", "b", 90),
            Site::new("c", "c", 40),
        ];
        let ids: Vec<&str> = ranked_sites(&sites).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
