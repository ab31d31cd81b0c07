pub mod proximity;
pub mod round_robin;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::{PlannerError, Result};
use crate::site::Site;

/// How sorted sites are distributed across crews
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Policy {
    /// site i goes to crew i mod crew_count
    #[default]
    RoundRobin,
    /// greedy nearest-neighbor chaining from each crew's last site
    ProximityChain,
}

/// Ordered list of sites for one crew (visiting order for proximity chaining)
pub type CrewAssignment = Vec<Site>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningRequest {
    pub sites: Vec<Site>,
    pub crew_count: i64,
    pub policy: Policy,
    pub top_n: Option<usize>,
    pub risk_threshold: Option<f64>,
}

impl PlanningRequest {
    pub fn new(sites: Vec<Site>, crew_count: i64, policy: Policy) -> Self {
        Self {
            sites,
            crew_count,
            policy,
            top_n: None,
            risk_threshold: None,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    pub fn with_risk_threshold(mut self, threshold: f64) -> Self {
        self.risk_threshold = Some(threshold);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningResult {
    pub crews: Vec<CrewAssignment>,
}

impl PlanningResult {
    pub fn assigned_count(&self) -> usize {
        self.crews.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.crews.iter().all(Vec::is_empty)
    }
}

/// Plan crew assignments for a request.
///
/// Filters by `risk_threshold`, sorts by risk descending (stable, so ties keep
/// input order), truncates to `top_n`, then hands the survivors to the
/// selected policy. The result always holds exactly `crew_count` crews.
///
/// # Errors
/// * `InvalidArgument` if `crew_count < 1` or the threshold is not finite
/// * `MissingPosition` if the proximity-chain policy meets a site without a position
pub fn plan(request: &PlanningRequest) -> Result<PlanningResult> {
    let crew_count = validate_crew_count(request.crew_count)?;
    let selected = select_sites(&request.sites, request.risk_threshold, request.top_n)?;

    log::debug!(
        "planning {} of {} sites across {} crews ({})",
        selected.len(),
        request.sites.len(),
        crew_count,
        request.policy
    );

    let crews = match request.policy {
        Policy::RoundRobin => round_robin::assign(&selected, crew_count),
        Policy::ProximityChain => proximity::assign(&selected, crew_count)?,
    };

    Ok(PlanningResult {
        crews: crews
            .into_iter()
            .map(|crew| crew.into_iter().cloned().collect())
            .collect(),
    })
}

fn validate_crew_count(crew_count: i64) -> Result<usize> {
    if crew_count < 1 {
        return Err(PlannerError::InvalidArgument(format!(
            "crew count must be at least 1, got {}",
            crew_count
        )));
    }
    usize::try_from(crew_count).map_err(|_| {
        PlannerError::InvalidArgument(format!("crew count too large: {}", crew_count))
    })
}

/// Threshold filter, stable risk-descending sort, then top-N cut
pub fn select_sites(
    sites: &[Site],
    risk_threshold: Option<f64>,
    top_n: Option<usize>,
) -> Result<Vec<&Site>> {
    if let Some(t) = risk_threshold
        && !t.is_finite()
    {
        return Err(PlannerError::InvalidArgument(format!(
            "risk threshold must be a finite number, got {}",
            t
        )));
    }

    let mut selected: Vec<&Site> = sites
        .iter()
        .filter(|s| risk_threshold.is_none_or(|t| f64::from(s.risk) >= t))
        .collect();

    // sort_by is stable
    selected.sort_by(|a, b| b.risk.cmp(&a.risk));

    if let Some(n) = top_n {
        selected.truncate(n);
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(risks: &[u8]) -> Vec<Site> {
        risks
            .iter()
            .enumerate()
            .map(|(i, &r)| Site::new(format!("S{}", i), format!("Site {}", i), r))
            .collect()
    }

    fn ids(crew: &[Site]) -> Vec<&str> {
        crew.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_select_sites_stable_on_ties() {
        let input = sites(&[50, 80, 50, 80]);
        let selected = select_sites(&input, None, None).unwrap();
        let order: Vec<&str> = selected.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["S1", "S3", "S0", "S2"]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let input = sites(&[49, 50, 51]);
        let selected = select_sites(&input, Some(50.0), None).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|s| s.risk >= 50));
    }

    #[test]
    fn test_fractional_threshold() {
        let input = sites(&[50, 51]);
        let selected = select_sites(&input, Some(50.5), None).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].risk, 51);
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let input = sites(&[50]);
        let err = select_sites(&input, Some(f64::NAN), None).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidArgument(_)));
    }

    #[test]
    fn test_top_n_larger_than_input() {
        let input = sites(&[10, 20]);
        let selected = select_sites(&input, None, Some(5)).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_top_n_zero_gives_empty_crews() {
        let request = PlanningRequest::new(sites(&[90, 80]), 2, Policy::RoundRobin).with_top_n(0);
        let result = plan(&request).unwrap();
        assert_eq!(result.crews.len(), 2);
        assert!(result.is_empty());
    }

    #[test]
    fn test_threshold_applies_before_top_n() {
        let request = PlanningRequest::new(sites(&[90, 40, 85, 30]), 1, Policy::RoundRobin)
            .with_risk_threshold(50.0)
            .with_top_n(3);
        let result = plan(&request).unwrap();
        assert_eq!(ids(&result.crews[0]), vec!["S0", "S2"]);
    }

    #[test]
    fn test_crew_count_zero_rejected() {
        let request = PlanningRequest::new(sites(&[90]), 0, Policy::RoundRobin);
        assert!(matches!(plan(&request), Err(PlannerError::InvalidArgument(_))));
    }

    #[test]
    fn test_more_crews_than_sites() {
        let request = PlanningRequest::new(sites(&[90, 80]), 4, Policy::RoundRobin);
        let result = plan(&request).unwrap();
        assert_eq!(result.crews.len(), 4);
        assert_eq!(ids(&result.crews[0]), vec!["S0"]);
        assert_eq!(ids(&result.crews[1]), vec!["S1"]);
        assert!(result.crews[2].is_empty());
        assert!(result.crews[3].is_empty());
    }

    #[test]
    fn test_policy_parse_and_display() {
        use std::str::FromStr;
        assert_eq!(Policy::from_str("round-robin").unwrap(), Policy::RoundRobin);
        assert_eq!(
            Policy::from_str("proximity-chain").unwrap(),
            Policy::ProximityChain
        );
        assert!(Policy::from_str("nearest").is_err());
        assert_eq!(Policy::ProximityChain.to_string(), "proximity-chain");
    }

    #[test]
    fn test_input_not_mutated() {
        let input = sites(&[10, 90, 50]);
        let before = input.clone();
        let request = PlanningRequest::new(input, 2, Policy::RoundRobin);
        let _ = plan(&request).unwrap();
        assert_eq!(request.sites, before);
    }
}
