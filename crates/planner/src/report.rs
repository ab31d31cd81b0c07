use crate::constants::{REPORT_CSV, REPORT_HTML, REPORT_JSON, REPORT_TEXT};
use crate::error::{PlannerError, Result};
use crate::plan::{Policy, PlanningRequest, PlanningResult};
use crate::risk::RiskThresholds;

use csv::WriterBuilder;
use itertools::Itertools;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A planning result together with what produced it
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub generated_at: String,
    pub policy: Policy,
    pub crew_count: usize,
    pub top_n: Option<usize>,
    pub risk_threshold: Option<f64>,
    /// sites supplied before filtering
    pub input_sites: usize,
    pub thresholds: RiskThresholds,
    pub result: PlanningResult,
}

impl PlanReport {
    pub fn new(request: &PlanningRequest, result: PlanningResult, thresholds: RiskThresholds) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            policy: request.policy,
            crew_count: result.crews.len(),
            top_n: request.top_n,
            risk_threshold: request.risk_threshold,
            input_sites: request.sites.len(),
            thresholds,
            result,
        }
    }

    /// One line per crew, e.g. `Crew 1: Swale - 7th & G (MRI:92) → Bioswale - 5th & K (MRI:82)`
    pub fn crew_lines(&self) -> Vec<String> {
        self.result
            .crews
            .iter()
            .enumerate()
            .map(|(idx, crew)| {
                let body = if crew.is_empty() {
                    "No assignments".to_string()
                } else {
                    crew.iter().join(" → ")
                };
                format!("Crew {}: {}", idx + 1, body)
            })
            .collect()
    }

    pub fn render_text(&self) -> String {
        let mut out = format!(
            "Plan ({}, {} crews, {} of {} sites assigned)\n",
            self.policy,
            self.crew_count,
            self.result.assigned_count(),
            self.input_sites
        );
        for line in self.crew_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_csv(&self) -> Result<String> {
        let mut wtr = WriterBuilder::new().from_writer(Vec::new());
        wtr.write_record(["Crew", "Order", "Id", "Label", "Risk", "Band"])?;
        for (crew_idx, crew) in self.result.crews.iter().enumerate() {
            for (order, site) in crew.iter().enumerate() {
                wtr.write_record([
                    (crew_idx + 1).to_string(),
                    (order + 1).to_string(),
                    site.id.clone(),
                    site.label.clone(),
                    site.risk.to_string(),
                    self.thresholds.band(site.risk).to_string(),
                ])?;
            }
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| PlannerError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| PlannerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    pub fn render_html(&self) -> String {
        let crews_html = self
            .result
            .crews
            .iter()
            .enumerate()
            .map(|(idx, crew)| {
                let items = if crew.is_empty() {
                    "<em>No assignments</em>".to_string()
                } else {
                    crew.iter()
                        .map(|site| {
                            let band = self.thresholds.band(site.risk);
                            format!(
                                r#"<span class="site {}" style="color: {}">{} (MRI:{})</span>"#,
                                band,
                                band.color(),
                                escape_html(&site.label),
                                site.risk
                            )
                        })
                        .join(" → ")
                };
                format!(
                    r#"    <div class="crew"><strong>Crew {}</strong>: {}</div>"#,
                    idx + 1,
                    items
                )
            })
            .join("\n");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Weekly Crew Plan</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        .crew {{ margin-bottom: 8px; }}
        .site {{ font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Weekly Crew Plan</h1>
    <p>Generated: {}</p>
    <p>Policy: {} / Crews: {} / Sites assigned: {} of {}</p>
{}
</body>
</html>
"#,
            self.generated_at,
            self.policy,
            self.crew_count,
            self.result.assigned_count(),
            self.input_sites,
            crews_html
        )
    }

    /// Write the report into `dir` as `plan_report_<timestamp>.<ext>`
    pub fn save_report(&self, dir: &Path, format: &str) -> Result<PathBuf> {
        let (content, ext) = match format {
            REPORT_TEXT => (self.render_text(), "txt"),
            REPORT_JSON => (self.render_json()?, "json"),
            REPORT_CSV => (self.render_csv()?, "csv"),
            REPORT_HTML => (self.render_html(), "html"),
            _ => {
                return Err(PlannerError::Config(format!(
                    "Unknown report format: {}",
                    format
                )));
            }
        };

        std::fs::create_dir_all(dir)?;
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("plan_report_{}.{}", timestamp, ext));
        std::fs::write(&path, content)?;
        log::info!("Plan report saved to: {}", path.display());
        Ok(path)
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan;
    use crate::site::Site;
    use tempfile::TempDir;

    fn sample_report() -> PlanReport {
        let sites = vec![
            Site::new("A", "Swale - 7th & G", 92),
            Site::new("B", "Green Roof", 45),
        ];
        let request = PlanningRequest::new(sites, 3, Policy::RoundRobin);
        let result = plan(&request).unwrap();
        PlanReport::new(&request, result, RiskThresholds::default())
    }

    #[test]
    fn test_crew_lines() {
        let report = sample_report();
        assert_eq!(
            report.crew_lines(),
            vec![
                "Crew 1: Swale - 7th & G (MRI:92)",
                "Crew 2: Green Roof (MRI:45)",
                "Crew 3: No assignments",
            ]
        );
    }

    #[test]
    fn test_csv_rows() {
        let csv = sample_report().render_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Crew,Order,Id,Label,Risk,Band");
        assert_eq!(lines[1], "1,1,A,Swale - 7th & G,92,high");
        assert_eq!(lines[2], "2,1,B,Green Roof,45,low");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_html_escapes_labels() {
        let html = sample_report().render_html();
        assert!(html.contains("Swale - 7th &amp; G"));
        assert!(html.contains("<em>No assignments</em>"));
        assert!(html.contains("#e74c3c"));
    }

    #[test]
    fn test_json_contains_crews() {
        let json = sample_report().render_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["policy"], "round-robin");
        assert_eq!(value["result"]["crews"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_save_report_formats() {
        let dir = TempDir::new().unwrap();
        let report = sample_report();
        for (format, ext) in [("text", "txt"), ("json", "json"), ("csv", "csv"), ("html", "html")] {
            let path = report.save_report(dir.path(), format).unwrap();
            assert!(path.exists());
            assert_eq!(path.extension().unwrap(), ext);
        }
        assert!(matches!(
            report.save_report(dir.path(), "pdf"),
            Err(PlannerError::Config(_))
        ));
    }
}
