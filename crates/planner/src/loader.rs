use crate::constants::{
    EXPECTED_ID_HEADER, EXPECTED_LABEL_HEADER, EXPECTED_LAT_HEADER, EXPECTED_LON_HEADER,
    EXPECTED_RISK_HEADER, MAX_RISK,
};
use crate::error::{PlannerError, Result};
use crate::site::{Position, Site};

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Loads sites from a `.csv` or `.json` file, chosen by extension
///
/// # Errors
/// Returns error if the extension is unsupported, the file cannot be read,
/// or any record is invalid
pub fn load_sites<P: AsRef<Path>>(path: P) -> Result<Vec<Site>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("csv") => read_sites_csv(path),
        Some("json") => read_sites_json(path),
        _ => Err(PlannerError::Config(format!(
            "Unsupported site file (expected .csv or .json): {}",
            path.display()
        ))),
    }
}

/// Reads sites from a CSV file with `Id,Label,Risk[,Lon,Lat]` columns
pub fn read_sites_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Site>> {
    let file = std::fs::File::open(path)?;
    read_sites_from_reader(file)
}

/// Reads sites from a JSON array of `{id, label, risk, position?}` objects
pub fn read_sites_json<P: AsRef<Path>>(path: P) -> Result<Vec<Site>> {
    let content = std::fs::read_to_string(path)?;
    read_sites_from_json_str(&content)
}

pub fn read_sites_from_json_str(content: &str) -> Result<Vec<Site>> {
    // deserialize risk wide so out-of-range values get a proper error
    #[derive(serde::Deserialize)]
    struct RawSite {
        id: String,
        label: String,
        risk: i64,
        #[serde(default)]
        position: Option<Position>,
    }

    let raw: Vec<RawSite> = serde_json::from_str(content)?;
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|r| {
            let risk = check_risk(&r.id, r.risk)?;
            check_unique(&mut seen, &r.id)?;
            Ok(Site {
                id: r.id,
                label: r.label,
                risk,
                position: r.position,
            })
        })
        .collect()
}

/// Read CSV with `Id,Label,Risk` and optional `Lon,Lat` columns.
/// - Blank rows are skipped
/// - Lon/Lat must be both present or both empty
/// - Site ids must be unique
pub fn read_sites_from_reader<R: Read>(reader: R) -> Result<Vec<Site>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    validate_csv_headers(&mut rdr)?;

    let mut sites = Vec::new();
    let mut seen = HashSet::new();

    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // 1-indexed, +1 for header

        if let Some(site) = parse_record(&rec, row)? {
            check_unique(&mut seen, &site.id)?;
            sites.push(site);
        }
    }

    log::debug!("read {} sites", sites.len());
    Ok(sites)
}

fn validate_csv_headers<R: Read>(csv_reader: &mut csv::Reader<R>) -> Result<()> {
    let headers = csv_reader
        .headers()
        .map_err(|e| PlannerError::CsvHeader(format!("Failed to read headers: {}", e)))?;

    let required = [
        EXPECTED_ID_HEADER,
        EXPECTED_LABEL_HEADER,
        EXPECTED_RISK_HEADER,
    ];
    for (idx, expected) in required.iter().enumerate() {
        let found = headers.get(idx).ok_or_else(|| {
            PlannerError::CsvHeader(format!("Missing {} column at index {}", expected, idx))
        })?;
        if !found.eq_ignore_ascii_case(expected) {
            return Err(PlannerError::CsvHeader(format!(
                "Expected '{}' in column {}, found '{}'",
                expected, idx, found
            )));
        }
    }

    // position columns are optional, but must be named correctly when present
    for (idx, expected) in [(3, EXPECTED_LON_HEADER), (4, EXPECTED_LAT_HEADER)] {
        if let Some(found) = headers.get(idx)
            && !found.eq_ignore_ascii_case(expected)
        {
            return Err(PlannerError::CsvHeader(format!(
                "Expected '{}' in column {}, found '{}'",
                expected, idx, found
            )));
        }
    }

    Ok(())
}

fn parse_record(rec: &StringRecord, row: usize) -> Result<Option<Site>> {
    if rec.iter().all(|f| f.trim().is_empty()) {
        return Ok(None);
    }
    let id = get_column_value(rec, 0, row)?;
    let label = get_column_value(rec, 1, row)?;
    let risk_str = get_column_value(rec, 2, row)?;

    let risk_wide: i64 = risk_str.parse().map_err(|e| PlannerError::RiskParse {
        row,
        value: risk_str.to_string(),
        source: e,
    })?;
    let risk = check_risk(id, risk_wide)?;

    let lon = optional_coordinate(rec, 3, row)?;
    let lat = optional_coordinate(rec, 4, row)?;
    let position = match (lon, lat) {
        (Some(lon), Some(lat)) => Some(Position::new(lon, lat)),
        (None, None) => None,
        _ => {
            return Err(PlannerError::PartialPosition {
                row,
                site_id: id.to_string(),
            });
        }
    };

    Ok(Some(Site {
        id: id.to_string(),
        label: label.to_string(),
        risk,
        position,
    }))
}

fn get_column_value(record: &StringRecord, column_index: usize, row_number: usize) -> Result<&str> {
    record
        .get(column_index)
        .map(str::trim)
        .ok_or_else(|| PlannerError::CsvRow {
            row: row_number,
            got: record.len(),
        })
}

fn optional_coordinate(record: &StringRecord, column_index: usize, row: usize) -> Result<Option<f64>> {
    match record.get(column_index).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| PlannerError::Coordinate {
                row,
                value: value.to_string(),
            }),
    }
}

fn check_risk(site_id: &str, risk: i64) -> Result<u8> {
    u8::try_from(risk)
        .ok()
        .filter(|r| *r <= MAX_RISK)
        .ok_or_else(|| PlannerError::RiskRange {
            site_id: site_id.to_string(),
            risk,
        })
}

fn check_unique(seen: &mut HashSet<String>, id: &str) -> Result<()> {
    if !seen.insert(id.to_string()) {
        return Err(PlannerError::DuplicateSite(id.to_string()));
    }
    Ok(())
}
