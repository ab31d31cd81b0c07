use serde::{Deserialize, Serialize};
use std::fmt;

/// Point coordinate (longitude, latitude) of an asset or a region's centroid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

impl Position {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Planar Euclidean distance in coordinate units
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.lon - other.lon).hypot(self.lat - other.lat)
    }
}

/// A maintenance site: a point asset, ward or neighborhood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub label: String,
    /// 0..=100, higher is more urgent
    pub risk: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Site {
    pub fn new(id: impl Into<String>, label: impl Into<String>, risk: u8) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            risk,
            position: None,
        }
    }

    pub fn with_position(mut self, lon: f64, lat: f64) -> Self {
        self.position = Some(Position::new(lon, lat));
        self
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (MRI:{})", self.label, self.risk)
    }
}

/// Mock GSI assets around Washington, DC used when no data file is given
pub fn mock_assets() -> Vec<Site> {
    vec![
        Site::new("A-001", "Bioswale - 5th & K", 82).with_position(-77.0113, 38.9007),
        Site::new("A-002", "Rain Garden - 12th & L", 57).with_position(-77.0252, 38.9072),
        Site::new("A-003", "Permeable Pavement - 3rd & H", 71).with_position(-77.0320, 38.8896),
        Site::new("A-004", "Green Roof - City Hall", 45).with_position(-77.0365, 38.8971),
        Site::new("A-005", "Swale - 7th & G", 92).with_position(-77.0205, 38.9101),
    ]
}
