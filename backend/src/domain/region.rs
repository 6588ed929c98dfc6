//! Named reference regions and the tier that resolved them.

use std::fmt;

use geojson::Geometry;
use serde_json::Value;

/// Data source that produced a [`Region`], in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionLevel {
    /// Static country boundary dataset.
    Country,
    /// `us_state` reference table.
    State,
    /// City/place reference table.
    City,
    /// Urban-area reference table.
    UrbanArea,
}

impl RegionLevel {
    /// Stable tag written to GeoJSON `properties.level`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::UrbanArea => "urban_area",
        }
    }
}

impl fmt::Display for RegionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Region identifier: database rows use integer keys, countries use ISO codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionId {
    Number(i64),
    Text(String),
}

impl From<&RegionId> for Value {
    fn from(id: &RegionId) -> Self {
        match id {
            RegionId::Number(number) => Value::from(*number),
            RegionId::Text(text) => Value::from(text.as_str()),
        }
    }
}

/// A read-only named region with its boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    /// Short code: ISO alpha-2 for countries, postal code for states.
    pub code: Option<String>,
    pub level: RegionLevel,
    pub geometry: Geometry,
}
