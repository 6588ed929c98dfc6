//! In-memory country boundaries with name lookup.
//!
//! Built once at startup from a Natural Earth style GeoJSON feature
//! collection. Property keys are compared case-insensitively because the
//! dataset ships in both upper- and lower-case key flavours.

use std::collections::HashMap;

use geojson::{Feature, JsonObject};
use tracing::warn;

use super::{Region, RegionId, RegionLevel};

/// Fields consulted for exact matches.
const EXACT_FIELDS: [&str; 10] = [
    "admin",
    "name",
    "name_long",
    "formal_en",
    "abbrev",
    "iso_a2",
    "iso_a3",
    "sovereignt",
    "geounit",
    "brk_name",
];

/// Fields consulted for substring matches.
const CONTAINS_FIELDS: [&str; 4] = ["admin", "name", "name_long", "formal_en"];

/// Natural Earth placeholder for "no code assigned".
const MISSING_CODE: &str = "-99";

/// Shorter queries skip the substring tier.
const MIN_CONTAINS_LEN: usize = 3;

#[derive(Debug, Clone)]
struct CountryEntry {
    region: Region,
    exact: Vec<String>,
    contains: Vec<String>,
}

/// Country features indexed by their name fields.
///
/// # Examples
/// ```
/// use geojson::{Feature, Geometry, JsonObject, Value};
/// use polygon_service::domain::{CountryIndex, RegionLevel};
///
/// let mut properties = JsonObject::new();
/// properties.insert("ADMIN".into(), "France".into());
/// properties.insert("ISO_A3".into(), "FRA".into());
/// let feature = Feature {
///     geometry: Some(Geometry::new(Value::Point(vec![2.3, 48.8]))),
///     properties: Some(properties),
///     ..Feature::default()
/// };
///
/// let index = CountryIndex::from_features(vec![feature]);
/// let found = index.find("fra").expect("iso code matches");
/// assert_eq!(found.name, "France");
/// assert_eq!(found.level, RegionLevel::Country);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountryIndex {
    entries: Vec<CountryEntry>,
}

impl CountryIndex {
    /// Index `features` in dataset order. Features lacking a geometry or a
    /// usable name are skipped with a warning.
    pub fn from_features(features: Vec<Feature>) -> Self {
        let mut entries = Vec::with_capacity(features.len());
        for (position, feature) in features.into_iter().enumerate() {
            match entry_from_feature(position, feature) {
                Some(entry) => entries.push(entry),
                None => warn!(position, "skipping country feature without name or geometry"),
            }
        }
        Self { entries }
    }

    /// Number of indexed countries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no countries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact match first, then substring match.
    pub fn find(&self, query: &str) -> Option<&Region> {
        self.find_exact(query)
            .or_else(|| self.find_containing(query))
    }

    /// Case-insensitive equality against any exact-tier field.
    pub fn find_exact(&self, query: &str) -> Option<&Region> {
        let needle = normalise(query)?;
        self.entries
            .iter()
            .find(|entry| entry.exact.iter().any(|name| *name == needle))
            .map(|entry| &entry.region)
    }

    /// Case-insensitive containment against the narrower field set; the first
    /// country in dataset order wins.
    pub fn find_containing(&self, query: &str) -> Option<&Region> {
        let needle = normalise(query).filter(|value| value.chars().count() >= MIN_CONTAINS_LEN)?;
        self.entries
            .iter()
            .find(|entry| entry.contains.iter().any(|name| name.contains(&needle)))
            .map(|entry| &entry.region)
    }
}

fn normalise(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Lower-cased key to trimmed string value, dropping blanks and `-99`.
fn string_fields(properties: &JsonObject) -> HashMap<String, &str> {
    properties
        .iter()
        .filter_map(|(key, value)| {
            let text = value.as_str()?.trim();
            (!text.is_empty() && text != MISSING_CODE).then(|| (key.to_lowercase(), text))
        })
        .collect()
}

fn collect_names(fields: &HashMap<String, &str>, keys: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = keys
        .iter()
        .filter_map(|key| fields.get(*key))
        .map(|value| value.to_lowercase())
        .collect();
    names.dedup();
    names
}

fn entry_from_feature(position: usize, feature: Feature) -> Option<CountryEntry> {
    let geometry = feature.geometry?;
    let properties = feature.properties.unwrap_or_default();
    let fields = string_fields(&properties);

    let name = fields.get("admin").or_else(|| fields.get("name"))?.to_string();
    let id = fields
        .get("iso_a3")
        .or_else(|| fields.get("adm0_a3"))
        .map(|code| RegionId::Text((*code).to_owned()))
        .unwrap_or_else(|| RegionId::Number(i64::try_from(position).unwrap_or(i64::MAX)));
    let code = fields.get("iso_a2").map(|code| (*code).to_owned());

    Some(CountryEntry {
        exact: collect_names(&fields, &EXACT_FIELDS),
        contains: collect_names(&fields, &CONTAINS_FIELDS),
        region: Region {
            id,
            name,
            code,
            level: RegionLevel::Country,
            geometry,
        },
    })
}
