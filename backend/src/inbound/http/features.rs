//! Shape domain values into GeoJSON features.

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::{Number, Value, json};

use crate::domain::{PolygonRecord, Region, RegionId};

fn feature(id: Option<Id>, properties: JsonObject, geometry: geojson::Geometry) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn feature_id(id: &RegionId) -> Id {
    match id {
        RegionId::Number(number) => Id::Number(Number::from(*number)),
        RegionId::Text(text) => Id::String(text.clone()),
    }
}

/// Wrap features in a `FeatureCollection`.
pub(crate) fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Stored drawing set as a feature. Stored properties are merged last, so a
/// client-supplied key may shadow a column.
pub(crate) fn polygon_feature(record: PolygonRecord) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".into(), json!(record.id));
    properties.insert("name".into(), json!(record.name));
    properties.insert("agent_id".into(), json!(record.agent_id));
    properties.insert("user_id".into(), json!(record.user_id));
    properties.insert("created_at".into(), json!(record.created_at));
    properties.insert("updated_at".into(), json!(record.updated_at));
    properties.extend(record.properties);

    feature(
        Some(Id::Number(Number::from(record.id))),
        properties,
        record.geometry,
    )
}

/// State row as returned by `POST /states`.
pub(crate) fn state_feature(region: Region) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".into(), Value::from(&region.id));
    properties.insert("name".into(), json!(region.name));
    properties.insert("stusps".into(), json!(region.code));

    feature(None, properties, region.geometry)
}

/// Resolved location tagged with the tier that matched it.
pub(crate) fn location_feature(region: Region) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".into(), Value::from(&region.id));
    properties.insert("name".into(), json!(region.name));
    if let Some(code) = &region.code {
        properties.insert("code".into(), json!(code));
    }
    properties.insert("level".into(), json!(region.level.as_str()));

    feature(Some(feature_id(&region.id)), properties, region.geometry)
}
