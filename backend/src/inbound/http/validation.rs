//! Request validation helpers shared by the HTTP handlers.

use geojson::{Geometry, JsonObject};
use serde_json::Value;

use crate::domain::Error;

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("Missing {}", field.as_str()))
}

/// Parse a required GeoJSON geometry object.
pub(crate) fn parse_geometry(value: Option<Value>, field: FieldName) -> Result<Geometry, Error> {
    match value {
        None | Some(Value::Null) => Err(missing_field_error(field)),
        Some(value) => Geometry::from_json_value(value).map_err(|err| {
            Error::invalid_request(format!("Invalid {}: {err}", field.as_str()))
        }),
    }
}

/// Accept a non-blank string or a number and return it as text.
pub(crate) fn parse_identifier(value: Option<Value>, field: FieldName) -> Result<String, Error> {
    match value {
        None | Some(Value::Null) => Err(missing_field_error(field)),
        Some(Value::String(text)) if text.trim().is_empty() => Err(missing_field_error(field)),
        Some(Value::String(text)) => Ok(text),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(_) => Err(Error::invalid_request(format!(
            "{} must be a string or number",
            field.as_str()
        ))),
    }
}

/// Accept an absent/null value or a JSON object.
pub(crate) fn parse_optional_object(
    value: Option<Value>,
    field: FieldName,
) -> Result<Option<JsonObject>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(Error::invalid_request(format!(
            "{} must be an object",
            field.as_str()
        ))),
    }
}

/// Treat blank query values as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
