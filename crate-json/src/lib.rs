//  LIB.rs
//    by Milkdrinkers
//
//  Created:
//    19 Feb 2025, 09:58:16
//  Last edited:
//    22 Aug 2025, 17:40:03
//  Auto updated?
//    Yes
//
//  Description:
//!   The JSON back-end of Crate. JSON carries no comments, so the
//!   comment-preservation machinery of the core is a no-op here.
//

// Declare modules
pub mod errors;

use crate_api::{CrateError, FileType, FlatFile, Format, Map, Value};

pub use crate::errors::JsonFormatError;


/***** HELPERS *****/
/// Converts a parsed JSON value into the unified tree value.
fn convert(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            n.as_i64().map(Value::Int).or_else(|| n.as_f64().map(Value::Float)).unwrap_or(Value::Null)
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(array) => Value::List(array.into_iter().map(convert).collect()),
        serde_json::Value::Object(object) => Value::Map(convert_object(object)),
    }
}

/// Converts a JSON object into the unified tree map.
fn convert_object(object: serde_json::Map<String, serde_json::Value>) -> Map {
    let mut map: Map = Map::with_capacity(object.len());
    for (key, value) in object {
        map.insert(key, convert(value));
    }
    map
}





/***** LIBRARY *****/
/// The [`Format`] implementation for JSON files.
#[derive(Clone, Copy, Debug)]
pub struct JsonFormat;
impl Format for JsonFormat {
    type Error = JsonFormatError;

    const FILE_TYPE: FileType = FileType::Json;

    fn read_data(raw: &str) -> Result<Map, Self::Error> {
        // The strict JSON grammar has no empty document; treat it as the empty tree
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|err| JsonFormatError::Parse { err })?;
        match value {
            serde_json::Value::Object(object) => Ok(convert_object(object)),
            serde_json::Value::Null => Ok(Map::new()),
            _ => Err(JsonFormatError::NonObjectRoot),
        }
    }

    fn write_data(data: &Map, _existing: Option<&str>) -> Result<String, Self::Error> {
        serde_json::to_string_pretty(data).map_err(|err| JsonFormatError::Serialize { err })
    }
}

/// A flat file backed by JSON.
pub type Json = FlatFile<JsonFormat>;
/// The error type of [`Json`] operations.
pub type JsonError = CrateError<JsonFormatError>;





/***** TESTS *****/
