//  LIB.rs
//    by Milkdrinkers
//
//  Created:
//    19 Feb 2025, 11:10:55
//  Last edited:
//    22 Aug 2025, 18:05:19
//  Auto updated?
//    Yes
//
//  Description:
//!   The TOML back-end of Crate. TOML is stricter than the unified tree:
//!   null values cannot be written, and datetimes read back as strings.
//

// Declare modules
pub mod errors;

use crate_api::{CrateError, FileType, FlatFile, Format, Map, Value};

pub use crate::errors::TomlFormatError;


/***** HELPERS *****/
/// Converts a parsed TOML value into the unified tree value.
fn convert(value: toml::Value) -> Value {
    match value {
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::String(s) => Value::String(s),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(array) => Value::List(array.into_iter().map(convert).collect()),
        toml::Value::Table(table) => Value::Map(convert_table(table)),
    }
}

/// Converts a TOML table into the unified tree map.
fn convert_table(table: toml::Table) -> Map {
    let mut map: Map = Map::with_capacity(table.len());
    for (key, value) in table {
        map.insert(key, convert(value));
    }
    map
}

/// Converts a unified tree value back to TOML, carrying the dotted key path for
/// error reporting.
fn to_toml(value: &Value, key: &str) -> Result<toml::Value, TomlFormatError> {
    match value {
        Value::Null => Err(TomlFormatError::NullValue { key: key.into() }),
        Value::Bool(b) => Ok(toml::Value::Boolean(*b)),
        Value::Int(i) => Ok(toml::Value::Integer(*i)),
        Value::Float(f) => Ok(toml::Value::Float(*f)),
        Value::String(s) => Ok(toml::Value::String(s.clone())),
        Value::List(list) => {
            let mut array: Vec<toml::Value> = Vec::with_capacity(list.len());
            for (i, element) in list.iter().enumerate() {
                array.push(to_toml(element, &format!("{key}[{i}]"))?);
            }
            Ok(toml::Value::Array(array))
        },
        Value::Map(map) => Ok(toml::Value::Table(to_table(map, key)?)),
    }
}

/// Converts a unified tree map back to a TOML table.
fn to_table(map: &Map, prefix: &str) -> Result<toml::Table, TomlFormatError> {
    let mut table: toml::Table = toml::Table::new();
    for (name, value) in map {
        let key: String = if prefix.is_empty() { name.clone() } else { format!("{prefix}.{name}") };
        table.insert(name.clone(), to_toml(value, &key)?);
    }
    Ok(table)
}





/***** LIBRARY *****/
/// The [`Format`] implementation for TOML files.
#[derive(Clone, Copy, Debug)]
pub struct TomlFormat;
impl Format for TomlFormat {
    type Error = TomlFormatError;

    const FILE_TYPE: FileType = FileType::Toml;

    fn read_data(raw: &str) -> Result<Map, Self::Error> {
        let table: toml::Table = raw.parse().map_err(|err| TomlFormatError::Parse { err })?;
        Ok(convert_table(table))
    }

    fn write_data(data: &Map, _existing: Option<&str>) -> Result<String, Self::Error> {
        let table: toml::Table = to_table(data, "")?;
        toml::to_string_pretty(&table).map_err(|err| TomlFormatError::Serialize { err })
    }
}

/// A flat file backed by TOML.
pub type Toml = FlatFile<TomlFormat>;
/// The error type of [`Toml`] operations.
pub type TomlError = CrateError<TomlFormatError>;





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use crate_api::DataStorage;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn build_and_name() {
        let dir = TempDir::new().unwrap();
        let toml: Toml = Toml::builder().path_in(dir.path(), "Example").build().unwrap();
        assert_eq!(toml.name(), "Example.toml");
        assert_eq!(toml.file_type(), FileType::Toml);
        assert!(toml.file_data().is_empty());
    }

    #[test]
    fn typed_access() {
        let dir = TempDir::new().unwrap();
        let mut toml: Toml = Toml::builder()
            .path_in(dir.path(), "Example")
            .defaults_str("ratio = 0.5\n\n[app]\nname = \"Test Application\"\ndebug = true\n\n[database]\nport = 5432\n")
            .build()
            .unwrap();

        assert_eq!(toml.get_string("app.name"), "Test Application");
        assert!(toml.get_bool("app.debug"));
        assert_eq!(toml.get_int("database.port"), 5432);
        assert_eq!(toml.get_float("ratio"), 0.5);

        toml.set("database.port", 1234).unwrap();
        let reread: Toml = Toml::builder().path_in(dir.path(), "Example").build().unwrap();
        assert_eq!(reread.get_int("database.port"), 1234);
    }

    #[test]
    fn null_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut toml: Toml = Toml::builder().path_in(dir.path(), "Nulls").build().unwrap();
        let result = toml.set("bad.key", Option::<i64>::None);
        assert!(matches!(result, Err(CrateError::DataSerializeError { err: TomlFormatError::NullValue { .. } })));
    }

    #[test]
    fn datetimes_read_as_strings() {
        let dir = TempDir::new().unwrap();
        let toml: Toml =
            Toml::builder().path_in(dir.path(), "Dates").defaults_str("date = 1979-05-27T07:32:00Z\n").build().unwrap();
        assert_eq!(toml.get_string("date"), "1979-05-27T07:32:00Z");
    }
}
