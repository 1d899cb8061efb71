//  LIB.rs
//    by Milkdrinkers
//
//  Created:
//    18 Feb 2025, 09:05:12
//  Last edited:
//    22 Aug 2025, 17:20:36
//  Auto updated?
//    Yes
//
//  Description:
//!   The YAML back-end of Crate: [`Yaml`] flat files, optional comment
//!   preservation and the header editing extras YAML files tend to
//!   carry.
//

// Declare modules
pub mod editor;
pub mod errors;

use std::fs;

use crate_api::{ConfigSetting, CrateBuilder, CrateError, DataType, FileType, FlatFile, Format, Map, Value};
use log::warn;

pub use crate::errors::YamlFormatError;


/***** HELPERS *****/
/// Converts a parsed YAML value into the unified tree value.
fn convert(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            n.as_i64().map(Value::Int).or_else(|| n.as_f64().map(Value::Float)).unwrap_or(Value::Null)
        },
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::List(seq.into_iter().map(convert).collect()),
        serde_yaml::Value::Mapping(mapping) => Value::Map(convert_mapping(mapping)),
        serde_yaml::Value::Tagged(tagged) => convert(tagged.value),
    }
}

/// Converts a YAML mapping into the unified tree map, stringifying its keys.
fn convert_mapping(mapping: serde_yaml::Mapping) -> Map {
    let mut map: Map = Map::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key: String = match key {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Null => "null".into(),
            key => {
                warn!("Skipping YAML mapping key {key:?} (only scalar keys are supported)");
                continue;
            },
        };
        map.insert(key, convert(value));
    }
    map
}





/***** LIBRARY *****/
/// The [`Format`] implementation for YAML files.
///
/// When asked to preserve the previous contents, the comments found there are
/// re-attached to the fresh dump (see [`editor`]).
#[derive(Clone, Copy, Debug)]
pub struct YamlFormat;
impl Format for YamlFormat {
    type Error = YamlFormatError;

    const FILE_TYPE: FileType = FileType::Yaml;

    fn read_data(raw: &str) -> Result<Map, Self::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(raw).map_err(|err| YamlFormatError::Parse { err })?;
        match value {
            serde_yaml::Value::Mapping(mapping) => Ok(convert_mapping(mapping)),
            serde_yaml::Value::Null => Ok(Map::new()),
            _ => Err(YamlFormatError::NonMapRoot),
        }
    }

    fn write_data(data: &Map, existing: Option<&str>) -> Result<String, Self::Error> {
        let raw: String = serde_yaml::to_string(data).map_err(|err| YamlFormatError::Serialize { err })?;
        match existing {
            Some(old) => Ok(editor::merge_comments(old, &raw)),
            None => Ok(raw),
        }
    }
}

/// A flat file backed by YAML.
pub type Yaml = FlatFile<YamlFormat>;
/// The error type of [`Yaml`] operations.
pub type YamlError = CrateError<YamlFormatError>;

/// Returns a [`Yaml`] builder preconfigured as a user-facing config file:
/// comments are preserved across writes and key order is kept stable.
#[inline]
pub fn config() -> CrateBuilder<YamlFormat> {
    Yaml::builder().config(ConfigSetting::PreserveComments).data_type(DataType::Sorted)
}



/// YAML-only extras on [`Yaml`] flat files: the header is the comment block at
/// the very top of the file.
///
/// These operate on the file text directly and leave the tree untouched.
pub trait YamlHeaderExt {
    /// Returns the header of the backing file, one `#`-line per entry.
    ///
    /// # Errors
    /// This function errors if the backing file could not be read.
    fn header(&self) -> Result<Vec<String>, YamlError>;

    /// Replaces the header of the backing file.
    ///
    /// Lines missing the leading `#` get one prefixed.
    ///
    /// # Errors
    /// This function errors if the backing file could not be read or written.
    fn set_header<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, header: I) -> Result<(), YamlError>;

    /// Prepends lines to the header of the backing file.
    ///
    /// Lines missing the leading `#` get one prefixed.
    ///
    /// # Errors
    /// This function errors if the backing file could not be read or written.
    fn add_header<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, header: I) -> Result<(), YamlError>;

    /// Replaces the header with the given lines centered in a decorative frame.
    ///
    /// Lines longer than 50 characters are skipped.
    ///
    /// # Errors
    /// This function errors if the backing file could not be read or written.
    fn framed_header<I: IntoIterator<Item = S>, S: AsRef<str>>(&mut self, header: I) -> Result<(), YamlError>;
}

impl YamlHeaderExt for Yaml {
    fn header(&self) -> Result<Vec<String>, YamlError> {
        let raw: String = match fs::read_to_string(self.path()) {
            Ok(raw) => raw,
            Err(err) => {
                return Err(CrateError::FileReadError { path: self.path().into(), err });
            },
        };
        Ok(editor::header_lines(&raw))
    }

    fn set_header<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, header: I) -> Result<(), YamlError> {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        let raw: String = match fs::read_to_string(self.path()) {
            Ok(raw) => raw,
            Err(err) => {
                return Err(CrateError::FileReadError { path: self.path().into(), err });
            },
        };
        if let Err(err) = fs::write(self.path(), editor::set_header(&raw, &header)) {
            return Err(CrateError::FileWriteError { path: self.path().into(), err });
        }
        Ok(())
    }

    fn add_header<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, header: I) -> Result<(), YamlError> {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        let raw: String = match fs::read_to_string(self.path()) {
            Ok(raw) => raw,
            Err(err) => {
                return Err(CrateError::FileReadError { path: self.path().into(), err });
            },
        };
        if let Err(err) = fs::write(self.path(), editor::add_header(&raw, &header)) {
            return Err(CrateError::FileWriteError { path: self.path().into(), err });
        }
        Ok(())
    }

    fn framed_header<I: IntoIterator<Item = S>, S: AsRef<str>>(&mut self, header: I) -> Result<(), YamlError> {
        const BORDER: &str = "# +----------------------------------------------------+ #";

        let mut lines: Vec<String> = vec![BORDER.into()];
        for line in header {
            let line: &str = line.as_ref();
            if line.len() > 50 {
                continue;
            }
            let pad: String = " ".repeat((50 - line.len()) / 2);
            let tail: &str = if line.len() % 2 != 0 { " " } else { "" };
            lines.push(format!("# < {pad}{line}{pad}{tail} > #"));
        }
        lines.push(BORDER.into());
        self.set_header(lines)
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use crate_api::{DataStorage, ReloadSetting};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn build_and_name() {
        let dir = TempDir::new().unwrap();
        let yaml: Yaml = Yaml::builder().path_in(dir.path(), "Example").build().unwrap();
        assert_eq!(yaml.name(), "Example.yml");
        assert_eq!(yaml.file_type(), FileType::Yaml);
        assert_eq!(yaml.header().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn typed_access() {
        let dir = TempDir::new().unwrap();
        let mut yaml: Yaml = Yaml::builder()
            .path_in(dir.path(), "Example")
            .defaults_str("app:\n  name: Test Application\n  debug: true\ndatabase:\n  port: 5432\nratio: 0.5\ntags:\n  - a\n  - b\n")
            .build()
            .unwrap();

        assert_eq!(yaml.get_string("app.name"), "Test Application");
        assert!(yaml.get_bool("app.debug"));
        assert_eq!(yaml.get_int("database.port"), 5432);
        assert_eq!(yaml.get_float("ratio"), 0.5);
        assert_eq!(yaml.get_string_list("tags"), vec!["a".to_string(), "b".to_string()]);

        yaml.set("database.port", 1234).unwrap();
        let reread: Yaml = Yaml::builder().path_in(dir.path(), "Example").build().unwrap();
        assert_eq!(reread.get_int("database.port"), 1234);
    }

    #[test]
    fn non_map_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Yaml::builder().path_in(dir.path(), "List").defaults_str("- a\n- b\n").build();
        assert!(matches!(result, Err(CrateError::FileParseError { .. })));
    }

    #[test]
    fn set_header_normalizes_marker() {
        let dir = TempDir::new().unwrap();
        let mut yaml: Yaml = Yaml::builder().path_in(dir.path(), "Example").build().unwrap();
        yaml.set_header(["Example-1", "Example-2"]).unwrap();
        assert_eq!(yaml.header().unwrap(), vec!["#Example-1".to_string(), "#Example-2".to_string()]);

        yaml.add_header(["Example-0"]).unwrap();
        assert_eq!(yaml.header().unwrap(), vec![
            "#Example-0".to_string(),
            "#Example-1".to_string(),
            "#Example-2".to_string()
        ]);
    }

    #[test]
    fn framed_header_centers_lines() {
        let dir = TempDir::new().unwrap();
        let mut yaml: Yaml = Yaml::builder().path_in(dir.path(), "Example").build().unwrap();
        yaml.framed_header(["Test"]).unwrap();

        let header: Vec<String> = yaml.header().unwrap();
        assert_eq!(header.len(), 3);
        assert_eq!(header[0], "# +----------------------------------------------------+ #");
        assert_eq!(header[1], format!("# < {pad}Test{pad} > #", pad = " ".repeat(23)));
        assert_eq!(header[2], header[0]);
        // Every framed line is as wide as the border
        assert_eq!(header[1].len(), header[0].len());
    }

    #[test]
    fn header_survives_writes() {
        let dir = TempDir::new().unwrap();
        let mut yaml: Yaml = config().path_in(dir.path(), "Config").build().unwrap();
        yaml.set("key", 1).unwrap();
        yaml.set_header(["kept"]).unwrap();

        yaml.set("key", 2).unwrap();
        assert_eq!(yaml.header().unwrap(), vec!["#kept".to_string()]);
    }

    #[test]
    fn comments_survive_writes() {
        let dir = TempDir::new().unwrap();
        let mut yaml: Yaml = config()
            .path_in(dir.path(), "Config")
            .reload(ReloadSetting::Manual)
            .defaults_str("# Top comment\napp:\n  # how fast\n  speed: 5\n")
            .build()
            .unwrap();

        yaml.set("app.speed", 9).unwrap();
        yaml.set("app.mode", "slow").unwrap();

        let raw: String = std::fs::read_to_string(yaml.path()).unwrap();
        assert!(raw.contains("# Top comment"));
        assert!(raw.contains("  # how fast"));

        // And the data itself is intact after a round trip
        let reread: Yaml = Yaml::builder().path_in(dir.path(), "Config").build().unwrap();
        assert_eq!(reread.get_int("app.speed"), 9);
        assert_eq!(reread.get_string("app.mode"), "slow");
    }

    #[test]
    fn skip_comments_drops_them() {
        let dir = TempDir::new().unwrap();
        let mut yaml: Yaml = Yaml::builder()
            .path_in(dir.path(), "Plain")
            .config(ConfigSetting::SkipComments)
            .defaults_str("# dropped on first write\nkey: 1\n")
            .build()
            .unwrap();

        yaml.set("key", 2).unwrap();
        let raw: String = std::fs::read_to_string(yaml.path()).unwrap();
        assert!(!raw.contains('#'));
    }
}
