//  FLATFILE.rs
//    by Milkdrinkers
//
//  Created:
//    13 Feb 2025, 11:29:02
//  Last edited:
//    22 Aug 2025, 15:48:13
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines [`FlatFile`], the container tying a configuration tree to
//!   a file on disk through some format back-end: lifecycle, reload
//!   policies, write-through mutation, path prefixes and sections.
//

use std::borrow::Cow;
use std::fmt::{Debug, Formatter, Result as FResult};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, warn};

use crate::builder::CrateBuilder;
use crate::data::FileData;
use crate::errors::CrateError;
use crate::format::{FileType, Format};
use crate::section::FlatFileSection;
use crate::settings::{ConfigSetting, DataType, ReloadSetting};
use crate::storage::DataStorage;
use crate::value::{Map, Value};


/***** AUXILLARY *****/
/// The callback a flat file invokes after every (re)load, receiving the fresh tree.
pub type ReloadCallback = Box<dyn FnMut(&FileData) + Send>;





/***** LIBRARY *****/
/// A configuration file on disk, parsed into the unified tree of some [`Format`]
/// back-end.
///
/// Mutations write through: after every successful [`set()`](DataStorage::set())
/// or [`remove()`](DataStorage::remove()) the file on disk matches the tree. Reads
/// never touch the disk; call [`FlatFile::reload_if_needed()`] (or rely on the
/// mutating operations, which do) to pick up external changes per the configured
/// [`ReloadSetting`].
pub struct FlatFile<F: Format> {
    /// The path of the backing file.
    path: PathBuf,
    /// The file name, extension included.
    name: String,
    /// The in-memory tree.
    data: FileData,
    /// When to implicitly re-read the backing file.
    reload_setting: ReloadSetting,
    /// Whether writes re-attach comments from the previous contents.
    config_setting: ConfigSetting,
    /// A prefix applied to every key passed to this file.
    path_prefix: Option<String>,
    /// The callback invoked after every (re)load.
    reload_callback: Option<ReloadCallback>,
    /// When the backing file was last parsed.
    last_loaded: Option<SystemTime>,
    _format: PhantomData<F>,
}

impl<F: Format> FlatFile<F> {
    /// Returns a builder for a new flat file of this back-end.
    #[inline]
    pub fn builder() -> CrateBuilder<F> { CrateBuilder::new() }

    /// Constructor used by the builder; the file is expected to exist.
    pub(crate) fn new(
        path: PathBuf,
        data_type: DataType,
        reload_setting: ReloadSetting,
        config_setting: ConfigSetting,
        reload_callback: Option<ReloadCallback>,
    ) -> Self {
        let name: String = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
        Self {
            path,
            name,
            data: FileData::new(data_type),
            reload_setting,
            config_setting,
            path_prefix: None,
            reload_callback,
            last_loaded: None,
            _format: PhantomData,
        }
    }



    /// Returns the path of the backing file.
    #[inline]
    pub fn path(&self) -> &Path { &self.path }

    /// Returns the name of the backing file, extension included.
    #[inline]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the file type of the back-end.
    #[inline]
    pub fn file_type(&self) -> FileType { F::FILE_TYPE }

    /// Returns the ordering guarantee of the tree.
    #[inline]
    pub fn data_type(&self) -> DataType { self.data.data_type() }

    /// Returns when this file implicitly reloads.
    #[inline]
    pub fn reload_setting(&self) -> ReloadSetting { self.reload_setting }

    /// Changes when this file implicitly reloads.
    #[inline]
    pub fn set_reload_setting(&mut self, setting: ReloadSetting) { self.reload_setting = setting; }

    /// Returns whether writes preserve comments.
    #[inline]
    pub fn config_setting(&self) -> ConfigSetting { self.config_setting }

    /// Changes whether writes preserve comments.
    #[inline]
    pub fn set_config_setting(&mut self, setting: ConfigSetting) { self.config_setting = setting; }

    /// Returns the prefix applied to every key, if any.
    #[inline]
    pub fn path_prefix(&self) -> Option<&str> { self.path_prefix.as_deref() }

    /// Sets or clears the prefix applied to every key.
    #[inline]
    pub fn set_path_prefix(&mut self, prefix: Option<String>) { self.path_prefix = prefix; }

    /// Returns the in-memory tree.
    #[inline]
    pub fn file_data(&self) -> &FileData { &self.data }

    /// Returns the in-memory tree mutably.
    ///
    /// Changes made through this reference are not persisted until the next
    /// [`FlatFile::write()`].
    #[inline]
    pub fn file_data_mut(&mut self) -> &mut FileData { &mut self.data }

    /// Resolves a caller key against the configured path prefix.
    fn final_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        match &self.path_prefix {
            Some(prefix) if !prefix.is_empty() => Cow::Owned(format!("{prefix}.{key}")),
            _ => Cow::Borrowed(key),
        }
    }



    /// Re-reads and re-parses the backing file, replacing the in-memory tree.
    ///
    /// An empty file parses as the empty tree. The reload callback, if any, is
    /// invoked afterwards.
    ///
    /// # Errors
    /// This function errors if the file could not be read or parsed.
    pub fn force_reload(&mut self) -> Result<(), CrateError<F::Error>> {
        debug!("Reloading '{}'", self.name);
        let raw: String = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                return Err(CrateError::FileReadError { path: self.path.clone(), err });
            },
        };

        let map: Map = if raw.trim().is_empty() {
            Map::new()
        } else {
            match F::read_data(&raw) {
                Ok(map) => map,
                Err(err) => {
                    return Err(CrateError::FileParseError { path: self.path.clone(), err });
                },
            }
        };
        self.data.load_data(map);
        self.last_loaded = Some(SystemTime::now());

        if let Some(callback) = &mut self.reload_callback {
            callback(&self.data);
        }
        Ok(())
    }

    /// Returns whether the backing file was modified on disk after the last load.
    pub fn has_changed(&self) -> bool {
        let modified: SystemTime = match fs::metadata(&self.path).and_then(|meta| meta.modified()) {
            Ok(modified) => modified,
            Err(err) => {
                warn!("Failed to stat '{}': {}", self.path.display(), err);
                return false;
            },
        };
        match self.last_loaded {
            Some(loaded) => modified > loaded,
            None => true,
        }
    }

    /// Returns whether the configured [`ReloadSetting`] asks for a reload right now.
    #[inline]
    pub fn should_reload(&self) -> bool {
        match self.reload_setting {
            ReloadSetting::Automatic => true,
            ReloadSetting::Intelligent => self.has_changed(),
            ReloadSetting::Manual => false,
        }
    }

    /// Reloads the backing file if the configured [`ReloadSetting`] asks for it.
    ///
    /// # Errors
    /// This function errors if a reload was needed but failed.
    #[inline]
    pub fn reload_if_needed(&mut self) -> Result<(), CrateError<F::Error>> {
        if self.should_reload() { self.force_reload() } else { Ok(()) }
    }



    /// Serializes the tree through the back-end and writes it to the backing file.
    ///
    /// When this file is set to [`ConfigSetting::PreserveComments`], the previous
    /// file contents are handed to the back-end so it can re-attach comments.
    ///
    /// # Errors
    /// This function errors if serialization failed or the file could not be
    /// written.
    pub fn write(&self) -> Result<(), CrateError<F::Error>> {
        let existing: Option<String> =
            if self.config_setting == ConfigSetting::PreserveComments { fs::read_to_string(&self.path).ok() } else { None };

        let raw: String = match F::write_data(self.data.to_map(), existing.as_deref()) {
            Ok(raw) => raw,
            Err(err) => {
                return Err(CrateError::DataSerializeError { err });
            },
        };
        if let Err(err) = fs::write(&self.path, raw) {
            return Err(CrateError::FileWriteError { path: self.path.clone(), err });
        }
        Ok(())
    }

    /// Inserts every leaf of the given tree whose key this file does not have yet,
    /// then persists if anything was inserted. Existing keys win.
    ///
    /// # Errors
    /// This function errors if the merged tree could not be written.
    pub fn add_defaults(&mut self, defaults: Map) -> Result<(), CrateError<F::Error>> {
        let defaults = FileData::from_map(defaults, DataType::Unsorted);
        let mut changed: bool = false;
        for key in defaults.keys() {
            if !self.data.contains_key(&key) {
                if let Some(value) = defaults.get(&key) {
                    self.data.insert(&key, value.clone());
                    changed = true;
                }
            }
        }
        if changed { self.write() } else { Ok(()) }
    }

    /// Drops every entry in the tree and persists the now-empty file.
    ///
    /// # Errors
    /// This function errors if the empty tree could not be written.
    #[inline]
    pub fn clear(&mut self) -> Result<(), CrateError<F::Error>> {
        self.data.clear();
        self.write()
    }



    /// Returns a view of this file scoped to the given key prefix.
    #[inline]
    pub fn section(&mut self, prefix: impl Into<String>) -> FlatFileSection<'_, F> { FlatFileSection::new(self, prefix.into()) }
}

impl<F: Format> DataStorage for FlatFile<F> {
    type Error = CrateError<F::Error>;

    #[inline]
    fn get_raw(&self, key: &str) -> Option<&Value> { self.data.get(&self.final_key(key)) }

    fn set_raw(&mut self, key: &str, value: Value) -> Result<(), Self::Error> {
        self.reload_if_needed()?;
        let key: String = self.final_key(key).into_owned();
        self.data.insert(&key, value);
        self.write()
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.reload_if_needed()?;
        let key: String = self.final_key(key).into_owned();
        self.data.remove(&key);
        self.write()
    }

    #[inline]
    fn contains(&self, key: &str) -> bool { self.data.contains_key(&self.final_key(key)) }

    fn single_layer_keys(&self) -> Vec<String> {
        match &self.path_prefix {
            Some(prefix) if !prefix.is_empty() => self.data.single_layer_keys_of(prefix),
            _ => self.data.single_layer_keys(),
        }
    }

    #[inline]
    fn single_layer_keys_of(&self, key: &str) -> Vec<String> { self.data.single_layer_keys_of(&self.final_key(key)) }

    fn keys(&self) -> Vec<String> {
        match &self.path_prefix {
            Some(prefix) if !prefix.is_empty() => self.data.keys_of(prefix),
            _ => self.data.keys(),
        }
    }

    #[inline]
    fn keys_of(&self, key: &str) -> Vec<String> { self.data.keys_of(&self.final_key(key)) }
}

impl<F: Format> Debug for FlatFile<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        f.debug_struct("FlatFile")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("data", &self.data)
            .field("reload_setting", &self.reload_setting)
            .field("config_setting", &self.config_setting)
            .field("path_prefix", &self.path_prefix)
            .field("reload_callback", &self.reload_callback.is_some())
            .field("last_loaded", &self.last_loaded)
            .finish()
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use tempfile::TempDir;

    use super::*;
    use crate::errors::EnumError;

    /// A minimal JSON-backed format so the core can be exercised without the
    /// back-end crates.
    struct TestFormat;
    impl Format for TestFormat {
        type Error = serde_json::Error;

        const FILE_TYPE: FileType = FileType::Json;

        fn read_data(raw: &str) -> Result<Map, Self::Error> {
            let value: serde_json::Value = serde_json::from_str(raw)?;
            let mut map = Map::new();
            if let serde_json::Value::Object(object) = value {
                for (key, value) in object {
                    map.insert(key, convert(value));
                }
            }
            Ok(map)
        }

        fn write_data(data: &Map, _existing: Option<&str>) -> Result<String, Self::Error> { serde_json::to_string(data) }
    }
    fn convert(value: serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                n.as_i64().map(Value::Int).or_else(|| n.as_f64().map(Value::Float)).unwrap_or(Value::Null)
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(a) => Value::List(a.into_iter().map(convert).collect()),
            serde_json::Value::Object(o) => Value::Map(o.into_iter().map(|(k, v)| (k, convert(v))).collect()),
        }
    }

    #[derive(Debug, Eq, PartialEq)]
    enum Mode {
        Fast,
        Slow,
    }
    #[derive(Debug)]
    struct ModeParseError;
    impl std::fmt::Display for ModeParseError {
        fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "Unknown mode") }
    }
    impl std::error::Error for ModeParseError {}
    impl FromStr for Mode {
        type Err = ModeParseError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "fast" => Ok(Self::Fast),
                "slow" => Ok(Self::Slow),
                _ => Err(ModeParseError),
            }
        }
    }



    /// Building creates the file and an empty tree; missing keys resolve to the
    /// documented defaults.
    #[test]
    fn build_and_default_getters() {
        let dir = TempDir::new().unwrap();
        let mut file: FlatFile<TestFormat> = FlatFile::builder().path_in(dir.path(), "Example").build().unwrap();

        assert_eq!(file.name(), "Example.json");
        assert!(file.path().exists());
        assert_eq!(file.data_type(), DataType::Unsorted);

        assert_eq!(file.get::<Value>("Key"), None);
        assert_eq!(file.get_string("Key"), "");
        assert_eq!(file.get_int("Key"), 0);
        assert_eq!(file.get_float("Key"), 0.0);
        assert!(!file.get_bool("Key"));
        assert_eq!(file.get_or_default("Key", "Default-Value".to_string()), "Default-Value");
        assert_eq!(file.get_or_set_default("Key", "Set-Me".to_string()).unwrap(), "Set-Me");
        // The default is now persisted
        assert!(file.contains("Key"));
        assert_eq!(file.get_string("Key"), "Set-Me");
    }

    /// Mutations write through: a second flat file over the same path sees them.
    #[test]
    fn write_through() {
        let dir = TempDir::new().unwrap();
        let mut file: FlatFile<TestFormat> = FlatFile::builder().path_in(dir.path(), "Example").build().unwrap();

        file.set("database.port", 5432).unwrap();
        file.set("database.debug", true).unwrap();

        let other: FlatFile<TestFormat> = FlatFile::builder().path_in(dir.path(), "Example").build().unwrap();
        assert_eq!(other.get_int("database.port"), 5432);
        assert!(other.get_bool("database.debug"));

        file.remove("database.debug").unwrap();
        let other: FlatFile<TestFormat> = FlatFile::builder().path_in(dir.path(), "Example").build().unwrap();
        assert!(!other.contains("database.debug"));
    }

    /// Sections and path prefixes resolve against the same tree.
    #[test]
    fn sections_and_prefixes() {
        let dir = TempDir::new().unwrap();
        let mut file: FlatFile<TestFormat> = FlatFile::builder().path_in(dir.path(), "Example").build().unwrap();

        {
            let mut section = file.section("app");
            section.set("name", "Test Application").unwrap();
            let mut nested = section.section("limits");
            nested.set("max", 10).unwrap();
        }
        assert_eq!(file.get_string("app.name"), "Test Application");
        assert_eq!(file.get_int("app.limits.max"), 10);
        assert_eq!(file.single_layer_keys_of("app"), vec!["name".to_string(), "limits".to_string()]);

        file.set_path_prefix(Some("app".into()));
        assert_eq!(file.get_string("name"), "Test Application");
        assert_eq!(file.keys(), vec!["name".to_string(), "limits.max".to_string()]);
    }

    /// A manual-reload file keeps serving its snapshot until told otherwise.
    #[test]
    fn manual_reload() {
        let dir = TempDir::new().unwrap();
        let mut file: FlatFile<TestFormat> =
            FlatFile::builder().path_in(dir.path(), "Example").reload(ReloadSetting::Manual).build().unwrap();
        file.set("version", 1).unwrap();

        // Someone else rewrites the file behind our back
        fs::write(file.path(), r#"{"version": 2}"#).unwrap();
        assert_eq!(file.get_int("version"), 1);
        assert!(!file.should_reload());

        file.force_reload().unwrap();
        assert_eq!(file.get_int("version"), 2);
    }

    /// An intelligent-reload file notices an external edit and picks it up on
    /// the next mutating operation.
    #[test]
    fn intelligent_reload() {
        let dir = TempDir::new().unwrap();
        let mut file: FlatFile<TestFormat> =
            FlatFile::builder().path_in(dir.path(), "Example").reload(ReloadSetting::Intelligent).build().unwrap();
        file.set("version", 1).unwrap();

        // Give the mtime room to move past the load timestamp
        std::thread::sleep(std::time::Duration::from_millis(10));
        fs::write(file.path(), r#"{"version": 2, "extra": true}"#).unwrap();
        assert!(file.has_changed());
        assert!(file.should_reload());

        file.set("other", 1).unwrap();
        assert_eq!(file.get_int("version"), 2);
        assert!(file.get_bool("extra"));
        assert_eq!(file.get_int("other"), 1);
    }

    /// An automatic-reload file re-reads on every check, changed or not.
    #[test]
    fn automatic_reload() {
        let dir = TempDir::new().unwrap();
        let mut file: FlatFile<TestFormat> =
            FlatFile::builder().path_in(dir.path(), "Example").reload(ReloadSetting::Automatic).build().unwrap();
        file.set("version", 1).unwrap();

        fs::write(file.path(), r#"{"version": 2}"#).unwrap();
        assert!(file.should_reload());
        file.set("other", 1).unwrap();
        assert_eq!(file.get_int("version"), 2);
    }

    /// Defaults seed new files only; existing content wins.
    #[test]
    fn builder_defaults() {
        let dir = TempDir::new().unwrap();
        let file: FlatFile<TestFormat> =
            FlatFile::builder().path_in(dir.path(), "Seeded").defaults_str(r#"{"app": {"name": "Test"}, "port": 80}"#).build().unwrap();
        assert_eq!(file.get_string("app.name"), "Test");
        assert_eq!(file.get_int("port"), 80);

        // Rebuilding with different defaults leaves the existing content alone
        let file: FlatFile<TestFormat> =
            FlatFile::builder().path_in(dir.path(), "Seeded").defaults_str(r#"{"port": 9999}"#).build().unwrap();
        assert_eq!(file.get_int("port"), 80);

        // A missing defaults file is an error
        let err =
            FlatFile::<TestFormat>::builder().path_in(dir.path(), "Missing").defaults_path(dir.path().join("nope.json")).build();
        assert!(matches!(err, Err(CrateError::DefaultsReadError { .. })));
    }

    /// Tree-level defaults merging: only missing leaves are inserted.
    #[test]
    fn add_defaults_merges_missing() {
        let dir = TempDir::new().unwrap();
        let mut file: FlatFile<TestFormat> = FlatFile::builder().path_in(dir.path(), "Example").build().unwrap();
        file.set("settings.timeout", 30).unwrap();

        let mut defaults = Map::new();
        defaults.insert("settings".into(), Value::Map(Map::from_iter([
            ("timeout".to_string(), Value::Int(99)),
            ("retries".to_string(), Value::Int(3)),
        ])));
        file.add_defaults(defaults).unwrap();

        assert_eq!(file.get_int("settings.timeout"), 30);
        assert_eq!(file.get_int("settings.retries"), 3);
    }

    /// Enum lookups distinguish a missing key from an unparseable value.
    #[test]
    fn enum_errors() {
        let dir = TempDir::new().unwrap();
        let mut file: FlatFile<TestFormat> = FlatFile::builder().path_in(dir.path(), "Example").build().unwrap();

        assert!(matches!(file.get_enum::<Mode>("mode"), Err(EnumError::MissingKey { .. })));
        file.set("mode", true).unwrap();
        assert!(matches!(file.get_enum::<Mode>("mode"), Err(EnumError::NotAString { .. })));
        file.set("mode", "warp").unwrap();
        assert!(matches!(file.get_enum::<Mode>("mode"), Err(EnumError::ParseError { .. })));
        file.set("mode", "fast").unwrap();
        assert_eq!(file.get_enum::<Mode>("mode").unwrap(), Mode::Fast);
    }

    /// The reload callback fires on every (re)load.
    #[test]
    fn reload_callback_fires() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let dir = TempDir::new().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = counter.clone();
        let mut file: FlatFile<TestFormat> = FlatFile::builder()
            .path_in(dir.path(), "Example")
            .reload_callback(move |_data| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        file.force_reload().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    /// Clearing empties both the tree and the backing file.
    #[test]
    fn clear_empties_file() {
        let dir = TempDir::new().unwrap();
        let mut file: FlatFile<TestFormat> = FlatFile::builder().path_in(dir.path(), "Example").build().unwrap();
        file.set("a", 1).unwrap();
        file.clear().unwrap();

        assert!(file.file_data().is_empty());
        let other: FlatFile<TestFormat> = FlatFile::builder().path_in(dir.path(), "Example").build().unwrap();
        assert!(other.file_data().is_empty());
    }
}
