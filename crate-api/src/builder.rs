//  BUILDER.rs
//    by Milkdrinkers
//
//  Created:
//    14 Feb 2025, 10:22:13
//  Last edited:
//    22 Aug 2025, 16:02:41
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines [`CrateBuilder`], the fluent constructor for flat files:
//!   target path resolution, default-data seeding and the various
//!   settings.
//

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::errors::CrateError;
use crate::flatfile::{FlatFile, ReloadCallback};
use crate::format::Format;
use crate::settings::{ConfigSetting, DataType, ReloadSetting};
use crate::utils;


/***** HELPERS *****/
/// Where the default/template data of a new file comes from.
enum Defaults {
    /// Read from another file at build time.
    Path(PathBuf),
    /// Given inline.
    Text(String),
}





/***** LIBRARY *****/
/// A fluent builder for [`FlatFile`]s.
///
/// At minimum a target path must be given; [`CrateBuilder::build()`] then creates
/// the file (and its parent directories) when missing, seeds default data into new
/// or empty files, and performs the initial load.
pub struct CrateBuilder<F: Format> {
    /// The resolved target path.
    file_path: Option<PathBuf>,
    /// Template data for new or empty files.
    defaults: Option<Defaults>,
    /// When the file implicitly reloads.
    reload_setting: ReloadSetting,
    /// Whether writes preserve comments.
    config_setting: ConfigSetting,
    /// The ordering guarantee of the tree; derived from the config setting when not
    /// given explicitly.
    data_type: Option<DataType>,
    /// The callback invoked after every (re)load.
    reload_callback: Option<ReloadCallback>,
    _format: PhantomData<F>,
}

impl<F: Format> CrateBuilder<F> {
    /// Creates a builder with all settings at their defaults.
    #[inline]
    pub fn new() -> Self {
        Self {
            file_path: None,
            defaults: None,
            reload_setting: ReloadSetting::default(),
            config_setting: ConfigSetting::default(),
            data_type: None,
            reload_callback: None,
            _format: PhantomData,
        }
    }



    /// Sets the target file path.
    ///
    /// The back-end's extension is appended when the path has none.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        let mut path: PathBuf = path.into();
        if path.extension().is_none() {
            path.set_extension(F::FILE_TYPE.extension());
        }
        self.file_path = Some(path);
        self
    }

    /// Sets the target file as `name` inside `dir`.
    ///
    /// The back-end's extension is appended to the name when missing.
    pub fn path_in(self, dir: impl AsRef<Path>, name: impl AsRef<str>) -> Self {
        let name: &str = name.as_ref();
        let suffix: String = format!(".{}", F::FILE_TYPE.extension());
        let name: String = if name.ends_with(&suffix) { name.into() } else { format!("{name}{suffix}") };
        self.path(dir.as_ref().join(name))
    }

    /// Seeds new or empty target files with the contents of the given file.
    ///
    /// The defaults file must hold valid text for this back-end; it is read when
    /// [`CrateBuilder::build()`] runs and a missing defaults file is an error then.
    #[inline]
    pub fn defaults_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults = Some(Defaults::Path(path.into()));
        self
    }

    /// Seeds new or empty target files with the given text.
    ///
    /// The text must be valid for this back-end.
    #[inline]
    pub fn defaults_str(mut self, raw: impl Into<String>) -> Self {
        self.defaults = Some(Defaults::Text(raw.into()));
        self
    }

    /// Sets when the file implicitly reloads.
    #[inline]
    pub fn reload(mut self, setting: ReloadSetting) -> Self {
        self.reload_setting = setting;
        self
    }

    /// Sets whether writes preserve comments.
    #[inline]
    pub fn config(mut self, setting: ConfigSetting) -> Self {
        self.config_setting = setting;
        self
    }

    /// Sets the ordering guarantee of the tree explicitly.
    ///
    /// When not given, it is derived from the config setting (comment preservation
    /// requires stable order).
    #[inline]
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Sets a callback invoked after every (re)load with the fresh tree.
    #[inline]
    pub fn reload_callback(mut self, callback: impl FnMut(&crate::data::FileData) + Send + 'static) -> Self {
        self.reload_callback = Some(Box::new(callback));
        self
    }



    /// Finalizes the builder into a loaded [`FlatFile`].
    ///
    /// Creates the file and its parent directories when missing, writes the default
    /// data when the file is new or empty, and performs the initial load.
    ///
    /// # Errors
    /// This function errors if no path was given, the file or its directories could
    /// not be created, the defaults could not be read or written, or the initial
    /// load failed.
    pub fn build(self) -> Result<FlatFile<F>, CrateError<F::Error>> {
        let path: PathBuf = match self.file_path {
            Some(path) => path,
            None => {
                return Err(CrateError::MissingPath);
            },
        };

        // Make sure the file exists before anything reads it
        if let Err(err) = utils::create_parents(&path) {
            return Err(CrateError::DirCreateError { path: path.clone(), err });
        }
        let created: bool = match utils::touch(&path) {
            Ok(created) => created,
            Err(err) => {
                return Err(CrateError::FileCreateError { path: path.clone(), err });
            },
        };

        // Seed defaults into files that have no content of their own yet
        if created || utils::is_empty_file(&path) {
            if let Some(defaults) = self.defaults {
                let raw: String = match defaults {
                    Defaults::Path(defaults_path) => match fs::read_to_string(&defaults_path) {
                        Ok(raw) => raw,
                        Err(err) => {
                            return Err(CrateError::DefaultsReadError { path: defaults_path, err });
                        },
                    },
                    Defaults::Text(raw) => raw,
                };
                if let Err(err) = fs::write(&path, raw) {
                    return Err(CrateError::FileWriteError { path: path.clone(), err });
                }
            }
        }

        // Now hand it to the flat file and do the initial load
        let data_type: DataType = self.data_type.unwrap_or_else(|| DataType::for_config_setting(self.config_setting));
        let mut file: FlatFile<F> = FlatFile::new(path, data_type, self.reload_setting, self.config_setting, self.reload_callback);
        file.force_reload()?;
        Ok(file)
    }
}

impl<F: Format> Default for CrateBuilder<F> {
    #[inline]
    fn default() -> Self { Self::new() }
}
