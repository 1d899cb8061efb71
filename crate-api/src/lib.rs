//  LIB.rs
//    by Milkdrinkers
//
//  Created:
//    11 Feb 2025, 10:31:02
//  Last edited:
//    22 Aug 2025, 16:10:27
//  Auto updated?
//    Yes
//
//  Description:
//!   The `crate-api` library is the core of Crate: the unified
//!   configuration tree, dotted key-path addressing, typed access with
//!   coercion and default resolution, and the flat-file container that
//!   the format back-ends (`crate-yaml`, `crate-json`, `crate-toml`)
//!   plug into.
//

// Declare modules
pub mod builder;
pub mod convert;
pub mod data;
pub mod errors;
pub mod flatfile;
pub mod format;
pub mod section;
pub mod settings;
pub mod storage;
pub mod utils;
pub mod value;

// Bring the main types into the crate root
pub use builder::CrateBuilder;
pub use data::FileData;
pub use errors::{CrateError, EnumError};
pub use flatfile::{FlatFile, ReloadCallback};
pub use format::{FileType, Format};
pub use section::FlatFileSection;
pub use settings::{ConfigSetting, DataType, ReloadSetting};
pub use storage::DataStorage;
pub use value::{FromValue, Map, Value};
