//  ERRORS.rs
//    by Milkdrinkers
//
//  Created:
//    19 Feb 2025, 11:14:08
//  Last edited:
//    22 Aug 2025, 17:52:30
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines errors that occur in the `crate-toml` crate.
//

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FResult};


/***** LIBRARY *****/
/// Defines errors of the TOML back-end.
#[derive(Debug)]
pub enum TomlFormatError {
    /// The file contents are not valid TOML.
    Parse { err: toml::de::Error },
    /// The tree could not be dumped as TOML.
    Serialize { err: toml::ser::Error },
    /// The tree holds a null value, which TOML cannot represent.
    NullValue { key: String },
}
impl Display for TomlFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use TomlFormatError::*;
        match self {
            Parse { .. } => write!(f, "Failed to parse contents as TOML"),
            Serialize { .. } => write!(f, "Failed to serialize data as TOML"),
            NullValue { key } => write!(f, "Key '{key}' holds a null value, which TOML cannot represent"),
        }
    }
}
impl Error for TomlFormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use TomlFormatError::*;
        match self {
            Parse { err } => Some(err),
            Serialize { err } => Some(err),
            NullValue { .. } => None,
        }
    }
}
