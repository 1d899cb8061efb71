//  ERRORS.rs
//    by Milkdrinkers
//
//  Created:
//    11 Feb 2025, 10:42:17
//  Last edited:
//    19 Aug 2025, 14:03:55
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines errors that occur in the `crate-api` crate.
//

use std::error::Error;
use std::fmt::{Debug, Display, Formatter, Result as FResult};
use std::path::PathBuf;


/***** LIBRARY *****/
/// Defines general errors for flat files, generic over the back-end serialization error.
#[derive(Debug)]
pub enum CrateError<E: Debug> {
    /// Failed to create the parent directory of the target file.
    DirCreateError { path: PathBuf, err: std::io::Error },
    /// Failed to create the target file.
    FileCreateError { path: PathBuf, err: std::io::Error },
    /// Failed to read the target file.
    FileReadError { path: PathBuf, err: std::io::Error },
    /// Failed to write the target file.
    FileWriteError { path: PathBuf, err: std::io::Error },
    /// Failed to read the file providing default data.
    DefaultsReadError { path: PathBuf, err: std::io::Error },

    /// Failed to parse the target file with the back-end.
    FileParseError { path: PathBuf, err: E },
    /// Failed to serialize the tree with the back-end.
    DataSerializeError { err: E },

    /// The builder was finalized without a target path.
    MissingPath,
}
impl<E: Error> Display for CrateError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use CrateError::*;
        match self {
            DirCreateError { path, .. } => write!(f, "Failed to create directory '{}'", path.display()),
            FileCreateError { path, .. } => write!(f, "Failed to create file '{}'", path.display()),
            FileReadError { path, .. } => write!(f, "Failed to read file '{}'", path.display()),
            FileWriteError { path, .. } => write!(f, "Failed to write file '{}'", path.display()),
            DefaultsReadError { path, .. } => write!(f, "Failed to read defaults file '{}'", path.display()),

            FileParseError { path, .. } => write!(f, "Failed to parse file '{}'", path.display()),
            DataSerializeError { .. } => write!(f, "Failed to serialize file data"),

            MissingPath => write!(f, "No target path given before build"),
        }
    }
}
impl<E: 'static + Error> Error for CrateError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use CrateError::*;
        match self {
            DirCreateError { err, .. } => Some(err),
            FileCreateError { err, .. } => Some(err),
            FileReadError { err, .. } => Some(err),
            FileWriteError { err, .. } => Some(err),
            DefaultsReadError { err, .. } => Some(err),

            FileParseError { err, .. } => Some(err),
            DataSerializeError { err } => Some(err),

            MissingPath => None,
        }
    }
}



/// Defines errors for typed enum lookups (see [`DataStorage::get_enum()`](crate::storage::DataStorage::get_enum())).
#[derive(Debug)]
pub enum EnumError<E: Debug> {
    /// The requested key does not exist.
    MissingKey { key: String },
    /// The requested key exists but does not hold a string.
    NotAString { key: String },
    /// The string value could not be parsed as the requested enum.
    ParseError { key: String, raw: String, err: E },
}
impl<E: Error> Display for EnumError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use EnumError::*;
        match self {
            MissingKey { key } => write!(f, "Key '{key}' does not exist"),
            NotAString { key } => write!(f, "Key '{key}' does not hold a string value"),
            ParseError { key, raw, .. } => write!(f, "Value '{raw}' of key '{key}' is not a valid variant"),
        }
    }
}
impl<E: 'static + Error> Error for EnumError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use EnumError::*;
        match self {
            MissingKey { .. } => None,
            NotAString { .. } => None,
            ParseError { err, .. } => Some(err),
        }
    }
}
