//  ERRORS.rs
//    by Milkdrinkers
//
//  Created:
//    18 Feb 2025, 09:12:44
//  Last edited:
//    22 Aug 2025, 16:31:08
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines errors that occur in the `crate-yaml` crate.
//

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FResult};


/***** LIBRARY *****/
/// Defines errors of the YAML back-end.
#[derive(Debug)]
pub enum YamlFormatError {
    /// The file contents are not valid YAML.
    Parse { err: serde_yaml::Error },
    /// The tree could not be dumped as YAML.
    Serialize { err: serde_yaml::Error },
    /// The file is valid YAML, but its root is not a mapping.
    NonMapRoot,
}
impl Display for YamlFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use YamlFormatError::*;
        match self {
            Parse { .. } => write!(f, "Failed to parse contents as YAML"),
            Serialize { .. } => write!(f, "Failed to serialize data as YAML"),
            NonMapRoot => write!(f, "Root of the YAML document is not a mapping"),
        }
    }
}
impl Error for YamlFormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use YamlFormatError::*;
        match self {
            Parse { err } => Some(err),
            Serialize { err } => Some(err),
            NonMapRoot => None,
        }
    }
}
