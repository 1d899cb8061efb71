//  ERRORS.rs
//    by Milkdrinkers
//
//  Created:
//    19 Feb 2025, 10:02:31
//  Last edited:
//    22 Aug 2025, 17:31:59
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines errors that occur in the `crate-json` crate.
//

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FResult};


/***** LIBRARY *****/
/// Defines errors of the JSON back-end.
#[derive(Debug)]
pub enum JsonFormatError {
    /// The file contents are not valid JSON.
    Parse { err: serde_json::Error },
    /// The tree could not be dumped as JSON.
    Serialize { err: serde_json::Error },
    /// The file is valid JSON, but its root is not an object.
    NonObjectRoot,
}
impl Display for JsonFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use JsonFormatError::*;
        match self {
            Parse { .. } => write!(f, "Failed to parse contents as JSON"),
            Serialize { .. } => write!(f, "Failed to serialize data as JSON"),
            NonObjectRoot => write!(f, "Root of the JSON document is not an object"),
        }
    }
}
impl Error for JsonFormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use JsonFormatError::*;
        match self {
            Parse { err } => Some(err),
            Serialize { err } => Some(err),
            NonObjectRoot => None,
        }
    }
}
