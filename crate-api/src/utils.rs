//  UTILS.rs
//    by Milkdrinkers
//
//  Created:
//    13 Feb 2025, 10:05:31
//  Last edited:
//    04 Jun 2025, 16:40:22
//  Auto updated?
//    Yes
//
//  Description:
//!   Small filesystem helpers used by the flat-file core and the
//!   builders.
//

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;


/***** LIBRARY *****/
/// Creates the parent directories of the given path, if there are any to create.
///
/// # Errors
/// This function errors if the directories could not be created.
pub fn create_parents(path: impl AsRef<Path>) -> Result<(), io::Error> {
    let path: &Path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Creates the given file if it does not exist yet.
///
/// # Returns
/// Whether the file was created by this call.
///
/// # Errors
/// This function errors if the file could not be created.
pub fn touch(path: impl AsRef<Path>) -> Result<bool, io::Error> {
    let path: &Path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    OpenOptions::new().create_new(true).write(true).open(path)?;
    Ok(true)
}

/// Returns whether the given file exists but holds no bytes.
pub fn is_empty_file(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref()).map(|meta| meta.len() == 0).unwrap_or(true)
}
