//  CONVERT.rs
//    by Milkdrinkers
//
//  Created:
//    17 Feb 2025, 09:40:35
//  Last edited:
//    04 Jun 2025, 17:15:28
//  Auto updated?
//    Yes
//
//  Description:
//!   Copying the full contents of one flat file into another, across
//!   back-ends.
//

use crate::errors::CrateError;
use crate::flatfile::FlatFile;
use crate::format::Format;


/***** LIBRARY *****/
/// Replaces the destination's tree with a copy of the source's and persists the
/// destination.
///
/// The back-ends may differ, which makes this the format conversion: load a YAML
/// file, copy it into a JSON flat file, and the data is rewritten as JSON.
///
/// # Arguments
/// - `source`: The flat file to copy from; not modified.
/// - `destination`: The flat file to copy into; its previous contents are dropped.
///
/// # Errors
/// This function errors if the destination could not be written, or if its back-end
/// cannot represent a value of the source (e.g. a null into TOML).
pub fn copy_all_data<A: Format, B: Format>(source: &FlatFile<A>, destination: &mut FlatFile<B>) -> Result<(), CrateError<B::Error>> {
    destination.file_data_mut().load_data(source.file_data().to_map().clone());
    destination.write()
}
