//  FORMAT.rs
//    by Milkdrinkers
//
//  Created:
//    12 Feb 2025, 14:55:10
//  Last edited:
//    19 Aug 2025, 14:21:37
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the [`Format`] trait, the seam between the core and the
//!   per-format back-end crates, plus the [`FileType`] extension enum.
//

use std::error::Error;
use std::path::Path;

use crate::value::Map;


/***** LIBRARY *****/
/// Enumerates the file formats known to the library.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FileType {
    /// YAML files (`.yml`).
    Yaml,
    /// JSON files (`.json`).
    Json,
    /// TOML files (`.toml`).
    Toml,
}

impl FileType {
    /// Returns the file extension of this type, without the leading dot.
    #[inline]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    /// Resolves a file type from an extension (without the leading dot), case-insensitively.
    pub fn from_extension(extension: impl AsRef<str>) -> Option<Self> {
        match extension.as_ref().to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Resolves a file type from the extension of the given path.
    #[inline]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref().extension().and_then(|ext| ext.to_str()).and_then(Self::from_extension)
    }
}



/// Defines an interface to some serializer/deserializer a back-end crate provides
/// for [`FlatFile`](crate::flatfile::FlatFile)s.
///
/// Implementors are stateless; the flat file owns the path and the tree and calls
/// in here for the text conversion only.
pub trait Format {
    /// The error type thrown by this back-end's conversions.
    type Error: 'static + Error;

    /// The file type this back-end handles.
    const FILE_TYPE: FileType;


    /// Parses raw file contents into a configuration tree.
    ///
    /// An empty document parses as the empty tree.
    ///
    /// # Arguments
    /// - `raw`: The raw text to parse.
    ///
    /// # Returns
    /// The root [`Map`] of the parsed tree.
    ///
    /// # Errors
    /// This function errors if the text is not valid for this format, or its root is
    /// not a map.
    fn read_data(raw: &str) -> Result<Map, Self::Error>;

    /// Serializes a configuration tree to text.
    ///
    /// # Arguments
    /// - `data`: The root [`Map`] of the tree to serialize.
    /// - `existing`: The previous contents of the backing file, passed when the flat
    ///   file wants comments preserved. Back-ends without comment support ignore it.
    ///
    /// # Returns
    /// The serialized text, ready to be written to disk.
    ///
    /// # Errors
    /// This function errors if the tree contains something this format cannot
    /// represent.
    fn write_data(data: &Map, existing: Option<&str>) -> Result<String, Self::Error>;
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filetype_extensions() {
        assert_eq!(FileType::from_extension("yml"), Some(FileType::Yaml));
        assert_eq!(FileType::from_extension("YAML"), Some(FileType::Yaml));
        assert_eq!(FileType::from_extension("json"), Some(FileType::Json));
        assert_eq!(FileType::from_extension("ini"), None);
        assert_eq!(FileType::from_path("dir/config.toml"), Some(FileType::Toml));
        assert_eq!(FileType::from_path("no_extension"), None);
    }
}
