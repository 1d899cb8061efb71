//  SETTINGS.rs
//    by Milkdrinkers
//
//  Created:
//    12 Feb 2025, 13:20:44
//  Last edited:
//    04 Jun 2025, 16:12:08
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the settings that tune a flat file's behavior: when it
//!   reloads, whether comments survive a write and what ordering the
//!   tree guarantees.
//


/***** LIBRARY *****/
/// Defines when a flat file implicitly re-reads its backing file.
///
/// Consulted by [`FlatFile::reload_if_needed()`](crate::flatfile::FlatFile::reload_if_needed()),
/// which mutating operations call before applying their change.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReloadSetting {
    /// Reload on every check.
    Automatic,
    /// Reload when the backing file changed on disk since the last load.
    Intelligent,
    /// Never reload implicitly; only on [`FlatFile::force_reload()`](crate::flatfile::FlatFile::force_reload()).
    Manual,
}

impl Default for ReloadSetting {
    #[inline]
    fn default() -> Self { Self::Intelligent }
}



/// Defines whether comments in the backing file survive a write.
///
/// Only the YAML back-end can honor [`ConfigSetting::PreserveComments`]; the other
/// formats ignore the setting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSetting {
    /// Re-attach the comments of the previous file contents when writing.
    PreserveComments,
    /// Write the tree as-is, dropping any comments.
    SkipComments,
}

impl Default for ConfigSetting {
    #[inline]
    fn default() -> Self { Self::SkipComments }
}



/// Defines the ordering guarantee of the configuration tree.
///
/// Both variants are backed by the same order-preserving map; [`DataType::Unsorted`]
/// merely promises nothing about iteration order, while [`DataType::Sorted`]
/// guarantees insertion order, which comment preservation depends on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataType {
    /// Keys iterate in insertion order.
    Sorted,
    /// No ordering guarantee.
    Unsorted,
}

impl DataType {
    /// Returns the data type the given config setting requires.
    ///
    /// Comment preservation needs stable key order to re-attach comments to the right
    /// lines; everything else does fine without a guarantee.
    #[inline]
    pub fn for_config_setting(setting: ConfigSetting) -> Self {
        match setting {
            ConfigSetting::PreserveComments => Self::Sorted,
            ConfigSetting::SkipComments => Self::Unsorted,
        }
    }

    /// Returns whether this data type guarantees insertion order.
    #[inline]
    pub fn is_sorted(&self) -> bool { matches!(self, Self::Sorted) }
}

impl Default for DataType {
    #[inline]
    fn default() -> Self { Self::Unsorted }
}
