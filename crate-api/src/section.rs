//  SECTION.rs
//    by Milkdrinkers
//
//  Created:
//    14 Feb 2025, 08:58:27
//  Last edited:
//    04 Jun 2025, 17:01:55
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines [`FlatFileSection`], a view of a flat file scoped to a key
//!   prefix.
//

use crate::errors::CrateError;
use crate::flatfile::FlatFile;
use crate::format::Format;
use crate::storage::DataStorage;
use crate::value::Value;


/***** LIBRARY *****/
/// A view of a [`FlatFile`] where every key is resolved below a fixed prefix.
///
/// Obtained through [`FlatFile::section()`]; borrows the file mutably for its
/// lifetime, so changes through the section persist exactly like changes through
/// the file itself.
pub struct FlatFileSection<'f, F: Format> {
    /// The file this section views.
    file: &'f mut FlatFile<F>,
    /// The prefix every key of this section lives below.
    prefix: String,
}

impl<'f, F: Format> FlatFileSection<'f, F> {
    /// Constructor used by [`FlatFile::section()`].
    #[inline]
    pub(crate) fn new(file: &'f mut FlatFile<F>, prefix: String) -> Self { Self { file, prefix } }

    /// Returns the prefix of this section.
    #[inline]
    pub fn prefix(&self) -> &str { &self.prefix }

    /// Returns a view scoped one level deeper.
    #[inline]
    pub fn section(&mut self, prefix: impl AsRef<str>) -> FlatFileSection<'_, F> {
        let prefix: String = self.join(prefix.as_ref());
        FlatFileSection { file: &mut *self.file, prefix }
    }

    /// Resolves a caller key against the section prefix.
    fn join(&self, key: &str) -> String {
        if self.prefix.is_empty() { key.into() } else { format!("{}.{}", self.prefix, key) }
    }
}

impl<'f, F: Format> DataStorage for FlatFileSection<'f, F> {
    type Error = CrateError<F::Error>;

    #[inline]
    fn get_raw(&self, key: &str) -> Option<&Value> { self.file.get_raw(&self.join(key)) }

    #[inline]
    fn set_raw(&mut self, key: &str, value: Value) -> Result<(), Self::Error> { self.file.set_raw(&self.join(key), value) }

    #[inline]
    fn remove(&mut self, key: &str) -> Result<(), Self::Error> { self.file.remove(&self.join(key)) }

    #[inline]
    fn contains(&self, key: &str) -> bool { self.file.contains(&self.join(key)) }

    #[inline]
    fn single_layer_keys(&self) -> Vec<String> { self.file.single_layer_keys_of(&self.prefix) }

    #[inline]
    fn single_layer_keys_of(&self, key: &str) -> Vec<String> { self.file.single_layer_keys_of(&self.join(key)) }

    #[inline]
    fn keys(&self) -> Vec<String> { self.file.keys_of(&self.prefix) }

    #[inline]
    fn keys_of(&self, key: &str) -> Vec<String> { self.file.keys_of(&self.join(key)) }
}
