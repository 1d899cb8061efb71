//  STORAGE.rs
//    by Milkdrinkers
//
//  Created:
//    13 Feb 2025, 09:12:53
//  Last edited:
//    21 Aug 2025, 11:36:40
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the [`DataStorage`] trait: the read/write surface shared by
//!   flat files and sections. Implementors provide the key primitives;
//!   the typed getters, default resolution and enum access come for
//!   free.
//

use std::str::FromStr;

use crate::errors::EnumError;
use crate::value::{FromValue, Map, Value};


/***** LIBRARY *****/
/// The read/write surface of anything that stores configuration data under dotted
/// key paths.
///
/// Setters persist immediately (every write leaves the backing file in sync with
/// the tree), which is why they return a [`Result`].
pub trait DataStorage {
    /// The error thrown when persisting a mutation fails.
    type Error: 'static + std::error::Error;


    // Child-provided
    /// Returns the raw value at the given key, if any.
    fn get_raw(&self, key: &str) -> Option<&Value>;
    /// Assigns a raw value to the given key and persists the change.
    ///
    /// # Errors
    /// This function errors if the change could not be written to the backing file.
    fn set_raw(&mut self, key: &str, value: Value) -> Result<(), Self::Error>;
    /// Removes the given key and persists the change.
    ///
    /// # Errors
    /// This function errors if the change could not be written to the backing file.
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
    /// Returns whether the given key exists.
    fn contains(&self, key: &str) -> bool;
    /// Returns the keys of the top layer of this storage.
    fn single_layer_keys(&self) -> Vec<String>;
    /// Returns the keys of the layer below the given key, or the empty set if the
    /// key does not exist or does not hold a map.
    fn single_layer_keys_of(&self, key: &str) -> Vec<String>;
    /// Returns the dotted keys of all leaf values in this storage.
    fn keys(&self) -> Vec<String>;
    /// Returns the dotted keys of all leaf values below the given key, or the empty
    /// set if the key does not exist or does not hold a map.
    fn keys_of(&self, key: &str) -> Vec<String>;


    // Globally deduced
    /// Assigns a value to the given key and persists the change.
    ///
    /// Accepts anything that converts into a [`Value`] (scalars, `&str`, lists,
    /// maps).
    ///
    /// # Errors
    /// This function errors if the change could not be written to the backing file.
    #[inline]
    fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), Self::Error> { self.set_raw(key, value.into()) }

    /// Returns the value at the given key converted to `T`, or [`None`] if the key
    /// is missing or the value does not coerce.
    #[inline]
    fn get<T: FromValue>(&self, key: &str) -> Option<T> { self.get_raw(key).and_then(|value| T::from_value(value)) }

    /// Returns the value at the given key, or the given default if the key is
    /// missing or does not coerce. Never mutates.
    #[inline]
    fn get_or_default<T: FromValue>(&self, key: &str, default: T) -> T { self.get(key).unwrap_or(default) }

    /// Returns the value at the given key, or assigns and returns the given default
    /// if the key is missing.
    ///
    /// A key that exists but does not coerce returns the default without writing it.
    ///
    /// # Errors
    /// This function errors if the default had to be written but could not be.
    fn get_or_set_default<T>(&mut self, key: &str, default: T) -> Result<T, Self::Error>
    where
        T: Clone + FromValue + Into<Value>,
    {
        if self.contains(key) {
            Ok(self.get(key).unwrap_or(default))
        } else {
            self.set(key, default.clone())?;
            Ok(default)
        }
    }

    /// Returns the string at the given key, or the empty string.
    #[inline]
    fn get_string(&self, key: &str) -> String { self.get_or_default(key, String::new()) }

    /// Returns the integer at the given key, or `0`.
    #[inline]
    fn get_int(&self, key: &str) -> i64 { self.get_or_default(key, 0) }

    /// Returns the float at the given key, or `0.0`.
    #[inline]
    fn get_float(&self, key: &str) -> f64 { self.get_or_default(key, 0.0) }

    /// Returns the boolean at the given key, or `false`.
    #[inline]
    fn get_bool(&self, key: &str) -> bool { self.get_or_default(key, false) }

    /// Returns the list at the given key, or the empty list.
    #[inline]
    fn get_list(&self, key: &str) -> Vec<Value> { self.get_or_default(key, Vec::new()) }

    /// Returns the list at the given key with every element coerced to a string, or
    /// the empty list.
    #[inline]
    fn get_string_list(&self, key: &str) -> Vec<String> { self.get_or_default(key, Vec::new()) }

    /// Returns the map at the given key, or the empty map.
    #[inline]
    fn get_map(&self, key: &str) -> Map {
        match self.get_raw(key) {
            Some(Value::Map(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    /// Returns the string at the given key parsed as an enum (anything [`FromStr`]).
    ///
    /// # Errors
    /// [`EnumError::MissingKey`] if the key does not exist, [`EnumError::NotAString`]
    /// if it holds a non-string, or [`EnumError::ParseError`] if the string is not a
    /// valid variant. A missing key and an unparseable value are deliberately
    /// distinct failures.
    fn get_enum<T>(&self, key: &str) -> Result<T, EnumError<<T as FromStr>::Err>>
    where
        T: FromStr,
        <T as FromStr>::Err: 'static + std::error::Error,
    {
        let raw: &Value = match self.get_raw(key) {
            Some(raw) => raw,
            None => {
                return Err(EnumError::MissingKey { key: key.into() });
            },
        };
        let raw: &str = match raw.as_str() {
            Some(raw) => raw,
            None => {
                return Err(EnumError::NotAString { key: key.into() });
            },
        };
        match T::from_str(raw) {
            Ok(value) => Ok(value),
            Err(err) => Err(EnumError::ParseError { key: key.into(), raw: raw.into(), err }),
        }
    }
}
