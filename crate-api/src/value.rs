//  VALUE.rs
//    by Milkdrinkers
//
//  Created:
//    11 Feb 2025, 11:02:48
//  Last edited:
//    21 Aug 2025, 09:17:31
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the [`Value`] type, the node of the unified in-memory
//!   configuration tree that all format back-ends read into and write
//!   from, plus the [`FromValue`] coercion trait backing the typed
//!   getters.
//

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};


/***** LIBRARY *****/
/// The map type used for every nesting level of the configuration tree.
///
/// An [`IndexMap`] so that insertion order survives a load/save roundtrip; the YAML
/// comment preservation of `crate-yaml` relies on this.
pub type Map = IndexMap<String, Value>;



/// A single node in the configuration tree.
///
/// This is the common denominator of what YAML, JSON and TOML can express. Format
/// back-ends convert their own document model into this one on read, and back on
/// write.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// An explicit null / missing value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer number.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A nested map of string keys to values.
    Map(Map),
}

impl Value {
    /// Returns whether this value is [`Value::Null`].
    #[inline]
    pub fn is_null(&self) -> bool { matches!(self, Self::Null) }

    /// Returns the boolean in this value, if it is one.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer in this value, if it is one.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float in this value, if it is one.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string in this value, if it is one.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list in this value, if it is one.
    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the map in this value, if it is one.
    #[inline]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the map in this value mutably, if it is one.
    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns whether this value is a map.
    #[inline]
    pub fn is_map(&self) -> bool { matches!(self, Self::Map(_)) }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(l) => l.serialize(serializer),
            Self::Map(m) => m.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self { Self::Bool(value) }
}
impl From<i8> for Value {
    #[inline]
    fn from(value: i8) -> Self { Self::Int(value as i64) }
}
impl From<i16> for Value {
    #[inline]
    fn from(value: i16) -> Self { Self::Int(value as i64) }
}
impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self { Self::Int(value as i64) }
}
impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self { Self::Int(value) }
}
impl From<u8> for Value {
    #[inline]
    fn from(value: u8) -> Self { Self::Int(value as i64) }
}
impl From<u16> for Value {
    #[inline]
    fn from(value: u16) -> Self { Self::Int(value as i64) }
}
impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self { Self::Int(value as i64) }
}
impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self { Self::Float(value as f64) }
}
impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self { Self::Float(value) }
}
impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self { Self::String(value.into()) }
}
impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self { Self::String(value) }
}
impl From<&String> for Value {
    #[inline]
    fn from(value: &String) -> Self { Self::String(value.clone()) }
}
impl<T: Into<Value>> From<Vec<T>> for Value {
    #[inline]
    fn from(value: Vec<T>) -> Self { Self::List(value.into_iter().map(T::into).collect()) }
}
impl<T: Into<Value>> From<IndexMap<String, T>> for Value {
    #[inline]
    fn from(value: IndexMap<String, T>) -> Self { Self::Map(value.into_iter().map(|(k, v)| (k, v.into())).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}



/// The conversion trait behind every typed getter in [`DataStorage`](crate::storage::DataStorage).
///
/// Implementations coerce where the source formats are sloppy: numbers parse from
/// strings, strings render from any scalar, integers accept integral floats. A
/// failed coercion yields [`None`], never a panic.
pub trait FromValue: Sized {
    /// Attempts to extract an instance of `Self` from the given value.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { Some(value.clone()) }
}
impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}
impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            // Only integral floats that fit; no silent truncation. The upper bound is
            // exclusive: 2^63 is exactly representable as f64, i64::MAX is not.
            Value::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < 9_223_372_036_854_775_808.0 => Some(*f as i64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
impl FromValue for i32 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { i64::from_value(value).and_then(|i| i.try_into().ok()) }
}
impl FromValue for i16 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { i64::from_value(value).and_then(|i| i.try_into().ok()) }
}
impl FromValue for i8 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { i64::from_value(value).and_then(|i| i.try_into().ok()) }
}
impl FromValue for u64 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { i64::from_value(value).and_then(|i| i.try_into().ok()) }
}
impl FromValue for u32 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { i64::from_value(value).and_then(|i| i.try_into().ok()) }
}
impl FromValue for u16 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { i64::from_value(value).and_then(|i| i.try_into().ok()) }
}
impl FromValue for u8 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { i64::from_value(value).and_then(|i| i.try_into().ok()) }
}
impl FromValue for usize {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { i64::from_value(value).and_then(|i| i.try_into().ok()) }
}
impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
impl FromValue for f32 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> { f64::from_value(value).map(|f| f as f32) }
}
impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }
}
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(l) => l.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}
impl<T: FromValue> FromValue for IndexMap<String, T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Map(m) => m.iter().map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v))).collect(),
            _ => None,
        }
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;

    /// Numbers coerce from other numbers and from strings, but never truncate.
    #[test]
    fn coerce_numbers() {
        assert_eq!(i64::from_value(&Value::Int(42)), Some(42));
        assert_eq!(i64::from_value(&Value::Float(42.0)), Some(42));
        assert_eq!(i64::from_value(&Value::Float(42.5)), None);
        assert_eq!(i64::from_value(&Value::String("42".into())), Some(42));
        // 2^63 rounds onto itself as f64 and does not fit an i64; -2^63 does
        assert_eq!(i64::from_value(&Value::Float(9_223_372_036_854_775_808.0)), None);
        assert_eq!(i64::from_value(&Value::Float(-9_223_372_036_854_775_808.0)), Some(i64::MIN));
        assert_eq!(i32::from_value(&Value::Int(i64::MAX)), None);
        assert_eq!(u64::from_value(&Value::Int(-1)), None);
        assert_eq!(f64::from_value(&Value::Int(3)), Some(3.0));
        assert_eq!(f64::from_value(&Value::String("2.5".into())), Some(2.5));
    }

    /// Strings render from any scalar; booleans only parse from their literal forms.
    #[test]
    fn coerce_scalars() {
        assert_eq!(String::from_value(&Value::Int(7)), Some("7".into()));
        assert_eq!(String::from_value(&Value::Bool(true)), Some("true".into()));
        assert_eq!(String::from_value(&Value::Null), None);
        assert_eq!(bool::from_value(&Value::String("true".into())), Some(true));
        assert_eq!(bool::from_value(&Value::String("yes".into())), None);
    }

    /// Lists convert element-wise and fail as a whole when one element fails.
    #[test]
    fn coerce_lists() {
        let list = Value::List(vec![Value::Int(1), Value::String("2".into())]);
        assert_eq!(Vec::<i64>::from_value(&list), Some(vec![1, 2]));
        let mixed = Value::List(vec![Value::Int(1), Value::Bool(true)]);
        assert_eq!(Vec::<i64>::from_value(&mixed), None);
    }
}
