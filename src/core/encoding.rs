//! JSON encoding for domain values
//!
//! Every response body goes through [`encode`]. The rules:
//! - enumerations encode as their scalar value, never their variant name
//!   (see [`ScalarEnum`] and the `scalar_enum!` macro)
//! - records encode as objects keyed by field name; wrap a value in
//!   [`AsArray`] to emit its fields positionally instead
//! - timezone-aware date/times encode as ISO-8601 with their UTC offset,
//!   naive ones without an offset
//! - `None` encodes as `null`
//! - maps keep insertion order (see [`OrderedMap`])
//!
//! Output is byte-for-byte deterministic for a given input.

use indexmap::IndexMap;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Encode a value as compact JSON text
///
/// Fails only for values outside the supported shape (for example a map
/// with non-string keys), which is a programming error.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// An enumeration whose JSON form is a fixed string value
pub trait ScalarEnum: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn value(self) -> &'static str;

    fn from_value(value: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.value() == value)
    }
}

/// Returned when a string names no variant of a [`ScalarEnum`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {type_name} {value:?}")]
pub struct UnknownVariant {
    pub type_name: &'static str,
    pub value: String,
}

/// Declares an enum together with its [`ScalarEnum`], `Display`, `FromStr`
/// and serde impls, all driven by the listed string values.
macro_rules! scalar_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::core::encoding::ScalarEnum for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::encoding::ScalarEnum::value(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::encoding::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::core::encoding::ScalarEnum>::from_value(s).ok_or_else(|| {
                    $crate::core::encoding::UnknownVariant {
                        type_name: stringify!($name),
                        value: s.to_string(),
                    }
                })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::core::encoding::ScalarEnum::value(*self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                value.parse::<Self>().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use scalar_enum;

/// Emits a record positionally, as a JSON array of its field values
///
/// ```
/// use compstate_http::core::encoding::{encode, AsArray};
///
/// #[derive(serde::Serialize)]
/// struct Pair { first: u8, second: u8 }
///
/// let pair = Pair { first: 1, second: 2 };
/// assert_eq!(encode(&pair).unwrap(), r#"{"first":1,"second":2}"#);
/// assert_eq!(encode(&AsArray(&pair)).unwrap(), "[1,2]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AsArray<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> Serialize for AsArray<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match serde_json::to_value(self.0).map_err(S::Error::custom)? {
            Value::Object(fields) => serializer.collect_seq(fields.into_iter().map(|(_, v)| v)),
            other => other.serialize(serializer),
        }
    }
}

/// String-keyed map that remembers insertion order
///
/// Serializes as a JSON object with keys in insertion order and keeps file
/// order when deserialized. Inserting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedMap<V> {
    entries: IndexMap<String, V>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use std::collections::HashMap;

    scalar_enum! {
        enum Thing {
            Yup => "the-string-value",
            Nope => "another-value",
        }
    }

    #[derive(Serialize)]
    struct Slot {
        start: chrono::DateTime<FixedOffset>,
        end: chrono::DateTime<FixedOffset>,
        label: Option<String>,
    }

    fn slot() -> Slot {
        let offset = FixedOffset::east_opt(3600).unwrap();
        Slot {
            start: offset.with_ymd_and_hms(2014, 4, 26, 13, 0, 0).unwrap(),
            end: offset.with_ymd_and_hms(2014, 4, 26, 13, 5, 0).unwrap(),
            label: None,
        }
    }

    #[test]
    fn test_simple_sequences() {
        assert_eq!(encode(&[1]).unwrap(), "[1]");
        assert_eq!(encode(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_enum_encodes_scalar_value() {
        assert_eq!(encode(&Thing::Yup).unwrap(), r#""the-string-value""#);
        assert_eq!(Thing::Nope.to_string(), "another-value");
    }

    #[test]
    fn test_enum_parses_from_value_only() {
        assert_eq!("the-string-value".parse::<Thing>().unwrap(), Thing::Yup);
        let err = "Yup".parse::<Thing>().unwrap_err();
        assert_eq!(err.type_name, "Thing");
        assert_eq!(err.value, "Yup");
    }

    #[test]
    fn test_enum_deserializes() {
        let thing: Thing = serde_json::from_str(r#""another-value""#).unwrap();
        assert_eq!(thing, Thing::Nope);
        assert!(serde_json::from_str::<Thing>(r#""bees""#).is_err());
    }

    #[test]
    fn test_record_as_object() {
        assert_eq!(
            encode(&slot()).unwrap(),
            r#"{"start":"2014-04-26T13:00:00+01:00","end":"2014-04-26T13:05:00+01:00","label":null}"#
        );
    }

    #[test]
    fn test_record_as_array() {
        assert_eq!(
            encode(&AsArray(&slot())).unwrap(),
            r#"["2014-04-26T13:00:00+01:00","2014-04-26T13:05:00+01:00",null]"#
        );
    }

    #[test]
    fn test_naive_datetime_has_no_offset() {
        let naive = NaiveDate::from_ymd_opt(2014, 4, 26)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        assert_eq!(encode(&naive).unwrap(), r#""2014-04-26T13:00:00""#);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let first = encode(&slot()).unwrap();
        let second = encode(&slot()).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_ordered_map_keeps_insertion_order() {
        let map: OrderedMap<u32> = [("zeta", 1), ("alpha", 2), ("mid", 3)]
            .into_iter()
            .collect();
        assert_eq!(encode(&map).unwrap(), r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_ordered_map_replaces_in_place() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 3);
        assert_eq!(map.len(), 2);
        assert_eq!(encode(&map).unwrap(), r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn test_ordered_map_large_build_keeps_order() {
        let map: OrderedMap<usize> = (0..2000).rev().map(|n| (format!("k{}", n), n)).collect();
        assert_eq!(map.len(), 2000);
        assert_eq!(map.keys().next(), Some("k1999"));
        assert_eq!(map.keys().last(), Some("k0"));
        assert_eq!(map.get("k1000"), Some(&1000));
    }

    #[test]
    fn test_ordered_map_deserializes_in_file_order() {
        let map: OrderedMap<u32> = serde_json::from_str(r#"{"QMC": 3, "GRS": 5}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["QMC", "GRS"]);
        assert_eq!(map.get("GRS"), Some(&5));
    }

    #[test]
    fn test_unsupported_shape_is_an_error() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1u8);
        assert!(encode(&map).is_err());
    }
}
