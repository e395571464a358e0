//! Parameter bags.
//!
//! A [`Params`] value is the insertion-ordered mapping every remote call
//! carries. Values are [`ParamValue`]s: scalars, arrays, nested maps, or
//! `Null` (which the transport omits from the wire entirely).

use std::fmt;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

// ============================================================================
// Param Value
// ============================================================================

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Explicitly absent. Never sent.
    Null,
    /// Boolean flag, sent as `1` / `0`.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
    /// Array value.
    List(Vec<ParamValue>),
    /// Nested object value.
    Map(Params),
}

impl ParamValue {
    /// Returns true for [`ParamValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders a scalar the way it appears on the wire.
    ///
    /// Returns `None` for `Null`, NaN, infinities, arrays and maps.
    pub fn render_scalar(&self) -> Option<String> {
        match self {
            Self::Bool(true) => Some("1".to_string()),
            Self::Bool(false) => Some("0".to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) if f.is_finite() => Some(f.to_string()),
            Self::Str(s) => Some(s.clone()),
            Self::Float(_) | Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::Int)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::Int)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

/// NaN and infinities have no wire form and become [`ParamValue::Null`].
impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Float(value)
        } else {
            Self::Null
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        Self::Str(value.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue> + Clone> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Params> for ParamValue {
    fn from(value: Params) -> Self {
        Self::Map(value)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Str(n.to_string())),
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// Params
// ============================================================================

/// Insertion-ordered mapping of parameter names to values.
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter and returns the bag (builder style).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a parameter only when `value` is `Some`.
    #[must_use]
    pub fn with_opt<V: Into<ParamValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Inserts a parameter, returning the previous value for that key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();

        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }

        self.entries.push((key, value));
        None
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if `key` is present, even when its value is `Null`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns true if `key` is present with a non-null value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_null())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries, including `Null` ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl TryFrom<serde_json::Value> for Params {
    type Error = CoreError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match ParamValue::from(value) {
            ParamValue::Map(params) => Ok(params),
            ParamValue::Null => Ok(Self::new()),
            other => Err(CoreError::InvalidParams(format!(
                "expected an object, got {other:?}"
            ))),
        }
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = Params;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of parameter names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Params, A::Error> {
                let mut params = Params::new();
                while let Some((key, value)) = access.next_entry::<String, ParamValue>()? {
                    params.insert(key, value);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParamsVisitor)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::new().with("a", 1).with("b", 2).with("c", 3);
        let old = params.insert("b", "two");

        assert_eq!(old, Some(ParamValue::Int(2)));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(params.get("b"), Some(&ParamValue::Str("two".into())));
    }

    #[test]
    fn test_with_opt_skips_none() {
        let params = Params::new()
            .with_opt("segment", None::<String>)
            .with_opt("flat", Some(true));

        assert!(!params.contains_key("segment"));
        assert_eq!(params.get("flat"), Some(&ParamValue::Bool(true)));
    }

    #[test]
    fn test_is_set_ignores_null() {
        let params = Params::new().with("idSite", None::<u32>).with("period", "day");

        assert!(params.contains_key("idSite"));
        assert!(!params.is_set("idSite"));
        assert!(params.is_set("period"));
    }

    #[test]
    fn test_remove() {
        let mut params = Params::new().with("a", 1).with("b", 2);
        assert_eq!(params.remove("a"), Some(ParamValue::Int(1)));
        assert_eq!(params.remove("a"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_render_scalar() {
        assert_eq!(ParamValue::Bool(true).render_scalar().as_deref(), Some("1"));
        assert_eq!(ParamValue::Bool(false).render_scalar().as_deref(), Some("0"));
        assert_eq!(ParamValue::Int(-4).render_scalar().as_deref(), Some("-4"));
        assert_eq!(ParamValue::Float(1.5).render_scalar().as_deref(), Some("1.5"));
        assert_eq!(ParamValue::Null.render_scalar(), None);
        assert_eq!(ParamValue::from(vec![1, 2]).render_scalar(), None);
    }

    #[test]
    fn test_non_finite_floats_have_no_wire_form() {
        assert_eq!(ParamValue::from(f64::NAN), ParamValue::Null);
        assert_eq!(ParamValue::from(f64::INFINITY), ParamValue::Null);
        assert_eq!(ParamValue::from(f32::NEG_INFINITY), ParamValue::Null);
        assert_eq!(ParamValue::from(0.25_f64), ParamValue::Float(0.25));
        assert_eq!(ParamValue::Float(f64::NAN).render_scalar(), None);
    }

    #[test]
    fn test_large_unsigned_falls_back_to_string() {
        assert_eq!(ParamValue::from(u64::MAX), ParamValue::Str(u64::MAX.to_string()));
        assert_eq!(ParamValue::from(7u64), ParamValue::Int(7));
    }

    #[test]
    fn test_from_json_value() {
        let value = serde_json::json!({"idSites": [1, 2], "flat": true, "segment": null});
        let params = Params::try_from(value).unwrap();

        assert_eq!(
            params.get("idSites"),
            Some(&ParamValue::List(vec![ParamValue::Int(1), ParamValue::Int(2)]))
        );
        assert_eq!(params.get("flat"), Some(&ParamValue::Bool(true)));
        assert_eq!(params.get("segment"), Some(&ParamValue::Null));
    }

    #[test]
    fn test_from_json_rejects_scalars() {
        assert!(Params::try_from(serde_json::json!(42)).is_err());
        assert!(Params::try_from(serde_json::json!(null)).unwrap().is_empty());
    }
}
