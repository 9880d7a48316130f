//! Flat parameter mappings sent to remote procedures
//!
//! Every call is a form-encoded POST; [`Params`] is the ordered list of named
//! values that becomes that form (minus credentials and `action`, which the
//! HTTP layer adds).

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text, including pre-encoded blobs such as base64 line items
    Str(String),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean, sent as `true` / `false`
    Bool(bool),
}

impl ParamValue {
    /// Form representation of the value.
    pub fn to_form_value(&self) -> String {
        self.to_string()
    }

    /// Text content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Float(n) => write!(f, "{n}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(f64::from(value))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => ParamValue::Int(n),
            Err(_) => ParamValue::Str(value.to_string()),
        }
    }
}

impl From<crate::types::Id> for ParamValue {
    fn from(value: crate::types::Id) -> Self {
        ParamValue::Str(value.into_string())
    }
}

impl From<&crate::types::Id> for ParamValue {
    fn from(value: &crate::types::Id) -> Self {
        ParamValue::Str(value.as_str().to_string())
    }
}

/// How repeated fields carry their index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStyle {
    /// `name[0]`, `name[1]`, …
    Bracket,
    /// `name0`, `name1`, …
    Suffix,
}

impl IndexStyle {
    /// Render the key for `name` at `index`.
    pub fn key(self, name: &str, index: usize) -> String {
        match self {
            IndexStyle::Bracket => format!("{name}[{index}]"),
            IndexStyle::Suffix => format!("{name}{index}"),
        }
    }
}

/// Ordered, string-keyed parameter mapping for one remote call.
///
/// Inserting a key that already exists replaces its value in place, so the
/// original ordering is kept.
///
/// # Example
///
/// ```rust
/// use whmcs::Params;
///
/// let params = Params::new()
///     .with("quoteid", 42)
///     .with("subject", "updated");
///
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.get("quoteid").map(|v| v.to_string()), Some("42".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Insert a value only when it is present.
    pub fn insert_opt<V: Into<ParamValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Insert an indexed value such as `pid[0]` or `itemamount0`.
    pub fn insert_indexed(
        &mut self,
        name: &str,
        index: usize,
        style: IndexStyle,
        value: impl Into<ParamValue>,
    ) -> &mut Self {
        self.insert(style.key(name, index), value)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Append every entry of `other`, replacing duplicates.
    pub fn extend(&mut self, other: Params) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Form pairs in insertion order.
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_form_value()))
            .collect()
    }

    /// Build a mapping from any struct that serializes to a flat JSON object.
    ///
    /// `null` fields are skipped. Nested objects or arrays are rejected
    /// because the platform only accepts flat forms; indexed fields must be
    /// added with [`Params::insert_indexed`].
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)?;
        let serde_json::Value::Object(map) = json else {
            return Err(Error::InvalidRequest(
                "request parameters must serialize to an object".to_string(),
            ));
        };

        let mut params = Params::new();
        for (key, value) in map {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::Bool(b) => {
                    params.insert(key, b);
                }
                serde_json::Value::String(s) => {
                    params.insert(key, s);
                }
                serde_json::Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        params.insert(key, i);
                    } else if let Some(f) = n.as_f64() {
                        params.insert(key, f);
                    } else {
                        params.insert(key, n.to_string());
                    }
                }
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(Error::InvalidRequest(format!(
                        "parameter '{key}' is nested; the API only accepts flat values"
                    )));
                }
            }
        }
        Ok(params)
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
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
