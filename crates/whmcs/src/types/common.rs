//! Shared response building blocks

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Platform-assigned identifier.
///
/// The API spells the same identifier as a JSON number in some replies and
/// as a string in others (`"quoteid": 12` vs `"id": "12"`). `Id` keeps the
/// canonical text so the two compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    /// Create an identifier from its text form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the text form.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Numeric value, when the identifier is numeric.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// The platform uses `0` and empty strings for "no record".
    pub fn is_nil(&self) -> bool {
        self.0.is_empty() || self.0 == "0"
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<u64> for Id {
    fn eq(&self, other: &u64) -> bool {
        self.as_u64() == Some(*other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = Id;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an identifier as a number or string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Id, E> {
                if v.fract() == 0.0 {
                    Ok(Id(format!("{v:.0}")))
                } else {
                    Err(E::custom(format!("identifier {v} is not integral")))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Id, E> {
                Ok(Id(v.trim().to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Value of the `result` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    /// The call succeeded
    #[default]
    Success,
    /// The call failed; the HTTP layer turns these into errors before decoding
    Error,
}

impl ResultStatus {
    /// Whether this is `success`.
    pub fn is_success(self) -> bool {
        self == ResultStatus::Success
    }
}

/// Catch-all for fields a typed response does not model.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Reply that carries nothing beyond the `result` discriminator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Ack {
    /// `success`; the envelope check rejects anything else
    pub result: ResultStatus,
    /// Any other fields the platform sent
    #[serde(flatten)]
    pub extra: Extra,
}

/// Send a list of identifiers as one comma-separated parameter.
pub(crate) fn comma_separated<S: Serializer>(ids: &[Id], serializer: S) -> Result<S::Ok, S::Error> {
    let joined: Vec<&str> = ids.iter().map(Id::as_str).collect();
    serializer.serialize_str(&joined.join(","))
}

/// Decode a field that the platform sends as an empty string, `null` or an
/// empty array when there is nothing to report, and as a real value
/// otherwise.
pub(crate) fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Null => Ok(T::default()),
        serde_json::Value::String(s) if s.is_empty() => Ok(T::default()),
        serde_json::Value::Array(a) if a.is_empty() => Ok(T::default()),
        _ => serde_json::from_value(value).map_err(de::Error::custom),
    }
}

/// Decode a list that the platform sends either as an array or, when it
/// holds a single record, as that bare object.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::String(ref s) if s.is_empty() => Ok(Vec::new()),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(de::Error::custom))
            .collect(),
        single => serde_json::from_value(single)
            .map(|item| vec![item])
            .map_err(de::Error::custom),
    }
}

/// Decode a number the platform may send as a JSON string (`"10.00"`).
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => Ok(n.as_f64()),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, got '{s}'"))),
        other => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

/// Decode a count the platform may send as a JSON string (`"3"`).
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a count, got {n}"))),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a count, got '{s}'"))),
        other => Err(de::Error::custom(format!("expected a count, got {other}"))),
    }
}
