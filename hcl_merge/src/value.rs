//! Dynamically-typed configuration tree shared by every pipeline stage.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

/// Ordered mapping from key to value.
///
/// Iteration follows insertion order, which keeps encoded and rendered output
/// deterministic. Equality ignores order.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A decoded configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// A string scalar.
    String(String),
    /// A numeric scalar, integral or floating point.
    Number(Number),
    /// A boolean scalar.
    Bool(bool),
    /// An explicit `null`.
    Null,
    /// An ordered sequence of values.
    List(Vec<ConfigValue>),
    /// A nested mapping.
    Map(ConfigMap),
}

impl ConfigValue {
    /// Returns `true` when the value is the zero value of its type.
    ///
    /// Empty values are `""`, numeric zero, `false`, `[]`, `{}` and `null`.
    /// A source value that is empty never overrides a destination value.
    ///
    /// ```rust
    /// use hcl_merge::ConfigValue;
    ///
    /// assert!(ConfigValue::from("").is_empty());
    /// assert!(ConfigValue::from(0_i64).is_empty());
    /// assert!(!ConfigValue::from("svc-a").is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::String(text) => text.is_empty(),
            Self::Number(number) => is_zero(number),
            Self::Bool(flag) => !flag,
            Self::Null => true,
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
        }
    }

    /// Short name of the variant, used in logs and error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Borrows the nested map, if this value is one.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Consumes the value, returning the nested map if this value is one.
    #[must_use]
    pub fn into_map(self) -> Option<ConfigMap> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

fn is_zero(number: &Number) -> bool {
    number.as_u64() == Some(0)
        || number.as_i64() == Some(0)
        || number.as_f64().is_some_and(|value| value == 0.0)
}

impl Serialize for ConfigValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::String(text) => serializer.serialize_str(text),
            Self::Number(number) => number.serialize(serializer),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Null => serializer.serialize_unit(),
            Self::List(items) => items.serialize(serializer),
            Self::Map(entries) => entries.serialize(serializer),
        }
    }
}

impl From<JsonValue> for ConfigValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(flag) => Self::Bool(flag),
            JsonValue::Number(number) => Self::Number(number),
            JsonValue::String(text) => Self::String(text),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, entry)| (key, Self::from(entry)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for ConfigValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<Self>> for ConfigValue {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(value: ConfigMap) -> Self {
        Self::Map(value)
    }
}
