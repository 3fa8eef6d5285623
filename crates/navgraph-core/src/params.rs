//! Route parameter values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameter values of a destination, keyed by placeholder name.
///
/// Values are stored decoded. Two parameter sets are equal when they hold
/// the same names with the same values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Gets a value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns true if a value exists for the name.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over parameter names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl std::fmt::Display for RouteParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value:?}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_equality_ignores_insertion_order() {
        let a = RouteParams::new().with("name", "John").with("score", "95");
        let b: RouteParams = [("score", "95"), ("name", "John")].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_params_display() {
        let params = RouteParams::new().with("name", "John Doe").with("score", "95");
        assert_eq!(params.to_string(), r#"{name: "John Doe", score: "95"}"#);
        assert_eq!(RouteParams::new().to_string(), "{}");
    }

    #[test]
    fn test_params_serde_as_map() {
        let params = RouteParams::new().with("name", "a/b");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"name":"a/b"}"#);
        let back: RouteParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
