//! Column values of a registry row, tagged as scalar or list.

use serde::Serialize;

/// A single column value, or the ordered distinct values of a merged group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Scalar(String),
    List(Vec<String>),
}

impl AttrValue {
    /// Build a value from ordered distinct values, collapsing a single value to a scalar.
    pub fn from_distinct(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            AttrValue::Scalar(values.remove(0))
        } else {
            AttrValue::List(values)
        }
    }

    /// Iterate over every contained value in order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            AttrValue::Scalar(value) => std::slice::from_ref(value),
            AttrValue::List(values) => values,
        };
        slice.iter().map(String::as_str)
    }

    /// First value in order, used where the remote API takes a single string.
    pub fn first(&self) -> Option<&str> {
        self.values().next()
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Scalar(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Scalar(value)
    }
}

/// Ordered column → value map.
///
/// Keeps insertion order so a parsed row lists its columns in header order and a
/// merged record lists them in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a column value. A new column is appended at the end.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_distinct_collapses_single_value() {
        assert_eq!(
            AttrValue::from_distinct(vec!["a".to_string()]),
            AttrValue::Scalar("a".to_string())
        );
        assert_eq!(
            AttrValue::from_distinct(vec!["a".to_string(), "b".to_string()]),
            AttrValue::List(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_insert_preserves_order_and_replaces() {
        let mut attrs = Attributes::new();
        attrs.insert("userid", "100");
        attrs.insert("domain", "a");
        attrs.insert("userid", "101");

        let keys: Vec<&str> = attrs.keys().collect();
        assert_eq!(keys, vec!["userid", "domain"]);
        assert_eq!(attrs.get("userid"), Some(&AttrValue::from("101")));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut attrs = Attributes::new();
        attrs.insert("userid", "100");
        attrs.insert(
            "domain",
            AttrValue::List(vec!["a".to_string(), "b".to_string()]),
        );

        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"userid":"100","domain":["a","b"]}"#);
    }
}
