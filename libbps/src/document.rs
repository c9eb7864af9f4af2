//! Key/value document produced by a parse.

use std::fmt;

use indexmap::IndexMap;

use crate::value::Value;

/// Receiver of parsed statements.
///
/// The parser calls [`DocumentSink::add`] exactly once per top-level
/// `key: value;` statement, in source order.
pub trait DocumentSink {
    fn add(&mut self, key: String, value: Value);
}

/// Insertion-ordered mapping from key to value.
///
/// Adding an existing key replaces its value and keeps its position.
#[derive(Clone, Default, PartialEq)]
pub struct Document {
    entries: IndexMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Remove a key, returning its value. Later entries keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }
}

impl DocumentSink for Document {
    fn add(&mut self, key: String, value: Value) {
        self.entries.insert(key, value);
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.add(k.into(), v.into());
        }
        doc
    }
}

impl DocumentSink for Vec<(String, Value)> {
    fn add(&mut self, key: String, value: Value) {
        self.push((key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let doc: Document = [("b", 1), ("a", 2), ("c", 3)].into_iter().collect();
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(doc.get("a"), Some(&Value::Integer(2)));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let mut doc = Document::new();
        doc.add("x".into(), Value::Integer(1));
        doc.add("y".into(), Value::Integer(2));
        doc.add("x".into(), Value::Bool(true));
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(doc.get("x"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut doc: Document = [("a", 1), ("b", 2), ("c", 3), ("d", 4)].into_iter().collect();
        assert_eq!(doc.remove("b"), Some(Value::Integer(2)));
        assert_eq!(doc.remove("b"), None);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "c", "d"]);
        assert_eq!(doc.get("c"), Some(&Value::Integer(3)));
        assert!(!doc.contains_key("b"));
    }

    #[test]
    fn test_readd_after_remove_goes_last() {
        let mut doc: Document = [("a", 1), ("b", 2)].into_iter().collect();
        doc.remove("a");
        doc.add("a".into(), Value::Integer(9));
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_into_iter_is_ordered() {
        let doc: Document = [("z", 1), ("a", 2)].into_iter().collect();
        let pairs: Vec<(String, Value)> = doc.into_iter().collect();
        assert_eq!(
            pairs,
            vec![("z".to_string(), Value::Integer(1)), ("a".to_string(), Value::Integer(2))]
        );
    }

    #[test]
    fn test_debug_is_ordered_map() {
        let doc: Document = [("k", Value::from("v")), ("n", Value::Null)]
            .into_iter()
            .collect();
        assert_eq!(format!("{:?}", doc), r#"{"k": "v", "n": null}"#);
    }

    #[test]
    fn test_vec_sink_keeps_every_add() {
        let mut sink: Vec<(String, Value)> = Vec::new();
        sink.add("a".into(), Value::Integer(1));
        sink.add("a".into(), Value::Integer(2));
        assert_eq!(sink.len(), 2);
    }
}
