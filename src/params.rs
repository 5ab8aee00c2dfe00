use serde::{Deserialize, Serialize};

use crate::Value;

/// Key into the parameter bag: a positional index or a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamKey {
    Index(usize),
    Name(String),
}

impl From<usize> for ParamKey {
    fn from(index: usize) -> Self {
        ParamKey::Index(index)
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        ParamKey::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        ParamKey::Name(name)
    }
}

/// Insertion-ordered parameter bag.
///
/// Keys are positional indices or names, values arbitrary JSON values.
/// `insert` replaces in place so a key keeps its original position;
/// `push` appends under the next free index, like appending to an array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    entries: Vec<(ParamKey, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `value` under `key`, replacing in place when the key exists.
    pub fn insert(&mut self, key: impl Into<ParamKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Append `value` under the next free positional index.
    pub fn push(&mut self, value: impl Into<Value>) {
        let index = self.next_index();
        self.entries.push((ParamKey::Index(index), value.into()));
    }

    /// Value stored under `key`, or `None` when absent.
    pub fn get(&self, key: impl Into<ParamKey>) -> Option<&Value> {
        let key = key.into();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: impl Into<ParamKey>) -> Option<&mut Value> {
        let key = key.into();
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    // One past the highest integer key present.
    fn next_index(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|(k, _)| match k {
                ParamKey::Index(i) => Some(i + 1),
                ParamKey::Name(_) => None,
            })
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Self {
            entries: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ParamKey::Index(i), v))
                .collect(),
        }
    }
}

impl<K: Into<ParamKey>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_uses_next_free_index() {
        let mut params = Params::new();
        params.push("a");
        params.insert(5, "b");
        params.push("c");
        assert_eq!(params.get(0), Some(&Value::from("a")));
        assert_eq!(params.get(5), Some(&Value::from("b")));
        assert_eq!(params.get(6), Some(&Value::from("c")));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::new();
        params.insert("first", 1);
        params.insert("second", 2);
        params.insert("first", 10);
        let values: Vec<_> = params.values().cloned().collect();
        assert_eq!(values, vec![Value::from(10), Value::from(2)]);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_absent_key_is_none() {
        let mut params = Params::new();
        params.insert("present", true);
        assert_eq!(params.get("absent"), None);
        assert_eq!(params.get(9), None);
        assert!(params.get_mut("absent").is_none());
    }

    #[test]
    fn test_from_positional_values() {
        let params = Params::from(vec![Value::from("x"), Value::from("y")]);
        assert_eq!(params.get(0), Some(&Value::from("x")));
        assert_eq!(params.get(1), Some(&Value::from("y")));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_collect_named_entries() {
        let params: Params = [("id", 7), ("retries", 3)].into_iter().collect();
        assert_eq!(params.get("id"), Some(&Value::from(7)));
        assert_eq!(params.get("retries"), Some(&Value::from(3)));
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut params = Params::new();
        params.insert("z", 1);
        params.push(2);
        params.insert("a", 3);
        let keys: Vec<_> = params.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                ParamKey::Name("z".into()),
                ParamKey::Index(0),
                ParamKey::Name("a".into()),
            ]
        );
    }
}
