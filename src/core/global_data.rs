//! Per-unit-of-work global data
//!
//! A mapping merged into every flushed record. Lives for exactly one unit
//! of work: an external collaborator (typically request middleware) seeds
//! it before user code runs, and the flush clears it so nothing leaks into
//! the next unit.

use serde_json::{Map, Value};

/// Key/value data attached to every record of the current unit of work
#[derive(Debug, Clone, Default)]
pub struct GlobalData {
    data: Map<String, Value>,
}

impl GlobalData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire store.
    pub fn set(&mut self, data: Map<String, Value>) {
        self.data = data;
    }

    /// Add or overwrite keys without discarding existing ones. Anything
    /// other than a JSON object is silently ignored.
    pub fn merge(&mut self, value: Value) {
        if let Value::Object(map) = value {
            self.data.extend(map);
        }
    }

    /// Move the current contents out, leaving the store empty.
    pub fn take(&mut self) -> Map<String, Value> {
        std::mem::take(&mut self.data)
    }

    /// Copy of the current contents; the store keeps them. Used by the
    /// direct-post path, which merges global data without ending the unit
    /// of work.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.data.clone()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_set_replaces_store() {
        let mut store = GlobalData::new();
        store.set(obj(json!({"a": 1, "b": 2})));
        store.set(obj(json!({"c": 3})));

        assert!(store.get("a").is_none());
        assert_eq!(store.get("c"), Some(&json!(3)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_merge_keeps_existing_keys() {
        let mut store = GlobalData::new();
        store.set(obj(json!({"request_uuid": "abc"})));
        store.merge(json!({"user_id": 7}));

        assert_eq!(store.get("request_uuid"), Some(&json!("abc")));
        assert_eq!(store.get("user_id"), Some(&json!(7)));
    }

    #[test]
    fn test_merge_overwrites_colliding_keys() {
        let mut store = GlobalData::new();
        store.set(obj(json!({"k": "old"})));
        store.merge(json!({"k": "new"}));
        assert_eq!(store.get("k"), Some(&json!("new")));
    }

    #[test]
    fn test_merge_non_object_is_noop() {
        let mut store = GlobalData::new();
        store.set(obj(json!({"k": 1})));
        store.merge(json!("not a map"));
        store.merge(json!([1, 2, 3]));
        store.merge(Value::Null);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k"), Some(&json!(1)));
    }

    #[test]
    fn test_snapshot_keeps_store() {
        let mut store = GlobalData::new();
        store.set(obj(json!({"a": 1})));
        let snap = store.snapshot();

        assert_eq!(snap.get("a"), Some(&json!(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_take_leaves_empty() {
        let mut store = GlobalData::new();
        store.set(obj(json!({"a": 1})));
        let taken = store.take();

        assert_eq!(taken.get("a"), Some(&json!(1)));
        assert!(store.is_empty());
    }
}
