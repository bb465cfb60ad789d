//! Scenario-scoped key/value memory for passing entities between steps

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::Arc;

use cms_core::{CmsError, Result};

type Value = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct SharedStorage {
    values: HashMap<String, Value>,
    latest_key: Option<String>,
}

impl std::fmt::Debug for SharedStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("SharedStorage")
            .field("keys", &keys)
            .field("latest_key", &self.latest_key)
            .finish()
    }
}

impl SharedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        self.values.insert(key.clone(), Arc::new(value));
        self.latest_key = Some(key);
    }

    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| CmsError::MissingSharedValue {
                key: key.to_string(),
            })?;
        Value::clone(value)
            .downcast::<T>()
            .map_err(|_| CmsError::SharedValueTypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The value stored by the most recent `set`
    pub fn latest_resource<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        let key = self
            .latest_key
            .as_deref()
            .ok_or_else(|| CmsError::MissingSharedValue {
                key: "latest resource".to_string(),
            })?;
        self.get(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.latest_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_core::Section;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn stores_and_returns_typed_values() {
        let mut storage = SharedStorage::new();
        storage.set("section", Section::new("blog", "Blog"));

        let section = assert_ok!(storage.get::<Section>("section"));
        assert_eq!(section.code, "blog");
        assert!(storage.has("section"));
    }

    #[test]
    fn missing_key_is_a_precondition_failure() {
        let storage = SharedStorage::new();
        let err = assert_err!(storage.get::<Section>("section"));
        assert!(matches!(err, CmsError::MissingSharedValue { key } if key == "section"));
    }

    #[test]
    fn wrong_type_is_reported() {
        let mut storage = SharedStorage::new();
        storage.set("section", "not a section".to_string());
        assert!(matches!(
            storage.get::<Section>("section"),
            Err(CmsError::SharedValueTypeMismatch { .. })
        ));
    }

    #[test]
    fn latest_resource_and_clear() {
        let mut storage = SharedStorage::new();
        assert!(storage.latest_resource::<Section>().is_err());

        storage.set("first", Section::new("a", "A"));
        storage.set("second", Section::new("b", "B"));
        assert_eq!(storage.latest_resource::<Section>().unwrap().code, "b");

        storage.clear();
        assert!(!storage.has("first"));
        assert!(storage.latest_resource::<Section>().is_err());
    }
}
