//! InMemoryStateStore - 開発用の永続化先
//!
//! namespace ごとに HashMap を持つだけの key-value。

use std::collections::HashMap;
use std::sync::Mutex;

use crate::ports::{StateStore, StoreError};

/// InMemoryStateStore はプロセス内の StateStore
///
/// # 実装詳細
/// - HashMap<namespace, HashMap<key, value>>
/// - Mutex が poison した場合は Unavailable を返す
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    namespaces: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStateStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, StoreError> {
        let namespaces = self
            .namespaces
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Get failed: {}", e)))?;
        Ok(namespaces
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    fn set(&self, namespace: &str, key: &str, value: String) -> Result<(), StoreError> {
        let mut namespaces = self
            .namespaces
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Set failed: {}", e)))?;
        namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = InMemoryStateStore::new();
        assert_eq!(store.get("sas", "a-05").unwrap(), None);

        store.set("sas", "a-05", "[1]".to_string()).unwrap();
        store.set("sas", "a-05", "[2]".to_string()).unwrap();

        assert_eq!(store.get("sas", "a-05").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.get("other", "a-05").unwrap(), None);
    }
}
