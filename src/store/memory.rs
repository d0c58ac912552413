use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Item, ItemStore, StoreError};

/// In-memory [`ItemStore`] with the same conditional-write semantics as the
/// real backend. Used by the test suites and selectable at runtime via
/// `STORE_BACKEND=memory`. Existence checks happen under the write lock, so
/// the create/update/delete preconditions are atomic here too.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Item>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn put_new(&self, collection: &str, id: &str, item: Item) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let items = collections.entry(collection.to_string()).or_default();
        if items.contains_key(id) {
            return Err(StoreError::AlreadyExists);
        }
        items.insert(id.to_string(), item);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Item>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|items| items.get(id))
            .cloned())
    }

    async fn put_existing(
        &self,
        collection: &str,
        id: &str,
        item: Item,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let items = collections.entry(collection.to_string()).or_default();
        if !items.contains_key(id) {
            return Err(StoreError::NotFound);
        }
        items.insert(id.to_string(), item);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let items = collections.entry(collection.to_string()).or_default();
        if items.remove(id).is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Item>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(name: &str) -> Item {
        match json!({ "id": "a", "name": name }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn put_new_rejects_duplicate_key() {
        let store = MemoryStore::new();
        store.put_new("t", "a", item("first")).await.unwrap();

        let err = store.put_new("t", "a", item("second")).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));

        // First write is untouched
        let stored = store.get("t", "a").await.unwrap().unwrap();
        assert_eq!(stored["name"], json!("first"));
    }

    #[tokio::test]
    async fn put_existing_requires_presence() {
        let store = MemoryStore::new();
        let err = store.put_existing("t", "a", item("x")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        store.put_new("t", "a", item("x")).await.unwrap();
        store.put_existing("t", "a", item("y")).await.unwrap();
        let stored = store.get("t", "a").await.unwrap().unwrap();
        assert_eq!(stored["name"], json!("y"));
    }

    #[tokio::test]
    async fn delete_requires_presence() {
        let store = MemoryStore::new();
        store.put_new("t", "a", item("x")).await.unwrap();
        store.delete("t", "a").await.unwrap();

        let err = store.delete("t", "a").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
        assert!(store.get("t", "a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scan_returns_all_items_and_empty_for_unknown() {
        let store = MemoryStore::new();
        assert!(store.scan("t").await.unwrap().is_empty());

        store.put_new("t", "a", item("x")).await.unwrap();
        let mut b = item("y");
        b.insert("id".into(), json!("b"));
        store.put_new("t", "b", b).await.unwrap();

        assert_eq!(store.scan("t").await.unwrap().len(), 2);
    }
}
