use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::models::Entity;

use super::{Item, ItemStore, StoreError};

/// Typed adapter over the raw [`ItemStore`] for one entity's collection.
/// Handlers construct these from [`crate::state::AppState`]; the store itself
/// is injected, so tests substitute an in-memory fake.
pub struct Collection<T: Entity> {
    store: Arc<dyn ItemStore>,
    collection: String,
    _phantom: PhantomData<T>,
}

impl<T: Entity> Collection<T> {
    pub fn new(store: Arc<dyn ItemStore>, table_prefix: &str) -> Self {
        Self {
            store,
            collection: format!("{}{}", table_prefix, T::COLLECTION),
            _phantom: PhantomData,
        }
    }

    /// Conditional create; [`StoreError::AlreadyExists`] on a duplicate id.
    pub async fn create(&self, record: &T) -> Result<(), StoreError> {
        let item = encode(record)?;
        self.store.put_new(&self.collection, record.id(), item).await
    }

    /// Fetch by id; [`StoreError::NotFound`] if absent.
    pub async fn get(&self, id: &str) -> Result<T, StoreError> {
        match self.store.get(&self.collection, id).await? {
            Some(item) => decode(item),
            None => Err(StoreError::NotFound),
        }
    }

    /// Conditional full-item replace; [`StoreError::NotFound`] if the id
    /// vanished since the caller's read (no merge logic here).
    pub async fn update(&self, record: &T) -> Result<(), StoreError> {
        let item = encode(record)?;
        self.store
            .put_existing(&self.collection, record.id(), item)
            .await
    }

    /// Conditional delete; [`StoreError::NotFound`] if absent.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(&self.collection, id).await
    }

    /// Every record, unordered. Items that fail to decode are skipped with a
    /// log line rather than failing the whole listing.
    pub async fn scan_all(&self) -> Result<Vec<T>, StoreError> {
        let items = self.store.scan(&self.collection).await?;
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match decode::<T>(item) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::error!(collection = %self.collection, "skipping undecodable item: {}", e);
                }
            }
        }
        Ok(records)
    }

    /// Full scan retaining records matching the predicate. An empty result is
    /// a normal outcome, not an error.
    pub async fn find_all<P>(&self, predicate: P) -> Result<Vec<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let mut records = self.scan_all().await?;
        records.retain(|record| predicate(record));
        Ok(records)
    }

    /// Full scan returning the first match, [`StoreError::NotFound`] if none.
    /// Duplicate matches are not an error: the first scan hit wins, and the
    /// ambiguity is logged since scan order is not deterministic.
    pub async fn find_first<P>(&self, predicate: P) -> Result<T, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let matches = self.find_all(predicate).await?;
        if matches.len() > 1 {
            tracing::warn!(
                collection = %self.collection,
                matches = matches.len(),
                "exact-match lookup matched more than one record"
            );
        }
        matches.into_iter().next().ok_or(StoreError::NotFound)
    }
}

fn encode<T: Entity>(record: &T) -> Result<Item, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Request(format!(
            "record serialized to non-object JSON: {}",
            other
        ))),
    }
}

fn decode<T: Entity>(item: Item) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(item))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dentist, DentistPatch};
    use crate::store::filter::{contains_ignore_case, eq_ignore_case};
    use crate::store::MemoryStore;

    fn dentists() -> Collection<Dentist> {
        Collection::new(Arc::new(MemoryStore::new()), "")
    }

    fn dentist(id: &str, name: &str, cro: &str) -> Dentist {
        let mut d = DentistPatch {
            name: Some(name.into()),
            email: Some("d@x.com".into()),
            cro: Some(cro.into()),
            country: Some("BR".into()),
            ..Default::default()
        }
        .into_record();
        d.id = id.into();
        d
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let col = dentists();
        let record = dentist("d-1", "Dr. John Smith", "12345");
        col.create(&record).await.unwrap();

        let fetched = col.get("d-1").await.unwrap();
        assert_eq!(fetched.name, "Dr. John Smith");
        assert_eq!(fetched.cro, "12345");
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let col = dentists();
        let record = dentist("d-1", "A", "1");
        col.create(&record).await.unwrap();
        assert!(matches!(
            col.create(&record).await.unwrap_err(),
            StoreError::AlreadyExists
        ));
    }

    #[tokio::test]
    async fn find_all_is_case_insensitive_and_may_be_empty() {
        let col = dentists();
        col.create(&dentist("1", "Dr. John Smith", "10")).await.unwrap();
        col.create(&dentist("2", "smith, jane", "11")).await.unwrap();
        col.create(&dentist("3", "Johnson", "12")).await.unwrap();

        let hits = col
            .find_all(|d| contains_ignore_case(&d.name, "smith"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);

        let none = col
            .find_all(|d| contains_ignore_case(&d.name, "zzz"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn find_first_not_found_when_no_match() {
        let col = dentists();
        col.create(&dentist("1", "A", "10")).await.unwrap();
        let err = col
            .find_first(|d| eq_ignore_case(&d.cro, "999"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
