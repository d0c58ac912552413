pub mod collection;
pub mod dynamo;
pub mod error;
pub mod filter;
pub mod memory;

pub use collection::Collection;
pub use dynamo::DynamoStore;
pub use error::StoreError;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// One persisted record, as stored: a flat JSON object keyed by `id`.
pub type Item = Map<String, Value>;

/// Single-item durable storage with conditional writes, one named collection
/// per entity type. Key uniqueness is enforced by the store's own
/// conditional-write primitive, never by a pre-read check, so two concurrent
/// creates of the same id cannot both succeed.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Write the item only if no item with this key exists.
    /// Fails with [`StoreError::AlreadyExists`] otherwise.
    async fn put_new(&self, collection: &str, id: &str, item: Item) -> Result<(), StoreError>;

    /// Fetch a single item by key.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Item>, StoreError>;

    /// Write the item only if an item with this key already exists.
    /// Fails with [`StoreError::NotFound`] otherwise. No merge logic here;
    /// callers must have read-merged-validated already.
    async fn put_existing(&self, collection: &str, id: &str, item: Item)
        -> Result<(), StoreError>;

    /// Delete the item, failing with [`StoreError::NotFound`] if absent.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Return every item in the collection, unordered and fully materialized.
    /// O(collection size) per call; the only retrieval mechanism for list-all
    /// and non-key search.
    async fn scan(&self, collection: &str) -> Result<Vec<Item>, StoreError>;

    /// Cheap reachability probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
