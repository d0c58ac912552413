use thiserror::Error;

/// Errors from the item store and its typed adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Conditional create failed: an item with this key already exists.
    #[error("item already exists")]
    AlreadyExists,

    /// No item with this key (get, conditional update, conditional delete,
    /// or an exact-match search with no hit).
    #[error("item not found")]
    NotFound,

    #[error("item serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store communication failure. Surfaced to clients as a generic
    /// internal error; the detail is only logged.
    #[error("store request failed: {0}")]
    Request(String),
}
