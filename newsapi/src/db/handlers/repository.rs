//! Base repository trait for database operations.

/// Contains the Repository trait.
///
/// A repository is the data access layer for one postgres table. It provides
/// methods for creating, reading and listing entities with simple filters.
/// Mutations that only some tables support (vote increments, deletes) live on
/// the concrete repositories.
use crate::db::errors::Result;

/// Base repository trait providing common database operations
///
/// This trait has separate associated types for create requests, single-entity responses and
/// list items, since listings may carry a narrower projection than a single fetch.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The response/DTO type returned by single-entity operations
    type Response;

    /// The item type returned by list operations
    type ListItem;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities with filtering and ordering
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::ListItem>>;
}
