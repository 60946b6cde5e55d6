//! Data store collaborator
//!
//! The catalog core never implements persistence itself; it talks to a
//! document store through this trait.

use async_trait::async_trait;
use thiserror::Error;

use super::model::{Fruit, FruitInput, FruitQuery, NewUser, User};

/// Maximum number of fruits returned by one search.
pub const SEARCH_LIMIT: usize = 100;

/// Failures reported by a data store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An account with this email already exists
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// The store could not be reached or refused the operation
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Operations the catalog needs from its document store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Looks up an account by its lower-cased email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Creates an account. Fails with `DuplicateEmail` if the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn insert_fruit(&self, input: FruitInput) -> Result<Fruit, StoreError>;

    /// Returns matching fruits sorted by name, at most `SEARCH_LIMIT`.
    async fn search_fruits(&self, query: &FruitQuery) -> Result<Vec<Fruit>, StoreError>;

    async fn find_fruit_by_id(&self, id: &str) -> Result<Option<Fruit>, StoreError>;

    /// Replaces a fruit's fields. Returns `None` if the id is unknown.
    async fn update_fruit(&self, id: &str, input: FruitInput) -> Result<Option<Fruit>, StoreError>;

    /// Returns true if a fruit was removed.
    async fn delete_fruit(&self, id: &str) -> Result<bool, StoreError>;
}
