//! In-memory catalog store
//!
//! Process-local implementation of [`CatalogStore`] so the server runs
//! without an external document store. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Fruit, FruitInput, FruitQuery, NewUser, User};
use super::store::{CatalogStore, StoreError, SEARCH_LIMIT};

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    /// Keyed by email
    users: RwLock<HashMap<String, User>>,
    /// Keyed by id
    fruits: RwLock<HashMap<String, Fruit>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&email.to_lowercase()).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let email = user.email.to_lowercase();
        let mut users = self.users.write().await;
        if users.contains_key(&email) {
            return Err(StoreError::DuplicateEmail(email));
        }

        let created = User {
            id: Uuid::new_v4().to_string(),
            name: user.name,
            email: email.clone(),
            credential: user.credential,
            created_at: Utc::now(),
        };
        users.insert(email, created.clone());
        Ok(created)
    }

    async fn insert_fruit(&self, input: FruitInput) -> Result<Fruit, StoreError> {
        let fruit = Fruit {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            family: input.family,
            genus: input.genus,
            order: input.order,
            image: input.image,
            nutritions: input.nutritions,
            created_at: Utc::now(),
            updated_at: None,
        };

        self.fruits
            .write()
            .await
            .insert(fruit.id.clone(), fruit.clone());
        Ok(fruit)
    }

    async fn search_fruits(&self, query: &FruitQuery) -> Result<Vec<Fruit>, StoreError> {
        let fruits = self.fruits.read().await;
        let mut found: Vec<Fruit> = fruits
            .values()
            .filter(|fruit| query.matches(fruit))
            .cloned()
            .collect();

        found.sort_by(|a, b| a.name.cmp(&b.name));
        found.truncate(SEARCH_LIMIT);
        Ok(found)
    }

    async fn find_fruit_by_id(&self, id: &str) -> Result<Option<Fruit>, StoreError> {
        Ok(self.fruits.read().await.get(id).cloned())
    }

    async fn update_fruit(&self, id: &str, input: FruitInput) -> Result<Option<Fruit>, StoreError> {
        let mut fruits = self.fruits.write().await;
        let Some(fruit) = fruits.get_mut(id) else {
            return Ok(None);
        };

        fruit.name = input.name;
        fruit.family = input.family;
        fruit.genus = input.genus;
        fruit.order = input.order;
        fruit.image = input.image;
        fruit.nutritions = input.nutritions;
        fruit.updated_at = Some(Utc::now());
        Ok(Some(fruit.clone()))
    }

    async fn delete_fruit(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.fruits.write().await.remove(id).is_some())
    }
}
