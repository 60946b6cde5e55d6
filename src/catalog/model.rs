//! Catalog domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Credential;

/// A registered account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Lower-cased, trimmed
    pub email: String,
    pub credential: Credential,
    pub created_at: DateTime<Utc>,
}

/// Account data before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub credential: Credential,
}

/// A catalog entry as stored and returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fruit {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub order: Option<String>,
    pub image: Option<String>,
    /// Free-form nutrition facts (calories, carbohydrates, protein, fat, sugar)
    pub nutritions: Option<Value>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields accepted on create and update, already sanitized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FruitInput {
    pub name: String,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub order: Option<String>,
    pub image: Option<String>,
    pub nutritions: Option<Value>,
}

/// Search filters. Every present field is a case-insensitive substring match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FruitQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

impl FruitQuery {
    /// Cache key for this query's result list.
    ///
    /// Built from the canonical JSON of the filters, so equal queries share
    /// one entry.
    pub fn cache_key(&self) -> String {
        let params = serde_json::to_string(self).unwrap_or_default();
        format!("fruits:list:{}", params)
    }

    /// Returns true if `fruit` satisfies every present filter.
    pub fn matches(&self, fruit: &Fruit) -> bool {
        fn contains(haystack: Option<&str>, needle: &Option<String>) -> bool {
            match needle.as_deref().filter(|n| !n.is_empty()) {
                None => true,
                Some(needle) => haystack
                    .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
                    .unwrap_or(false),
            }
        }

        contains(Some(&fruit.name), &self.search)
            && contains(fruit.family.as_deref(), &self.family)
            && contains(fruit.genus.as_deref(), &self.genus)
            && contains(fruit.order.as_deref(), &self.order)
    }
}

/// Cache key for a single fruit.
pub fn fruit_cache_key(id: &str) -> String {
    format!("fruits:id:{}", id)
}
