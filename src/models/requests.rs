//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{FruitInput, FruitQuery};

/// Strips `<`, `>` and `$`, then trims.
pub fn sanitize_text(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '$'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitizes an optional field; blank becomes `None`.
fn sanitize_opt(value: Option<String>) -> Option<String> {
    value.map(|v| sanitize_text(&v)).filter(|v| !v.is_empty())
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Request body for POST /api/auth/register
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Registration fields after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    /// Lower-cased, trimmed
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Validates the request and normalizes name and email.
    ///
    /// Returns the user-facing error message on failure.
    pub fn validate(self) -> Result<Registration, String> {
        if !present(&self.name) || !present(&self.email) || !present(&self.password) {
            return Err("Name, email and password are required.".to_string());
        }

        let name = self.name.unwrap_or_default().trim().to_string();
        let email = self.email.unwrap_or_default().trim().to_lowercase();
        if name.is_empty() || email.is_empty() {
            return Err("Name and email cannot be blank.".to_string());
        }

        Ok(Registration {
            name,
            email,
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Request body for POST /api/auth/login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(email, password)` with the email lower-cased and trimmed.
    pub fn validate(self) -> Result<(String, String), String> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email.trim().to_lowercase(), password))
            }
            _ => Err("Email and password are required.".to_string()),
        }
    }
}

/// Request body for POST /api/fruits and PUT /api/fruits/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FruitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub nutritions: Option<Value>,
}

impl FruitRequest {
    /// Sanitizes text fields; the name is required.
    pub fn validate(self) -> Result<FruitInput, String> {
        let name = sanitize_opt(self.name).ok_or_else(|| "Fruit name is required.".to_string())?;

        Ok(FruitInput {
            name,
            family: sanitize_opt(self.family),
            genus: sanitize_opt(self.genus),
            order: sanitize_opt(self.order),
            image: self
                .image
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty()),
            nutritions: self.nutritions.filter(|n| !n.is_null()),
        })
    }
}

/// Sanitizes every filter of a search query; blank filters are dropped.
pub fn sanitize_query(query: FruitQuery) -> FruitQuery {
    FruitQuery {
        search: sanitize_opt(query.search),
        family: sanitize_opt(query.family),
        genus: sanitize_opt(query.genus),
        order: sanitize_opt(query.order),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  <b>Apple$ "), "bApple");
        assert_eq!(sanitize_text("Kiwi"), "Kiwi");
    }

    #[test]
    fn test_register_request_normalizes() {
        let json = r#"{"name": " Ana ", "email": " A@B.com ", "password": "pw"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        let reg = req.validate().unwrap();
        assert_eq!(reg.name, "Ana");
        assert_eq!(reg.email, "a@b.com");
        assert_eq!(reg.password, "pw");
    }

    #[test]
    fn test_register_request_missing_field() {
        let req: RegisterRequest = serde_json::from_str(r#"{"name": "Ana"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_blank_name() {
        let req = RegisterRequest {
            name: Some("   ".into()),
            email: Some("a@b.com".into()),
            password: Some("pw".into()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_request() {
        let req = LoginRequest {
            email: Some("X@Y.com".into()),
            password: Some("pw".into()),
        };
        assert_eq!(req.validate().unwrap(), ("x@y.com".into(), "pw".into()));
        assert!(LoginRequest::default().validate().is_err());
    }

    #[test]
    fn test_fruit_request_requires_name() {
        assert!(FruitRequest::default().validate().is_err());

        let req = FruitRequest {
            name: Some("<>".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_fruit_request_sanitizes() {
        let json = r#"{"name":" <Apple> ","family":"Rosaceae$","genus":"","nutritions":{"calories":52}}"#;
        let req: FruitRequest = serde_json::from_str(json).unwrap();
        let input = req.validate().unwrap();
        assert_eq!(input.name, "Apple");
        assert_eq!(input.family.as_deref(), Some("Rosaceae"));
        assert!(input.genus.is_none());
        assert_eq!(input.nutritions.unwrap()["calories"], 52);
    }

    #[test]
    fn test_sanitize_query_drops_blank_filters() {
        let query = sanitize_query(FruitQuery {
            search: Some(" ap<p ".into()),
            family: Some("".into()),
            ..Default::default()
        });
        assert_eq!(query.search.as_deref(), Some("app"));
        assert!(query.family.is_none());
    }
}
