//! Authentication Module
//!
//! Password credentials, signed session tokens, the logout blacklist and
//! the gate that guards the catalog routes.

mod blacklist;
mod gate;
mod password;
mod token;

pub use blacklist::{TokenBlacklist, DEFAULT_BLACKLIST_TTL};
pub use gate::{extract_bearer, require_auth, AuthGate, AuthUser, Logout};
pub use password::{Credential, PasswordHasher, HASH_LEN, PBKDF2_ITERATIONS, SALT_LEN};
pub use token::{SessionClaims, TokenService, UnverifiedClaims, DEFAULT_TOKEN_TTL};
