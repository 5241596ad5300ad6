//! Access-control model for tokens.
//!
//! A token bundles path grants ([`PathPermission`]), query grants
//! ([`DataPermission`]), delegated grants and an optional expiry. Tokens are
//! minted by posting their wire form ([`TokenRequest`]) to the token service.
//!
//! ```rust
//! use precog::auth::Token;
//! # use chrono::Utc;
//!
//! let token = Token::readwrite("/users/alice");
//! let body = serde_json::to_value(token.to_request(Utc::now()))?;
//! assert_eq!(body["permissions"]["path"].as_array().map(Vec::len), Some(2));
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod permissions;
pub mod token;

pub use permissions::{DataAccess, DataPermission, PathAccess, PathPermission};
pub use token::{PermissionSet, Token, TokenRequest};
