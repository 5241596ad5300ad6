//!
//! Precog: a blocking client for the Precog storage and query API.
//!
//! ## Core Concepts
//!
//! * **Tokens (`auth::Token`)**: Descriptors bundling path grants, query grants, delegated
//!   grants and an optional expiry. They are minted by posting them to the token service.
//! * **HTTP client (`http::HttpClient`)**: Sends one authenticated request per call. The token
//!   travels as the `tokenId` query parameter and every failure surfaces as a single error type,
//!   `HttpResponseError`, carrying a status code.
//! * **Paths (`path`)**: Records live in a virtual filesystem rooted at `/vfs/`. Caller paths are
//!   normalized before they reach the wire.
//! * **Façade (`Precog`)**: Store, query and list operations plus token management, each a single
//!   call through the HTTP client.

pub mod auth;
pub mod client;
pub mod clock;
pub mod constants;
pub mod http;
pub mod path;

pub use client::{ClientConfig, Precog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use http::HttpResponseError;

/// Result type used throughout the Precog client.
pub type Result<T> = std::result::Result<T, HttpResponseError>;
