//! Constants used throughout the Precog client.
//!
//! This module provides central definitions for the default API endpoint and the
//! fixed service paths that the façade operations are rooted at.

/// Default API host.
pub const API_HOST: &str = "api.precog.io";

/// Default API port.
pub const API_PORT: u16 = 80;

/// Default path prefix prepended to every request path.
pub const API_PATH: &str = "v1";

/// Path of the token management endpoint.
pub const TOKENS_PATH: &str = "/auth/tokens";

/// Root of the virtual filesystem that records are stored under.
pub const VFS_ROOT: &str = "/vfs/";

/// Query parameter carrying the token that authenticates every request.
pub const TOKEN_ID_PARAM: &str = "tokenId";

/// Content type forced onto every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Owner restriction meaning "whoever holds the token".
pub const HOLDER: &str = "[HOLDER]";
