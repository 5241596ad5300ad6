//! Token descriptors sent to the token service
//!
//! A [`Token`] is built client-side purely as a request payload. The service
//! assigns the token identifier when it is created; nothing here tracks it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::permissions::{DataPermission, PathPermission};

/// Permission grants, delegated grants and an optional expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    path_permissions: Vec<PathPermission>,
    data_permissions: Vec<DataPermission>,
    grants: Vec<String>,
    expiration: Option<DateTime<Utc>>,
}

impl Token {
    /// Assemble a token from arbitrary permission sets.
    pub fn new(
        path_permissions: Vec<PathPermission>,
        data_permissions: Vec<DataPermission>,
    ) -> Self {
        Self {
            path_permissions,
            data_permissions,
            grants: Vec::new(),
            expiration: None,
        }
    }

    /// Read access to the subtree at `path`, plus query access to its data.
    pub fn readonly(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            vec![PathPermission::read(path.clone())],
            vec![DataPermission::new(path)],
        )
    }

    /// Read and write access to the subtree at `path`, plus query access to its data.
    pub fn readwrite(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            vec![
                PathPermission::read(path.clone()),
                PathPermission::write(path.clone()),
            ],
            vec![DataPermission::new(path)],
        )
    }

    /// Attach delegated token identifiers.
    pub fn with_grants<I, S>(mut self, grants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grants = grants.into_iter().map(Into::into).collect();
        self
    }

    /// Set the instant the token stops being valid.
    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn path_permissions(&self) -> &[PathPermission] {
        &self.path_permissions
    }

    pub fn data_permissions(&self) -> &[DataPermission] {
        &self.data_permissions
    }

    pub fn grants(&self) -> &[String] {
        &self.grants
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }

    /// A token is expired once its expiration lies strictly before `now`.
    ///
    /// Tokens without an expiration never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration.is_some_and(|expiration| expiration < now)
    }

    /// Wire form of this token, with the `expired` flag evaluated at `now`.
    pub fn to_request(&self, now: DateTime<Utc>) -> TokenRequest<'_> {
        TokenRequest {
            permissions: PermissionSet {
                path: non_empty(&self.path_permissions),
                data: non_empty(&self.data_permissions),
            },
            grants: &self.grants,
            expired: self.is_expired_at(now),
        }
    }
}

fn non_empty<T>(items: &[T]) -> Option<&[T]> {
    if items.is_empty() { None } else { Some(items) }
}

/// Body of a token creation request.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest<'a> {
    pub permissions: PermissionSet<'a>,
    pub grants: &'a [String],
    pub expired: bool,
}

/// Permission sets of a [`TokenRequest`].
///
/// An absent key means "no grant of that kind", so empty sets are `None` and
/// left off the wire entirely.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionSet<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a [PathPermission]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a [DataPermission]>,
}
