//! Permission grants carried by a token
//!
//! Both grant kinds serialize to the descriptor shape the token service
//! expects. Every grant is marked shareable on the wire.

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::constants::HOLDER;

/// Access level granted over a path subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PathAccess {
    /// Read records stored under the subtree
    #[serde(rename = "PATH_READ")]
    Read,
    /// Store records under the subtree
    #[serde(rename = "PATH_WRITE")]
    Write,
}

impl PathAccess {
    /// Wire name of the access level
    pub fn as_str(&self) -> &'static str {
        match self {
            PathAccess::Read => "PATH_READ",
            PathAccess::Write => "PATH_WRITE",
        }
    }
}

/// Access kind granted over data. The service only issues query grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DataAccess {
    /// Run queries over the data
    #[default]
    #[serde(rename = "DATA_QUERY")]
    Query,
}

#[derive(Serialize)]
struct PathSpec<'a> {
    subtree: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OwnershipSpec<'a> {
    owner_restriction: &'a str,
}

/// Read or write access to a virtual filesystem subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPermission {
    path: String,
    access: PathAccess,
}

impl PathPermission {
    /// Grant `access` over the subtree rooted at `path`.
    pub fn new(path: impl Into<String>, access: PathAccess) -> Self {
        Self {
            path: path.into(),
            access,
        }
    }

    /// Read grant over `path`.
    pub fn read(path: impl Into<String>) -> Self {
        Self::new(path, PathAccess::Read)
    }

    /// Write grant over `path`.
    pub fn write(path: impl Into<String>) -> Self {
        Self::new(path, PathAccess::Write)
    }

    /// Root of the granted subtree
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Granted access level
    pub fn access(&self) -> PathAccess {
        self.access
    }
}

impl Serialize for PathPermission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PathPermission", 3)?;
        state.serialize_field("pathSpec", &PathSpec { subtree: &self.path })?;
        state.serialize_field("pathAccess", &self.access)?;
        state.serialize_field("mayShare", &true)?;
        state.end()
    }
}

/// Query access to data under a subtree, optionally restricted to an owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataPermission {
    path: String,
    owner: String,
}

impl DataPermission {
    /// Query grant over `path` for data owned by the token holder.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_owner(path, HOLDER)
    }

    /// Query grant over `path` for data owned by `owner`.
    pub fn with_owner(path: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            owner: owner.into(),
        }
    }

    /// Root of the granted subtree
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Owner restriction
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Granted access kind
    pub fn access(&self) -> DataAccess {
        DataAccess::Query
    }
}

impl Serialize for DataPermission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DataPermission", 4)?;
        state.serialize_field("pathSpec", &PathSpec { subtree: &self.path })?;
        state.serialize_field(
            "ownershipSpec",
            &OwnershipSpec {
                owner_restriction: &self.owner,
            },
        )?;
        state.serialize_field("dataAccess", &self.access())?;
        state.serialize_field("mayShare", &true)?;
        state.end()
    }
}
