//! Virtual filesystem path handling.
//!
//! Records are addressed by slash-delimited paths under [`VFS_ROOT`]. Paths
//! given by callers are normalized before they are put on the wire so that
//! `a//b/../c` and `a/c` address the same location.
//!
//! ```rust
//! use precog::path::{sanitize_path, vfs_path};
//!
//! assert_eq!(sanitize_path("/a//b/../c/"), "/a/c/");
//! assert_eq!(vfs_path("users/alice"), "/vfs/users/alice");
//! ```

use crate::constants::VFS_ROOT;

const PARENT: &str = "..";
const CURRENT: &str = ".";

/// Normalizes a slash-delimited path.
///
/// - Runs of `/` collapse into a single `/`.
/// - A segment followed by `..` is removed together with the `..`, unless the
///   segment is itself `..`. Leading `..` segments that have nothing left to
///   cancel are preserved.
/// - `.` segments are dropped when they follow a `/`, so `/./` becomes `/` and
///   a trailing `/.` becomes `/`. A leading `.` of a relative path is kept.
///
/// The result is a fixed point: sanitizing it again returns it unchanged.
///
/// ```rust
/// # use precog::path::sanitize_path;
/// assert_eq!(sanitize_path("/a/../../b"), "/../b");
/// assert_eq!(sanitize_path("/a/./b/."), "/a/b/");
/// assert_eq!(sanitize_path("a/.."), "");
/// ```
pub fn sanitize_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let absolute = path.starts_with('/');
    let mut trailing = path.ends_with('/');

    // Splitting on '/' and skipping empties is the same as collapsing separator runs.
    let raw: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let last = raw.len().saturating_sub(1);

    // Cancel `<seg>/..` pairs. The reduction is confluent, so a single stack
    // pass reaches the same result as removing pairs until nothing changes.
    let mut stack: Vec<&str> = Vec::with_capacity(raw.len());
    for (i, segment) in raw.iter().copied().enumerate() {
        if segment == PARENT && stack.last().is_some_and(|top| *top != PARENT) {
            stack.pop();
            if i == last {
                trailing = true;
            }
        } else {
            stack.push(segment);
        }
    }

    let mut segments: Vec<&str> = Vec::with_capacity(stack.len());
    let stack_last = stack.len().saturating_sub(1);
    for (i, segment) in stack.into_iter().enumerate() {
        let follows_slash = absolute || i > 0;
        if segment == CURRENT && follows_slash {
            if i == stack_last {
                trailing = true;
            }
            continue;
        }
        segments.push(segment);
    }

    let mut out = String::with_capacity(path.len());
    if absolute {
        out.push('/');
    }
    if segments.is_empty() {
        return out;
    }
    out.push_str(&segments.join("/"));
    if trailing {
        out.push('/');
    }
    out
}

/// Builds the sanitized VFS path for a caller-supplied record path.
///
/// Paths that do not already start with [`VFS_ROOT`] are placed under it.
pub fn vfs_path(path: &str) -> String {
    if path.starts_with(VFS_ROOT) {
        sanitize_path(path)
    } else {
        sanitize_path(&format!("{VFS_ROOT}/{path}"))
    }
}

/// Property names must always be prefixed with a period.
///
/// Empty names are returned unchanged.
pub fn sanitize_property(property: &str) -> String {
    if property.is_empty() || property.starts_with('.') {
        property.to_string()
    } else {
        format!(".{property}")
    }
}
