//! Media path resolution for the file-serving boundary.
//!
//! A request path such as `旅行/天安门 2025 年 8 月 24 日/001.jpg` is mapped
//! to an absolute file under the image root. The result must:
//!
//! 1. stay inside the root: `..` segments may not climb above it, absolute
//!    requests are refused, and a symlink leading outside is refused,
//! 2. carry an allowed image extension,
//! 3. exist as a regular file right now.
//!
//! Any failure is a plain `None`. Callers answer "not found" without
//! learning which rule failed; the reason is logged at debug level.

use crate::scan::ExtensionFilter;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolve `request` against `root`, or `None` if it is not a servable image.
pub fn resolve_media_path(root: &Path, filter: &ExtensionFilter, request: &str) -> Option<PathBuf> {
    let Some(relative) = normalize_request(request) else {
        debug!(request, "media request escapes the image root");
        return None;
    };
    if !filter.allows_extension(&relative) {
        debug!(request, "media request has a disallowed extension");
        return None;
    }

    let root = root.canonicalize().ok()?;
    let resolved = match root.join(&relative).canonicalize() {
        Ok(path) => path,
        Err(err) => {
            debug!(request, error = %err, "media request does not resolve");
            return None;
        }
    };

    if !resolved.starts_with(&root) {
        debug!(request, resolved = %resolved.display(), "media request leaves the image root");
        return None;
    }
    if !resolved.is_file() || !filter.allows_extension(&resolved) {
        debug!(request, resolved = %resolved.display(), "media request is not an image file");
        return None;
    }
    Some(resolved)
}

/// Lexically normalize a request into a root-relative path.
///
/// Returns `None` for absolute paths, for `..` that would climb above the
/// root, and for requests with no file component at all.
fn normalize_request(request: &str) -> Option<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in Path::new(request).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.iter().collect())
}
