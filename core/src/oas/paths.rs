//! # Path Prefixing
//!
//! Rewrites every key of `paths` by prepending a normalized segment, e.g. mounting
//! a sub-API under `/api/v1`.

use openapiv3::OpenAPI;

/// Prepends `prefix` to every path of the document.
///
/// Both the prefix and each path are stripped of leading and trailing `/` and
/// joined with a single separator under a leading `/`. Empty segments are
/// dropped, so an empty path maps to `/{prefix}` and an empty prefix only
/// normalizes the existing keys.
///
/// Two paths rewriting to the same key collapse into one entry: the later value
/// wins and the key keeps the position of the first.
pub fn prepend_path(prefix: &str, mut openapi: OpenAPI) -> OpenAPI {
    let paths = std::mem::take(&mut openapi.paths.paths);
    let count = paths.len();

    openapi.paths.paths = paths
        .into_iter()
        .map(|(path, item)| (join_path(prefix, &path), item))
        .collect();

    log::debug!(
        "prefixed {} paths with '{}' ({} distinct after rewrite)",
        count,
        prefix,
        openapi.paths.paths.len()
    );
    openapi
}

/// Joins two path fragments as `/{prefix}/{path}` after trimming slashes.
pub fn join_path(prefix: &str, path: &str) -> String {
    let segments: Vec<&str> = [trim_slashes(prefix), trim_slashes(path)]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

fn trim_slashes(s: &str) -> &str {
    s.trim_matches('/')
}
