//! Fallback resolution of target URLs under a single `webRoot` directory.

use url::Url;

use crate::canonical::{canonicalize, decode_relative, is_url, join};

/// Resolve `target_url` under `web_root`.
///
/// Strips origin, query and fragment from the URL and joins the remaining
/// path onto `web_root`. Returns `None` when `web_root` is unset, the URL
/// has no usable path, or a decoded segment is `..` or holds a separator.
pub fn resolve(target_url: &str, web_root: Option<&str>) -> Option<String> {
    resolve_with_origin(target_url, web_root, None)
}

/// Like [`resolve`], but URLs whose origin differs from `expected_origin`
/// are treated as external and not resolved.
///
/// `file://` URLs already name a client file; their path is returned as
/// is, without joining onto `web_root`.
pub fn resolve_with_origin(
    target_url: &str,
    web_root: Option<&str>,
    expected_origin: Option<&Url>,
) -> Option<String> {
    let web_root = web_root.map(str::trim).filter(|r| !r.is_empty())?;
    if !is_url(target_url) {
        return None;
    }
    let parsed = Url::parse(target_url).ok()?;

    if parsed.scheme() == "file" {
        let path = parsed.to_file_path().ok()?;
        return Some(canonicalize(&path.to_string_lossy()));
    }

    // Only served scripts have a path relative to the web root.
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host().is_none() {
        return None;
    }
    if let Some(expected) = expected_origin {
        if parsed.origin() != expected.origin() {
            tracing::trace!(target_url, "webRoot skipped for cross-origin URL");
            return None;
        }
    }

    let Some(relative) = decode_relative(parsed.path().trim_start_matches('/')) else {
        tracing::trace!(target_url, "webRoot skipped for encoded separator or parent segment");
        return None;
    };
    if relative.is_empty() {
        return None;
    }
    Some(join(web_root, &relative))
}
