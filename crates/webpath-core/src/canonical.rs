//! Path canonicalization and URL classification.
//!
//! Canonical client paths are what the transformer uses as cache keys:
//! forward slashes only, no `.`/`..` or empty segments, no trailing
//! separator, lowercase drive letter, and lowercased entirely on
//! case-insensitive filesystems. Everything here is pure string work.

use std::sync::OnceLock;

use regex::Regex;

/// Matches a URL scheme followed by `://`. Single-letter schemes are
/// excluded so that `c://x` style drive paths are never treated as URLs.
fn url_scheme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]+://").expect("valid url regex"))
}

/// Whether `s` is a URL (`http://`, `file://`, `eval://`, ...) rather than a
/// filesystem path.
pub fn is_url(s: &str) -> bool {
    url_scheme_regex().is_match(s)
}

/// Canonicalize `path` without case folding.
///
/// Resolvers use this to build candidate paths; case folding is applied
/// once, by the transformer's [`Canonicalizer`], when keys are stored.
pub fn canonicalize(path: &str) -> String {
    Canonicalizer::new(false).canonicalize(path)
}

/// Whether client filesystems on this platform compare paths
/// case-insensitively by default (Windows and macOS).
pub const fn platform_is_case_insensitive() -> bool {
    cfg!(windows) || cfg!(target_os = "macos")
}

/// Normalizes client paths into comparable cache keys.
///
/// The default folds case on platforms whose filesystems are
/// case-insensitive; [`Canonicalizer::new`] overrides that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canonicalizer {
    case_insensitive: bool,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(platform_is_case_insensitive())
    }
}

impl Canonicalizer {
    /// Create a canonicalizer. When `case_insensitive` is set, the whole
    /// path is lowercased.
    pub fn new(case_insensitive: bool) -> Self {
        Self { case_insensitive }
    }

    /// Whether paths are folded to lowercase.
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Produce the canonical form of `path`.
    ///
    /// URLs are returned unchanged. Relative paths stay relative. Never
    /// fails; malformed input gets a best-effort normalization.
    pub fn canonicalize(&self, path: &str) -> String {
        if path.is_empty() || is_url(path) {
            return path.to_string();
        }

        let unified = path.replace('\\', "/");
        let (root, rest) = split_root(&unified);

        let mut segments: Vec<&str> = Vec::new();
        for seg in rest.split('/') {
            match seg {
                "" | "." => {}
                ".." => {
                    if segments.last().is_some_and(|last| *last != "..") {
                        segments.pop();
                    } else if root.is_empty() {
                        segments.push("..");
                    }
                    // `..` above an absolute root is dropped.
                }
                s => segments.push(s),
            }
        }

        let mut out = root;
        out.push_str(&segments.join("/"));
        if out.is_empty() {
            out.push('.');
        }
        if self.case_insensitive {
            out = out.to_lowercase();
        }
        out
    }
}

/// Split `path` (already using `/`) into its root and the remainder.
///
/// Roots: `c:/` (drive, lowercased), `c:` (drive-relative), `//` (UNC),
/// `/`, or empty for relative paths.
fn split_root(path: &str) -> (String, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let drive = (bytes[0] as char).to_ascii_lowercase();
        let rest = &path[2..];
        return match rest.strip_prefix('/') {
            Some(after) => (format!("{drive}:/"), after),
            None => (format!("{drive}:"), rest),
        };
    }
    if let Some(after) = path.strip_prefix("//") {
        if !after.starts_with('/') {
            return ("//".to_string(), after);
        }
    }
    match path.strip_prefix('/') {
        Some(after) => ("/".to_string(), after),
        None => (String::new(), path),
    }
}

/// Join a relative segment onto `base` and canonicalize the result.
pub fn join(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return canonicalize(base);
    }
    canonicalize(&format!("{base}/{relative}"))
}

/// Percent-decode a relative URL path one `/`-separated segment at a time.
///
/// Returns `None` when a decoded segment is `..` or contains `/` or `\`,
/// so the result can never climb out of the directory it is joined to.
pub fn decode_relative(path: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        let decoded = percent_decode(segment);
        if decoded == ".." || decoded.contains(['/', '\\']) {
            return None;
        }
        segments.push(decoded);
    }
    Some(segments.join("/"))
}

/// Decode `%XX` escapes. Invalid escapes are kept literally; if the decoded
/// bytes are not UTF-8 the input is returned unchanged.
pub fn percent_decode(input: &str) -> String {
    if !input.contains('%') {
        return input.to_string();
    }
    let mut out = Vec::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| input.to_string())
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
