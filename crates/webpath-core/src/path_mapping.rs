//! Target URL → client path resolution through explicit `pathMapping`
//! rules.
//!
//! A rule whose prefix is itself a URL is matched against the whole target
//! URL (query and fragment stripped); any other prefix is matched against
//! the URL's path component. Prefixes only match on segment boundaries.
//!
//! When several rules match, the one covering the longest stretch of the
//! URL path wins. For a URL-prefix rule that is the path part of the prefix
//! (`http://localhost:8080/app/` covers `/app`), so a specific path rule
//! such as `/app/vendor/` beats a general URL rule. On equal coverage a
//! URL-prefix rule beats a path rule, and otherwise the rule declared
//! first wins.
//!
//! The remainder is percent-decoded segment by segment; a match whose
//! remainder decodes to `..` or to an embedded separator is rejected.

use url::Url;
use webpath_dap::PathMapping;

use crate::canonical::{decode_relative, is_url, join};

/// Resolve `target_url` against `mapping`.
///
/// Returns `None` when the mapping is empty or no rule matches. No
/// filesystem checks are made.
pub fn resolve(target_url: &str, mapping: &PathMapping) -> Option<String> {
    if mapping.is_empty() || target_url.is_empty() {
        return None;
    }

    let full = if is_url(target_url) {
        strip_query_and_fragment(target_url)
    } else {
        target_url
    };
    let url_path = target_path_component(target_url);

    let mut best: Option<((usize, bool), &str, &str)> = None;
    for (prefix, local_dir) in mapping.iter() {
        let url_rule = is_url(prefix);
        let subject = if url_rule {
            Some(full)
        } else {
            url_path.as_deref()
        };
        let Some(subject) = subject else {
            continue;
        };
        let trimmed = prefix.trim_end_matches(['/', '\\']);
        let Some(remainder) = match_prefix(subject, trimmed) else {
            continue;
        };
        let rank = (covered_path_len(trimmed, url_rule), url_rule);
        // Strictly better only: first declared wins ties.
        if best.as_ref().map_or(true, |(best_rank, _, _)| rank > *best_rank) {
            best = Some((rank, local_dir, remainder));
        }
    }

    let (_, local_dir, remainder) = best?;
    let Some(remainder) = decode_relative(remainder) else {
        tracing::trace!(target_url, "pathMapping rejected encoded separator or parent segment");
        return None;
    };
    let resolved = join(local_dir, &remainder);
    tracing::trace!(target_url, resolved = %resolved, "pathMapping matched");
    Some(resolved)
}

/// The path a non-URL-prefix rule is matched against: the URL's path for
/// hierarchical URLs, the string itself for plain paths, `None` otherwise.
fn target_path_component(target_url: &str) -> Option<String> {
    if !is_url(target_url) {
        return Some(target_url.replace('\\', "/"));
    }
    let parsed = Url::parse(target_url).ok()?;
    if parsed.cannot_be_a_base() {
        return None;
    }
    Some(parsed.path().to_string())
}

/// How much of a URL path a trimmed prefix covers: the whole prefix for
/// path rules, only the part after the origin for URL-prefix rules.
fn covered_path_len(trimmed: &str, url_rule: bool) -> usize {
    if !url_rule {
        return trimmed.len();
    }
    match Url::parse(trimmed) {
        Ok(url) if !url.cannot_be_a_base() => url.path().trim_end_matches('/').len(),
        _ => trimmed.len(),
    }
}

fn strip_query_and_fragment(url: &str) -> &str {
    match url.find(['?', '#']) {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Return what follows `prefix` in `subject` when `prefix` ends on a
/// segment boundary of `subject`.
fn match_prefix<'a>(subject: &'a str, prefix: &str) -> Option<&'a str> {
    if subject.is_empty() {
        return None;
    }
    if subject == prefix {
        return Some("");
    }
    let rest = subject.strip_prefix(prefix)?;
    rest.strip_prefix('/')
}
