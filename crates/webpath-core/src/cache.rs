//! Bidirectional cache of confirmed client-path ↔ target-URL pairs.

use std::collections::HashMap;
use std::hash::Hash;

/// A one-to-one map that can be queried from either side.
///
/// Both directions are updated together, so for every stored pair
/// `get_by_right(r) == Some(l)` iff `get_by_left(l) == Some(r)`.
#[derive(Debug, Clone)]
pub struct BiMap<L, R> {
    left_to_right: HashMap<L, R>,
    right_to_left: HashMap<R, L>,
}

/// Cache keyed by canonical client path on the left and target URL on the
/// right.
pub type PathCache = BiMap<String, String>;

impl<L, R> Default for BiMap<L, R> {
    fn default() -> Self {
        Self {
            left_to_right: HashMap::new(),
            right_to_left: HashMap::new(),
        }
    }
}

impl<L, R> BiMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, replacing whatever either side was previously paired
    /// with.
    ///
    /// Returns `true` when an existing pairing was displaced.
    pub fn put(&mut self, left: L, right: R) -> bool {
        let mut displaced = false;
        if let Some(old_right) = self.left_to_right.remove(&left) {
            self.right_to_left.remove(&old_right);
            displaced |= old_right != right;
        }
        if let Some(old_left) = self.right_to_left.remove(&right) {
            self.left_to_right.remove(&old_left);
            displaced |= old_left != left;
        }
        self.left_to_right.insert(left.clone(), right.clone());
        self.right_to_left.insert(right, left);
        displaced
    }

    /// Look up by left key.
    pub fn get_by_left(&self, left: &L) -> Option<&R> {
        self.left_to_right.get(left)
    }

    /// Look up by right key.
    pub fn get_by_right(&self, right: &R) -> Option<&L> {
        self.right_to_left.get(right)
    }

    /// Remove every pair.
    pub fn clear(&mut self) {
        self.left_to_right.clear();
        self.right_to_left.clear();
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.left_to_right.len()
    }

    /// Whether the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.left_to_right.is_empty()
    }

    /// Iterate over `(left, right)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &R)> {
        self.left_to_right.iter()
    }

    /// Whether both directions agree pair-for-pair.
    pub fn check_invariant(&self) -> bool {
        self.left_to_right.len() == self.right_to_left.len()
            && self
                .left_to_right
                .iter()
                .all(|(l, r)| self.right_to_left.get(r) == Some(l))
    }
}

impl PathCache {
    /// Client path paired with `target_url`.
    pub fn get_by_target(&self, target_url: &str) -> Option<&str> {
        self.right_to_left.get(target_url).map(String::as_str)
    }

    /// Target URL paired with the canonical `client_path`.
    pub fn get_by_client(&self, client_path: &str) -> Option<&str> {
        self.left_to_right.get(client_path).map(String::as_str)
    }
}
