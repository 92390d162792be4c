//! Case-insensitive prefix dictionary over facility records.

use geofacility_types::{Facility, FacilityId};
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: FxHashMap<char, TrieNode>,
    /// Records whose full key ends here
    records: Vec<Arc<Facility>>,
}

impl TrieNode {
    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.records.is_empty()
    }

    fn collect(&self, out: &mut Vec<Arc<Facility>>) {
        out.extend(self.records.iter().cloned());
        for child in self.children.values() {
            child.collect(out);
        }
    }

    /// Remove `id` under the remaining `key` chars, pruning branches left
    /// empty. Returns whether a record was removed.
    fn remove(&mut self, mut key: std::str::Chars<'_>, id: &FacilityId) -> bool {
        match key.next() {
            None => {
                let before = self.records.len();
                self.records.retain(|f| f.id != *id);
                self.records.len() != before
            }
            Some(c) => {
                let Some(child) = self.children.get_mut(&c) else {
                    return false;
                };
                let removed = child.remove(key, id);
                if removed && child.is_empty() {
                    self.children.remove(&c);
                }
                removed
            }
        }
    }
}

/// Trie keyed by lowercased strings (names or addresses).
///
/// Result order among records under one prefix is unspecified; callers that
/// need a stable order sort the results.
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    len: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, record: Arc<Facility>) {
        let mut node = &mut self.root;
        for c in key.to_lowercase().chars() {
            node = node.children.entry(c).or_default();
        }
        node.records.push(record);
        self.len += 1;
    }

    /// Every record whose key starts with `prefix`. An empty prefix matches
    /// everything.
    pub fn search(&self, prefix: &str) -> Vec<Arc<Facility>> {
        let mut out = Vec::new();
        if let Some(node) = self.find(prefix) {
            node.collect(&mut out);
        }
        out
    }

    /// Whether any key starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.find(prefix).is_some_and(|node| !node.is_empty())
    }

    /// Remove the record with `id` stored under exactly `key`.
    pub fn delete(&mut self, key: &str, id: &FacilityId) -> bool {
        let key = key.to_lowercase();
        let removed = self.root.remove(key.chars(), id);
        if removed {
            self.len -= 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for c in prefix.to_lowercase().chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }
}
