//! Row-to-tree aggregation primitives
//!
//! One-to-many joins hand back one row per (parent, child) pair, so parents
//! repeat and children can repeat once per sibling collection (fan-out).
//! These types fold such rows into ordered, deduplicated collections:
//!
//! - entries keep the order in which their key was first seen
//! - the first value written for a key wins
//! - null keys never produce an entry
//!
//! Join children are never re-sorted here; the query's `ORDER BY` decides.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::db::FlatRow;

/// Insertion-ordered map with first-write-wins semantics
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<V>,
}

impl<K: Eq + Hash, V> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash, V> OrderedGroups<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, created with `make` the first time `key` is seen
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(make());
                self.index.insert(key, slot);
                slot
            }
        };
        &mut self.entries[slot]
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) but skips null keys
    pub fn group(&mut self, key: Option<K>, make: impl FnOnce() -> V) -> Option<&mut V> {
        key.map(|key| self.get_or_insert_with(key, make))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter()
    }

    /// Values in first-seen order
    pub fn into_values(self) -> Vec<V> {
        self.entries
    }
}

/// Deduplicated child collection in first-seen order
#[derive(Debug, Clone)]
pub struct ChildList<K, V> {
    seen: HashSet<K>,
    items: Vec<V>,
}

impl<K: Eq + Hash, V> Default for ChildList<K, V> {
    fn default() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }
}

impl<K: Eq + Hash, V> ChildList<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the child built by `make` unless `key` is null or already present.
    ///
    /// Returns true when a child was appended.
    pub fn push(&mut self, key: Option<K>, make: impl FnOnce() -> V) -> bool {
        let Some(key) = key else {
            return false;
        };
        if !self.seen.insert(key) {
            return false;
        }
        self.items.push(make());
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<V> {
        self.items
    }
}

/// Stable sort ascending by `key`, absent keys last
pub fn sort_nulls_last<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> Option<K>) {
    items.sort_by(|a, b| match (key(a), key(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Stable sort descending by a numeric `key`, absent (or NaN) keys last
pub fn sort_desc_nulls_last<T>(items: &mut [T], key: impl Fn(&T) -> Option<f64>) {
    items.sort_by(|a, b| {
        match (key(a).filter(|v| !v.is_nan()), key(b).filter(|v| !v.is_nan())) {
            (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// First row whose `key_column` is non-null; `None` means the entity is absent.
///
/// Later rows carrying the same key but different values in any of
/// `scalar_columns` are logged; the first row's values are kept.
pub fn root_row<'a>(
    rows: &'a [FlatRow],
    key_column: &str,
    scalar_columns: &[&str],
) -> Option<&'a FlatRow> {
    let root = rows.iter().find(|row| !row.is_null(key_column))?;
    let key = root.get(key_column);

    for row in rows.iter().filter(|row| row.get(key_column) == key) {
        if let Some(column) = scalar_columns
            .iter()
            .find(|column| row.get(column) != root.get(column))
        {
            tracing::warn!(
                key_column,
                column = *column,
                "Conflicting values for one entity across joined rows; keeping first"
            );
            break;
        }
    }

    Some(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ordered_groups_first_write_wins() {
        let mut groups: OrderedGroups<i64, String> = OrderedGroups::new();
        groups.get_or_insert_with(2, || "two".to_string());
        groups.get_or_insert_with(1, || "one".to_string());
        groups.get_or_insert_with(2, || "deux".to_string());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.into_values(), vec!["two", "one"]);
    }

    #[test]
    fn test_ordered_groups_skip_null_key() {
        let mut groups: OrderedGroups<i64, i64> = OrderedGroups::new();
        assert!(groups.group(None, || 0).is_none());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_child_list_ignores_null_and_repeats() {
        let mut children: ChildList<i64, &str> = ChildList::new();
        assert!(children.push(Some(10), || "a"));
        assert!(!children.push(None, || "null"));
        assert!(!children.push(Some(10), || "a-again"));
        assert!(children.push(Some(5), || "b"));

        assert_eq!(children.into_vec(), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_nulls_last_ranks() {
        let mut ranks = vec![Some(2), None, Some(1)];
        sort_nulls_last(&mut ranks, |r| *r);
        assert_eq!(ranks, vec![Some(1), Some(2), None]);
    }

    #[test]
    fn test_sort_desc_nulls_last_scores() {
        let mut scores = vec![Some(3.0), None, Some(10.5), Some(7.0)];
        sort_desc_nulls_last(&mut scores, |s| *s);
        assert_eq!(scores, vec![Some(10.5), Some(7.0), Some(3.0), None]);
    }

    #[test]
    fn test_root_row_skips_null_keys() {
        let rows = vec![
            FlatRow::new().with("id", None::<i64>),
            FlatRow::new().with("id", 4).with("title", "first"),
            FlatRow::new().with("id", 4).with("title", "second"),
        ];

        let root = root_row(&rows, "id", &["title"]).unwrap();
        assert_eq!(root.text("title").as_deref(), Some("first"));
        assert!(root_row(&[], "id", &[]).is_none());
    }

    #[test]
    fn test_child_list_with_owned_keys() {
        let mut roles: ChildList<String, &str> = ChildList::new();
        assert!(roles.push(Some("host".to_string()), || "Coby"));
        assert!(!roles.push(Some("host".to_string()), || "Cory"));
        assert!(roles.push(Some("judge".to_string()), || "Ty"));

        assert_eq!(roles.len(), 2);
        assert_eq!(roles.into_vec(), vec!["Coby", "Ty"]);
    }

    #[test]
    fn test_root_row_keeps_first_on_conflict() {
        let rows = vec![
            FlatRow::new().with("id", 7).with("winner", "Cody"),
            FlatRow::new().with("id", 7).with("winner", "Ty"),
            FlatRow::new().with("id", 8).with("winner", "Garrett"),
        ];

        let root = root_row(&rows, "id", &["winner"]).unwrap();
        assert_eq!(root.int("id"), Some(7));
        assert_eq!(root.text("winner").as_deref(), Some("Cody"));
    }

    proptest! {
        #[test]
        fn prop_child_list_has_distinct_non_null_keys(keys in proptest::collection::vec(proptest::option::of(0i64..8), 0..64)) {
            let mut children: ChildList<i64, i64> = ChildList::new();
            for key in &keys {
                children.push(*key, || key.unwrap_or_default());
            }
            let items = children.into_vec();

            let distinct: HashSet<i64> = keys.iter().flatten().copied().collect();
            prop_assert_eq!(items.len(), distinct.len());
            let unique: HashSet<i64> = items.iter().copied().collect();
            prop_assert_eq!(unique.len(), items.len());
        }

        #[test]
        fn prop_child_list_keeps_first_appearance_order(keys in proptest::collection::vec(proptest::option::of(0i64..8), 0..64)) {
            let mut children: ChildList<i64, i64> = ChildList::new();
            for key in &keys {
                children.push(*key, || key.unwrap_or_default());
            }

            let mut expected = Vec::new();
            for key in keys.iter().flatten() {
                if !expected.contains(key) {
                    expected.push(*key);
                }
            }
            prop_assert_eq!(children.into_vec(), expected);
        }
    }
}
