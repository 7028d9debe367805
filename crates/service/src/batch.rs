//! Bulk assembly of composite views for a list of parents.
//!
//! Each relation kind is fetched once for the whole list as flat rows keyed
//! by parent id. The rows are grouped in one pass and every parent picks up
//! its group; a parent with no rows gets the empty group. Output order is the
//! parent order, rows keep the order the store returned them in.

use std::collections::HashMap;
use std::hash::Hash;

/// Ids of `parents`, in order.
pub fn parent_ids<P>(parents: &[P], id: impl Fn(&P) -> i64) -> Vec<i64> {
    parents.iter().map(id).collect()
}

/// Distinct non-null foreign keys referenced by `items`, in first-seen order.
pub fn referenced_ids<T>(items: &[T], fk: impl Fn(&T) -> Option<i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::new();
    for id in items.iter().filter_map(fk) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Rows grouped by parent key; missing keys read as an empty group.
#[derive(Debug)]
pub struct Grouped<K, R> {
    groups: HashMap<K, Vec<R>>,
}

impl<K: Eq + Hash, R> Grouped<K, R> {
    pub fn get(&self, key: &K) -> &[R] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize { self.groups.len() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }
}

/// Group `rows` by `key` in a single pass.
pub fn group_by<K, R>(rows: Vec<R>, key: impl Fn(&R) -> K) -> Grouped<K, R>
where
    K: Eq + Hash,
{
    let mut groups: HashMap<K, Vec<R>> = HashMap::new();
    for row in rows {
        groups.entry(key(&row)).or_default().push(row);
    }
    Grouped { groups }
}

/// Index rows for an at-most-one relation. The first row per key wins.
pub fn index_by<K, R>(rows: Vec<R>, key: impl Fn(&R) -> K) -> HashMap<K, R>
where
    K: Eq + Hash,
{
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry(key(&row)).or_insert(row);
    }
    index
}
