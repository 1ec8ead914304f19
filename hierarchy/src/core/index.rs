//! Per-call lookup tables over a flat collection.

use std::collections::HashMap;

use crate::core::options::TreeOptions;
use crate::core::record::{FieldValue, Record};

pub type Key<R> = <<R as Record>::Value as FieldValue>::Key;

/// Identifier and parent lookups built once per top-level call.
///
/// Child lists keep input order, so traversals over the index emit records in
/// the same order as a repeated full scan would. Parents are grouped by
/// [`TreeOptions::parent_key`], so blank parents land under a blank root.
#[derive(Debug)]
pub struct HierarchyIndex<'a, R: Record> {
    records: &'a [R],
    by_id: HashMap<Key<R>, usize>,
    children: HashMap<Key<R>, Vec<usize>>,
}

impl<'a, R: Record> HierarchyIndex<'a, R> {
    pub fn build(records: &'a [R], options: &TreeOptions<R::Value>) -> Self {
        let fields = &options.fields;
        let mut by_id = HashMap::with_capacity(records.len());
        let mut children: HashMap<Key<R>, Vec<usize>> = HashMap::new();
        for (position, record) in records.iter().enumerate() {
            // First occurrence wins for duplicated identifiers.
            by_id.entry(record.field_key(&fields.id)).or_insert(position);
            children
                .entry(options.parent_key(record.field(&fields.parent)))
                .or_default()
                .push(position);
        }
        Self {
            records,
            by_id,
            children,
        }
    }

    pub fn get(&self, position: usize) -> &'a R {
        &self.records[position]
    }

    /// First record whose identifier matches `key`.
    pub fn find(&self, key: &Key<R>) -> Option<&'a R> {
        self.by_id.get(key).map(|&position| &self.records[position])
    }

    /// Positions of records whose parent matches `key`, in input order.
    pub fn children_of(&self, key: &Key<R>) -> &[usize] {
        self.children.get(key).map_or(&[], Vec::as_slice)
    }
}
