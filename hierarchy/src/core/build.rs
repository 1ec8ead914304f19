//! Flat collection to nested tree.

use std::collections::HashSet;

use crate::core::error::{HierarchyError, HierarchyResult};
use crate::core::index::{HierarchyIndex, Key};
use crate::core::options::TreeOptions;
use crate::core::record::{FieldValue, Record};

/// A record whose children are still being assembled.
struct Frame<R> {
    /// `None` for the synthetic frame holding the top-level records.
    position: Option<usize>,
    pending: std::vec::IntoIter<usize>,
    built: Vec<R>,
}

/// Nest `records` under the children field, starting from top-level records.
///
/// Siblings keep input order. Leaves get no children field. Records that are
/// not reachable from a top-level record are left out.
pub fn build_tree<R: Record>(
    records: &[R],
    options: &TreeOptions<R::Value>,
) -> HierarchyResult<Vec<R>> {
    let fields = &options.fields;
    let index = HierarchyIndex::build(records, options);
    let roots: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| options.is_root_parent(record.field(&fields.parent)))
        .map(|(position, _)| position)
        .collect();

    let mut on_path: HashSet<Key<R>> = HashSet::new();
    let mut stack = vec![Frame {
        position: None,
        pending: roots.into_iter(),
        built: Vec::new(),
    }];

    while let Some(frame) = stack.last_mut() {
        if let Some(next) = frame.pending.next() {
            let record = index.get(next);
            let key = record.field_key(&fields.id);
            if options.cycle_guard.is_enabled() && !on_path.insert(key.clone()) {
                return Err(cycle_at(record, &fields.id));
            }
            stack.push(Frame {
                position: Some(next),
                pending: index.children_of(&key).to_vec().into_iter(),
                built: Vec::new(),
            });
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        let Some(position) = done.position else {
            return Ok(done.built);
        };
        let source = index.get(position);
        on_path.remove(&source.field_key(&fields.id));
        let node = if done.built.is_empty() {
            source.clone()
        } else {
            source.with_field(&fields.children, R::children_value(done.built))
        };
        if let Some(parent) = stack.last_mut() {
            parent.built.push(node);
        }
    }

    Ok(Vec::new())
}

pub(crate) fn cycle_at<R: Record>(record: &R, id_field: &str) -> HierarchyError {
    let id = record
        .field(id_field)
        .map_or_else(|| R::Value::absent().describe(), |value| value.describe());
    HierarchyError::CycleDetected { id }
}
