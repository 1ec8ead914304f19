//! Root-first paths to a record.

use crate::core::error::HierarchyResult;
use crate::core::index::HierarchyIndex;
use crate::core::lineage::ascend;
use crate::core::options::TreeOptions;
use crate::core::record::{FieldValue, Record};

/// Identifiers from the top-level ancestor down to `id`.
///
/// Parent values are reported as they appear in the records, including a
/// trailing parent value that matches no record. An unknown `id` yields an
/// empty path even with `include_self`: only the target must resolve to a
/// record, ancestors above it need not.
pub fn path_ids<R: Record>(
    records: &[R],
    id: &R::Value,
    options: &TreeOptions<R::Value>,
    include_self: bool,
) -> HierarchyResult<Vec<R::Value>> {
    let index = HierarchyIndex::build(records, options);
    let Some(start) = index.find(&id.key()) else {
        return Ok(Vec::new());
    };
    let mut path: Vec<R::Value> = ascend(&index, start, options)?
        .iter()
        .rev()
        .map(|step| step.value.clone())
        .collect();
    if include_self {
        path.push(id.clone());
    }
    Ok(path)
}

/// Records from the top-level ancestor down to `id`.
///
/// Unlike [`path_ids`], a dangling parent value ends the path silently since
/// there is no record to report for it.
pub fn path_nodes<R: Record>(
    records: &[R],
    id: &R::Value,
    options: &TreeOptions<R::Value>,
    include_self: bool,
) -> HierarchyResult<Vec<R>> {
    let index = HierarchyIndex::build(records, options);
    let Some(start) = index.find(&id.key()) else {
        return Ok(Vec::new());
    };
    let mut path: Vec<R> = ascend(&index, start, options)?
        .iter()
        .rev()
        .filter_map(|step| step.record.cloned())
        .collect();
    if include_self {
        path.push(start.clone());
    }
    Ok(path)
}
