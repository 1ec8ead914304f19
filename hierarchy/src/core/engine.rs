//! Entry point bundling the hierarchy operations behind one set of options.

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::build::build_tree;
use crate::core::error::HierarchyResult;
use crate::core::flatten::flatten_tree;
use crate::core::lineage::{find_ancestors, find_descendants};
use crate::core::options::TreeOptions;
use crate::core::path::{path_ids, path_nodes};
use crate::core::record::{FieldValue, JsonRecord, Record};

/// Stateless hierarchy engine.
///
/// Holds only configuration, so a single instance can be shared across
/// threads and called reentrantly.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy<R: Record> {
    options: TreeOptions<R::Value>,
}

impl Default for Hierarchy<JsonRecord> {
    fn default() -> Self {
        Self::new(TreeOptions::<Value>::default())
    }
}

impl<R: Record> Hierarchy<R> {
    pub fn new(options: TreeOptions<R::Value>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TreeOptions<R::Value> {
        &self.options
    }

    /// Flat collection to nested tree.
    pub fn to_tree(&self, records: &[R]) -> HierarchyResult<Vec<R>> {
        let tree = log_cycle(build_tree(records, &self.options))?;
        debug!(records = records.len(), roots = tree.len(), "built tree");
        Ok(tree)
    }

    /// Nested tree to pre-order flat collection with levels from `start_level`.
    pub fn to_flat(&self, tree: &[R], start_level: usize) -> Vec<R> {
        let flat = flatten_tree(tree, &self.options.fields, start_level);
        debug!(roots = tree.len(), records = flat.len(), start_level, "flattened tree");
        flat
    }

    pub fn ancestors(&self, records: &[R], id: &R::Value) -> HierarchyResult<Vec<R>> {
        let found = log_cycle(find_ancestors(records, id, &self.options))?;
        debug!(id = %id.describe(), found = found.len(), "resolved ancestors");
        Ok(found)
    }

    pub fn descendants(&self, records: &[R], id: &R::Value) -> HierarchyResult<Vec<R>> {
        let found = log_cycle(find_descendants(records, id, &self.options))?;
        debug!(id = %id.describe(), found = found.len(), "resolved descendants");
        Ok(found)
    }

    pub fn path_ids(
        &self,
        records: &[R],
        id: &R::Value,
        include_self: bool,
    ) -> HierarchyResult<Vec<R::Value>> {
        let path = log_cycle(path_ids(records, id, &self.options, include_self))?;
        debug!(id = %id.describe(), depth = path.len(), include_self, "resolved path ids");
        Ok(path)
    }

    pub fn path_nodes(
        &self,
        records: &[R],
        id: &R::Value,
        include_self: bool,
    ) -> HierarchyResult<Vec<R>> {
        let path = log_cycle(path_nodes(records, id, &self.options, include_self))?;
        debug!(id = %id.describe(), depth = path.len(), include_self, "resolved path nodes");
        Ok(path)
    }
}

fn log_cycle<T>(result: HierarchyResult<T>) -> HierarchyResult<T> {
    if let Err(err) = &result {
        warn!(error = %err, "hierarchy traversal aborted");
    }
    result
}
