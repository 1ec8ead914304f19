//! Flat-to-tree and tree-to-flat transformations for parent-linked records.
//!
//! Records are free-form field mappings carrying an identifier and a parent
//! identifier. The crate is split the same way throughout:
//!
//! - **[`core`]**: Pure, deterministic logic (indexing, tree building,
//!   flattening, ancestor/descendant/path queries). No I/O.
//! - **[`io`]**: Loading record documents and configuration from disk.
//!
//! [`command`] ties both together for the `hierarchy` binary.

pub mod command;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::engine::Hierarchy;
pub use crate::core::error::{HierarchyError, HierarchyResult};
pub use crate::core::options::{CycleGuard, FieldNames, TreeOptions};
pub use crate::core::record::{FieldValue, JsonKey, JsonRecord, Record};
