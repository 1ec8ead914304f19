//! Field names and traversal options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::record::FieldValue;

/// Names of the fields the engine reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub id: String,
    pub parent: String,
    /// Added by tree building, removed by flattening.
    pub children: String,
    /// Depth annotation written by flattening.
    pub level: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            parent: "parent_id".to_string(),
            children: "children".to_string(),
            level: "level".to_string(),
        }
    }
}

/// Whether traversals track visited identifiers.
///
/// With the guard disabled a parent cycle makes tree building and downward
/// or upward walks run without bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleGuard {
    #[default]
    Enabled,
    Disabled,
}

impl CycleGuard {
    pub fn is_enabled(self) -> bool {
        matches!(self, CycleGuard::Enabled)
    }
}

/// Options shared by every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeOptions<V> {
    pub fields: FieldNames,
    /// Parent value that marks a top-level record.
    pub root: V,
    pub cycle_guard: CycleGuard,
}

impl Default for TreeOptions<Value> {
    fn default() -> Self {
        Self::new(Value::from(0))
    }
}

impl<V: FieldValue> TreeOptions<V> {
    pub fn new(root: V) -> Self {
        Self {
            fields: FieldNames::default(),
            root,
            cycle_guard: CycleGuard::default(),
        }
    }

    pub fn with_fields(mut self, fields: FieldNames) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_id_field(mut self, name: impl Into<String>) -> Self {
        self.fields.id = name.into();
        self
    }

    pub fn with_parent_field(mut self, name: impl Into<String>) -> Self {
        self.fields.parent = name.into();
        self
    }

    pub fn with_children_field(mut self, name: impl Into<String>) -> Self {
        self.fields.children = name.into();
        self
    }

    pub fn with_level_field(mut self, name: impl Into<String>) -> Self {
        self.fields.level = name.into();
        self
    }

    pub fn with_root(mut self, root: V) -> Self {
        self.root = root;
        self
    }

    pub fn with_cycle_guard(mut self, guard: CycleGuard) -> Self {
        self.cycle_guard = guard;
        self
    }

    /// Key a parent value is grouped under.
    ///
    /// With a blank root value, a missing parent field and any blank parent
    /// value (`null`, `0`, `""`, ...) all collapse onto the root key, the same
    /// values an upward walk treats as the top.
    pub(crate) fn parent_key(&self, parent: Option<&V>) -> V::Key {
        if self.root.is_blank() && parent.is_none_or(|value| value.is_blank()) {
            return self.root.key();
        }
        match parent {
            Some(value) => value.key(),
            None => V::absent().key(),
        }
    }

    /// True when a parent value marks its record as top-level for tree building.
    pub(crate) fn is_root_parent(&self, parent: Option<&V>) -> bool {
        self.parent_key(parent) == self.root.key()
    }

    /// Parent value an upward walk should follow, if any.
    pub(crate) fn upward_parent<'a>(&self, parent: Option<&'a V>) -> Option<&'a V> {
        parent.filter(|value| !value.is_blank() && value.key() != self.root.key())
    }
}
