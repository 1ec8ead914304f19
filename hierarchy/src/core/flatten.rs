//! Nested tree back to a flat, depth-annotated collection.

use crate::core::options::FieldNames;
use crate::core::record::Record;

/// Pre-order flattening: each node is emitted before its children, and a
/// node's whole subtree is emitted before its next sibling.
///
/// Emitted records lose the children field and gain the level field, set to
/// `start_level` for the top-level nodes and one more per nesting step.
pub fn flatten_tree<R: Record>(tree: &[R], fields: &FieldNames, start_level: usize) -> Vec<R> {
    let mut flat = Vec::with_capacity(tree.len());
    let mut stack = vec![(tree.to_vec().into_iter(), start_level)];

    loop {
        let Some((siblings, level)) = stack.last_mut() else {
            break;
        };
        let level = *level;
        let Some(mut node) = siblings.next() else {
            stack.pop();
            continue;
        };

        let children = node
            .remove_field(&fields.children)
            .map(R::children_from)
            .unwrap_or_default();
        node.set_field(&fields.level, R::level_value(level));
        flat.push(node);

        if !children.is_empty() {
            stack.push((children.into_iter(), level + 1));
        }
    }

    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build::build_tree;
    use crate::core::options::TreeOptions;
    use crate::core::record::JsonRecord;
    use crate::test_support::{ids, records_from, sample_records};
    use serde_json::json;

    #[test]
    fn flattens_in_pre_order_with_levels() {
        let tree = build_tree(&sample_records(), &TreeOptions::default()).expect("tree");
        let flat = flatten_tree(&tree, &FieldNames::default(), 0);
        assert_eq!(
            serde_json::to_value(&flat).expect("json"),
            json!([
                {"id": 1, "parent_id": 0, "name": "root", "level": 0},
                {"id": 2, "parent_id": 1, "name": "a", "level": 1},
                {"id": 4, "parent_id": 2, "name": "c", "level": 2},
                {"id": 3, "parent_id": 1, "name": "b", "level": 1},
            ])
        );
    }

    #[test]
    fn start_level_offsets_every_depth() {
        let tree = records_from(json!([{"id": 1, "children": [{"id": 2}]}]));
        let flat = flatten_tree(&tree, &FieldNames::default(), 3);
        let levels: Vec<_> = flat.iter().map(|node| node["level"].clone()).collect();
        assert_eq!(levels, vec![json!(3), json!(4)]);
    }

    #[test]
    fn empty_tree_flattens_to_nothing() {
        assert!(flatten_tree::<JsonRecord>(&[], &FieldNames::default(), 0).is_empty());
    }

    #[test]
    fn non_sequence_children_field_is_dropped() {
        let tree = records_from(json!([{"id": 1, "children": "none"}, {"id": 2, "children": []}]));
        let flat = flatten_tree(&tree, &FieldNames::default(), 0);
        assert_eq!(ids(&flat), vec![json!(1), json!(2)]);
        assert!(flat.iter().all(|node| !node.contains_key("children")));
    }

    #[test]
    fn removed_children_field_keeps_field_order() {
        let tree = records_from(json!([{"id": 1, "children": [], "name": "x"}]));
        let flat = flatten_tree(&tree, &FieldNames::default(), 0);
        let keys: Vec<&str> = flat[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "level"]);
    }

    #[test]
    fn flattening_leaves_input_tree_intact() {
        let tree = build_tree(&sample_records(), &TreeOptions::default()).expect("tree");
        let before = tree.clone();
        flatten_tree(&tree, &FieldNames::default(), 0);
        assert_eq!(tree, before);
    }
}
