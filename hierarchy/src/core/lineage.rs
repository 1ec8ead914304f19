//! Ancestor and descendant lookups over a flat collection.

use std::collections::HashSet;

use crate::core::build::cycle_at;
use crate::core::error::HierarchyResult;
use crate::core::index::{HierarchyIndex, Key};
use crate::core::options::TreeOptions;
use crate::core::record::{FieldValue, Record};

/// One step of an upward walk: the parent value that was followed and the
/// record it resolved to, if any.
#[derive(Debug)]
pub(crate) struct Step<'a, R: Record> {
    pub value: &'a R::Value,
    pub record: Option<&'a R>,
}

/// Walk from `start` towards the top, nearest parent first.
///
/// Stops at a blank or root parent value, or after a parent value that
/// matches no record (that last step carries `record: None`).
pub(crate) fn ascend<'a, R: Record>(
    index: &HierarchyIndex<'a, R>,
    start: &'a R,
    options: &TreeOptions<R::Value>,
) -> HierarchyResult<Vec<Step<'a, R>>> {
    let fields = &options.fields;
    let mut visited: HashSet<Key<R>> = HashSet::new();
    visited.insert(start.field_key(&fields.id));

    let mut steps = Vec::new();
    let mut current = start;
    while let Some(value) = options.upward_parent(current.field(&fields.parent)) {
        let Some(parent) = index.find(&value.key()) else {
            steps.push(Step {
                value,
                record: None,
            });
            break;
        };
        if options.cycle_guard.is_enabled() && !visited.insert(value.key()) {
            return Err(cycle_at(parent, &fields.id));
        }
        steps.push(Step {
            value,
            record: Some(parent),
        });
        current = parent;
    }
    Ok(steps)
}

/// Every ancestor of the record identified by `id`, top-level record first.
///
/// The record itself is not included. Unknown ids and top-level records
/// yield an empty result.
pub fn find_ancestors<R: Record>(
    records: &[R],
    id: &R::Value,
    options: &TreeOptions<R::Value>,
) -> HierarchyResult<Vec<R>> {
    let index = HierarchyIndex::build(records, options);
    let Some(start) = index.find(&id.key()) else {
        return Ok(Vec::new());
    };
    let steps = ascend(&index, start, options)?;
    Ok(steps
        .iter()
        .rev()
        .filter_map(|step| step.record.cloned())
        .collect())
}

/// Every descendant of `id` in pre-order: each child is followed directly by
/// its own subtree, children in input order.
///
/// `id` does not need to belong to a record; any record whose parent matches
/// it counts as a child. Querying the root value lists the whole forest,
/// including records whose parent is missing or blank.
pub fn find_descendants<R: Record>(
    records: &[R],
    id: &R::Value,
    options: &TreeOptions<R::Value>,
) -> HierarchyResult<Vec<R>> {
    let fields = &options.fields;
    let index = HierarchyIndex::build(records, options);
    let guard = options.cycle_guard.is_enabled();

    let start = options.parent_key(Some(id));
    let mut stack = vec![index.children_of(&start).iter()];
    let mut on_path: Vec<Key<R>> = vec![start];
    let mut found = Vec::new();

    loop {
        let Some(siblings) = stack.last_mut() else {
            break;
        };
        let Some(&position) = siblings.next() else {
            stack.pop();
            on_path.pop();
            continue;
        };

        let record = index.get(position);
        let key = record.field_key(&fields.id);
        if guard && on_path.contains(&key) {
            return Err(cycle_at(record, &fields.id));
        }
        found.push(record.clone());
        stack.push(index.children_of(&key).iter());
        on_path.push(key);
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::HierarchyError;
    use crate::core::options::CycleGuard;
    use crate::core::record::JsonRecord;
    use crate::test_support::{ids, record, records_from, sample_records};
    use serde_json::json;

    #[test]
    fn ancestors_are_listed_top_first() {
        let found = find_ancestors(&sample_records(), &json!(4), &TreeOptions::default())
            .expect("ancestors");
        assert_eq!(ids(&found), vec![json!(1), json!(2)]);
        assert_eq!(found[0]["name"], json!("root"));
    }

    #[test]
    fn ancestors_of_unknown_or_top_level_are_empty() {
        let records = sample_records();
        let options = TreeOptions::default();
        assert!(find_ancestors(&records, &json!(999), &options).expect("ancestors").is_empty());
        assert!(find_ancestors(&records, &json!(1), &options).expect("ancestors").is_empty());
        assert!(find_ancestors::<JsonRecord>(&[], &json!(1), &options).expect("ancestors").is_empty());
    }

    #[test]
    fn ancestors_stop_at_dangling_parent() {
        let records = vec![record(2, 1, "a"), record(3, 2, "b")];
        let found = find_ancestors(&records, &json!(3), &TreeOptions::default()).expect("ancestors");
        assert_eq!(ids(&found), vec![json!(2)]);
    }

    #[test]
    fn ancestors_accept_float_form_of_integer_id() {
        let records = sample_records();
        let found =
            find_ancestors(&records, &json!(4.0), &TreeOptions::default()).expect("ancestors");
        assert_eq!(ids(&found), vec![json!(1), json!(2)]);
    }

    #[test]
    fn descendants_inline_each_subtree_after_its_root() {
        let found = find_descendants(&sample_records(), &json!(1), &TreeOptions::default())
            .expect("descendants");
        assert_eq!(ids(&found), vec![json!(2), json!(4), json!(3)]);
    }

    #[test]
    fn descendants_of_leaf_or_unknown_are_empty() {
        let records = sample_records();
        let options = TreeOptions::default();
        assert!(find_descendants(&records, &json!(4), &options).expect("leaf").is_empty());
        assert!(find_descendants(&records, &json!(999), &options).expect("unknown").is_empty());
    }

    #[test]
    fn descendants_of_root_value_cover_whole_forest() {
        let found = find_descendants(&sample_records(), &json!(0), &TreeOptions::default())
            .expect("descendants");
        assert_eq!(ids(&found), vec![json!(1), json!(2), json!(4), json!(3)]);
    }

    #[test]
    fn descendants_of_root_value_include_null_and_missing_parents() {
        let records = records_from(json!([
            {"id": 1, "parent_id": null},
            {"id": 2, "parent_id": 1},
            {"id": 3},
            {"id": 4, "parent_id": 0},
        ]));
        let options = TreeOptions::default();
        let found = find_descendants(&records, &json!(0), &options).expect("descendants");
        assert_eq!(ids(&found), vec![json!(1), json!(2), json!(3), json!(4)]);
        let from_null = find_descendants(&records, &json!(null), &options).expect("descendants");
        assert_eq!(ids(&from_null), ids(&found));
    }

    #[test]
    fn null_parent_ends_ancestor_walk() {
        let records = records_from(json!([
            {"id": 1, "parent_id": null},
            {"id": 2, "parent_id": 1},
        ]));
        let found = find_ancestors(&records, &json!(2), &TreeOptions::default()).expect("ancestors");
        assert_eq!(ids(&found), vec![json!(1)]);
    }

    #[test]
    fn descendant_cycle_is_reported() {
        let records = vec![record(1, 2, "a"), record(2, 1, "b")];
        let err = find_descendants(&records, &json!(1), &TreeOptions::default())
            .expect_err("cycle");
        assert_eq!(
            err,
            HierarchyError::CycleDetected {
                id: "1".to_string()
            }
        );
    }

    #[test]
    fn ancestor_cycle_is_reported() {
        let records = vec![record(1, 3, "a"), record(2, 1, "b"), record(3, 2, "c")];
        let err = find_ancestors(&records, &json!(1), &TreeOptions::default()).expect_err("cycle");
        assert!(matches!(err, HierarchyError::CycleDetected { .. }));
    }

    #[test]
    fn duplicate_ids_are_not_a_cycle() {
        let records = vec![record(1, 0, "root"), record(2, 1, "a"), record(2, 1, "a again")];
        let options = TreeOptions::default().with_cycle_guard(CycleGuard::Enabled);
        let found = find_descendants(&records, &json!(1), &options).expect("descendants");
        assert_eq!(found.len(), 2);
    }
}
