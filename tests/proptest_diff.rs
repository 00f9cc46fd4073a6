//! Property-based tests for the diff engine.
//!
//! Random save files are built from small name pools so that shared classes
//! and shared field names are common.

use datamap_tools::diff::{ClassFieldChanges, DiffEngine, DiffOutcome};
use datamap_tools::model::{ClassRecord, FieldRecord, FieldType, ResolveMode, SaveFile};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

const TYPES: [FieldType; 4] = [
    FieldType::Integer,
    FieldType::Float,
    FieldType::Boolean,
    FieldType::Void,
];

type ClassLayout = BTreeMap<u8, (u64, usize)>;

fn class_layout() -> impl Strategy<Value = ClassLayout> {
    prop::collection::btree_map(0u8..8, (0u64..16, 0usize..TYPES.len()), 0..8)
}

fn save_layout() -> impl Strategy<Value = BTreeMap<u8, ClassLayout>> {
    prop::collection::btree_map(0u8..5, class_layout(), 1..5)
}

fn build(version: &str, layout: &BTreeMap<u8, ClassLayout>) -> SaveFile {
    let classes = layout
        .iter()
        .map(|(class, fields)| {
            fields.iter().fold(
                ClassRecord::new(format!("C{class}"), "server.dll"),
                |record, (field, (slot, ty))| {
                    record.with_field(FieldRecord::new(format!("f{field}"), TYPES[*ty], slot * 4))
                },
            )
        })
        .collect();
    SaveFile::new("game", version, classes, ResolveMode::Resolve)
}

/// Names of the fields that survive the layout-noise filter.
fn comparable_names(fields: &ClassLayout) -> HashSet<String> {
    fields
        .iter()
        .filter(|(_, (_, ty))| TYPES[*ty] != FieldType::Void)
        .map(|(field, _)| format!("f{field}"))
        .collect()
}

fn with_flags(mut save: SaveFile, flags: i64) -> SaveFile {
    for field in save.classes.iter_mut().flat_map(|c| c.fields.iter_mut()) {
        field.flags = flags;
    }
    save
}

fn names<'a>(items: impl Iterator<Item = &'a str>) -> HashSet<&'a str> {
    items.collect()
}

fn assert_disjoint(changes: &ClassFieldChanges) -> Result<(), TestCaseError> {
    let added = names(changes.added.iter().map(|f| f.name.as_str()));
    let dropped = names(changes.dropped.iter().map(|f| f.name.as_str()));
    let moved = names(changes.moved.iter().map(|m| m.name.as_str()));
    let altered = names(changes.altered.iter().map(|a| a.name.as_str()));

    prop_assert_eq!(moved.len(), changes.moved.len(), "field moved twice");
    prop_assert_eq!(altered.len(), changes.altered.len(), "field altered twice");
    prop_assert!(added.is_disjoint(&dropped));
    for paired in moved.union(&altered) {
        prop_assert!(!added.contains(paired) && !dropped.contains(paired));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn diff_is_deterministic(left in save_layout(), right in save_layout()) {
        let (left, right) = (build("1", &left), build("2", &right));
        let first = serde_json::to_string(&DiffEngine::new().diff(&left, &right)).unwrap();
        let second = serde_json::to_string(&DiffEngine::new().diff(&left, &right)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn same_identity_is_identical(left in save_layout(), right in save_layout()) {
        let outcome = DiffEngine::new().diff(&build("1", &left), &build("1", &right));
        prop_assert!(outcome.is_identical());
    }

    #[test]
    fn self_comparison_finds_nothing(layout in save_layout()) {
        let outcome = DiffEngine::new().diff(&build("1", &layout), &build("2", &layout));
        prop_assert!(!outcome.has_changes());
    }

    #[test]
    fn existence_sets_are_symmetric(left in save_layout(), right in save_layout()) {
        let (left, right) = (build("1", &left), build("2", &right));
        let forward = DiffEngine::new().diff(&left, &right);
        let backward = DiffEngine::new().diff(&right, &left);
        let (DiffOutcome::Compared(forward), DiffOutcome::Compared(backward)) = (forward, backward)
        else {
            return Err(TestCaseError::fail("different versions must be compared"));
        };

        prop_assert_eq!(&forward.classes.added, &backward.classes.dropped);
        prop_assert_eq!(&forward.classes.dropped, &backward.classes.added);

        for changes in &forward.fields {
            let reverse = backward.class_changes(&changes.class_name);
            let reverse_added = reverse.map(|c| c.added.clone()).unwrap_or_default();
            let reverse_dropped = reverse.map(|c| c.dropped.clone()).unwrap_or_default();
            prop_assert_eq!(&changes.added, &reverse_dropped);
            prop_assert_eq!(&changes.dropped, &reverse_added);
        }
    }

    #[test]
    fn no_double_classification(left in save_layout(), right in save_layout()) {
        let outcome = DiffEngine::new().diff(&build("1", &left), &build("2", &right));
        for changes in &outcome.result().unwrap().fields {
            assert_disjoint(changes)?;
            prop_assert!(!changes.is_empty());
        }
    }

    #[test]
    fn every_common_field_is_paired_once(left in save_layout(), right in save_layout()) {
        // Every pairing shows up as a flags alteration, moved or not
        let outcome = DiffEngine::new().diff(&build("1", &left), &with_flags(build("2", &right), 1));
        let result = outcome.result().unwrap();

        for (class, left_fields) in &left {
            let Some(right_fields) = right.get(class) else {
                continue;
            };
            let left_names = comparable_names(left_fields);
            let right_names = comparable_names(right_fields);
            let common = names(left_names.intersection(&right_names).map(String::as_str));

            let altered: Vec<&str> = result
                .class_changes(&format!("C{class}"))
                .map(|c| c.altered.iter().map(|a| a.name.as_str()).collect())
                .unwrap_or_default();
            let paired = names(altered.iter().copied());
            prop_assert_eq!(paired.len(), altered.len(), "field paired twice");
            prop_assert_eq!(paired, common);
        }
    }
}
