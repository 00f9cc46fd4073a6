use datamap_tools::{load_save_file, DiffEngine, DiffOutcome};
use std::path::Path;

#[test]
fn golden_load_entity_player_v1() {
    let save = load_save_file(Path::new("tests/fixtures/entity_player_v1.json"))
        .expect("failed to load v1 fixture");

    assert_eq!(save.identity(), "hl2 (1)");
    assert_eq!(save.class_count(), 2);
    assert_eq!(save.field_count(), 3);

    // Player's base resolves to Entity, which is declared first
    let player = save.class("Player").expect("Player declared");
    let chain: Vec<&str> = save
        .base_chain(player)
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(chain, vec!["Entity"]);
}

#[test]
fn golden_diff_entity_player_weapon() {
    let left = load_save_file(Path::new("tests/fixtures/entity_player_v1.json"))
        .expect("failed to load v1 fixture");
    let right = load_save_file(Path::new("tests/fixtures/entity_player_v2.json"))
        .expect("failed to load v2 fixture");

    let outcome = DiffEngine::new().diff(&left, &right);
    let DiffOutcome::Compared(diff) = outcome else {
        panic!("different versions must be compared");
    };

    // Weapon is new; Player gained health at 12; Entity is untouched
    assert_eq!(diff.classes.added, vec!["Weapon"]);
    assert!(diff.classes.dropped.is_empty());
    assert_eq!(diff.summary.classes_changed, 1);
    assert_eq!(diff.summary.fields_added, 1);
    assert_eq!(diff.summary.total_changes, 2);

    let player = diff.class_changes("Player").expect("Player changed");
    assert_eq!(player.added[0].name, "health");
    assert_eq!(player.added[0].offset, 12);
    assert!(player.moved.is_empty());
    assert!(player.altered.is_empty());
}

#[test]
fn golden_diff_layout_changes() {
    let left = load_save_file(Path::new("tests/fixtures/layout_v3.json"))
        .expect("failed to load layout v3 fixture");
    let right = load_save_file(Path::new("tests/fixtures/layout_v4.json"))
        .expect("failed to load layout v4 fixture");

    let outcome = DiffEngine::new().diff(&left, &right);
    let diff = outcome.result().expect("comparison ran");

    // Padding and bound input handles produce no findings
    let player = diff.class_changes("Player").expect("Player changed");
    assert_eq!(
        player.added.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["renamed"]
    );
    assert_eq!(
        player.dropped.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["old"]
    );
    assert_eq!(
        player
            .moved
            .iter()
            .map(|m| (m.name.as_str(), m.from_offset, m.to_offset))
            .collect::<Vec<_>>(),
        vec![("a", 0, 8), ("b", 8, 0)]
    );
    assert_eq!(player.altered.len(), 1);
    assert_eq!(player.altered[0].name, "flags");
    assert_eq!(player.altered[0].changes.len(), 2);
    assert_eq!(diff.summary.total_changes, 5);
}
