//! Field change computer implementation.
//!
//! Fields of a shared class are compared positionally. Both sides are
//! filtered of layout noise and sorted by `(offset, name)`. Names present on
//! one side only are added or dropped. The remaining common-name sequences
//! are walked with two cursors: equal names are paired in place, and on a
//! mismatch the field that has been displaced farther from its counterpart
//! is classified as moved.
//!
//! A field that was renamed and moved in the same change is reported as one
//! dropped and one added field.

use crate::diff::attributes::{compare_fields, AttributeRule, COMPARED_ATTRIBUTES};
use crate::diff::traits::ChangeComputer;
use crate::diff::{ClassFieldChanges, FieldAlteration, FieldMove, FieldPosition};
use crate::model::{ClassRecord, FieldRecord, SaveFile};
use indexmap::IndexMap;

/// Computes per-class field changes for classes present in both save files.
pub struct FieldChangeComputer {
    rules: Vec<AttributeRule>,
}

impl FieldChangeComputer {
    /// Create a field change computer using the default attribute table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(COMPARED_ATTRIBUTES.to_vec())
    }

    /// Create a field change computer using a custom attribute table.
    #[must_use]
    pub const fn with_rules(rules: Vec<AttributeRule>) -> Self {
        Self { rules }
    }

    /// Attribute rules applied to paired fields.
    #[must_use]
    pub fn rules(&self) -> &[AttributeRule] {
        &self.rules
    }

    /// Diff the fields of two versions of the same class.
    #[must_use]
    pub fn diff_class(&self, left: &ClassRecord, right: &ClassRecord) -> ClassFieldChanges {
        let mut changes = ClassFieldChanges::new(left.name.as_str());

        let left_fields = comparable_fields(left);
        let right_fields = comparable_fields(right);
        let left_names = name_positions(&left_fields);
        let right_names = name_positions(&right_fields);

        changes.added = right_fields
            .iter()
            .filter(|f| !left_names.contains_key(f.name.as_str()))
            .map(|f| FieldPosition::from(*f))
            .collect();
        changes.dropped = left_fields
            .iter()
            .filter(|f| !right_names.contains_key(f.name.as_str()))
            .map(|f| FieldPosition::from(*f))
            .collect();

        let left_common: Vec<&FieldRecord> = left_fields
            .iter()
            .copied()
            .filter(|f| right_names.contains_key(f.name.as_str()))
            .collect();
        let right_common: Vec<&FieldRecord> = right_fields
            .iter()
            .copied()
            .filter(|f| left_names.contains_key(f.name.as_str()))
            .collect();

        let (pairs, moved) = Walk::new(left_common, right_common).run();
        changes.moved = moved;

        for (l, r) in pairs {
            let found = compare_fields(&self.rules, l, r);
            if !found.is_empty() {
                changes.altered.push(FieldAlteration {
                    name: l.name.clone(),
                    offset: l.offset,
                    changes: found,
                });
            }
        }

        changes
            .moved
            .sort_by(|a, b| (a.from_offset, &a.name).cmp(&(b.from_offset, &b.name)));
        changes
            .altered
            .sort_by(|a, b| (a.offset, &a.name).cmp(&(b.offset, &b.name)));
        changes
    }
}

impl Default for FieldChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for FieldChangeComputer {
    type ChangeSet = Vec<ClassFieldChanges>;

    fn compute(&self, left: &SaveFile, right: &SaveFile) -> Vec<ClassFieldChanges> {
        let right_index = right.class_index();
        let mut shared: Vec<(&ClassRecord, &ClassRecord)> = left
            .classes
            .iter()
            .filter_map(|l| right_index.get(l.name.as_str()).map(|r| (l, *r)))
            .collect();
        shared.sort_by(|a, b| a.0.name.cmp(&b.0.name));

        shared
            .into_iter()
            .map(|(l, r)| self.diff_class(l, r))
            .filter(|changes| {
                if !changes.is_empty() {
                    tracing::debug!(
                        "Class {}: {} added, {} dropped, {} moved, {} altered",
                        changes.class_name,
                        changes.added.len(),
                        changes.dropped.len(),
                        changes.moved.len(),
                        changes.altered.len()
                    );
                }
                !changes.is_empty()
            })
            .collect()
    }

    fn name(&self) -> &str {
        "FieldChangeComputer"
    }
}

/// Fields worth comparing, sorted by position.
fn comparable_fields(class: &ClassRecord) -> Vec<&FieldRecord> {
    let mut fields: Vec<&FieldRecord> = class
        .fields
        .iter()
        .filter(|f| !f.is_layout_noise())
        .collect();
    fields.sort_by(|a, b| a.position_key().cmp(&b.position_key()));
    fields
}

fn name_positions<'a>(fields: &[&'a FieldRecord]) -> IndexMap<&'a str, usize> {
    fields
        .iter()
        .enumerate()
        .map(|(i, f)| (f.name.as_str(), i))
        .collect()
}

/// Pairing state of the two-cursor walk.
struct Walk<'a> {
    left: Vec<&'a FieldRecord>,
    right: Vec<&'a FieldRecord>,
    left_done: Vec<bool>,
    right_done: Vec<bool>,
    pairs: Vec<(&'a FieldRecord, &'a FieldRecord)>,
    moved: Vec<FieldMove>,
}

impl<'a> Walk<'a> {
    fn new(left: Vec<&'a FieldRecord>, right: Vec<&'a FieldRecord>) -> Self {
        Self {
            left_done: vec![false; left.len()],
            right_done: vec![false; right.len()],
            pairs: Vec::with_capacity(left.len()),
            moved: Vec::new(),
            left,
            right,
        }
    }

    fn pair(&mut self, li: usize, ri: usize, is_move: bool) {
        self.left_done[li] = true;
        self.right_done[ri] = true;
        let (l, r) = (self.left[li], self.right[ri]);
        if is_move {
            self.moved.push(FieldMove {
                name: l.name.clone(),
                from_offset: l.offset,
                to_offset: r.offset,
            });
        }
        self.pairs.push((l, r));
    }

    /// Walk sequences holding the same set of names, pairing every field
    /// exactly once.
    ///
    /// Consumption is always pairwise, so an unconsumed field's counterpart
    /// is never behind the opposite cursor.
    fn run(mut self) -> (Vec<(&'a FieldRecord, &'a FieldRecord)>, Vec<FieldMove>) {
        let left_pos = name_positions(&self.left);
        let right_pos = name_positions(&self.right);

        let (mut i, mut j) = (0, 0);
        loop {
            while i < self.left.len() && self.left_done[i] {
                i += 1;
            }
            while j < self.right.len() && self.right_done[j] {
                j += 1;
            }
            if i >= self.left.len() || j >= self.right.len() {
                break;
            }

            let (l, r) = (self.left[i], self.right[j]);
            if l.name == r.name {
                self.pair(i, j, false);
                continue;
            }

            let (Some(&l_there), Some(&r_there)) =
                (right_pos.get(l.name.as_str()), left_pos.get(r.name.as_str()))
            else {
                break;
            };
            let left_displacement = l_there.saturating_sub(j);
            let right_displacement = r_there.saturating_sub(i);

            // On a tie both fields swapped places and both count as moved.
            if left_displacement >= right_displacement {
                self.pair(i, l_there, true);
            }
            if right_displacement >= left_displacement {
                self.pair(r_there, j, true);
            }
        }

        (self.pairs, self.moved)
    }
}
