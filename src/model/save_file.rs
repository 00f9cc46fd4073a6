//! Datamap save file: one snapshot of a program's reflection metadata.

use super::{ClassId, ClassRecord, ClassRef};
use indexmap::IndexMap;

/// The only save file schema version this crate understands.
pub const SUPPORTED_SCHEMA_VERSION: u64 = 2;

/// Whether class references are turned into arena indices on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Resolve names of earlier-declared classes to [`ClassRef::Resolved`]
    #[default]
    Resolve,
    /// Keep every reference as [`ClassRef::Unresolved`]
    Keep,
}

/// A decoded datamap save file.
///
/// Classes form an arena in declaration order; every resolved reference points
/// at an earlier index, so the dependency graph is acyclic by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveFile {
    pub schema_version: u64,
    pub game_name: String,
    pub game_version: String,
    pub classes: Vec<ClassRecord>,
}

impl SaveFile {
    /// Build a save file, resolving class references according to `mode`.
    #[must_use]
    pub fn new(
        game_name: impl Into<String>,
        game_version: impl Into<String>,
        classes: Vec<ClassRecord>,
        mode: ResolveMode,
    ) -> Self {
        let mut save = Self {
            schema_version: SUPPORTED_SCHEMA_VERSION,
            game_name: game_name.into(),
            game_version: game_version.into(),
            classes,
        };
        if mode == ResolveMode::Resolve {
            save.resolve_references();
        }
        save
    }

    /// Single forward pass: a name resolves only to a class declared before
    /// the one holding the reference.
    fn resolve_references(&mut self) {
        let mut seen: IndexMap<String, ClassId> = IndexMap::new();
        for (i, class) in self.classes.iter_mut().enumerate() {
            resolve_one(&mut class.base_class, &seen);
            for field in &mut class.fields {
                resolve_one(&mut field.embedded_class, &seen);
            }
            seen.entry(class.name.clone()).or_insert(ClassId(i));
        }
    }

    /// Provenance label, `"<game_name> (<game_version>)"`.
    #[must_use]
    pub fn identity(&self) -> String {
        format!("{} ({})", self.game_name, self.game_version)
    }

    /// Lookup of classes by name, in declaration order.
    #[must_use]
    pub fn class_index(&self) -> IndexMap<&str, &ClassRecord> {
        self.classes.iter().map(|c| (c.name.as_str(), c)).collect()
    }

    /// Find a class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassRecord> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Class at an arena index.
    #[must_use]
    pub fn get(&self, id: ClassId) -> Option<&ClassRecord> {
        self.classes.get(id.index())
    }

    /// Follow a reference through the arena.
    #[must_use]
    pub fn resolve(&self, reference: &ClassRef) -> Option<&ClassRecord> {
        reference.resolved().and_then(|id| self.get(id))
    }

    /// Inheritance chain of `class`, nearest base first.
    ///
    /// Stops at the first unset or unresolved base. Resolved bases always
    /// point backwards in the arena, so the walk terminates.
    #[must_use]
    pub fn base_chain<'a>(&'a self, class: &'a ClassRecord) -> Vec<&'a ClassRecord> {
        let mut chain = Vec::new();
        let mut current = class;
        while let Some(base) = self.resolve(&current.base_class) {
            if chain.len() >= self.classes.len() {
                break;
            }
            chain.push(base);
            current = base;
        }
        chain
    }

    /// Number of classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of fields across all classes.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.classes.iter().map(|c| c.fields.len()).sum()
    }
}

fn resolve_one(reference: &mut ClassRef, seen: &IndexMap<String, ClassId>) {
    if let ClassRef::Unresolved(name) = reference
        && let Some(&id) = seen.get(name.as_str())
    {
        *reference = ClassRef::Resolved(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldRecord, FieldType};

    fn sample_classes() -> Vec<ClassRecord> {
        let mut base = ClassRecord::new("CBaseEntity", "server.dll");
        base.fields
            .push(FieldRecord::new("m_iHealth", FieldType::Integer, 0));

        let mut player = ClassRecord::new("CBasePlayer", "server.dll");
        player.base_class = ClassRef::Unresolved("CBaseEntity".to_string());
        let mut local = FieldRecord::new("m_Local", FieldType::Embedded, 8);
        local.embedded_class = ClassRef::Unresolved("CBaseEntity".to_string());
        player.fields.push(local);

        let mut dangling = ClassRecord::new("CWeapon", "server.dll");
        dangling.base_class = ClassRef::Unresolved("CLater".to_string());

        vec![base, player, dangling]
    }

    #[test]
    fn test_forward_resolution() {
        let save = SaveFile::new("hl2", "1.0", sample_classes(), ResolveMode::Resolve);

        let player = save.class("CBasePlayer").expect("player class");
        assert_eq!(player.base_class, ClassRef::Resolved(ClassId(0)));
        assert_eq!(
            player.fields[0].embedded_class,
            ClassRef::Resolved(ClassId(0))
        );
        assert_eq!(
            save.resolve(&player.base_class).map(|c| c.name.as_str()),
            Some("CBaseEntity")
        );

        let weapon = save.class("CWeapon").expect("weapon class");
        assert_eq!(
            weapon.base_class,
            ClassRef::Unresolved("CLater".to_string())
        );
    }

    #[test]
    fn test_keep_mode_leaves_names() {
        let save = SaveFile::new("hl2", "1.0", sample_classes(), ResolveMode::Keep);
        let player = save.class("CBasePlayer").expect("player class");
        assert_eq!(
            player.base_class,
            ClassRef::Unresolved("CBaseEntity".to_string())
        );
        assert!(save.resolve(&player.base_class).is_none());
    }

    #[test]
    fn test_base_chain() {
        let mut classes = sample_classes();
        let mut hl2_player = ClassRecord::new("CHL2_Player", "server.dll");
        hl2_player.base_class = ClassRef::Unresolved("CBasePlayer".to_string());
        classes.push(hl2_player);

        let save = SaveFile::new("hl2", "1.0", classes, ResolveMode::Resolve);
        let leaf = save.class("CHL2_Player").expect("leaf class");
        let names: Vec<_> = save
            .base_chain(leaf)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["CBasePlayer", "CBaseEntity"]);
    }

    #[test]
    fn test_identity_and_counts() {
        let save = SaveFile::new("Half-Life 2", "5135", sample_classes(), ResolveMode::Resolve);
        assert_eq!(save.identity(), "Half-Life 2 (5135)");
        assert_eq!(save.class_count(), 3);
        assert_eq!(save.field_count(), 2);
        assert_eq!(
            save.class_index().keys().copied().collect::<Vec<_>>(),
            vec!["CBaseEntity", "CBasePlayer", "CWeapon"]
        );
    }
}
