//! Class and field records.

use super::FieldType;
use indexmap::IndexMap;
use std::fmt;

/// Position of a class in its save file's `classes` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub usize);

impl ClassId {
    /// Index into `SaveFile::classes`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference from a class or field to another class record.
///
/// Save files store references by name. Once the whole class list is loaded,
/// a single forward pass turns names of earlier-declared classes into arena
/// indices; names that could not be resolved stay `Unresolved`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClassRef {
    #[default]
    Unset,
    Unresolved(String),
    Resolved(ClassId),
}

impl ClassRef {
    /// Build a reference from an optional class name.
    #[must_use]
    pub fn from_name(name: Option<String>) -> Self {
        name.map_or(Self::Unset, Self::Unresolved)
    }

    /// Whether anything is referenced at all.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// The arena index, if resolved.
    #[must_use]
    pub const fn resolved(&self) -> Option<ClassId> {
        match self {
            Self::Resolved(id) => Some(*id),
            _ => None,
        }
    }
}

/// One field of a datamap class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    pub name: String,
    pub field_type: FieldType,
    /// Byte offset inside the owning class
    pub offset: u64,
    pub flags: i64,
    pub total_size_bytes: u64,
    pub external_name: Option<String>,
    /// Build-specific handle; only presence is comparable across builds
    pub input_func: Option<u64>,
    /// Build-specific handle; only presence is comparable across builds
    pub restore_ops: Option<u64>,
    pub embedded_class: ClassRef,
    pub override_count: u64,
    pub float_tolerance: f64,
}

impl FieldRecord {
    /// Create a field with the given name, type and offset and every other
    /// attribute zeroed or unset.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType, offset: u64) -> Self {
        Self {
            name: name.into(),
            field_type,
            offset,
            flags: 0,
            total_size_bytes: 0,
            external_name: None,
            input_func: None,
            restore_ops: None,
            embedded_class: ClassRef::Unset,
            override_count: 0,
            float_tolerance: 0.0,
        }
    }

    /// Padding and unbound input slots carry nothing worth comparing.
    #[must_use]
    pub const fn is_layout_noise(&self) -> bool {
        match self.field_type {
            FieldType::Void => true,
            FieldType::Input => self.input_func.is_none(),
            _ => false,
        }
    }

    /// Positional sort key used by the diff engine.
    #[must_use]
    pub fn position_key(&self) -> (u64, &str) {
        (self.offset, self.name.as_str())
    }
}

/// One datamap class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRecord {
    pub name: String,
    /// Binary module the class was extracted from
    pub module: String,
    pub module_offset: i64,
    pub base_class: ClassRef,
    /// Fields in declaration order
    pub fields: Vec<FieldRecord>,
}

impl ClassRecord {
    /// Create an empty class record from the given module.
    #[must_use]
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            module_offset: 0,
            base_class: ClassRef::Unset,
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    #[must_use]
    pub fn with_field(mut self, field: FieldRecord) -> Self {
        self.fields.push(field);
        self
    }

    /// Lookup of fields by name, in declaration order.
    #[must_use]
    pub fn field_index(&self) -> IndexMap<&str, &FieldRecord> {
        self.fields.iter().map(|f| (f.name.as_str(), f)).collect()
    }

    /// Find a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.name == name)
    }
}
