//! Field type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage kind of a datamap field.
///
/// Ordinals follow the declaration order of the reflection system and are
/// only meaningful when decoding; comparisons use the variant itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Void,
    Float,
    String,
    Vector,
    Quaternion,
    Integer,
    Boolean,
    Short,
    Character,
    Color32,
    Embedded,
    Custom,
    ClassPtr,
    EHandle,
    Edict,
    PositionVector,
    Time,
    Tick,
    ModelName,
    SoundName,
    Input,
    Function,
    VMatrix,
    VMatrixWorldspace,
    Matrix3x4Worldspace,
    FloatInterval,
    ModelIndex,
    MaterialIndex,
    Vector2D,
}

impl FieldType {
    /// Every variant, indexed by ordinal.
    pub const ALL: [Self; 29] = [
        Self::Void,
        Self::Float,
        Self::String,
        Self::Vector,
        Self::Quaternion,
        Self::Integer,
        Self::Boolean,
        Self::Short,
        Self::Character,
        Self::Color32,
        Self::Embedded,
        Self::Custom,
        Self::ClassPtr,
        Self::EHandle,
        Self::Edict,
        Self::PositionVector,
        Self::Time,
        Self::Tick,
        Self::ModelName,
        Self::SoundName,
        Self::Input,
        Self::Function,
        Self::VMatrix,
        Self::VMatrixWorldspace,
        Self::Matrix3x4Worldspace,
        Self::FloatInterval,
        Self::ModelIndex,
        Self::MaterialIndex,
        Self::Vector2D,
    ];

    /// Number of declared field types; valid ordinals are `0..COUNT`.
    pub const COUNT: usize = Self::ALL.len();

    /// Map a raw ordinal to its field type.
    #[must_use]
    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Ordinal value as stored in save files.
    #[must_use]
    pub const fn ordinal(self) -> u64 {
        self as u64
    }

    /// Name used by the reflection system (`FIELD_*` without the prefix).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "VOID",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::Vector => "VECTOR",
            Self::Quaternion => "QUATERNION",
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::Short => "SHORT",
            Self::Character => "CHARACTER",
            Self::Color32 => "COLOR32",
            Self::Embedded => "EMBEDDED",
            Self::Custom => "CUSTOM",
            Self::ClassPtr => "CLASSPTR",
            Self::EHandle => "EHANDLE",
            Self::Edict => "EDICT",
            Self::PositionVector => "POSITION_VECTOR",
            Self::Time => "TIME",
            Self::Tick => "TICK",
            Self::ModelName => "MODELNAME",
            Self::SoundName => "SOUNDNAME",
            Self::Input => "INPUT",
            Self::Function => "FUNCTION",
            Self::VMatrix => "VMATRIX",
            Self::VMatrixWorldspace => "VMATRIX_WORLDSPACE",
            Self::Matrix3x4Worldspace => "MATRIX3X4_WORLDSPACE",
            Self::FloatInterval => "INTERVAL",
            Self::ModelIndex => "MODELINDEX",
            Self::MaterialIndex => "MATERIALINDEX",
            Self::Vector2D => "VECTOR2D",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_match_declaration_order() {
        for (i, ty) in FieldType::ALL.iter().enumerate() {
            assert_eq!(ty.ordinal(), i as u64);
            assert_eq!(FieldType::from_ordinal(i as u64), Some(*ty));
        }
    }

    #[test]
    fn test_out_of_range_ordinal() {
        assert_eq!(FieldType::COUNT, 29);
        assert_eq!(FieldType::from_ordinal(29), None);
        assert_eq!(FieldType::from_ordinal(u64::MAX), None);
    }

    #[test]
    fn test_display_uses_reflection_name() {
        assert_eq!(FieldType::Integer.to_string(), "INTEGER");
        assert_eq!(FieldType::Vector2D.to_string(), "VECTOR2D");
    }
}
