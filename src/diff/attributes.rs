//! Field attribute comparison rules.
//!
//! Which attributes of a paired field are compared, and how, is an explicit
//! table rather than something derived from the record layout. Opaque handles
//! (`input_func`, `restore_ops`) and the embedded class reference are compared
//! by presence only: their values are build-specific addresses or arena
//! positions and mean nothing across snapshots.

use crate::model::{ClassRef, FieldRecord, FieldType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A comparable attribute of a field record.
///
/// `name` and `offset` are deliberately absent: names drive matching and
/// offsets drive ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldAttribute {
    Type,
    Flags,
    TotalSizeBytes,
    InputFunc,
    RestoreOps,
    EmbeddedClass,
    ExternalName,
    OverrideCount,
    FloatTolerance,
}

impl FieldAttribute {
    /// Attribute name as shown in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Flags => "flags",
            Self::TotalSizeBytes => "total_size_bytes",
            Self::InputFunc => "input_func",
            Self::RestoreOps => "restore_ops",
            Self::EmbeddedClass => "embedded_class",
            Self::ExternalName => "external_name",
            Self::OverrideCount => "override_count",
            Self::FloatTolerance => "float_tolerance",
        }
    }

    /// Current value of this attribute on `field`.
    #[must_use]
    pub fn value_of(self, field: &FieldRecord) -> AttributeValue {
        match self {
            Self::Type => AttributeValue::Type(field.field_type),
            Self::Flags => AttributeValue::Signed(field.flags),
            Self::TotalSizeBytes => AttributeValue::Unsigned(field.total_size_bytes),
            Self::InputFunc => field.input_func.map_or(AttributeValue::Null, AttributeValue::Unsigned),
            Self::RestoreOps => field.restore_ops.map_or(AttributeValue::Null, AttributeValue::Unsigned),
            Self::EmbeddedClass => match &field.embedded_class {
                ClassRef::Unset => AttributeValue::Null,
                ClassRef::Unresolved(name) => AttributeValue::Text(name.clone()),
                ClassRef::Resolved(id) => AttributeValue::Text(id.to_string()),
            },
            Self::ExternalName => field
                .external_name
                .clone()
                .map_or(AttributeValue::Null, AttributeValue::Text),
            Self::OverrideCount => AttributeValue::Unsigned(field.override_count),
            Self::FloatTolerance => AttributeValue::Float(field.float_tolerance),
        }
    }

    /// Whether this attribute is set on `field`.
    #[must_use]
    pub fn is_present(self, field: &FieldRecord) -> bool {
        !matches!(self.value_of(field), AttributeValue::Null)
    }
}

impl fmt::Display for FieldAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How two values of an attribute are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonRule {
    /// Values must be equal
    Value,
    /// Only set versus unset matters
    Presence,
}

/// One row of the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRule {
    pub attribute: FieldAttribute,
    pub rule: ComparisonRule,
}

impl AttributeRule {
    #[must_use]
    pub const fn value(attribute: FieldAttribute) -> Self {
        Self {
            attribute,
            rule: ComparisonRule::Value,
        }
    }

    #[must_use]
    pub const fn presence(attribute: FieldAttribute) -> Self {
        Self {
            attribute,
            rule: ComparisonRule::Presence,
        }
    }

    /// Compare the attribute on two fields paired by name.
    #[must_use]
    pub fn compare(&self, left: &FieldRecord, right: &FieldRecord) -> Option<AttributeChange> {
        let delta = match self.rule {
            ComparisonRule::Value => {
                let before = self.attribute.value_of(left);
                let after = self.attribute.value_of(right);
                (before != after).then_some(AttributeDelta::Value { before, after })
            }
            ComparisonRule::Presence => {
                let before = self.attribute.is_present(left);
                let after = self.attribute.is_present(right);
                (before != after).then_some(AttributeDelta::Presence { before, after })
            }
        }?;
        Some(AttributeChange {
            attribute: self.attribute,
            delta,
        })
    }
}

/// Attributes compared on every diff.
pub const COMPARED_ATTRIBUTES: &[AttributeRule] = &[
    AttributeRule::value(FieldAttribute::Type),
    AttributeRule::value(FieldAttribute::Flags),
    AttributeRule::value(FieldAttribute::TotalSizeBytes),
    AttributeRule::presence(FieldAttribute::InputFunc),
    AttributeRule::presence(FieldAttribute::RestoreOps),
    AttributeRule::presence(FieldAttribute::EmbeddedClass),
];

/// Additional attributes compared when extended comparison is enabled.
pub const EXTENDED_ATTRIBUTES: &[AttributeRule] = &[
    AttributeRule::value(FieldAttribute::ExternalName),
    AttributeRule::value(FieldAttribute::OverrideCount),
    AttributeRule::value(FieldAttribute::FloatTolerance),
];

/// Compare two paired fields against a rule table, in table order.
#[must_use]
pub fn compare_fields(
    rules: &[AttributeRule],
    left: &FieldRecord,
    right: &FieldRecord,
) -> Vec<AttributeChange> {
    rules
        .iter()
        .filter_map(|rule| rule.compare(left, right))
        .collect()
}

/// A reportable attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Type(FieldType),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    Null,
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(t) => write!(f, "{t}"),
            Self::Signed(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// How an attribute differs between two paired fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AttributeDelta {
    Value {
        before: AttributeValue,
        after: AttributeValue,
    },
    Presence {
        before: bool,
        after: bool,
    },
}

/// A single attribute finding on a paired field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub attribute: FieldAttribute,
    #[serde(flatten)]
    pub delta: AttributeDelta,
}

const fn presence_label(present: bool) -> &'static str {
    if present { "exists" } else { "null" }
}

impl fmt::Display for AttributeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.delta {
            AttributeDelta::Value { before, after } => {
                write!(f, "{}: {before} → {after}", self.attribute)
            }
            AttributeDelta::Presence { before, after } => write!(
                f,
                "{} differs by presence ({} → {})",
                self.attribute,
                presence_label(*before),
                presence_label(*after)
            ),
        }
    }
}
