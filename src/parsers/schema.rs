//! Save file schema validation.
//!
//! Decodes a document tree into the versioned save file shape and builds the
//! record model from it. Key sets and value types come from the wire structs
//! below; references, duplicate names and the field type range are checked
//! afterwards. The first violation is reported as a [`ParseError::Schema`]
//! naming its location in the document, for example
//! `datamaps[3].fields[2].type`.

use super::traits::ParseError;
use crate::model::{
    ClassRecord, ClassRef, FieldRecord, FieldType, ResolveMode, SaveFile,
    SUPPORTED_SCHEMA_VERSION,
};
use indexmap::IndexSet;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

const ROOT_PATH: &str = "document";

/// Validate a document and build a save file with references resolved.
pub fn validate(document: &Value) -> Result<SaveFile, ParseError> {
    validate_with(document, ResolveMode::Resolve)
}

/// Validate a document and build a save file using the given resolve mode.
pub fn validate_with(document: &Value, mode: ResolveMode) -> Result<SaveFile, ParseError> {
    // Derived structs also accept sequences; a save file is always a map
    if !document.is_object() {
        return Err(ParseError::schema(ROOT_PATH, "expected an object"));
    }
    let wire: SaveFileWire = serde_path_to_error::deserialize(document).map_err(|err| {
        let path = err.path().to_string();
        let path = if path == "." { ROOT_PATH.to_string() } else { path };
        ParseError::schema(path, err.into_inner().to_string())
    })?;

    let version = wire.chicago_version.0;
    if version != SUPPORTED_SCHEMA_VERSION {
        return Err(ParseError::schema(
            "chicago_version",
            format!("unsupported schema version {version} (expected {SUPPORTED_SCHEMA_VERSION})"),
        ));
    }
    if wire.datamaps.is_empty() {
        return Err(ParseError::schema(
            "datamaps",
            "must contain at least one datamap",
        ));
    }

    let mut declared: IndexSet<&str> = IndexSet::with_capacity(wire.datamaps.len());
    let mut classes = Vec::with_capacity(wire.datamaps.len());
    for (i, datamap) in wire.datamaps.iter().enumerate() {
        let path = format!("datamaps[{i}]");
        classes.push(build_class(datamap, &path, &declared)?);
        if !declared.insert(datamap.name.as_str()) {
            return Err(ParseError::schema(
                format!("{path}.name"),
                format!("duplicate class name '{}'", datamap.name),
            ));
        }
    }

    tracing::debug!(
        "Validated {} ({}) with {} classes",
        wire.game_name,
        wire.game_version,
        classes.len()
    );

    Ok(SaveFile::new(wire.game_name, wire.game_version, classes, mode))
}

fn build_class(
    datamap: &DatamapWire,
    path: &str,
    declared: &IndexSet<&str>,
) -> Result<ClassRecord, ParseError> {
    let owner = datamap.name.as_str();
    if let Some(base) = &datamap.base_map {
        check_reference(base, owner, declared, &format!("{path}.base_map"))?;
    }

    let mut field_names: IndexSet<&str> = IndexSet::with_capacity(datamap.fields.len());
    let mut fields = Vec::with_capacity(datamap.fields.len());
    for (j, field) in datamap.fields.iter().enumerate() {
        let field_path = format!("{path}.fields[{j}]");
        fields.push(build_field(field, &field_path, owner, declared)?);
        if !field_names.insert(field.name.as_str()) {
            return Err(ParseError::schema(
                format!("{field_path}.name"),
                format!("duplicate field name '{}' in class '{owner}'", field.name),
            ));
        }
    }

    Ok(ClassRecord {
        name: datamap.name.clone(),
        module: datamap.module.clone(),
        module_offset: datamap.module_offset.0,
        base_class: ClassRef::from_name(datamap.base_map.clone()),
        fields,
    })
}

fn build_field(
    field: &TypeDescWire,
    path: &str,
    owner: &str,
    declared: &IndexSet<&str>,
) -> Result<FieldRecord, ParseError> {
    let ordinal = field.field_type.0;
    let field_type = FieldType::from_ordinal(ordinal).ok_or_else(|| {
        ParseError::schema(
            format!("{path}.type"),
            format!(
                "field type {ordinal} is out of range (expected 0..{})",
                FieldType::COUNT
            ),
        )
    })?;

    if let Some(embedded) = &field.embedded_map {
        check_reference(embedded, owner, declared, &format!("{path}.embedded_map"))?;
    }

    Ok(FieldRecord {
        name: field.name.clone(),
        field_type,
        offset: field.offset.0,
        flags: field.flags.0,
        total_size_bytes: field.total_size_bytes.0,
        external_name: field.external_name.clone(),
        input_func: field.input_func.map(|u| u.0),
        restore_ops: field.restore_ops.map(|u| u.0),
        embedded_class: ClassRef::from_name(field.embedded_map.clone()),
        override_count: field.override_count.0,
        float_tolerance: field.float_tolerance,
    })
}

/// References may only point at classes declared before the referencing one.
fn check_reference(
    target: &str,
    owner: &str,
    declared: &IndexSet<&str>,
    path: &str,
) -> Result<(), ParseError> {
    if target == owner {
        return Err(ParseError::schema(
            path,
            format!("class '{owner}' references itself"),
        ));
    }
    if !declared.contains(target) {
        return Err(ParseError::schema(
            path,
            format!("references class '{target}' which is not declared before '{owner}'"),
        ));
    }
    Ok(())
}

// Save file wire structures for deserialization.
// Every key is required; nullable keys must still be present.

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SaveFileWire {
    chicago_version: Unsigned,
    game_name: String,
    game_version: String,
    datamaps: Vec<DatamapWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatamapWire {
    name: String,
    module: String,
    module_offset: Signed,
    #[serde(deserialize_with = "nullable")]
    base_map: Option<String>,
    fields: Vec<TypeDescWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeDescWire {
    name: String,
    #[serde(rename = "type")]
    field_type: Unsigned,
    offset: Unsigned,
    flags: Signed,
    #[serde(deserialize_with = "nullable")]
    external_name: Option<String>,
    total_size_bytes: Unsigned,
    #[serde(deserialize_with = "nullable")]
    input_func: Option<Unsigned>,
    #[serde(deserialize_with = "nullable")]
    restore_ops: Option<Unsigned>,
    #[serde(deserialize_with = "nullable")]
    embedded_map: Option<String>,
    override_count: Unsigned,
    float_tolerance: f64,
}

/// Required key whose value may be `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Non-negative integer. Floats with no fractional part count.
#[derive(Debug, Clone, Copy)]
struct Unsigned(u64);

/// Signed integer. Floats with no fractional part count.
#[derive(Debug, Clone, Copy)]
struct Signed(i64);

impl<'de> Deserialize<'de> for Unsigned {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = deserializer.deserialize_any(IntegralVisitor)?;
        u64::try_from(value)
            .map(Self)
            .map_err(|_| de::Error::custom(format!("must be non-negative, got {value}")))
    }
}

impl<'de> Deserialize<'de> for Signed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = deserializer.deserialize_any(IntegralVisitor)?;
        i64::try_from(value)
            .map(Self)
            .map_err(|_| de::Error::custom(format!("integer {value} is out of range")))
    }
}

struct IntegralVisitor;

impl<'de> Visitor<'de> for IntegralVisitor {
    type Value = i128;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i128, E> {
        Ok(i128::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i128, E> {
        Ok(i128::from(v))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i128, E> {
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 1.8e19 {
            Ok(v as i128)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassId;
    use serde_json::json;

    fn field(name: &str, ty: u64, offset: u64) -> Value {
        json!({
            "name": name,
            "type": ty,
            "offset": offset,
            "flags": 0,
            "external_name": null,
            "total_size_bytes": 4,
            "input_func": null,
            "restore_ops": null,
            "embedded_map": null,
            "override_count": 0,
            "float_tolerance": 0.0
        })
    }

    fn datamap(name: &str, base: Option<&str>, fields: Vec<Value>) -> Value {
        json!({
            "name": name,
            "module": "server.dll",
            "module_offset": 4096,
            "base_map": base,
            "fields": fields
        })
    }

    fn document(datamaps: Vec<Value>) -> Value {
        json!({
            "chicago_version": 2,
            "game_name": "Half-Life 2",
            "game_version": "5135",
            "datamaps": datamaps
        })
    }

    fn schema_error(doc: &Value) -> (String, String) {
        match validate(doc).unwrap_err() {
            ParseError::Schema { path, message } => (path, message),
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn test_valid_document() {
        let doc = document(vec![
            datamap("CBaseEntity", None, vec![field("m_iHealth", 5, 0)]),
            datamap("CBasePlayer", Some("CBaseEntity"), vec![field("m_flSpeed", 1, 8)]),
        ]);

        let save = validate(&doc).unwrap();
        assert_eq!(save.identity(), "Half-Life 2 (5135)");
        assert_eq!(save.class_count(), 2);
        assert_eq!(save.classes[0].module_offset, 4096);
        assert_eq!(save.classes[0].fields[0].field_type, FieldType::Integer);
        assert_eq!(save.classes[1].base_class, ClassRef::Resolved(ClassId(0)));
    }

    #[test]
    fn test_keep_mode() {
        let doc = document(vec![
            datamap("CBaseEntity", None, vec![]),
            datamap("CBasePlayer", Some("CBaseEntity"), vec![]),
        ]);
        let save = validate_with(&doc, ResolveMode::Keep).unwrap();
        assert_eq!(
            save.classes[1].base_class,
            ClassRef::Unresolved("CBaseEntity".to_string())
        );
    }

    #[test]
    fn test_missing_top_level_key() {
        let mut doc = document(vec![datamap("CBaseEntity", None, vec![])]);
        doc.as_object_mut().unwrap().remove("game_version");
        let (path, message) = schema_error(&doc);
        assert_eq!(path, "document");
        assert!(message.contains("missing field `game_version`"), "{message}");
    }

    #[test]
    fn test_nullable_key_still_required() {
        let mut entity = field("m_iHealth", 5, 0);
        entity.as_object_mut().unwrap().remove("external_name");
        let doc = document(vec![datamap("CBaseEntity", None, vec![entity])]);
        let (path, message) = schema_error(&doc);
        assert_eq!(path, "datamaps[0].fields[0]");
        assert!(message.contains("missing field `external_name`"), "{message}");

        let mut entity = datamap("CBaseEntity", None, vec![]);
        entity.as_object_mut().unwrap().remove("base_map");
        let (path, message) = schema_error(&document(vec![entity]));
        assert_eq!(path, "datamaps[0]");
        assert!(message.contains("missing field `base_map`"), "{message}");
    }

    #[test]
    fn test_wrong_value_type() {
        let mut entity = field("m_iHealth", 5, 0);
        entity["external_name"] = json!(7);
        let doc = document(vec![datamap("CBaseEntity", None, vec![entity])]);
        let (path, message) = schema_error(&doc);
        assert_eq!(path, "datamaps[0].fields[0].external_name");
        assert!(message.contains("expected a string"), "{message}");
    }

    #[test]
    fn test_unexpected_key() {
        let mut entity = field("m_iHealth", 5, 0);
        entity["comment"] = json!("nope");
        let doc = document(vec![datamap("CBaseEntity", None, vec![entity])]);
        let (path, message) = schema_error(&doc);
        assert!(path.starts_with("datamaps[0].fields[0]"), "{path}");
        assert!(message.contains("unknown field `comment`"), "{message}");
    }

    #[test]
    fn test_unsupported_version() {
        let mut doc = document(vec![datamap("CBaseEntity", None, vec![])]);
        doc["chicago_version"] = json!(1);
        let (path, message) = schema_error(&doc);
        assert_eq!(path, "chicago_version");
        assert!(message.contains("unsupported schema version 1"));
    }

    #[test]
    fn test_empty_datamaps() {
        let (path, _) = schema_error(&document(vec![]));
        assert_eq!(path, "datamaps");
    }

    #[test]
    fn test_type_out_of_range() {
        let doc = document(vec![datamap(
            "CBaseEntity",
            None,
            vec![field("m_iHealth", 5, 0), field("m_bad", 29, 4)],
        )]);
        let (path, message) = schema_error(&doc);
        assert_eq!(path, "datamaps[0].fields[1].type");
        assert!(message.contains("out of range"));
    }

    #[test]
    fn test_offset_must_be_non_negative_integer() {
        let mut bad = field("m_iHealth", 5, 0);
        bad["offset"] = json!(-4);
        let (path, message) = schema_error(&document(vec![datamap("C", None, vec![bad])]));
        assert_eq!(path, "datamaps[0].fields[0].offset");
        assert!(message.contains("non-negative"));

        let mut null_offset = field("m_iHealth", 5, 0);
        null_offset["offset"] = Value::Null;
        let (path, _) = schema_error(&document(vec![datamap("C", None, vec![null_offset])]));
        assert_eq!(path, "datamaps[0].fields[0].offset");
    }

    #[test]
    fn test_integral_floats_accepted() {
        let mut f = field("m_iHealth", 5, 0);
        f["offset"] = json!(12.0);
        f["input_func"] = json!(4096.0);
        let save = validate(&document(vec![datamap("C", None, vec![f])])).unwrap();
        assert_eq!(save.classes[0].fields[0].offset, 12);
        assert_eq!(save.classes[0].fields[0].input_func, Some(4096));

        let mut fractional = field("m_iHealth", 5, 0);
        fractional["offset"] = json!(12.5);
        let (path, _) = schema_error(&document(vec![datamap("C", None, vec![fractional])]));
        assert_eq!(path, "datamaps[0].fields[0].offset");
    }

    #[test]
    fn test_duplicate_names() {
        let doc = document(vec![
            datamap("CBaseEntity", None, vec![]),
            datamap("CBaseEntity", None, vec![]),
        ]);
        let (path, message) = schema_error(&doc);
        assert_eq!(path, "datamaps[1].name");
        assert!(message.contains("duplicate class name"));

        let doc = document(vec![datamap(
            "CBaseEntity",
            None,
            vec![field("m_iHealth", 5, 0), field("m_iHealth", 5, 4)],
        )]);
        let (path, message) = schema_error(&doc);
        assert_eq!(path, "datamaps[0].fields[1].name");
        assert!(message.contains("duplicate field name"));
    }

    #[test]
    fn test_forward_reference_rejected() {
        let doc = document(vec![
            datamap("CBasePlayer", Some("CBaseEntity"), vec![]),
            datamap("CBaseEntity", None, vec![]),
        ]);
        let (path, message) = schema_error(&doc);
        assert_eq!(path, "datamaps[0].base_map");
        assert!(message.contains("not declared before"));
    }

    #[test]
    fn test_self_reference_rejected() {
        let mut local = field("m_Local", 10, 0);
        local["embedded_map"] = json!("CBasePlayer");
        let doc = document(vec![datamap("CBasePlayer", None, vec![local])]);
        let (path, message) = schema_error(&doc);
        assert_eq!(path, "datamaps[0].fields[0].embedded_map");
        assert!(message.contains("references itself"));
    }

    #[test]
    fn test_embedded_reference_resolved() {
        let mut local = field("m_Local", 10, 0);
        local["embedded_map"] = json!("CPlayerLocalData");
        let doc = document(vec![
            datamap("CPlayerLocalData", None, vec![]),
            datamap("CBasePlayer", None, vec![local]),
        ]);
        let save = validate(&doc).unwrap();
        assert_eq!(
            save.classes[1].fields[0].embedded_class,
            ClassRef::Resolved(ClassId(0))
        );
    }

    #[test]
    fn test_non_object_root() {
        let (path, message) = schema_error(&json!([1, 2, 3]));
        assert_eq!(path, "document");
        assert_eq!(message, "expected an object");
    }
}
