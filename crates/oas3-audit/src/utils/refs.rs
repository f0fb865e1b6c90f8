use oas3::spec::{ObjectOrReference, ObjectSchema, Ref};

/// Parses a schema `$ref` path and extracts the referenced schema name.
///
/// Returns the schema name for internal component references
/// (`#/components/schemas/<name>`). External references and malformed
/// pointers return `None`; the analyzers treat those as dangling and skip
/// them rather than failing the walk.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  if !ref_path.starts_with("#/components") {
    return None;
  }

  match ref_path.parse::<Ref>() {
    Ok(component) => Some(component.name),
    Err(_) => None,
  }
}

/// Extracts the referenced schema name from an [`ObjectOrReference`].
///
/// Returns `None` for inline schemas and for references that do not point
/// at an internal component.
pub fn extract_schema_ref_name(obj_ref: &ObjectOrReference<ObjectSchema>) -> Option<String> {
  match obj_ref {
    ObjectOrReference::Ref { ref_path, .. } => parse_schema_ref_path(ref_path),
    ObjectOrReference::Object(_) => None,
  }
}
