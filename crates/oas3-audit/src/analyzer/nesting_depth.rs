use std::collections::{BTreeMap, BTreeSet};

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Operation, Schema},
};

use super::{Analyzer, resolved_components};
use crate::utils::{operation_label, parse_schema_ref_path};

/// Operation label mapped to its maximum reference-resolution depth.
pub type NestingDepthReport = BTreeMap<String, usize>;

/// Computes, per operation, how many `$ref` resolutions the deepest branch
/// of its payloads requires. Containers contribute the maximum of their
/// children; each resolved `$ref` contributes one plus the depth of the
/// target schema. Operations that reference no named schema report 0.
pub struct NestingDepthAnalyzer;

impl Analyzer for NestingDepthAnalyzer {
  type Report = NestingDepthReport;

  fn analyze(&self, spec: &Spec) -> NestingDepthReport {
    let schemas = resolved_components(spec);
    // A schema's depth does not depend on who references it, so completed
    // results are shared across every operation in the call.
    let mut memo = BTreeMap::new();

    let mut report = NestingDepthReport::new();
    for (path, method, operation) in spec.operations() {
      let label = operation_label(&method, &path);
      let depth = Self::operation_depth_memo(spec, &schemas, operation, &mut memo);
      report.insert(label, depth);
    }

    report
  }
}

impl NestingDepthAnalyzer {
  /// Depth of a single operation, scoped outside a full-document run.
  pub fn operation_depth(&self, spec: &Spec, operation: &Operation) -> usize {
    let schemas = resolved_components(spec);
    let mut memo = BTreeMap::new();
    Self::operation_depth_memo(spec, &schemas, operation, &mut memo)
  }

  fn operation_depth_memo(
    spec: &Spec,
    schemas: &BTreeMap<String, ObjectSchema>,
    operation: &Operation,
    memo: &mut BTreeMap<String, usize>,
  ) -> usize {
    let mut max_depth = 0;
    let mut in_progress = BTreeSet::new();

    for parameter_ref in &operation.parameters {
      if let Ok(parameter) = parameter_ref.resolve(spec)
        && let Some(schema_ref) = &parameter.schema
      {
        max_depth = max_depth.max(Self::ref_depth(schemas, schema_ref, &mut in_progress, memo));
      }
    }

    if let Some(body_ref) = &operation.request_body
      && let Ok(body) = body_ref.resolve(spec)
    {
      for media_type in body.content.values() {
        if let Some(schema_ref) = &media_type.schema {
          max_depth = max_depth.max(Self::ref_depth(schemas, schema_ref, &mut in_progress, memo));
        }
      }
    }

    if let Some(responses) = &operation.responses {
      for response_ref in responses.values() {
        let Ok(response) = response_ref.resolve(spec) else {
          continue;
        };
        for media_type in response.content.values() {
          if let Some(schema_ref) = &media_type.schema {
            max_depth = max_depth.max(Self::ref_depth(schemas, schema_ref, &mut in_progress, memo));
          }
        }
      }
    }

    max_depth
  }

  /// Depth contributed by a schema position: a resolvable `$ref` counts as
  /// one resolution plus the target's depth, an inline schema counts as
  /// the depth of its own subtree, and a dangling `$ref` contributes
  /// nothing.
  fn ref_depth(
    schemas: &BTreeMap<String, ObjectSchema>,
    schema_ref: &ObjectOrReference<ObjectSchema>,
    in_progress: &mut BTreeSet<String>,
    memo: &mut BTreeMap<String, usize>,
  ) -> usize {
    match schema_ref {
      ObjectOrReference::Ref { ref_path, .. } => match parse_schema_ref_path(ref_path) {
        Some(name) if schemas.contains_key(&name) => 1 + Self::named_depth(schemas, &name, in_progress, memo),
        _ => 0,
      },
      ObjectOrReference::Object(inline) => Self::object_depth(schemas, inline, in_progress, memo),
    }
  }

  /// Depth of a named schema. Re-encountering a name whose resolution is
  /// still open truncates that branch at 0 rather than recursing; the
  /// result is memoized only when the schema's own resolution completes.
  fn named_depth(
    schemas: &BTreeMap<String, ObjectSchema>,
    name: &str,
    in_progress: &mut BTreeSet<String>,
    memo: &mut BTreeMap<String, usize>,
  ) -> usize {
    if let Some(depth) = memo.get(name) {
      return *depth;
    }

    if !in_progress.insert(name.to_string()) {
      return 0;
    }

    let depth = schemas
      .get(name)
      .map(|schema| Self::object_depth(schemas, schema, in_progress, memo))
      .unwrap_or(0);

    in_progress.remove(name);
    // For a cycle member this depth reflects where the walk entered the
    // cycle; whichever frame completes first fixes the memoized value for
    // the rest of the run.
    memo.insert(name.to_string(), depth);
    depth
  }

  fn object_depth(
    schemas: &BTreeMap<String, ObjectSchema>,
    schema: &ObjectSchema,
    in_progress: &mut BTreeSet<String>,
    memo: &mut BTreeMap<String, usize>,
  ) -> usize {
    let mut max_depth = 0;

    for prop_schema in schema.properties.values() {
      max_depth = max_depth.max(Self::ref_depth(schemas, prop_schema, in_progress, memo));
    }

    for variant in schema.one_of.iter().chain(&schema.any_of).chain(&schema.all_of) {
      max_depth = max_depth.max(Self::ref_depth(schemas, variant, in_progress, memo));
    }

    if let Some(ref items_box) = schema.items
      && let Schema::Object(ref items_ref) = **items_box
    {
      max_depth = max_depth.max(Self::ref_depth(schemas, items_ref, in_progress, memo));
    }

    max_depth
  }
}
