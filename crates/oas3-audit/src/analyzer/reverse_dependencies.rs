use std::collections::{BTreeMap, BTreeSet};

use oas3::{Spec, spec::ObjectSchema};

use super::{Analyzer, reference_graph::{collect_operation_refs, collect_schema_refs}, resolved_components};
use crate::utils::operation_label;

/// Component name (schema name or `"METHOD /path"` label) mapped to the
/// set of entities that reference it, directly or transitively.
pub type DependentsMap = BTreeMap<String, BTreeSet<String>>;

/// Inverts the direct-reference relation: for every declared schema,
/// collects the schemas and operations that reach it through any chain of
/// `$ref`s.
pub struct ReverseDependencyAnalyzer;

impl Analyzer for ReverseDependencyAnalyzer {
  type Report = DependentsMap;

  fn analyze(&self, spec: &Spec) -> DependentsMap {
    let schemas = resolved_components(spec);

    let mut dependents: DependentsMap = schemas
      .keys()
      .map(|name| (name.clone(), BTreeSet::new()))
      .collect();

    for (name, schema) in &schemas {
      let mut visited = BTreeSet::new();
      Self::scan_schema(schema, name, Some(name), &schemas, &mut visited, &mut dependents);
    }

    for (path, method, operation) in spec.operations() {
      let label = operation_label(&method, &path);
      let mut direct = BTreeSet::new();
      collect_operation_refs(operation, spec, &mut direct);

      let mut visited = BTreeSet::new();
      for target in direct {
        Self::record(&target, &label, None, &schemas, &mut visited, &mut dependents);
      }
    }

    dependents
  }
}

impl ReverseDependencyAnalyzer {
  /// Scans a schema's object tree and records `root` as a dependent of
  /// every resolvable schema it reaches.
  fn scan_schema(
    schema: &ObjectSchema,
    root: &str,
    self_name: Option<&str>,
    schemas: &BTreeMap<String, ObjectSchema>,
    visited: &mut BTreeSet<String>,
    dependents: &mut DependentsMap,
  ) {
    let mut direct = BTreeSet::new();
    collect_schema_refs(schema, &mut direct);

    for target in direct {
      Self::record(&target, root, self_name, schemas, visited, dependents);
    }
  }

  /// Adds `root` to `target`'s dependent set and descends into the target
  /// schema. Dangling targets are skipped; re-entering a schema already
  /// visited within this root scan is a no-op, which bounds the descent on
  /// cyclic models.
  fn record(
    target: &str,
    root: &str,
    self_name: Option<&str>,
    schemas: &BTreeMap<String, ObjectSchema>,
    visited: &mut BTreeSet<String>,
    dependents: &mut DependentsMap,
  ) {
    let Some(target_schema) = schemas.get(target) else {
      return;
    };

    if Some(target) != self_name
      && let Some(entry) = dependents.get_mut(target)
    {
      entry.insert(root.to_string());
    }

    if !visited.insert(target.to_string()) {
      return;
    }

    Self::scan_schema(target_schema, root, self_name, schemas, visited, dependents);
  }
}
