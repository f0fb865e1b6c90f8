//! Static analyzers over a parsed OpenAPI document.
//!
//! Each analyzer is a strategy type implementing [`Analyzer`]: a pure
//! function from an immutable [`Spec`] to an owned, serializable report.
//! Analyzers construct their own graphs and memo tables per call, so
//! concurrent analyses of the same document need no coordination.

use std::collections::BTreeMap;

use oas3::{Spec, spec::{ObjectSchema, Operation}};

pub mod authorization;
pub mod blast_radius;
pub mod nesting_depth;
pub mod reference_graph;
pub mod reverse_dependencies;
pub mod similarity;
pub mod taint;
pub mod zombie;

pub use authorization::{AuthorizationMatrix, AuthorizationMatrixAnalyzer};
pub use blast_radius::{BlastRadiusAnalyzer, BlastRadiusReport, RiskLevel};
pub use nesting_depth::{NestingDepthAnalyzer, NestingDepthReport};
pub use reference_graph::{GraphNode, NodeKind, ReferenceEdge, ReferenceGraph, ReferenceGraphBuilder};
pub use reverse_dependencies::{DependentsMap, ReverseDependencyAnalyzer};
pub use similarity::{SchemaSimilarityAnalyzer, SimilarityCluster, SimilarityReport};
pub use taint::{Severity, TaintAnalyzer, TaintFinding};
pub use zombie::{ShadowedEndpoint, ZombieApiAnalyzer, ZombieReport};

#[cfg(test)]
mod tests;

/// Common contract for every analyzer.
///
/// Implementations never mutate the document, never perform I/O, and never
/// fail: malformed input (dangling `$ref`s, empty documents, cyclic schema
/// graphs) degrades to empty or partial reports.
pub trait Analyzer {
  type Report;

  fn analyze(&self, spec: &Spec) -> Self::Report;
}

/// Resolves every declared component schema by name.
///
/// Entries that fail to resolve (external or dangling references) are
/// dropped; the remaining map is the arena every traversal resolves
/// `$ref` names against.
pub(crate) fn resolved_components(spec: &Spec) -> BTreeMap<String, ObjectSchema> {
  let mut schemas = BTreeMap::new();

  if let Some(components) = &spec.components {
    for (name, schema_ref) in &components.schemas {
      if let Ok(schema) = schema_ref.resolve(spec) {
        schemas.insert(name.clone(), schema);
      }
    }
  }

  schemas
}

/// Returns true for 2xx-class response status keys (`200`, `201`, `2XX`).
pub(crate) fn is_success_status(status: &str) -> bool {
  status.starts_with('2')
}

/// Whether an operation carries an effective security requirement.
///
/// An operation with no security list of its own inherits the document's
/// global requirements; an explicitly empty list overrides them to none.
pub fn is_secured(operation: &Operation, spec: &Spec) -> bool {
  !operation.security.is_empty() || !spec.security.is_empty()
}
