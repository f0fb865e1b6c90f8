//! Facade over the individual analyzers.
//!
//! `AuditEngine` owns the parsed specification and exposes one operation
//! per analyzer. It holds no mutable state: every call builds its own
//! graphs and memo tables from the immutable document, so a single engine
//! can serve concurrent analyses without coordination.
//!
//! ## Usage
//!
//! ```no_run
//! use oas3_audit::AuditEngine;
//!
//! # fn example() -> anyhow::Result<()> {
//! let spec_json = std::fs::read_to_string("openapi.json")?;
//! let engine = AuditEngine::from_json(&spec_json)?;
//!
//! let findings = engine.taint_findings();
//! println!("{} potential data exposures", findings.len());
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::analyzer::{
  Analyzer, AuthorizationMatrix, AuthorizationMatrixAnalyzer, BlastRadiusAnalyzer, BlastRadiusReport,
  DependentsMap, NestingDepthAnalyzer, NestingDepthReport, ReferenceGraph, ReferenceGraphBuilder,
  ReverseDependencyAnalyzer, SchemaSimilarityAnalyzer, SimilarityReport, TaintAnalyzer, TaintFinding,
  ZombieApiAnalyzer, ZombieReport,
};

/// Aggregated output of every document-scoped analyzer, ready for JSON
/// serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
  pub reference_graph: ReferenceGraph,
  pub reverse_dependencies: DependentsMap,
  pub nesting_depths: NestingDepthReport,
  pub taint_findings: Vec<TaintFinding>,
  pub authorization: AuthorizationMatrix,
  pub similarity: SimilarityReport,
  pub zombies: ZombieReport,
}

/// Stateless entry point for all analyses of one parsed specification.
pub struct AuditEngine {
  spec: oas3::Spec,
}

impl AuditEngine {
  pub fn new(spec: oas3::Spec) -> Self {
    Self { spec }
  }

  /// Convenience constructor that parses JSON spec text before delegating.
  pub fn from_json(text: &str) -> anyhow::Result<Self> {
    Ok(Self::new(oas3::from_json(text)?))
  }

  /// Convenience constructor that parses YAML spec text before delegating.
  pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
    Ok(Self::new(oas3::from_yaml(text)?))
  }

  pub fn spec(&self) -> &oas3::Spec {
    &self.spec
  }

  pub fn reference_graph(&self) -> ReferenceGraph {
    ReferenceGraphBuilder.analyze(&self.spec)
  }

  pub fn reverse_dependencies(&self) -> DependentsMap {
    ReverseDependencyAnalyzer.analyze(&self.spec)
  }

  pub fn nesting_depths(&self) -> NestingDepthReport {
    NestingDepthAnalyzer.analyze(&self.spec)
  }

  pub fn taint_findings(&self) -> Vec<TaintFinding> {
    TaintAnalyzer::default().analyze(&self.spec)
  }

  pub fn authorization_matrix(&self) -> AuthorizationMatrix {
    AuthorizationMatrixAnalyzer.analyze(&self.spec)
  }

  pub fn similarity_clusters(&self) -> SimilarityReport {
    SchemaSimilarityAnalyzer::default().analyze(&self.spec)
  }

  pub fn similarity_clusters_with_threshold(&self, threshold: f64) -> SimilarityReport {
    SchemaSimilarityAnalyzer::with_threshold(threshold).analyze(&self.spec)
  }

  pub fn zombie_findings(&self) -> ZombieReport {
    ZombieApiAnalyzer.analyze(&self.spec)
  }

  pub fn blast_radius(&self, target_schema: &str) -> BlastRadiusReport {
    BlastRadiusAnalyzer::new(target_schema).analyze(&self.spec)
  }

  /// Runs every document-scoped analyzer and bundles the results.
  pub fn full_report(&self) -> AuditReport {
    AuditReport {
      reference_graph: self.reference_graph(),
      reverse_dependencies: self.reverse_dependencies(),
      nesting_depths: self.nesting_depths(),
      taint_findings: self.taint_findings(),
      authorization: self.authorization_matrix(),
      similarity: self.similarity_clusters(),
      zombies: self.zombie_findings(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn empty_spec() -> oas3::Spec {
    let spec_json = r#"{
      "openapi": "3.0.0",
      "info": {
        "title": "Empty API",
        "version": "1.0.0"
      },
      "paths": {}
    }"#;
    oas3::from_json(spec_json).unwrap()
  }

  #[test]
  fn test_empty_document_yields_empty_reports() {
    let engine = AuditEngine::new(empty_spec());
    let report = engine.full_report();

    assert_eq!(report.reference_graph.node_count(), 0);
    assert_eq!(report.reference_graph.edge_count(), 0);
    assert!(report.reverse_dependencies.is_empty());
    assert!(report.nesting_depths.is_empty());
    assert!(report.taint_findings.is_empty());
    assert!(report.authorization.scopes.is_empty());
    assert!(report.similarity.clusters.is_empty());
    assert!(report.zombies.shadowed_endpoints.is_empty());
    assert!(report.zombies.orphaned_operations.is_empty());
  }

  #[test]
  fn test_blast_radius_unknown_target_on_empty_document() {
    let engine = AuditEngine::new(empty_spec());
    let report = engine.blast_radius("Missing");

    assert_eq!(report.target_schema, "Missing");
    assert_eq!(report.total_operations, 0);
    assert_eq!(report.affected_operations, 0);
    assert_eq!(report.percentage, 0.0);
    assert!(report.direct_dependents.is_empty());
    assert!(report.all_affected_schemas.is_empty());
    assert!(report.affected_endpoints.is_empty());
  }

  #[test]
  fn test_from_json_convenience_constructor() {
    let engine = AuditEngine::from_json(
      r#"{
        "openapi": "3.0.0",
        "info": { "title": "Test", "version": "1.0.0" },
        "paths": {}
      }"#,
    )
    .unwrap();
    assert_eq!(engine.spec().info.title, "Test");
  }

  #[test]
  fn test_full_report_is_idempotent() {
    let spec_json = r##"{
      "openapi": "3.0.0",
      "info": { "title": "Test", "version": "1.0.0" },
      "paths": {
        "/users": {
          "get": {
            "responses": {
              "200": {
                "description": "ok",
                "content": {
                  "application/json": {
                    "schema": { "$ref": "#/components/schemas/User" }
                  }
                }
              }
            }
          }
        }
      },
      "components": {
        "schemas": {
          "User": {
            "type": "object",
            "properties": { "name": { "type": "string" } }
          }
        }
      }
    }"##;
    let engine = AuditEngine::from_json(spec_json).unwrap();

    let first = serde_json::to_string(&engine.full_report()).unwrap();
    let second = serde_json::to_string(&engine.full_report()).unwrap();
    assert_eq!(first, second);
  }
}
