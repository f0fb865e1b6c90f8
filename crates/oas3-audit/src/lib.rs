//! Static analysis of OpenAPI v3.x specifications: reference graphs,
//! sensitive-data exposure, authorization matrices, schema similarity,
//! zombie endpoints and blast-radius impact analysis.
//!
//! The engine consumes an already-parsed [`oas3::Spec`] and is a pure
//! function from document to findings: it never mutates the spec, performs
//! no I/O, and persists nothing.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod analyzer;
pub mod engine;
pub mod utils;

pub use analyzer::{
  Analyzer, AuthorizationMatrix, AuthorizationMatrixAnalyzer, BlastRadiusAnalyzer, BlastRadiusReport,
  DependentsMap, GraphNode, NestingDepthAnalyzer, NestingDepthReport, NodeKind, ReferenceEdge, ReferenceGraph,
  ReferenceGraphBuilder, ReverseDependencyAnalyzer, RiskLevel, SchemaSimilarityAnalyzer, Severity,
  ShadowedEndpoint, SimilarityCluster, SimilarityReport, TaintAnalyzer, TaintFinding, ZombieApiAnalyzer,
  ZombieReport,
};
pub use engine::{AuditEngine, AuditReport};
