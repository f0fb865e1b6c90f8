use std::collections::BTreeSet;

use oas3::Spec;
use serde::Serialize;
use strum::Display;

use super::{Analyzer, ReferenceGraphBuilder, ReverseDependencyAnalyzer};
use crate::utils::operation_label;

const MEDIUM_RISK_PERCENTAGE: f64 = 20.0;
const HIGH_RISK_PERCENTAGE: f64 = 50.0;
const CRITICAL_RISK_PERCENTAGE: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
  Low,
  Medium,
  High,
  Critical,
}

impl RiskLevel {
  /// Classification by share of operations affected: 75% and above is
  /// CRITICAL, 50% HIGH, 20% MEDIUM, anything below LOW.
  fn from_percentage(percentage: f64) -> Self {
    if percentage >= CRITICAL_RISK_PERCENTAGE {
      Self::Critical
    } else if percentage >= HIGH_RISK_PERCENTAGE {
      Self::High
    } else if percentage >= MEDIUM_RISK_PERCENTAGE {
      Self::Medium
    } else {
      Self::Low
    }
  }
}

/// Impact assessment for a proposed change to one schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlastRadiusReport {
  pub target_schema: String,
  pub total_operations: usize,
  pub affected_operations: usize,
  pub percentage: f64,
  pub risk_level: RiskLevel,
  pub direct_dependents: Vec<String>,
  pub all_affected_schemas: Vec<String>,
  pub affected_endpoints: Vec<String>,
}

/// Computes the transitive set of schemas and operations affected by a
/// change to the target schema. An unknown target, or a document with no
/// schemas component at all, yields a zero-affected report rather than an
/// error.
pub struct BlastRadiusAnalyzer {
  target: String,
}

impl BlastRadiusAnalyzer {
  pub fn new(target: impl Into<String>) -> Self {
    Self { target: target.into() }
  }
}

impl Analyzer for BlastRadiusAnalyzer {
  type Report = BlastRadiusReport;

  fn analyze(&self, spec: &Spec) -> BlastRadiusReport {
    let dependents = ReverseDependencyAnalyzer.analyze(spec);
    let graph = ReferenceGraphBuilder.analyze(spec);

    let declared: BTreeSet<String> = spec
      .components
      .as_ref()
      .map(|components| components.schemas.keys().cloned().collect())
      .unwrap_or_default();

    let mut operation_labels = BTreeSet::new();
    for (path, method, _) in spec.operations() {
      operation_labels.insert(operation_label(&method, &path));
    }
    let total_operations = operation_labels.len();

    let affected = dependents.get(&self.target).cloned().unwrap_or_default();

    let mut all_affected_schemas: BTreeSet<String> = affected
      .iter()
      .filter(|label| declared.contains(*label))
      .cloned()
      .collect();
    if declared.contains(&self.target) {
      // The target itself is part of its own blast radius.
      all_affected_schemas.insert(self.target.clone());
    }

    let affected_endpoints: Vec<String> = affected
      .iter()
      .filter(|label| operation_labels.contains(*label))
      .cloned()
      .collect();
    let affected_operations = affected_endpoints.len();

    let percentage = if total_operations == 0 {
      0.0
    } else {
      affected_operations as f64 / total_operations as f64 * 100.0
    };

    let direct_dependents: Vec<String> = graph
      .direct_dependents_of(&self.target)
      .into_iter()
      .map(|node| node.id.clone())
      .collect();

    BlastRadiusReport {
      target_schema: self.target.clone(),
      total_operations,
      affected_operations,
      percentage,
      risk_level: RiskLevel::from_percentage(percentage),
      direct_dependents,
      all_affected_schemas: all_affected_schemas.into_iter().collect(),
      affected_endpoints,
    }
  }
}
