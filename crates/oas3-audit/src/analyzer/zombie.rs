use oas3::{Spec, spec::Operation};
use serde::Serialize;

use super::{Analyzer, is_success_status};
use crate::utils::{TemplateSegment, operation_label, split_template};

/// A statically-declared path that can never be matched because a
/// parameterized sibling template matches first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowedEndpoint {
  pub shadowed_path: String,
  pub shadowing_path: String,
  pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZombieReport {
  pub shadowed_endpoints: Vec<ShadowedEndpoint>,
  pub orphaned_operations: Vec<String>,
}

/// Detects statically-unreachable paths and operations with no meaningful
/// input or output surface.
pub struct ZombieApiAnalyzer;

impl Analyzer for ZombieApiAnalyzer {
  type Report = ZombieReport;

  fn analyze(&self, spec: &Spec) -> ZombieReport {
    let mut report = ZombieReport::default();

    if let Some(paths) = &spec.paths {
      let templates: Vec<(&String, Vec<TemplateSegment>)> = paths
        .keys()
        .map(|path| (path, split_template(path)))
        .collect();

      for (shadowing, shadowing_segments) in &templates {
        for (shadowed, shadowed_segments) in &templates {
          if shadowing == shadowed {
            continue;
          }
          if let Some(reason) = shadow_reason(shadowing_segments, shadowed_segments) {
            report.shadowed_endpoints.push(ShadowedEndpoint {
              shadowed_path: (*shadowed).clone(),
              shadowing_path: (*shadowing).clone(),
              reason,
            });
          }
        }
      }
    }

    for (path, method, operation) in spec.operations() {
      if is_orphaned(operation, spec) {
        report.orphaned_operations.push(operation_label(&method, &path));
      }
    }

    report
  }
}

/// Whether the first template shadows the second: equal segment counts,
/// every literal segment of the shadowing path matches exactly, and at
/// least one parameter segment sits where the shadowed path has a literal.
/// Returns the human-readable reason for the first such position.
fn shadow_reason(shadowing: &[TemplateSegment], shadowed: &[TemplateSegment]) -> Option<String> {
  if shadowing.is_empty() || shadowing.len() != shadowed.len() {
    return None;
  }

  let mut reason = None;
  for (left, right) in shadowing.iter().zip(shadowed) {
    match (left, right) {
      (TemplateSegment::Parameter(param), TemplateSegment::Literal(literal)) => {
        if reason.is_none() {
          reason = Some(format!("parameter '{{{param}}}' also matches literal segment '{literal}'"));
        }
      }
      (TemplateSegment::Parameter(_), TemplateSegment::Parameter(_)) => {}
      (TemplateSegment::Literal(left_lit), TemplateSegment::Literal(right_lit)) => {
        if left_lit != right_lit {
          return None;
        }
      }
      (TemplateSegment::Literal(_), TemplateSegment::Parameter(_)) => return None,
    }
  }

  reason
}

/// An operation is orphaned when it declares no parameters, no request
/// body, and no success response with a content schema.
fn is_orphaned(operation: &Operation, spec: &Spec) -> bool {
  if !operation.parameters.is_empty() || operation.request_body.is_some() {
    return false;
  }

  let Some(responses) = &operation.responses else {
    return true;
  };

  !responses.iter().any(|(status, response_ref)| {
    is_success_status(status)
      && response_ref
        .resolve(spec)
        .is_ok_and(|response| response.content.values().any(|media_type| media_type.schema.is_some()))
  })
}
