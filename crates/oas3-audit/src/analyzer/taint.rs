use std::collections::{BTreeMap, BTreeSet};

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Schema},
};
use serde::Serialize;
use strum::Display;

use super::{Analyzer, is_secured, is_success_status, resolved_components};
use crate::utils::{extract_schema_ref_name, operation_label};

/// Default keyword list for classifying sensitive names. Matching is a
/// case-insensitive substring test, so `userPassword` and `SSN` both hit.
pub const SENSITIVE_KEYWORDS: &[&str] = &[
  "password",
  "passwd",
  "secret",
  "token",
  "apikey",
  "api_key",
  "ssn",
  "social_security",
  "creditcard",
  "credit_card",
  "cvv",
  "private_key",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
  Critical,
  Warning,
}

/// A sensitive-data exposure through an operation's success response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaintFinding {
  pub endpoint: String,
  pub severity: Severity,
  pub description: String,
  /// The schema/property trail from the response root to the leak, e.g.
  /// `"Schema: User -> Property: ssn"`.
  pub leaked_data: String,
}

/// Traces reachability from sensitive-data sources to response sinks.
///
/// Phase one classifies schemas as sources by keyword-matching their name
/// and property names; phase two searches every success-response schema
/// for a path to a source, skipping write-only properties (never present
/// in responses) and stopping on schema names already visited in the
/// current trace.
pub struct TaintAnalyzer {
  keywords: Vec<String>,
}

impl Default for TaintAnalyzer {
  fn default() -> Self {
    Self::with_keywords(SENSITIVE_KEYWORDS.iter().map(ToString::to_string))
  }
}

impl Analyzer for TaintAnalyzer {
  type Report = Vec<TaintFinding>;

  fn analyze(&self, spec: &Spec) -> Vec<TaintFinding> {
    let schemas = resolved_components(spec);
    let mut findings = Vec::new();

    for (path, method, operation) in spec.operations() {
      let endpoint = operation_label(&method, &path);
      let secured = is_secured(operation, spec);
      let mut seen_trails = BTreeSet::new();

      let Some(responses) = &operation.responses else {
        continue;
      };

      for (status, response_ref) in responses {
        if !is_success_status(status) {
          continue;
        }
        let Ok(response) = response_ref.resolve(spec) else {
          continue;
        };

        for media_type in response.content.values() {
          let Some(schema_ref) = &media_type.schema else {
            continue;
          };

          let mut trail = Vec::new();
          let mut visited = BTreeSet::new();
          if let Some(leaked_data) = self.trace_ref(spec, &schemas, schema_ref, &mut trail, &mut visited)
            && seen_trails.insert(leaked_data.clone())
          {
            findings.push(Self::build_finding(&endpoint, secured, leaked_data));
          }
        }
      }
    }

    findings
  }
}

impl TaintAnalyzer {
  pub fn with_keywords(keywords: impl IntoIterator<Item = String>) -> Self {
    Self {
      keywords: keywords.into_iter().map(|keyword| keyword.to_lowercase()).collect(),
    }
  }

  /// Phase one in isolation: every declared schema classified as a
  /// sensitive-data source.
  pub fn identify_sources(&self, spec: &Spec) -> BTreeSet<String> {
    resolved_components(spec)
      .iter()
      .filter(|(name, schema)| {
        self.is_sensitive(name) || schema.properties.keys().any(|property| self.is_sensitive(property))
      })
      .map(|(name, _)| name.clone())
      .collect()
  }

  fn is_sensitive(&self, name: &str) -> bool {
    let lowered = name.to_lowercase();
    self.keywords.iter().any(|keyword| lowered.contains(keyword))
  }

  fn build_finding(endpoint: &str, secured: bool, leaked_data: String) -> TaintFinding {
    let (severity, description) = if secured {
      (
        Severity::Warning,
        "Secured endpoint returns sensitive data; verify the exposure is necessary".to_string(),
      )
    } else {
      (
        Severity::Critical,
        "Public endpoint returns sensitive data without any security requirement".to_string(),
      )
    };

    TaintFinding {
      endpoint: endpoint.to_string(),
      severity,
      description,
      leaked_data,
    }
  }

  fn trace_ref(
    &self,
    spec: &Spec,
    schemas: &BTreeMap<String, ObjectSchema>,
    schema_ref: &ObjectOrReference<ObjectSchema>,
    trail: &mut Vec<String>,
    visited: &mut BTreeSet<String>,
  ) -> Option<String> {
    match schema_ref {
      ObjectOrReference::Ref { .. } => {
        let name = extract_schema_ref_name(schema_ref)?;
        let schema = schemas.get(&name)?;

        if !visited.insert(name.clone()) {
          return None;
        }

        trail.push(format!("Schema: {name}"));
        if self.is_sensitive(&name) {
          return Some(trail.join(" -> "));
        }

        let found = self.trace_object(spec, schemas, schema, trail, visited);
        if found.is_none() {
          trail.pop();
        }
        found
      }
      ObjectOrReference::Object(inline) => self.trace_object(spec, schemas, inline, trail, visited),
    }
  }

  fn trace_object(
    &self,
    spec: &Spec,
    schemas: &BTreeMap<String, ObjectSchema>,
    schema: &ObjectSchema,
    trail: &mut Vec<String>,
    visited: &mut BTreeSet<String>,
  ) -> Option<String> {
    for (property, prop_schema) in &schema.properties {
      if Self::is_write_only(spec, prop_schema) {
        continue;
      }

      if self.is_sensitive(property) {
        trail.push(format!("Property: {property}"));
        let leaked = trail.join(" -> ");
        trail.pop();
        return Some(leaked);
      }

      if let Some(leaked) = self.trace_ref(spec, schemas, prop_schema, trail, visited) {
        return Some(leaked);
      }
    }

    for variant in schema.one_of.iter().chain(&schema.any_of).chain(&schema.all_of) {
      if let Some(leaked) = self.trace_ref(spec, schemas, variant, trail, visited) {
        return Some(leaked);
      }
    }

    if let Some(ref items_box) = schema.items
      && let Schema::Object(ref items_ref) = **items_box
      && let Some(leaked) = self.trace_ref(spec, schemas, items_ref, trail, visited)
    {
      return Some(leaked);
    }

    None
  }

  fn is_write_only(spec: &Spec, schema_ref: &ObjectOrReference<ObjectSchema>) -> bool {
    match schema_ref {
      ObjectOrReference::Object(inline) => inline.write_only.unwrap_or(false),
      ObjectOrReference::Ref { .. } => schema_ref
        .resolve(spec)
        .map(|schema| schema.write_only.unwrap_or(false))
        .unwrap_or(false),
    }
  }
}
