use super::support::parse_spec;
use crate::analyzer::{Analyzer, BlastRadiusAnalyzer, RiskLevel};

fn layered_spec() -> oas3::Spec {
  parse_spec(
    r##"{
      "openapi": "3.0.0",
      "info": { "title": "Test", "version": "1.0.0" },
      "paths": {
        "/profiles": {
          "get": {
            "responses": {
              "200": {
                "description": "ok",
                "content": {
                  "application/json": {
                    "schema": { "$ref": "#/components/schemas/Profile" }
                  }
                }
              }
            }
          }
        },
        "/health": {
          "get": {
            "responses": { "204": { "description": "no content" } }
          }
        }
      },
      "components": {
        "schemas": {
          "Profile": {
            "type": "object",
            "properties": {
              "user": { "$ref": "#/components/schemas/User" }
            }
          },
          "User": {
            "type": "object",
            "properties": { "name": { "type": "string" } }
          }
        }
      }
    }"##,
  )
}

#[test]
fn test_transitive_impact_through_intermediate_schema() {
  let report = BlastRadiusAnalyzer::new("User").analyze(&layered_spec());

  assert_eq!(report.target_schema, "User");
  assert_eq!(report.total_operations, 2);
  assert_eq!(report.affected_operations, 1);
  assert!((report.percentage - 50.0).abs() < f64::EPSILON);
  assert_eq!(report.risk_level, RiskLevel::High);

  // Only Profile references User directly; the endpoint is transitive.
  assert_eq!(report.direct_dependents, vec!["Profile"]);
  assert_eq!(report.all_affected_schemas, vec!["Profile", "User"]);
  assert_eq!(report.affected_endpoints, vec!["GET /profiles"]);
}

#[test]
fn test_report_stays_within_bounds() {
  let report = BlastRadiusAnalyzer::new("Profile").analyze(&layered_spec());

  assert!(report.affected_operations <= report.total_operations);
  assert!((0.0..=100.0).contains(&report.percentage));
  assert!(report.all_affected_schemas.contains(&"Profile".to_string()));
}

#[test]
fn test_unknown_target_yields_empty_report() {
  let report = BlastRadiusAnalyzer::new("Ghost").analyze(&layered_spec());

  assert_eq!(report.affected_operations, 0);
  assert!((report.percentage - 0.0).abs() < f64::EPSILON);
  assert_eq!(report.risk_level, RiskLevel::Low);
  assert!(report.direct_dependents.is_empty());
  assert!(report.all_affected_schemas.is_empty());
  assert!(report.affected_endpoints.is_empty());
}

#[test]
fn test_risk_thresholds() {
  let spec = parse_spec(
    r##"{
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
          "User": { "type": "object", "properties": { "name": { "type": "string" } } }
        }
      }
    }"##,
  );

  // The single operation depends on the target: 100% affected.
  let report = BlastRadiusAnalyzer::new("User").analyze(&spec);
  assert!((report.percentage - 100.0).abs() < f64::EPSILON);
  assert_eq!(report.risk_level, RiskLevel::Critical);
}
