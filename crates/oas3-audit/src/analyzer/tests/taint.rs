use super::support::parse_spec;
use crate::analyzer::{Analyzer, Severity, TaintAnalyzer};

fn user_spec(secured: bool) -> String {
  let security = if secured {
    r##""security": [{ "bearerAuth": [] }],"##
  } else {
    ""
  };
  format!(
    r##"{{
      "openapi": "3.0.0",
      "info": {{ "title": "Test", "version": "1.0.0" }},
      "paths": {{
        "/users/{{id}}": {{
          "get": {{
            {security}
            "responses": {{
              "200": {{
                "description": "ok",
                "content": {{
                  "application/json": {{
                    "schema": {{ "$ref": "#/components/schemas/User" }}
                  }}
                }}
              }}
            }}
          }}
        }}
      }},
      "components": {{
        "securitySchemes": {{
          "bearerAuth": {{ "type": "http", "scheme": "bearer" }}
        }},
        "schemas": {{
          "User": {{
            "type": "object",
            "properties": {{
              "name": {{ "type": "string" }},
              "ssn": {{ "type": "string" }}
            }}
          }}
        }}
      }}
    }}"##
  )
}

#[test]
fn test_public_endpoint_leaking_ssn_is_critical() {
  let spec = parse_spec(&user_spec(false));
  let findings = TaintAnalyzer::default().analyze(&spec);

  assert_eq!(findings.len(), 1);
  let finding = &findings[0];
  assert_eq!(finding.endpoint, "GET /users/{id}");
  assert_eq!(finding.severity, Severity::Critical);
  assert_eq!(finding.leaked_data, "Schema: User -> Property: ssn");
}

#[test]
fn test_secured_endpoint_leaking_ssn_is_warning() {
  let spec = parse_spec(&user_spec(true));
  let findings = TaintAnalyzer::default().analyze(&spec);

  assert_eq!(findings.len(), 1);
  assert_eq!(findings[0].severity, Severity::Warning);
}

#[test]
fn test_error_responses_are_not_sinks() {
  let spec = parse_spec(
    r##"{
      "openapi": "3.0.0",
      "info": { "title": "Test", "version": "1.0.0" },
      "paths": {
        "/login": {
          "post": {
            "responses": {
              "401": {
                "description": "unauthorized",
                "content": {
                  "application/json": {
                    "schema": { "$ref": "#/components/schemas/Credentials" }
                  }
                }
              }
            }
          }
        }
      },
      "components": {
        "schemas": {
          "Credentials": {
            "type": "object",
            "properties": { "password": { "type": "string" } }
          }
        }
      }
    }"##,
  );

  let findings = TaintAnalyzer::default().analyze(&spec);
  assert!(findings.is_empty());
}

#[test]
fn test_write_only_property_is_not_a_leak() {
  let spec = parse_spec(
    r##"{
      "openapi": "3.0.0",
      "info": { "title": "Test", "version": "1.0.0" },
      "paths": {
        "/accounts": {
          "get": {
            "responses": {
              "200": {
                "description": "ok",
                "content": {
                  "application/json": {
                    "schema": { "$ref": "#/components/schemas/Account" }
                  }
                }
              }
            }
          }
        }
      },
      "components": {
        "schemas": {
          "Account": {
            "type": "object",
            "properties": {
              "name": { "type": "string" },
              "password": { "type": "string", "writeOnly": true }
            }
          }
        }
      }
    }"##,
  );

  let findings = TaintAnalyzer::default().analyze(&spec);
  assert!(findings.is_empty());
}

#[test]
fn test_leak_through_nested_reference() {
  let spec = parse_spec(
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
        }
      },
      "components": {
        "schemas": {
          "Profile": {
            "type": "object",
            "properties": {
              "owner": { "$ref": "#/components/schemas/Owner" }
            }
          },
          "Owner": {
            "type": "object",
            "properties": { "creditCard": { "type": "string" } }
          }
        }
      }
    }"##,
  );

  let findings = TaintAnalyzer::default().analyze(&spec);
  assert_eq!(findings.len(), 1);
  assert_eq!(
    findings[0].leaked_data,
    "Schema: Profile -> Schema: Owner -> Property: creditCard"
  );
}

#[test]
fn test_cyclic_clean_schemas_terminate_without_findings() {
  let spec = super::support::cyclic_spec();
  let findings = TaintAnalyzer::default().analyze(&spec);
  assert!(findings.is_empty());
}

#[test]
fn test_identify_sources_matches_name_and_properties() {
  let spec = parse_spec(
    r##"{
      "openapi": "3.0.0",
      "info": { "title": "Test", "version": "1.0.0" },
      "paths": {},
      "components": {
        "schemas": {
          "ApiKeyPair": {
            "type": "object",
            "properties": { "id": { "type": "string" } }
          },
          "User": {
            "type": "object",
            "properties": { "ssn": { "type": "string" } }
          },
          "Clean": {
            "type": "object",
            "properties": { "name": { "type": "string" } }
          }
        }
      }
    }"##,
  );

  let sources = TaintAnalyzer::default().identify_sources(&spec);
  let names: Vec<&str> = sources.iter().map(String::as_str).collect();
  assert_eq!(names, vec!["ApiKeyPair", "User"]);
}

#[test]
fn test_custom_keywords_override_defaults() {
  let spec = parse_spec(&user_spec(false));
  let analyzer = TaintAnalyzer::with_keywords(["internal".to_string()]);
  assert!(analyzer.analyze(&spec).is_empty());
}
