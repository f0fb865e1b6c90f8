use super::support::parse_spec;
use crate::analyzer::{Analyzer, AuthorizationMatrixAnalyzer};

#[test]
fn test_operation_scopes_collected() {
  let spec = parse_spec(
    r##"{
      "openapi": "3.0.0",
      "info": { "title": "Test", "version": "1.0.0" },
      "paths": {
        "/admin": {
          "get": {
            "security": [{ "oauth": ["admin:read", "admin:write"] }],
            "responses": { "204": { "description": "no content" } }
          }
        }
      },
      "components": {
        "securitySchemes": {
          "oauth": {
            "type": "oauth2",
            "flows": {
              "clientCredentials": {
                "tokenUrl": "https://auth.example.com/token",
                "scopes": {
                  "admin:read": "read",
                  "admin:write": "write"
                }
              }
            }
          }
        }
      }
    }"##,
  );

  let matrix = AuthorizationMatrixAnalyzer.analyze(&spec);
  assert_eq!(matrix.scopes, vec!["admin:read", "admin:write"]);
  assert_eq!(
    matrix.matrix["GET /admin"],
    vec!["admin:read".to_string(), "admin:write".to_string()]
  );
}

#[test]
fn test_global_security_is_inherited() {
  let spec = parse_spec(
    r##"{
      "openapi": "3.0.0",
      "info": { "title": "Test", "version": "1.0.0" },
      "security": [{ "oauth": ["api:read"] }],
      "paths": {
        "/items": {
          "get": {
            "responses": { "204": { "description": "no content" } }
          }
        }
      },
      "components": {
        "securitySchemes": {
          "oauth": {
            "type": "oauth2",
            "flows": {
              "clientCredentials": {
                "tokenUrl": "https://auth.example.com/token",
                "scopes": { "api:read": "read" }
              }
            }
          }
        }
      }
    }"##,
  );

  let matrix = AuthorizationMatrixAnalyzer.analyze(&spec);
  assert_eq!(matrix.matrix["GET /items"], vec!["api:read".to_string()]);
}

#[test]
fn test_empty_operation_security_overrides_global() {
  let spec = parse_spec(
    r##"{
      "openapi": "3.0.0",
      "info": { "title": "Test", "version": "1.0.0" },
      "security": [{ "oauth": ["api:read"] }],
      "paths": {
        "/health": {
          "get": {
            "security": [],
            "responses": { "204": { "description": "no content" } }
          }
        }
      },
      "components": {
        "securitySchemes": {
          "oauth": {
            "type": "oauth2",
            "flows": {
              "clientCredentials": {
                "tokenUrl": "https://auth.example.com/token",
                "scopes": { "api:read": "read" }
              }
            }
          }
        }
      }
    }"##,
  );

  let matrix = AuthorizationMatrixAnalyzer.analyze(&spec);
  assert!(matrix.matrix["GET /health"].is_empty());
  assert!(matrix.scopes.is_empty());
}

#[test]
fn test_scopes_keep_first_seen_order() {
  let spec = parse_spec(
    r##"{
      "openapi": "3.0.0",
      "info": { "title": "Test", "version": "1.0.0" },
      "paths": {
        "/a": {
          "get": {
            "security": [{ "oauth": ["zeta:read"] }],
            "responses": { "204": { "description": "no content" } }
          }
        },
        "/b": {
          "get": {
            "security": [{ "oauth": ["alpha:read", "zeta:read"] }],
            "responses": { "204": { "description": "no content" } }
          }
        }
      },
      "components": {
        "securitySchemes": {
          "oauth": {
            "type": "oauth2",
            "flows": {
              "clientCredentials": {
                "tokenUrl": "https://auth.example.com/token",
                "scopes": {
                  "zeta:read": "read",
                  "alpha:read": "read"
                }
              }
            }
          }
        }
      }
    }"##,
  );

  let matrix = AuthorizationMatrixAnalyzer.analyze(&spec);
  assert_eq!(matrix.scopes, vec!["zeta:read", "alpha:read"]);
}
