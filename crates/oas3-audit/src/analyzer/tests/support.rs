use oas3::Spec;

pub(super) fn parse_spec(spec_json: &str) -> Spec {
  oas3::from_json(spec_json).expect("failed to parse test spec")
}

/// Document with two mutually-referencing schemas and one operation
/// returning the first of them. Used by the cycle-termination tests.
pub(super) fn cyclic_spec() -> Spec {
  parse_spec(
    r##"{
      "openapi": "3.0.0",
      "info": { "title": "Cyclic", "version": "1.0.0" },
      "paths": {
        "/nodes": {
          "get": {
            "responses": {
              "200": {
                "description": "ok",
                "content": {
                  "application/json": {
                    "schema": { "$ref": "#/components/schemas/Node" }
                  }
                }
              }
            }
          }
        }
      },
      "components": {
        "schemas": {
          "Node": {
            "type": "object",
            "properties": {
              "label": { "type": "string" },
              "link": { "$ref": "#/components/schemas/Edge" }
            }
          },
          "Edge": {
            "type": "object",
            "properties": {
              "back": { "$ref": "#/components/schemas/Node" }
            }
          }
        }
      }
    }"##,
  )
}
