use indexmap::{IndexMap, IndexSet};
use oas3::Spec;
use serde::Serialize;

use super::Analyzer;
use crate::utils::operation_label;

/// Scope × operation matrix of declared authorization requirements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuthorizationMatrix {
  /// Every scope seen across the document, in first-seen order.
  pub scopes: Vec<String>,
  /// Operation label mapped to the scopes it requires.
  pub matrix: IndexMap<String, Vec<String>>,
}

/// Extracts each operation's required OAuth-style scopes. An operation
/// without its own security list inherits the document's global
/// requirements.
pub struct AuthorizationMatrixAnalyzer;

impl Analyzer for AuthorizationMatrixAnalyzer {
  type Report = AuthorizationMatrix;

  fn analyze(&self, spec: &Spec) -> AuthorizationMatrix {
    let mut all_scopes = IndexSet::new();
    let mut matrix = IndexMap::new();

    for (path, method, operation) in spec.operations() {
      let requirements = if operation.security.is_empty() {
        &spec.security
      } else {
        &operation.security
      };

      let mut operation_scopes = IndexSet::new();
      for requirement in requirements {
        for scopes in requirement.0.values() {
          for scope in scopes {
            operation_scopes.insert(scope.clone());
            all_scopes.insert(scope.clone());
          }
        }
      }

      matrix.insert(
        operation_label(&method, &path),
        operation_scopes.into_iter().collect(),
      );
    }

    AuthorizationMatrix {
      scopes: all_scopes.into_iter().collect(),
      matrix,
    }
  }
}
