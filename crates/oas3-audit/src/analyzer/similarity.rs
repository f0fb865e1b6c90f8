use std::collections::BTreeSet;

use itertools::Itertools;
use oas3::Spec;
use petgraph::unionfind::UnionFind;
use serde::Serialize;

use super::{Analyzer, resolved_components};

/// Jaccard index above which two schemas are considered near-duplicates.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarityCluster {
  pub schemas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityReport {
  pub threshold: f64,
  pub clusters: Vec<SimilarityCluster>,
}

/// Clusters structurally similar schemas.
///
/// Each schema is fingerprinted by its set of property names; pairs whose
/// Jaccard index meets the threshold are merged through union-find, so
/// grouping is the transitive closure of the pairwise relation even though
/// the raw threshold relation is not itself transitive.
pub struct SchemaSimilarityAnalyzer {
  threshold: f64,
}

impl Default for SchemaSimilarityAnalyzer {
  fn default() -> Self {
    Self::with_threshold(DEFAULT_SIMILARITY_THRESHOLD)
  }
}

impl Analyzer for SchemaSimilarityAnalyzer {
  type Report = SimilarityReport;

  fn analyze(&self, spec: &Spec) -> SimilarityReport {
    let schemas = resolved_components(spec);

    // Schemas with no properties have nothing to compare; including them
    // would make every empty pair vacuously identical.
    let fingerprints: Vec<(String, BTreeSet<String>)> = schemas
      .iter()
      .filter(|(_, schema)| !schema.properties.is_empty())
      .map(|(name, schema)| (name.clone(), schema.properties.keys().cloned().collect()))
      .collect();

    let mut groups = UnionFind::<usize>::new(fingerprints.len());
    for (left, right) in (0..fingerprints.len()).tuple_combinations() {
      let similarity = jaccard_index(&fingerprints[left].1, &fingerprints[right].1);
      if similarity >= self.threshold {
        groups.union(left, right);
      }
    }

    let labels = groups.into_labeling();
    let mut clusters: Vec<SimilarityCluster> = labels
      .iter()
      .enumerate()
      .into_group_map_by(|(_, label)| **label)
      .into_values()
      .filter(|members| members.len() > 1)
      .map(|members| SimilarityCluster {
        schemas: members
          .into_iter()
          .map(|(index, _)| fingerprints[index].0.clone())
          .sorted()
          .collect(),
      })
      .collect();
    clusters.sort_by(|a, b| a.schemas.cmp(&b.schemas));

    SimilarityReport {
      threshold: self.threshold,
      clusters,
    }
  }
}

impl SchemaSimilarityAnalyzer {
  pub fn with_threshold(threshold: f64) -> Self {
    Self { threshold }
  }
}

/// |intersection| / |union| of two property-name sets. Both sets are
/// non-empty by construction, so the union is never zero.
fn jaccard_index(left: &BTreeSet<String>, right: &BTreeSet<String>) -> f64 {
  let intersection = left.intersection(right).count();
  let union = left.union(right).count();
  intersection as f64 / union as f64
}
