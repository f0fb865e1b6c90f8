use std::collections::{BTreeMap, BTreeSet};

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Operation, Schema},
};
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};
use serde::Serialize;
use strum::Display;

use super::Analyzer;
use crate::utils::{extract_schema_ref_name, operation_label};

/// Discriminates graph node identity: two nodes are equal only when both
/// the id and the kind match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
  Schema,
  Endpoint,
}

/// A vertex in the reference graph: a named component schema or an
/// operation labelled `"METHOD /path"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GraphNode {
  pub id: String,
  pub kind: NodeKind,
}

impl GraphNode {
  pub fn schema(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      kind: NodeKind::Schema,
    }
  }

  pub fn endpoint(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      kind: NodeKind::Endpoint,
    }
  }
}

/// Directed edge meaning "source references/depends on target".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ReferenceEdge {
  pub source: GraphNode,
  pub target: GraphNode,
}

/// The document's reference-dependency graph.
///
/// Edges cover schema-to-schema references through properties, array items
/// and composition, plus operation-to-schema references through request
/// bodies and response media types. Reference cycles are legal; the graph
/// records all edges and leaves termination guards to its consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReferenceGraph {
  nodes: BTreeSet<GraphNode>,
  edges: BTreeSet<ReferenceEdge>,
}

impl ReferenceGraph {
  pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
    self.nodes.iter()
  }

  pub fn edges(&self) -> impl Iterator<Item = &ReferenceEdge> {
    self.edges.iter()
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn edge_count(&self) -> usize {
    self.edges.len()
  }

  pub fn contains_edge(&self, source: &GraphNode, target: &GraphNode) -> bool {
    self
      .edges
      .iter()
      .any(|edge| edge.source == *source && edge.target == *target)
  }

  /// Nodes with a direct edge into the named schema.
  pub fn direct_dependents_of(&self, schema_name: &str) -> BTreeSet<&GraphNode> {
    self
      .edges
      .iter()
      .filter(|edge| edge.target.kind == NodeKind::Schema && edge.target.id == schema_name)
      .map(|edge| &edge.source)
      .collect()
  }

  /// Strongly-connected components of the schema-to-schema subgraph with
  /// more than one member, i.e. the reference cycles.
  pub fn cycles(&self) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for edge in &self.edges {
      if edge.source.kind == NodeKind::Schema && edge.target.kind == NodeKind::Schema {
        graph.add_edge(edge.source.id.as_str(), edge.target.id.as_str(), ());
      }
    }

    kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1)
      .map(|scc| scc.into_iter().map(String::from).collect())
      .collect()
  }

  fn add_edge(&mut self, source: GraphNode, target: GraphNode) {
    self.nodes.insert(source.clone());
    self.nodes.insert(target.clone());
    self.edges.insert(ReferenceEdge { source, target });
  }
}

/// Walks the document once and extracts every resolvable `$ref` edge.
pub struct ReferenceGraphBuilder;

impl Analyzer for ReferenceGraphBuilder {
  type Report = ReferenceGraph;

  fn analyze(&self, spec: &Spec) -> ReferenceGraph {
    let mut graph = ReferenceGraph::default();

    let declared: BTreeSet<String> = spec
      .components
      .as_ref()
      .map(|components| components.schemas.keys().cloned().collect())
      .unwrap_or_default();

    if let Some(components) = &spec.components {
      for (name, schema_ref) in &components.schemas {
        graph.nodes.insert(GraphNode::schema(name));

        let Ok(schema) = schema_ref.resolve(spec) else {
          continue;
        };

        let mut refs = BTreeSet::new();
        collect_schema_refs(&schema, &mut refs);
        for target in refs {
          // Self-edges carry no information for dependents or impact.
          if target != *name && declared.contains(&target) {
            graph.add_edge(GraphNode::schema(name), GraphNode::schema(target));
          }
        }
      }
    }

    for (path, method, operation) in spec.operations() {
      let label = operation_label(&method, &path);
      graph.nodes.insert(GraphNode::endpoint(&label));

      let mut refs = BTreeSet::new();
      collect_operation_refs(operation, spec, &mut refs);
      for target in refs {
        if declared.contains(&target) {
          graph.add_edge(GraphNode::endpoint(&label), GraphNode::schema(target));
        }
      }
    }

    graph
  }
}

/// Collects the names of all component schemas a schema directly
/// references through properties, array items and composition, descending
/// into inline subschemas. Inline trees are finite by construction, so no
/// cycle guard is needed here; named references are recorded but not
/// followed.
pub(crate) fn collect_schema_refs(schema: &ObjectSchema, refs: &mut BTreeSet<String>) {
  for prop_schema in schema.properties.values() {
    collect_refs_from_schema_ref(prop_schema, refs);
  }

  for one_of_schema in &schema.one_of {
    collect_refs_from_schema_ref(one_of_schema, refs);
  }

  for any_of_schema in &schema.any_of {
    collect_refs_from_schema_ref(any_of_schema, refs);
  }

  for all_of_schema in &schema.all_of {
    collect_refs_from_schema_ref(all_of_schema, refs);
  }

  if let Some(ref items_box) = schema.items
    && let Schema::Object(ref schema_ref) = **items_box
  {
    collect_refs_from_schema_ref(schema_ref, refs);
  }
}

pub(crate) fn collect_refs_from_schema_ref(schema_ref: &ObjectOrReference<ObjectSchema>, refs: &mut BTreeSet<String>) {
  if let Some(ref_name) = extract_schema_ref_name(schema_ref) {
    refs.insert(ref_name);
  }

  if let ObjectOrReference::Object(inline_schema) = schema_ref {
    collect_schema_refs(inline_schema, refs);
  }
}

/// Collects the component schemas an operation references through its
/// request-body and response media types.
pub(crate) fn collect_operation_refs(operation: &Operation, spec: &Spec, refs: &mut BTreeSet<String>) {
  if let Some(body_ref) = &operation.request_body
    && let Ok(body) = body_ref.resolve(spec)
  {
    for media_type in body.content.values() {
      if let Some(schema_ref) = &media_type.schema {
        collect_refs_from_schema_ref(schema_ref, refs);
      }
    }
  }

  if let Some(responses) = &operation.responses {
    for response_ref in responses.values() {
      let Ok(response) = response_ref.resolve(spec) else {
        continue;
      };
      for media_type in response.content.values() {
        if let Some(schema_ref) = &media_type.schema {
          collect_refs_from_schema_ref(schema_ref, refs);
        }
      }
    }
  }
}
