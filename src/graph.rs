//! Weighted graph model.
//!
//! Nodes and edges live in two arenas owned by the [`Graph`]. Edges refer to
//! their endpoints by [`NodeIndex`], and each node keeps the indices of its
//! incident edges split into incoming and outgoing lists. Both lists are
//! filled once at construction in edge insertion order and never touched
//! again, which is what makes [`Graph::edges_of`] a stable ordering.
//!
//! Node weight is never stored: it is half the sum of the incident edge
//! weights, computed on demand.

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Serializable description of one edge, as produced by ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub id: String,
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl EdgeSpec {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Serializable graph input: a node id list and an ordered edge list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeSpec>,
}

/// Position of a node in the graph's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

/// Position of an edge in the graph's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeIndex(pub usize);

/// Which end of an edge a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Source,
    Target,
}

impl Endpoint {
    pub fn opposite(self) -> Self {
        match self {
            Endpoint::Source => Endpoint::Target,
            Endpoint::Target => Endpoint::Source,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    incoming: Vec<EdgeIndex>,
    outgoing: Vec<EdgeIndex>,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Edges whose target is this node, in insertion order.
    pub fn incoming(&self) -> &[EdgeIndex] {
        &self.incoming
    }

    /// Edges whose source is this node, in insertion order.
    pub fn outgoing(&self) -> &[EdgeIndex] {
        &self.outgoing
    }

    pub fn degree(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: String,
    source: NodeIndex,
    target: NodeIndex,
    weight: f64,
}

impl Edge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn target(&self) -> NodeIndex {
        self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The node at the given end of this edge.
    pub fn endpoint(&self, end: Endpoint) -> NodeIndex {
        match end {
            Endpoint::Source => self.source,
            Endpoint::Target => self.target,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// One entry of a node's incidence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incident {
    pub edge: EdgeIndex,
    /// The end of `edge` the node sits on.
    pub end: Endpoint,
}

/// Immutable weighted graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_lookup: HashMap<String, NodeIndex>,
}

impl Graph {
    /// Build a graph from a node id list and an ordered edge list.
    ///
    /// Repeated node ids keep their first position. Any edge that names an
    /// unknown node, repeats an edge id, or carries a negative or non-finite
    /// weight fails the whole build.
    pub fn build<I, S, E>(node_ids: I, edges: E) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = EdgeSpec>,
    {
        let mut nodes: Vec<Node> = Vec::new();
        let mut node_lookup: HashMap<String, NodeIndex> = HashMap::new();

        for id in node_ids {
            let id = id.into();
            if node_lookup.contains_key(&id) {
                continue;
            }
            node_lookup.insert(id.clone(), NodeIndex(nodes.len()));
            nodes.push(Node {
                id,
                incoming: Vec::new(),
                outgoing: Vec::new(),
            });
        }

        let mut arena: Vec<Edge> = Vec::new();
        let mut edge_ids: HashSet<String> = HashSet::new();

        for spec in edges {
            let source = *node_lookup.get(&spec.source).ok_or_else(|| {
                LayoutError::UnknownNodeReference {
                    edge: spec.id.clone(),
                    node: spec.source.clone(),
                }
            })?;
            let target = *node_lookup.get(&spec.target).ok_or_else(|| {
                LayoutError::UnknownNodeReference {
                    edge: spec.id.clone(),
                    node: spec.target.clone(),
                }
            })?;

            if !spec.weight.is_finite() || spec.weight < 0.0 {
                return Err(LayoutError::InvalidEdgeWeight {
                    edge: spec.id,
                    weight: spec.weight,
                });
            }
            if !edge_ids.insert(spec.id.clone()) {
                return Err(LayoutError::DuplicateEdgeId { edge: spec.id });
            }

            let index = EdgeIndex(arena.len());
            nodes[source.0].outgoing.push(index);
            nodes[target.0].incoming.push(index);
            arena.push(Edge {
                id: spec.id,
                source,
                target,
                weight: spec.weight,
            });
        }

        Ok(Self {
            nodes,
            edges: arena,
            node_lookup,
        })
    }

    pub fn from_spec(spec: &GraphSpec) -> Result<Self, LayoutError> {
        Self::build(spec.nodes.iter().cloned(), spec.edges.iter().cloned())
    }

    /// Serializable form of this graph, in insertion order.
    pub fn to_spec(&self) -> GraphSpec {
        GraphSpec {
            nodes: self.nodes.iter().map(|n| n.id.clone()).collect(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeSpec {
                    id: e.id.clone(),
                    source: self.nodes[e.source.0].id.clone(),
                    target: self.nodes[e.target.0].id.clone(),
                    weight: e.weight,
                })
                .collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeIndex, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeIndex, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeIndex(i), e))
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    pub fn edge(&self, index: EdgeIndex) -> &Edge {
        &self.edges[index.0]
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_lookup.get(id).copied()
    }

    /// Incident edges of a node: in-edges first, then out-edges, each in
    /// insertion order. A self-loop appears once in each half.
    pub fn edges_of(&self, index: NodeIndex) -> impl Iterator<Item = Incident> + '_ {
        let node = &self.nodes[index.0];
        let incoming = node.incoming.iter().map(|&edge| Incident {
            edge,
            end: Endpoint::Target,
        });
        let outgoing = node.outgoing.iter().map(|&edge| Incident {
            edge,
            end: Endpoint::Source,
        });
        incoming.chain(outgoing)
    }

    /// Derived node weight: half the sum of incident edge weights.
    pub fn weight(&self, index: NodeIndex) -> f64 {
        self.edges_of(index)
            .map(|inc| self.edges[inc.edge.0].weight)
            .sum::<f64>()
            / 2.0
    }

    pub fn weight_of(&self, id: &str) -> Option<f64> {
        self.node_index(id).map(|index| self.weight(index))
    }

    /// Sum of all edge weights. Equals the sum of all node weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}
