//! Circular chord layout.
//!
//! The pipeline runs in three pure stages over an immutable [`Graph`]:
//!
//! 1. [`outer::partition`] splits the full turn among nodes.
//! 2. [`inner::partition`] splits each node's band among its edges.
//! 3. [`ribbon::synthesize`] joins the two sub-arcs of every edge.
//!
//! The result is a [`Layout`] in normalized unit-circle coordinates. Nothing
//! here knows about pixels or drawing surfaces.

pub mod arc;
pub mod inner;
pub mod outer;
pub mod ribbon;

pub use arc::{ArcShape, Point};
pub use ribbon::{PathSegment, RibbonPath};

use crate::error::LayoutError;
use crate::graph::{EdgeIndex, Endpoint, Graph, NodeIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const OUTER_GAP: f64 = 0.01;
pub const INNER_GAP: f64 = 0.015;
pub const OUTER_RADIUS: f64 = 1.0;
pub const INNER_RADIUS: f64 = 0.6;
pub const RING_THICKNESS: f64 = 0.05;
pub const RIBBON_PULL: f64 = 1.0;

/// Constants that shape the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Turn fraction left after every outer arc.
    pub outer_gap: f64,
    /// Turn fraction reserved per node on the inner ring.
    pub inner_gap: f64,
    /// Outer edge of the node ring.
    pub outer_radius: f64,
    /// Outer edge of the edge ring.
    pub inner_radius: f64,
    /// Radial depth of both rings.
    pub ring_thickness: f64,
    /// Where ribbon control points sit between chord midpoint (0) and centre (1).
    pub ribbon_pull: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            outer_gap: OUTER_GAP,
            inner_gap: INNER_GAP,
            outer_radius: OUTER_RADIUS,
            inner_radius: INNER_RADIUS,
            ring_thickness: RING_THICKNESS,
            ribbon_pull: RIBBON_PULL,
        }
    }
}

impl LayoutSettings {
    /// Check that these settings can lay out `node_count` nodes.
    pub fn validate(&self, node_count: usize) -> Result<(), LayoutError> {
        let values = [
            self.outer_gap,
            self.inner_gap,
            self.outer_radius,
            self.inner_radius,
            self.ring_thickness,
            self.ribbon_pull,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(LayoutError::InvalidSettings(
                "all values must be finite".into(),
            ));
        }
        if self.outer_gap < 0.0 || self.inner_gap < 0.0 {
            return Err(LayoutError::InvalidSettings(
                "gaps must be non-negative".into(),
            ));
        }
        if self.inner_gap < self.outer_gap {
            return Err(LayoutError::InvalidSettings(format!(
                "inner_gap {} must be at least outer_gap {}",
                self.inner_gap, self.outer_gap
            )));
        }
        let n = node_count as f64;
        if self.inner_gap * n >= 1.0 {
            return Err(LayoutError::InvalidSettings(format!(
                "{} nodes leave no room with inner_gap {}",
                node_count, self.inner_gap
            )));
        }
        if self.ring_thickness <= 0.0 || self.inner_radius - self.ring_thickness <= 0.0 {
            return Err(LayoutError::InvalidSettings(
                "ring_thickness must be positive and smaller than inner_radius".into(),
            ));
        }
        if self.inner_radius > self.outer_radius - self.ring_thickness {
            return Err(LayoutError::InvalidSettings(
                "inner ring must sit inside the outer ring".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.ribbon_pull) {
            return Err(LayoutError::InvalidSettings(
                "ribbon_pull must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// A node's arc on the outer ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OuterArc {
    pub node: NodeIndex,
    pub shape: ArcShape,
}

/// One edge's sub-arc on the inner ring, anchored on one of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InnerArc {
    /// Home node.
    pub node: NodeIndex,
    /// The edge's other endpoint.
    pub far: NodeIndex,
    pub edge: EdgeIndex,
    /// The end of `edge` that `node` sits on.
    pub end: Endpoint,
    /// Index of the home node's arc in [`Layout::outer_arcs`].
    pub parent: usize,
    pub shape: ArcShape,
}

/// The ribbon of one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub edge: EdgeIndex,
    pub id: String,
    /// Index into [`Layout::inner_arcs`] of the sub-arc on the source node.
    pub source_arc: usize,
    /// Index into [`Layout::inner_arcs`] of the sub-arc on the target node.
    pub target_arc: usize,
    pub path: RibbonPath,
}

/// A node's share of the circle, as used for colours and legends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeShare {
    pub name: String,
    pub value: f64,
}

/// Complete, read-only geometry of a chord diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    settings: LayoutSettings,
    model: Vec<NodeShare>,
    outer_arcs: Vec<OuterArc>,
    inner_arcs: Vec<InnerArc>,
    curves: Vec<Curve>,
}

impl Layout {
    /// Run the full pipeline over `graph`.
    pub fn compute(graph: &Graph, settings: &LayoutSettings) -> Result<Self, LayoutError> {
        settings.validate(graph.node_count())?;

        let total = graph.total_weight();
        if graph.edge_count() > 0 && (total - 1.0).abs() > 1e-6 {
            debug!(total, "edge weights are not normalized; the ring will not close");
        }

        let outer_arcs = outer::partition(graph, settings);
        debug!(count = outer_arcs.len(), "outer arcs");

        let inner_arcs = inner::partition(graph, &outer_arcs, settings)?;
        debug!(count = inner_arcs.len(), "inner arcs");

        let curves = ribbon::synthesize(graph, &inner_arcs, settings)?;
        debug!(count = curves.len(), "ribbons");

        let model = graph
            .nodes()
            .map(|(index, node)| NodeShare {
                name: node.id().to_string(),
                value: graph.weight(index),
            })
            .collect();

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "layout computed"
        );

        Ok(Self {
            settings: *settings,
            model,
            outer_arcs,
            inner_arcs,
            curves,
        })
    }

    pub fn with_defaults(graph: &Graph) -> Result<Self, LayoutError> {
        Self::compute(graph, &LayoutSettings::default())
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// `(node id, node weight)` pairs in node order.
    pub fn model(&self) -> &[NodeShare] {
        &self.model
    }

    pub fn outer_arcs(&self) -> &[OuterArc] {
        &self.outer_arcs
    }

    pub fn inner_arcs(&self) -> &[InnerArc] {
        &self.inner_arcs
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn node_name(&self, node: NodeIndex) -> &str {
        &self.model[node.0].name
    }

    pub fn outer_arc(&self, node: NodeIndex) -> Option<&OuterArc> {
        self.outer_arcs.iter().find(|arc| arc.node == node)
    }

    /// Sub-arcs anchored on `node`, in band order.
    pub fn inner_arcs_of(&self, node: NodeIndex) -> impl Iterator<Item = &InnerArc> + '_ {
        self.inner_arcs.iter().filter(move |arc| arc.node == node)
    }

    /// The two sub-arcs a curve joins, source side first.
    pub fn curve_arcs(&self, curve: &Curve) -> (&InnerArc, &InnerArc) {
        (
            &self.inner_arcs[curve.source_arc],
            &self.inner_arcs[curve.target_arc],
        )
    }

    /// Sum of all outer spans plus one outer gap per node.
    pub fn closure(&self) -> f64 {
        self.outer_arcs.iter().map(|a| a.shape.span()).sum::<f64>()
            + self.settings.outer_gap * self.outer_arcs.len() as f64
    }
}
