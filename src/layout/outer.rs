//! Outer ring: one arc per node, sized by node weight.

use super::arc::ArcShape;
use super::{LayoutSettings, OuterArc};
use crate::graph::Graph;

/// Divide the circle among the graph's nodes.
///
/// Each node gets `weight * (1 - gap * n)` of the turn followed by one gap,
/// so spans plus gaps close the circle when edge weights sum to 1. A node
/// with zero weight still consumes its gap.
pub fn partition(graph: &Graph, settings: &LayoutSettings) -> Vec<OuterArc> {
    let scale = 1.0 - settings.outer_gap * graph.node_count() as f64;
    let r = settings.outer_radius;
    let r0 = r - settings.ring_thickness;

    let mut cursor = 0.0;
    graph
        .nodes()
        .map(|(index, _)| {
            let end = cursor + graph.weight(index) * scale;
            let arc = OuterArc {
                node: index,
                shape: ArcShape::new(cursor, end, r0, r),
            };
            cursor = end + settings.outer_gap;
            arc
        })
        .collect()
}
