//! Inner ring: one sub-arc per (node, incident edge) pair.

use super::arc::ArcShape;
use super::{InnerArc, LayoutSettings, OuterArc};
use crate::error::LayoutError;
use crate::graph::{Graph, NodeIndex};
use std::collections::HashMap;

/// Divide each node's band among its incident edges.
///
/// Inside a band the sub-arcs are contiguous and follow
/// [`Graph::edges_of`] order. Each one is `weight / 2 * (1 - gap * n)` wide,
/// so both ends of an edge get the same width. The band is narrower than its
/// parent outer arc by the difference in gap scaling and is centred in it,
/// which leaves room for the trailing gap.
pub fn partition(
    graph: &Graph,
    outer: &[OuterArc],
    settings: &LayoutSettings,
) -> Result<Vec<InnerArc>, LayoutError> {
    let parents: HashMap<NodeIndex, usize> = outer
        .iter()
        .enumerate()
        .map(|(i, arc)| (arc.node, i))
        .collect();

    let scale = 1.0 - settings.inner_gap * graph.node_count() as f64;
    let r = settings.inner_radius;
    let r0 = r - settings.ring_thickness;

    let mut arcs = Vec::with_capacity(graph.edge_count() * 2);

    for (index, node) in graph.nodes() {
        let parent = *parents
            .get(&index)
            .ok_or_else(|| LayoutError::MissingOuterArc {
                node: node.id().to_string(),
            })?;
        let parent_shape = &outer[parent].shape;

        let band = graph.weight(index) * scale;
        let offset = parent_shape.start + (parent_shape.span() - band) / 2.0;

        let mut cursor = 0.0;
        for incident in graph.edges_of(index) {
            let edge = graph.edge(incident.edge);
            let end = cursor + edge.weight() / 2.0 * scale;
            arcs.push(InnerArc {
                node: index,
                far: edge.endpoint(incident.end.opposite()),
                edge: incident.edge,
                end: incident.end,
                parent,
                shape: ArcShape::new(offset + cursor, offset + end, r0, r),
            });
            cursor = end;
        }
    }

    Ok(arcs)
}
