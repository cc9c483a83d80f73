//! Ribbon synthesis.
//!
//! Every edge becomes a closed contour that hugs the inner radius of both of
//! its sub-arcs, so the ribbon's width at each end equals the sub-arc width.
//!
//! ```text
//!   M a.start ─arc─▶ a.end ─quad(centre)─▶ b.start ─arc─▶ b.end ─quad(centre)─▶ a.start Z
//! ```

use super::arc::{ArcShape, Point};
use super::{Curve, InnerArc, LayoutSettings};
use crate::error::LayoutError;
use crate::graph::{EdgeIndex, Endpoint, Graph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One drawing command of a ribbon contour, in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo {
        to: Point,
    },
    /// Circular arc around `center` from turn fraction `from` to `until`.
    /// `to` is the point at `until`.
    Arc {
        center: Point,
        radius: f64,
        from: f64,
        until: f64,
        to: Point,
    },
    QuadTo {
        ctrl: Point,
        to: Point,
    },
    Close,
}

/// Ordered segments of one closed ribbon contour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibbonPath {
    pub segments: Vec<PathSegment>,
}

impl RibbonPath {
    /// Build the contour joining sub-arc `a` to sub-arc `b`.
    ///
    /// `pull` places the control point of each connecting quadratic: 1.0 puts
    /// it on the circle centre, 0.0 on the midpoint of the chord it spans.
    pub fn between(a: &ArcShape, b: &ArcShape, pull: f64) -> Self {
        let center = a.center();
        let a_start = a.inner_start();
        let a_end = a.inner_end();
        let b_start = b.inner_start();
        let b_end = b.inner_end();

        let control = |from: Point, to: Point| from.midpoint(to).lerp(center, pull);

        let segments = vec![
            PathSegment::MoveTo { to: a_start },
            PathSegment::Arc {
                center,
                radius: a.r0,
                from: a.start,
                until: a.end,
                to: a_end,
            },
            PathSegment::QuadTo {
                ctrl: control(a_end, b_start),
                to: b_start,
            },
            PathSegment::Arc {
                center: b.center(),
                radius: b.r0,
                from: b.start,
                until: b.end,
                to: b_end,
            },
            PathSegment::QuadTo {
                ctrl: control(b_end, a_start),
                to: a_start,
            },
            PathSegment::Close,
        ];

        Self { segments }
    }

    /// Point the contour starts from.
    pub fn origin(&self) -> Option<Point> {
        self.segments.iter().find_map(|s| match s {
            PathSegment::MoveTo { to } => Some(*to),
            _ => None,
        })
    }

    /// The arc segments as `(start point, end point)`, in drawing order.
    pub fn arc_endpoints(&self) -> Vec<(Point, Point)> {
        let mut pen = None;
        let mut out = Vec::new();
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo { to } | PathSegment::QuadTo { to, .. } => pen = Some(to),
                PathSegment::Arc { to, .. } => {
                    if let Some(from) = pen {
                        out.push((from, to));
                    }
                    pen = Some(to);
                }
                PathSegment::Close => pen = self.origin(),
            }
        }
        out
    }
}

/// Build one ribbon per edge, in edge order.
pub fn synthesize(
    graph: &Graph,
    inner: &[InnerArc],
    settings: &LayoutSettings,
) -> Result<Vec<Curve>, LayoutError> {
    let lookup: HashMap<(EdgeIndex, Endpoint), usize> = inner
        .iter()
        .enumerate()
        .map(|(i, arc)| ((arc.edge, arc.end), i))
        .collect();

    let find = |edge: EdgeIndex, end: Endpoint, anchor: NodeIndex, far: NodeIndex| {
        lookup
            .get(&(edge, end))
            .copied()
            .filter(|&i| inner[i].node == anchor && inner[i].far == far)
            .ok_or_else(|| LayoutError::SectorNotFound {
                edge: graph.edge(edge).id().to_string(),
                anchor: graph.node(anchor).id().to_string(),
                far: graph.node(far).id().to_string(),
            })
    };

    graph
        .edges()
        .map(|(index, edge)| {
            let source_arc = find(index, Endpoint::Source, edge.source(), edge.target())?;
            let target_arc = find(index, Endpoint::Target, edge.target(), edge.source())?;
            let path = RibbonPath::between(
                &inner[source_arc].shape,
                &inner[target_arc].shape,
                settings.ribbon_pull,
            );
            Ok(Curve {
                edge: index,
                id: edge.id().to_string(),
                source_arc,
                target_arc,
                path,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeSpec, Graph};
    use crate::layout::{inner, outer};

    const EPS: f64 = 1e-12;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < EPS
    }

    #[test]
    fn test_contour_shape() {
        let a = ArcShape::new(0.0, 0.1, 0.55, 0.6);
        let b = ArcShape::new(0.5, 0.6, 0.55, 0.6);
        let path = RibbonPath::between(&a, &b, 1.0);

        assert_eq!(path.segments.len(), 6);
        assert!(matches!(path.segments[0], PathSegment::MoveTo { .. }));
        assert!(matches!(path.segments[1], PathSegment::Arc { .. }));
        assert!(matches!(path.segments[2], PathSegment::QuadTo { .. }));
        assert!(matches!(path.segments[3], PathSegment::Arc { .. }));
        assert!(matches!(path.segments[4], PathSegment::QuadTo { .. }));
        assert_eq!(path.segments[5], PathSegment::Close);
    }

    #[test]
    fn test_arc_segments_hit_sub_arc_boundaries() {
        let a = ArcShape::new(0.05, 0.2, 0.55, 0.6);
        let b = ArcShape::new(0.6, 0.75, 0.55, 0.6);
        let path = RibbonPath::between(&a, &b, 1.0);
        let arcs = path.arc_endpoints();

        assert_eq!(arcs.len(), 2);
        assert!(close(arcs[0].0, a.inner_start()));
        assert!(close(arcs[0].1, a.inner_end()));
        assert!(close(arcs[1].0, b.inner_start()));
        assert!(close(arcs[1].1, b.inner_end()));
    }

    #[test]
    fn test_full_pull_puts_controls_on_centre() {
        let a = ArcShape::new(0.0, 0.1, 0.55, 0.6);
        let b = ArcShape::new(0.5, 0.6, 0.55, 0.6);
        let path = RibbonPath::between(&a, &b, 1.0);
        for segment in &path.segments {
            if let PathSegment::QuadTo { ctrl, .. } = segment {
                assert!(close(*ctrl, Point::new(0.0, 0.0)));
            }
        }
    }

    #[test]
    fn test_zero_pull_puts_controls_on_chord_midpoint() {
        let a = ArcShape::new(0.0, 0.1, 0.55, 0.6);
        let b = ArcShape::new(0.5, 0.6, 0.55, 0.6);
        let path = RibbonPath::between(&a, &b, 0.0);
        match path.segments[2] {
            PathSegment::QuadTo { ctrl, to } => {
                assert!(close(ctrl, a.inner_end().midpoint(to)));
            }
            ref other => panic!("unexpected segment {other:?}"),
        }
    }

    #[test]
    fn test_self_loop_uses_both_arcs_on_the_same_node() {
        let graph = Graph::build(
            ["a", "b"],
            vec![
                EdgeSpec::new("aa", "a", "a", 0.5),
                EdgeSpec::new("ab", "a", "b", 0.5),
            ],
        )
        .unwrap();
        let settings = LayoutSettings::default();
        let outer = outer::partition(&graph, &settings);
        let inner = inner::partition(&graph, &outer, &settings).unwrap();
        let curves = synthesize(&graph, &inner, &settings).unwrap();

        let aa = &curves[0];
        assert_ne!(aa.source_arc, aa.target_arc);
        assert_eq!(inner[aa.source_arc].node, inner[aa.target_arc].node);
    }

    #[test]
    fn test_missing_sub_arc_is_reported() {
        let graph = Graph::build(["a", "b"], vec![EdgeSpec::new("ab", "a", "b", 1.0)]).unwrap();
        let settings = LayoutSettings::default();
        let outer = outer::partition(&graph, &settings);
        let mut inner = inner::partition(&graph, &outer, &settings).unwrap();
        inner.retain(|arc| arc.end != Endpoint::Target);

        let err = synthesize(&graph, &inner, &settings).unwrap_err();
        assert_eq!(
            err,
            LayoutError::SectorNotFound {
                edge: "ab".into(),
                anchor: "b".into(),
                far: "a".into(),
            }
        );
    }
}
