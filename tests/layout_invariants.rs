//! End-to-end layout checks on fixed graphs.

use circos::graph::{EdgeSpec, Endpoint, Graph};
use circos::layout::{Layout, LayoutSettings, PathSegment};
use circos::matrix::Matrix;
use circos::render::{Renderer, SvgRenderer};
use circos::LayoutError;

const EPS: f64 = 1e-9;

fn sample_layout() -> (Graph, Layout) {
    let spec = Matrix::sample().to_graph_spec().unwrap();
    let graph = Graph::from_spec(&spec).unwrap();
    let layout = Layout::with_defaults(&graph).unwrap();
    (graph, layout)
}

#[test]
fn two_nodes_one_edge() {
    let graph = Graph::build(["A", "B"], vec![EdgeSpec::new("0", "A", "B", 1.0)]).unwrap();
    let layout = Layout::with_defaults(&graph).unwrap();

    let outer = layout.outer_arcs();
    assert_eq!(outer.len(), 2);
    assert!(outer[0].shape.start.abs() < EPS);
    assert!((outer[0].shape.end - 0.49).abs() < EPS);
    assert!((outer[1].shape.start - 0.50).abs() < EPS);
    assert!((outer[1].shape.end - 0.99).abs() < EPS);

    let inner = layout.inner_arcs();
    assert_eq!(inner.len(), 2);
    let band = 0.5 * (1.0 - 0.015 * 2.0);
    for arc in inner {
        assert!((arc.shape.span() - band).abs() < EPS);
    }

    assert_eq!(layout.curves().len(), 1);
    assert!((layout.closure() - 1.0).abs() < EPS);
}

#[test]
fn sample_matrix_closes_the_circle() {
    let (graph, layout) = sample_layout();

    // 5 gene rows + 4 condition columns
    assert_eq!(graph.node_count(), 9);
    assert_eq!(graph.edge_count(), 20);
    assert!((layout.closure() - 1.0).abs() < EPS);

    let spans: f64 = layout.outer_arcs().iter().map(|a| a.shape.span()).sum();
    let scale = 1.0 - LayoutSettings::default().outer_gap * 9.0;
    assert!((spans - scale).abs() < EPS);
}

#[test]
fn sample_matrix_arc_counts() {
    let (graph, layout) = sample_layout();

    for (index, node) in graph.nodes() {
        let count = layout.inner_arcs_of(index).count();
        if node.id().starts_with("Gene") {
            assert_eq!(count, 4, "{} should meet every condition", node.id());
        } else {
            assert_eq!(count, 5, "{} should meet every gene", node.id());
        }
    }
    assert_eq!(layout.inner_arcs().len(), 2 * graph.edge_count());
}

#[test]
fn node_weight_identity() {
    let (graph, layout) = sample_layout();
    for (index, node) in graph.nodes() {
        let incident: f64 = node
            .incoming()
            .iter()
            .chain(node.outgoing())
            .map(|&e| graph.edge(e).weight())
            .sum();
        assert!((graph.weight(index) - incident / 2.0).abs() < EPS);
        assert_eq!(layout.model()[index.0].name, node.id());
        assert!((layout.model()[index.0].value - graph.weight(index)).abs() < EPS);
    }
}

#[test]
fn every_edge_has_two_equal_sub_arcs() {
    let (graph, layout) = sample_layout();
    for (edge_index, edge) in graph.edges() {
        let arcs: Vec<_> = layout
            .inner_arcs()
            .iter()
            .filter(|a| a.edge == edge_index)
            .collect();
        assert_eq!(arcs.len(), 2);
        assert!((arcs[0].shape.span() - arcs[1].shape.span()).abs() < EPS);

        let source = arcs.iter().find(|a| a.end == Endpoint::Source).unwrap();
        let target = arcs.iter().find(|a| a.end == Endpoint::Target).unwrap();
        assert_eq!(source.node, edge.source());
        assert_eq!(source.far, edge.target());
        assert_eq!(target.node, edge.target());
        assert_eq!(target.far, edge.source());
    }
}

#[test]
fn ribbons_meet_their_sub_arcs() {
    let (_, layout) = sample_layout();
    for curve in layout.curves() {
        let (source, target) = layout.curve_arcs(curve);
        let arcs = curve.path.arc_endpoints();
        assert_eq!(arcs.len(), 2);

        assert!(arcs[0].0.distance(source.shape.inner_start()) < EPS);
        assert!(arcs[0].1.distance(source.shape.inner_end()) < EPS);
        assert!(arcs[1].0.distance(target.shape.inner_start()) < EPS);
        assert!(arcs[1].1.distance(target.shape.inner_end()) < EPS);

        assert_eq!(curve.path.segments.last(), Some(&PathSegment::Close));
        assert!(curve
            .path
            .origin()
            .is_some_and(|p| p.distance(source.shape.inner_start()) < EPS));
    }
}

#[test]
fn sub_arcs_stay_inside_parents() {
    let (_, layout) = sample_layout();
    for arc in layout.inner_arcs() {
        let parent = &layout.outer_arcs()[arc.parent];
        assert_eq!(parent.node, arc.node);
        assert!(parent.shape.contains_span(&arc.shape, EPS));
    }
}

#[test]
fn layout_is_deterministic() {
    let (_, first) = sample_layout();
    let (_, second) = sample_layout();
    assert_eq!(first, second);

    let svg_a = SvgRenderer::new(512, 512).render(&first).unwrap();
    let svg_b = SvgRenderer::new(512, 512).render(&second).unwrap();
    assert_eq!(svg_a, svg_b);
}

#[test]
fn isolated_node_keeps_closure() {
    let graph = Graph::build(
        ["A", "lonely", "B"],
        vec![
            EdgeSpec::new("0", "A", "B", 0.7),
            EdgeSpec::new("1", "B", "A", 0.3),
        ],
    )
    .unwrap();
    let layout = Layout::with_defaults(&graph).unwrap();
    let lonely = graph.node_index("lonely").unwrap();

    assert_eq!(layout.outer_arc(lonely).unwrap().shape.span(), 0.0);
    assert_eq!(layout.inner_arcs_of(lonely).count(), 0);
    assert!((layout.closure() - 1.0).abs() < EPS);
    assert_eq!(layout.curves().len(), 2);
}

#[test]
fn unknown_node_reference_produces_no_graph() {
    let result = Graph::build(
        ["A", "B"],
        vec![
            EdgeSpec::new("0", "A", "B", 0.5),
            EdgeSpec::new("1", "B", "C", 0.5),
        ],
    );
    assert_eq!(
        result.unwrap_err(),
        LayoutError::UnknownNodeReference {
            edge: "1".into(),
            node: "C".into(),
        }
    );
}

#[test]
fn svg_draws_one_ribbon_per_edge() {
    let (graph, layout) = sample_layout();
    let svg = SvgRenderer::new(800, 800).render(&layout).unwrap();
    assert_eq!(
        svg.matches(r#"class="ribbon""#).count(),
        graph.edge_count()
    );
    assert_eq!(svg.matches(r#"class="outer-arc""#).count(), graph.node_count());
}

#[test]
fn custom_gaps_still_close() {
    let spec = Matrix::random(11, 3, 6).to_graph_spec().unwrap();
    let graph = Graph::from_spec(&spec).unwrap();
    let settings = LayoutSettings {
        outer_gap: 0.02,
        inner_gap: 0.03,
        ..LayoutSettings::default()
    };
    let layout = Layout::compute(&graph, &settings).unwrap();
    assert!((layout.closure() - 1.0).abs() < EPS);
    for arc in layout.inner_arcs() {
        assert!(layout.outer_arcs()[arc.parent]
            .shape
            .contains_span(&arc.shape, EPS));
    }
}
