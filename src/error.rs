//! Error types for graph construction, layout, ingestion and rendering.

use thiserror::Error;

/// Failures raised while building a [`Graph`](crate::graph::Graph) or
/// computing a [`Layout`](crate::layout::Layout).
///
/// Every variant is fatal: the engine either produces a complete, consistent
/// result or nothing at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// An edge names a source or target id that is not in the node set.
    #[error("edge {edge:?} references unknown node {node:?}")]
    UnknownNodeReference { edge: String, node: String },

    /// Two edges share the same id.
    #[error("duplicate edge id {edge:?}")]
    DuplicateEdgeId { edge: String },

    /// An edge weight is negative, NaN or infinite.
    #[error("edge {edge:?} has invalid weight {weight}")]
    InvalidEdgeWeight { edge: String, weight: f64 },

    /// The inner partitioner ran without an outer arc for this node.
    #[error("no outer arc for node {node:?}")]
    MissingOuterArc { node: String },

    /// The ribbon synthesizer could not find the inner arc of an edge endpoint.
    #[error("no inner arc for edge {edge:?} anchored on {anchor:?} towards {far:?}")]
    SectorNotFound {
        edge: String,
        anchor: String,
        far: String,
    },

    /// Layout settings that cannot produce a closed circle.
    #[error("invalid layout settings: {0}")]
    InvalidSettings(String),
}

/// Failures raised while turning a labelled matrix into graph input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("matrix has no rows")]
    Empty,

    #[error("header row has no column labels")]
    NoColumns,

    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("label at row {row}, column {col} is not a string")]
    BadLabel { row: usize, col: usize },

    #[error("cell at row {row}, column {col} is not a number")]
    NotANumber { row: usize, col: usize },

    #[error("cell at row {row}, column {col} has invalid value {value}")]
    InvalidValue { row: usize, col: usize, value: f64 },

    #[error("matrix values sum to zero")]
    ZeroTotal,

    #[error("failed to parse matrix JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for MatrixError {
    fn from(err: serde_json::Error) -> Self {
        MatrixError::Json(err.to_string())
    }
}

/// Failures raised by a [`Renderer`](crate::render::Renderer).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("surface {width}x{height} is too small to draw on")]
    EmptySurface { width: u32, height: u32 },

    #[error("failed to serialize layout: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialize(err.to_string())
    }
}
