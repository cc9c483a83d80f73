//! Circos - circular chord diagram layout.
//!
//! A weighted graph is laid out on two concentric rings: every node gets an
//! outer arc proportional to its weight, every edge gets a sub-arc at each
//! endpoint, and a ribbon joins the two sub-arcs of each edge. Geometry is
//! computed in normalized unit-circle space and handed to a renderer.

pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod matrix;
pub mod render;

pub use config::CircosConfig;
pub use error::{LayoutError, MatrixError, RenderError};
pub use graph::{EdgeSpec, Graph, GraphSpec};
pub use layout::{Layout, LayoutSettings};
pub use matrix::Matrix;
pub use render::Renderer;
