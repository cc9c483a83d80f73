//! Renderers - each turns a computed layout into an output document.
//!
//! The layout is pure normalized geometry. Renderers own everything that
//! depends on an actual surface: pixel scaling, colours and legends.

pub mod json;
pub mod palette;
pub mod svg;

use crate::error::RenderError;
use crate::layout::Layout;

pub use json::JsonRenderer;
pub use palette::ColorPalette;
pub use svg::SvgRenderer;

/// Trait for all layout renderers.
pub trait Renderer {
    /// Name of this renderer.
    fn name(&self) -> &'static str;

    /// Render the layout to a document string (SVG, JSON, etc.)
    fn render(&self, layout: &Layout) -> Result<String, RenderError>;

    /// File extension for this renderer's output.
    fn extension(&self) -> &'static str;
}
