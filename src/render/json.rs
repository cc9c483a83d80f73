//! JSON dump of a layout, for adapters that draw it themselves.

use crate::error::RenderError;
use crate::layout::Layout;
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, layout: &Layout) -> Result<String, RenderError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(layout)?
        } else {
            serde_json::to_string(layout)?
        };
        Ok(text)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
