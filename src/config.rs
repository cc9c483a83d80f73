//! Configuration loading for circos.
//!
//! Configuration is loaded from TOML files with environment variable overrides.

use crate::layout::{self, LayoutSettings};
use crate::render::palette::ColorPalette;
use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct CircosConfig {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_outer_gap")]
    pub outer_gap: f64,

    #[serde(default = "default_inner_gap")]
    pub inner_gap: f64,

    #[serde(default = "default_outer_radius")]
    pub outer_radius: f64,

    #[serde(default = "default_inner_radius")]
    pub inner_radius: f64,

    #[serde(default = "default_ring_thickness")]
    pub ring_thickness: f64,

    #[serde(default = "default_ribbon_pull")]
    pub ribbon_pull: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            outer_gap: default_outer_gap(),
            inner_gap: default_inner_gap(),
            outer_radius: default_outer_radius(),
            inner_radius: default_inner_radius(),
            ring_thickness: default_ring_thickness(),
            ribbon_pull: default_ribbon_pull(),
        }
    }
}

fn default_outer_gap() -> f64 {
    layout::OUTER_GAP
}

fn default_inner_gap() -> f64 {
    layout::INNER_GAP
}

fn default_outer_radius() -> f64 {
    layout::OUTER_RADIUS
}

fn default_inner_radius() -> f64 {
    layout::INNER_RADIUS
}

fn default_ring_thickness() -> f64 {
    layout::RING_THICKNESS
}

fn default_ribbon_pull() -> f64 {
    layout::RIBBON_PULL
}

impl LayoutConfig {
    pub fn settings(&self) -> LayoutSettings {
        LayoutSettings {
            outer_gap: self.outer_gap,
            inner_gap: self.inner_gap,
            outer_radius: self.outer_radius,
            inner_radius: self.inner_radius,
            ring_thickness: self.ring_thickness,
            ribbon_pull: self.ribbon_pull,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub save_layout: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
            save_layout: false,
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    800
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default)]
    pub node_colors: Vec<String>,

    #[serde(default = "default_ribbon_opacity")]
    pub ribbon_opacity: f64,

    #[serde(default = "default_legend")]
    pub legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            node_colors: Vec::new(),
            ribbon_opacity: default_ribbon_opacity(),
            legend: default_legend(),
        }
    }
}

fn default_background() -> String {
    "#ffffff".to_string()
}

fn default_ribbon_opacity() -> f64 {
    0.6
}

fn default_legend() -> bool {
    true
}

impl RenderConfig {
    pub fn palette(&self) -> ColorPalette {
        ColorPalette {
            background: self.background.clone(),
            node_colors: self.node_colors.clone(),
            ribbon_opacity: self.ribbon_opacity,
        }
    }
}

impl CircosConfig {
    /// Load defaults, then `path`, then `CIRCOS_*` variables.
    ///
    /// Nested keys use a double underscore, e.g. `CIRCOS_LAYOUT__OUTER_GAP`.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix("CIRCOS")
            .prefix_separator("_")
            .separator("__")
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()?;

        let circos_config: CircosConfig = config.try_deserialize()?;
        Ok(circos_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_match_layout_constants() {
        let config = CircosConfig::default();
        assert_eq!(config.layout.settings(), LayoutSettings::default());
        assert_eq!(config.output.width, 800);
        assert!(config.render.legend);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: CircosConfig = Config::builder()
            .add_source(File::from_str(
                "[layout]\nouter_gap = 0.02\ninner_gap = 0.03\n[output]\nwidth = 1024\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.layout.outer_gap, 0.02);
        assert_eq!(config.layout.inner_gap, 0.03);
        assert_eq!(config.layout.inner_radius, layout::INNER_RADIUS);
        assert_eq!(config.output.width, 1024);
        assert_eq!(config.output.height, 800);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let config = CircosConfig::load(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        let mut vars = config::Map::new();
        vars.insert("CIRCOS_LAYOUT__OUTER_GAP".to_string(), "0.005".to_string());
        vars.insert("CIRCOS_OUTPUT__WIDTH".to_string(), "640".to_string());
        vars.insert("OTHER_LAYOUT__INNER_GAP".to_string(), "0.5".to_string());

        let env = CircosConfig::environment().source(Some(vars));
        let config =
            CircosConfig::load_with_env(Path::new("definitely/not/here.toml"), env).unwrap();

        assert_eq!(config.layout.outer_gap, 0.005);
        assert_eq!(config.layout.inner_gap, layout::INNER_GAP);
        assert_eq!(config.output.width, 640);
        assert_eq!(config.output.height, 800);
    }
}
