//! Node colours.
//!
//! Nodes either take colours from an explicit list (cycled), or get hues
//! spread evenly around the wheel with a small jitter derived from the
//! node id, so the same id always lands on the same shade.

use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Hue jitter allowed per node, in degrees either side.
pub const HUE_VARIANCE: f64 = 8.0;

const SATURATION: f64 = 0.62;
const LIGHTNESS: f64 = 0.55;

/// Convert HSL to hex color string
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    // Normalize hue to 0-360
    let h = ((h % 360.0) + 360.0) % 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let r = ((r + m) * 255.0).round() as u8;
    let g = ((g + m) * 255.0).round() as u8;
    let b = ((b + m) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Hash a string to a deterministic float in [0, 1].
pub fn hash_to_float(s: &str) -> f64 {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let hash = hasher.finalize();
    let val = u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]]);
    val as f64 / u32::MAX as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    pub background: String,
    /// Explicit node colours, cycled in node order. Empty means generated hues.
    pub node_colors: Vec<String>,
    pub ribbon_opacity: f64,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            node_colors: Vec::new(),
            ribbon_opacity: 0.6,
        }
    }
}

impl ColorPalette {
    /// A palette of `count` evenly spaced hues starting at a seeded offset.
    pub fn random(seed: u64, count: usize) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let offset = rng.gen_range(0.0..360.0);
        let saturation = rng.gen_range(0.45..0.75);
        let count = count.max(1);

        let node_colors = (0..count)
            .map(|i| {
                let hue = offset + i as f64 / count as f64 * 360.0;
                hsl_to_hex(hue, saturation, LIGHTNESS)
            })
            .collect();

        Self {
            node_colors,
            ..Self::default()
        }
    }

    /// Colour of the node at `index` out of `count`.
    pub fn node_color(&self, index: usize, count: usize, name: &str) -> String {
        if !self.node_colors.is_empty() {
            return self.node_colors[index % self.node_colors.len()].clone();
        }
        let base = index as f64 / count.max(1) as f64 * 360.0;
        let jitter = (hash_to_float(name) - 0.5) * HUE_VARIANCE * 2.0;
        hsl_to_hex(base + jitter, SATURATION, LIGHTNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_hex(0.0, 1.0, 0.5), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 1.0, 0.5), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 1.0, 0.5), "#0000ff");
        assert_eq!(hsl_to_hex(-120.0, 1.0, 0.5), "#0000ff");
        assert_eq!(hsl_to_hex(0.0, 0.0, 1.0), "#ffffff");
    }

    #[test]
    fn test_hash_is_stable() {
        let a = hash_to_float("Gene1");
        assert_eq!(a, hash_to_float("Gene1"));
        assert!((0.0..=1.0).contains(&a));
    }

    #[test]
    fn test_explicit_colors_cycle() {
        let palette = ColorPalette {
            node_colors: vec!["#111111".into(), "#222222".into()],
            ..ColorPalette::default()
        };
        assert_eq!(palette.node_color(0, 3, "a"), "#111111");
        assert_eq!(palette.node_color(1, 3, "b"), "#222222");
        assert_eq!(palette.node_color(2, 3, "c"), "#111111");
    }

    #[test]
    fn test_generated_colors_are_deterministic_and_distinct() {
        let palette = ColorPalette::default();
        let a = palette.node_color(0, 4, "a");
        assert_eq!(a, palette.node_color(0, 4, "a"));
        assert_ne!(a, palette.node_color(2, 4, "c"));
        assert_eq!(a.len(), 7);
    }

    #[test]
    fn test_random_palette_is_seeded() {
        assert_eq!(ColorPalette::random(3, 5), ColorPalette::random(3, 5));
        assert_eq!(ColorPalette::random(3, 5).node_colors.len(), 5);
    }
}
