//! Circos CLI - render chord diagrams from labelled matrices.

use anyhow::{Context, Result};
use circos::config::CircosConfig;
use circos::graph::Graph;
use circos::layout::Layout;
use circos::matrix::Matrix;
use circos::render::{ColorPalette, JsonRenderer, Renderer, SvgRenderer};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "circos")]
#[command(about = "Lay out weighted graphs as circos chord diagrams")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "circos.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Where the matrix comes from.
#[derive(clap::Args, Debug)]
struct Source {
    /// Matrix JSON file (array of arrays: header row, then labelled rows),
    /// e.g. data/gene_expression.json
    #[arg(short, long, conflicts_with = "random")]
    input: Option<PathBuf>,

    /// Use a random matrix instead of the built-in sample
    #[arg(long)]
    random: bool,

    /// Seed for the random matrix
    #[arg(short = 'S', long)]
    seed: Option<u64>,

    /// Rows of the random matrix
    #[arg(long, default_value = "5")]
    rows: usize,

    /// Columns of the random matrix
    #[arg(long, default_value = "4")]
    cols: usize,
}

impl Source {
    fn load(&self) -> Result<Matrix> {
        if let Some(path) = &self.input {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading matrix from {}", path.display()))?;
            return Ok(Matrix::from_json_str(&text)?);
        }
        if self.random {
            let seed = self.seed.unwrap_or_else(rand::random);
            info!(seed, "using random matrix");
            return Ok(Matrix::random(seed, self.rows, self.cols));
        }
        Ok(Matrix::sample())
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render a chord diagram as SVG
    Generate {
        #[command(flatten)]
        source: Source,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Width of the output
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output
        #[arg(long)]
        height: Option<u32>,

        /// Background color (hex, e.g. "#0a0a0a")
        #[arg(long)]
        background: Option<String>,

        /// Node colors (comma-separated hex values, e.g. "#3988A4,#67C2D4,#D0944D")
        #[arg(long)]
        node_colors: Option<String>,

        /// Also save the layout as JSON
        #[arg(long)]
        save_layout: bool,
    },

    /// Write the computed layout as JSON
    Layout {
        #[command(flatten)]
        source: Source,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the sample matrix at several sizes
    Showcase {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn compute(matrix: &Matrix, config: &CircosConfig) -> Result<Layout> {
    let spec = matrix.to_graph_spec()?;
    let graph = Graph::from_spec(&spec)?;
    Ok(Layout::compute(&graph, &config.layout.settings())?)
}

fn print_summary(layout: &Layout) {
    println!(
        "  {} nodes, {} edges",
        layout.outer_arcs().len(),
        layout.curves().len()
    );
}

/// Stdout carries nothing but the JSON document.
fn write_layout_json(layout: &Layout, out: &mut impl Write) -> Result<()> {
    let json = JsonRenderer::new(true).render(layout)?;
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    println!("Saved to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("circos=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = CircosConfig::load(&cli.config)?;

    match cli.command {
        Commands::Generate {
            source,
            output,
            width,
            height,
            background,
            node_colors,
            save_layout,
        } => {
            let width = width.unwrap_or(config.output.width);
            let height = height.unwrap_or(config.output.height);
            let save_layout = save_layout || config.output.save_layout;

            let palette = {
                let mut p: ColorPalette = config.render.palette();
                if let Some(bg) = background {
                    p.background = bg;
                }
                if let Some(colors) = node_colors {
                    p.node_colors = colors.split(',').map(|s| s.trim().to_string()).collect();
                }
                p
            };

            let matrix = source.load()?;
            println!("Generating {}x{} chord diagram...", width, height);
            let layout = compute(&matrix, &config)?;
            print_summary(&layout);

            let renderer = SvgRenderer::new(width, height)
                .with_palette(palette)
                .with_legend(config.render.legend);
            let svg = renderer.render(&layout)?;

            let output_path = output.unwrap_or_else(|| {
                PathBuf::from(&config.output.directory)
                    .join(format!("circos_{}x{}.{}", width, height, renderer.extension()))
            });
            write_output(&output_path, &svg)?;

            if save_layout {
                let json = JsonRenderer::new(true).render(&layout)?;
                write_output(&output_path.with_extension("json"), &json)?;
            }
        }

        Commands::Layout { source, output } => {
            let matrix = source.load()?;
            let layout = compute(&matrix, &config)?;

            match output {
                Some(path) => {
                    let json = JsonRenderer::new(true).render(&layout)?;
                    write_output(&path, &json)?;
                }
                None => write_layout_json(&layout, &mut io::stdout().lock())?,
            }
        }

        Commands::Showcase { output_dir } => {
            let output_dir = output_dir
                .unwrap_or_else(|| PathBuf::from(&config.output.directory).join("showcase"));
            fs::create_dir_all(&output_dir)?;

            let matrix = Matrix::sample();
            println!("Generating showcase from the sample matrix...");
            let layout = compute(&matrix, &config)?;
            print_summary(&layout);

            let sizes: [(u32, &str); 4] = [(512, "512"), (1024, "1k"), (2048, "2k"), (4096, "4k")];

            for (size, label) in &sizes {
                let renderer = SvgRenderer::new(*size, *size)
                    .with_palette(config.render.palette())
                    .with_legend(config.render.legend);
                let svg = renderer.render(&layout)?;

                let filename = format!("circos_{}.{}", label, renderer.extension());
                fs::write(output_dir.join(&filename), &svg)?;
                println!("  Created {}", filename);
            }

            info!(dir = %output_dir.display(), "showcase complete");
            println!("Done! Showcase saved to {}", output_dir.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stdout_is_a_single_json_document() {
        let config = CircosConfig::default();
        let layout = compute(&Matrix::sample(), &config).unwrap();

        let mut out = Vec::new();
        write_layout_json(&layout, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('{'));
        let parsed: Layout = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.outer_arcs().len(), 9);
        assert_eq!(parsed.curves().len(), layout.curves().len());
        assert_eq!(parsed.inner_arcs().len(), layout.inner_arcs().len());
        assert!((parsed.closure() - 1.0).abs() < 1e-9);
    }
}
