//! `axon` — command-line interface for the axon inference cores.
//!
//! ```text
//! USAGE:
//!   axon infer --weights <blob> --image <file>   Classify one image
//!   axon xor                                     Run the XOR spiking network
//!   axon pattern [name]                          Classify pixel patterns
//! ```
//!
//! Images are raw row-major H×W bytes, or the testbench text format when
//! the file ends in `.hex` (whitespace-separated hex bytes, `//` comments).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use axon_models::{ArchConfig, WeightTable};
use axon_pipeline::CnnPipeline;
use axon_snn::pattern::{self, PatternNetwork};
use axon_snn::XorNetwork;

#[derive(Parser)]
#[command(name = "axon", about = "Fixed-point CNN and spiking-network inference CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Classify one digit image with a quantized weight blob.
    Infer {
        /// Weight blob file (flat Q4.4 values in table order).
        #[arg(long)]
        weights: PathBuf,
        /// Image file: raw H×W bytes, or testbench text if it ends in .hex.
        #[arg(long)]
        image: PathBuf,
        /// Image height in pixels.
        #[arg(long, default_value_t = 28)]
        height: usize,
        /// Image width in pixels.
        #[arg(long, default_value_t = 28)]
        width: usize,
    },
    /// Evaluate the XOR spiking network over its full truth table.
    Xor,
    /// Classify a 2x2 pixel pattern (l, t, cross), or all of them.
    Pattern {
        /// Pattern name; omit to run all three.
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::Infer {
            weights,
            image,
            height,
            width,
        } => cmd_infer(&weights, &image, height, width)?,
        Cmd::Xor => cmd_xor(),
        Cmd::Pattern { name } => cmd_pattern(name.as_deref())?,
    }

    Ok(())
}

fn cmd_infer(weights: &Path, image: &Path, height: usize, width: usize) -> Result<()> {
    let arch = ArchConfig::new(height, width)?;
    let table = WeightTable::from_file(arch, weights)
        .with_context(|| format!("loading weight table {}", weights.display()))?;
    let pixels = read_image(image, &arch)?;

    let mut pipeline = CnnPipeline::new(&table);
    let inference = pipeline.infer_image(&pixels)?;

    println!("Image        : {} ({height}x{width})", image.display());
    println!("Scores       :");
    for (class, score) in inference.scores.iter().enumerate() {
        let marker = if class == usize::from(inference.class) {
            "  <-- predicted"
        } else {
            ""
        };
        println!("  [{class}] {score}{marker}");
    }
    println!("Class        : {}", inference.class);

    Ok(())
}

fn cmd_xor() {
    let mut net = XorNetwork::new();
    println!("XOR spiking network ({} steps per case):", axon_snn::xor::EVAL_STEPS);
    for (a, b) in [(false, false), (true, false), (false, true), (true, true)] {
        let spikes = net.run(a, b, axon_snn::xor::EVAL_STEPS);
        println!(
            "  {} ^ {} = {}   ({spikes} output spikes)",
            u8::from(a),
            u8::from(b),
            u8::from(spikes > 0)
        );
    }
}

fn cmd_pattern(name: Option<&str>) -> Result<()> {
    let mut net = PatternNetwork::new();
    let all = [
        ("l", pattern::PATTERN_L),
        ("t", pattern::PATTERN_T),
        ("cross", pattern::PATTERN_CROSS),
    ];

    let selected: Vec<_> = match name {
        None => all.to_vec(),
        Some(n) => {
            let n = n.to_ascii_lowercase();
            vec![*all
                .iter()
                .find(|(key, _)| *key == n)
                .ok_or_else(|| anyhow::anyhow!("unknown pattern: {n} (expected l, t, or cross)"))?]
        }
    };

    for (key, inputs) in selected {
        let counts = net.run(inputs, pattern::EVAL_STEPS);
        let winner = net.classify(inputs);
        println!(
            "  {key:<5} {:?} -> class {winner}  (spike counts {counts:?})",
            inputs.map(u8::from)
        );
    }
    Ok(())
}

fn read_image(path: &Path, arch: &ArchConfig) -> Result<Vec<u8>> {
    let pixels = if path.extension().is_some_and(|ext| ext == "hex") {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        parse_hex_image(&text)?
    } else {
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
    };
    anyhow::ensure!(
        pixels.len() == arch.pixel_count(),
        "image {} holds {} samples, expected {}",
        path.display(),
        pixels.len(),
        arch.pixel_count()
    );
    Ok(pixels)
}

/// Testbench image format: whitespace-separated hex bytes, `//` comments.
fn parse_hex_image(text: &str) -> Result<Vec<u8>> {
    let mut pixels = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let data = line.split("//").next().unwrap_or_default();
        for token in data.split_whitespace() {
            let value = u8::from_str_radix(token, 16)
                .with_context(|| format!("bad hex byte {token:?} on line {}", lineno + 1))?;
            pixels.push(value);
        }
    }
    Ok(pixels)
}
