//! Jigsaw Puzzle
//!
//! Cuts a user-supplied image into a grid of interlocking tiles with
//! randomized tab shapes, scatters them over the workspace, and lets the
//! user drag tiles into place. Drops snap to the grid and are validated
//! against already placed neighbors for shape compatibility.

mod visualization;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use jigsaw::shape;

/// Interactive jigsaw puzzle from an image file.
#[derive(Parser)]
#[command(name = "jigsaw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cut an image into tiles and play in an interactive window.
    Play {
        /// Source image (PNG or JPEG).
        image: PathBuf,
        /// Tile edge length in pixels.
        #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..))]
        tile_size: u32,
    },
    /// Generate a shape grid and print its tab assignment as text.
    Shapes {
        /// Grid width in tiles.
        cols: usize,
        /// Grid height in tiles.
        rows: usize,
        /// Seed for reproducible output; random when omitted.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Play { image, tile_size } => run_play(image, tile_size),
        Command::Shapes { cols, rows, seed } => {
            run_shapes(cols, rows, seed);
            Ok(())
        }
    }
}

/// Loads the image and opens the interactive puzzle window.
fn run_play(path: PathBuf, tile_size: u32) -> anyhow::Result<()> {
    let image = image::open(&path)
        .with_context(|| format!("failed to load image {}", path.display()))?
        .to_rgba8();
    println!(
        "{}x{} image, {}px tiles: {}x{} grid",
        image.width(),
        image.height(),
        tile_size,
        image.width().div_ceil(tile_size),
        image.height().div_ceil(tile_size),
    );
    println!("Controls: hover to pick up, drag to move, release to snap; press to zoom");
    visualization::display(image, tile_size);
    Ok(())
}

/// Prints a generated tab grid, one four-glyph block per tile.
fn run_shapes(cols: usize, rows: usize, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let shapes = shape::generate(cols, rows, &mut rng);
    print!("{}", shape::format_shapes(&shapes, cols));
}
