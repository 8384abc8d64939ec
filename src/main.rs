use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use terrain_generator::ascii::{legend, render_ascii};
use terrain_generator::export::{export_field_png, export_terrain_png, save_tiles_json};
use terrain_generator::terrain::category_counts;
use terrain_generator::tiles::{create_terrain_transitions, TileLayer};
use terrain_generator::{GenerationConfig, Result, TerrainCategory, TerrainGenerator};

#[derive(Parser, Debug)]
#[command(name = "terrain_generator")]
#[command(about = "Generate procedural terrain maps with tile transition bitmasks")]
struct Args {
    /// Width of the map in tiles
    #[arg(short = 'W', long, default_value = "80")]
    width: usize,

    /// Height of the map in tiles
    #[arg(short = 'H', long, default_value = "40")]
    height: usize,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// JSON file with terrain thresholds and noise settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export the terrain map as a PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Export the height field as a PNG
    #[arg(long)]
    height_png: Option<PathBuf>,

    /// Export the moisture field as a PNG
    #[arg(long)]
    moisture_png: Option<PathBuf>,

    /// Export tiles with transition bitmasks as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print the map as ASCII
    #[arg(long)]
    ascii: bool,

    /// Print the number of cells per terrain category
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };
    let generator = TerrainGenerator::new(config)?;
    debug!(config = ?generator.config(), "generation config");
    let layers = generator.generate_layers(args.width, args.height, args.seed)?;
    info!(seed = layers.seed, "terrain seed");

    if args.ascii {
        print!("{}", render_ascii(&layers.grid));
        println!("{}", legend());
    }

    if args.stats {
        let total = (layers.grid.width * layers.grid.height) as f64;
        for (category, count) in TerrainCategory::ALL.iter().zip(category_counts(&layers.grid)) {
            let share = 100.0 * count as f64 / total;
            println!("{:>14}: {:>6} ({:.1}%)", category.name(), count, share);
        }
    }

    if let Some(path) = &args.png {
        export_terrain_png(&layers.grid, path)?;
    }
    if let Some(path) = &args.height_png {
        export_field_png(&layers.height, path)?;
    }
    if let Some(path) = &args.moisture_png {
        export_field_png(&layers.moisture, path)?;
    }

    if let Some(path) = &args.json {
        let mut tiles = TileLayer::from_grid(&layers.grid);
        create_terrain_transitions(&mut tiles);
        save_tiles_json(&tiles, path)?;
    }

    Ok(())
}
