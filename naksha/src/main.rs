//! Naksha - static map to occupancy grid converter
//!
//! Loads a ROS map_server map (YAML + PGM/PNG), builds the occupancy grid
//! message and writes it as one length-prefixed frame.
//!
//! ```text
//! naksha maps/office.yaml -f postcard -o office.grid
//! naksha maps/office.yaml --config naksha.toml > office.json.frame
//! ```

use clap::Parser;
use naksha::{
    AppConfig, CellCounts, OccupancyGridGenerator, Result, WireFormat, YamlMapGenerator,
    create_serializer,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "naksha", version)]
#[command(about = "Convert a YAML + PGM map into an occupancy grid message")]
struct Args {
    /// Map metadata YAML (ROS map_server format)
    map: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wire format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<WireFormat>,

    /// Output file (overrides config, default stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Header frame id (overrides config)
    #[arg(long)]
    frame_id: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(path) = args.output {
        config.output.path = Some(path);
    }
    if let Some(frame_id) = args.frame_id {
        config.map.frame_id = frame_id;
    }

    // Initialize logger
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("Naksha v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        log::info!("Using config: {}", path.display());
    }

    let generator = YamlMapGenerator::load(&args.map, config.generator_options())?;
    let grid = generator.build_grid()?;

    let counts = CellCounts::from_data(&grid.data);
    log::info!(
        "Grid {}x{}: {} free, {} occupied, {} unknown",
        grid.info.width,
        grid.info.height,
        counts.free,
        counts.occupied,
        counts.unknown
    );

    let meta = generator.metadata();
    let (min_x, min_y) = meta.cell_to_world(0, 0);
    let (max_x, max_y) = meta.cell_to_world(grid.info.width - 1, grid.info.height - 1);
    log::debug!(
        "Cell centres span ({:.3}, {:.3}) .. ({:.3}, {:.3})",
        min_x,
        min_y,
        max_x,
        max_y
    );

    let serializer = create_serializer(config.output.format);
    let written = match &config.output.path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            let n = serializer.write_message(&mut writer, &grid)?;
            writer.flush()?;
            log::info!("Wrote {} bytes ({}) to {}", n, serializer.format(), path.display());
            n
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serializer.write_message(&mut writer, &grid)?
        }
    };

    log::debug!("Frame size {} bytes", written);
    Ok(())
}
