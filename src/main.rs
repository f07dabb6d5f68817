//! # Homestead Main Entry Point
//!
//! Loads or generates a village map, sets up macroquad rendering, and runs the
//! placement scene.

use clap::{Parser, ValueEnum};
use homestead::{
    config, Connectivity, GridMap, HomesteadResult, InputHandler, MapKind, SceneManager,
    TerrainGenerator, VillageScene,
};
use log::{error, info};
use macroquad::window::Conf;
use std::path::PathBuf;

/// Map kinds selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    HomeVillage,
    BuilderBase,
    BattleMap,
}

impl From<KindArg> for MapKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::HomeVillage => MapKind::HomeVillage,
            KindArg::BuilderBase => MapKind::BuilderBase,
            KindArg::BattleMap => MapKind::BattleMap,
        }
    }
}

/// Command line arguments for Homestead.
#[derive(Parser, Debug)]
#[command(name = "homestead")]
#[command(about = "Village map editor: place buildings on a tile grid")]
#[command(version)]
struct Args {
    /// Map layout file to load; a map is generated when omitted
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Load the bundled home village layout
    #[arg(long, conflicts_with = "map")]
    home: bool,

    /// Kind of map to generate
    #[arg(long, value_enum, default_value = "home-village")]
    kind: KindArg,

    /// Random seed for terrain generation
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Width of a generated map in tiles
    #[arg(long, default_value_t = config::DEFAULT_MAP_WIDTH)]
    width: u32,

    /// Height of a generated map in tiles
    #[arg(long, default_value_t = config::DEFAULT_MAP_HEIGHT)]
    height: u32,

    /// Use 4-way pathfinding instead of 8-way
    #[arg(long)]
    four_way: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Homestead".to_string(),
        window_width: 1024,
        window_height: 860,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting Homestead v{}", homestead::VERSION);

    let map = match build_map(&args) {
        Ok(map) => map,
        Err(e) => {
            error!("Failed to initialize map: {}", e);
            std::process::exit(1);
        }
    };

    let mut manager = SceneManager::new(VillageScene::new(map), InputHandler::new());
    manager.run().await;
}

/// Loads the requested layout or generates a fresh map.
fn build_map(args: &Args) -> HomesteadResult<GridMap> {
    let layout_path = if args.home {
        Some(PathBuf::from(config::HOME_VILLAGE_LAYOUT))
    } else {
        args.map.clone()
    };

    let mut map = match layout_path {
        Some(path) => {
            info!("Loading map layout {}", path.display());
            GridMap::load(&path)?
        }
        None => {
            let kind = MapKind::from(args.kind);
            info!("Generating {:?} map with seed {}", kind, args.seed);
            TerrainGenerator::new().generate(
                kind,
                args.width,
                args.height,
                config::DEFAULT_TILE_SIZE,
                args.seed,
            )?
        }
    };

    if args.four_way {
        map.set_connectivity(Connectivity::Four);
    }
    Ok(map)
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
            .with_target(false)
            .init();
        tracing::debug!("tracing subscriber installed");
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_timestamp_millis()
            .init();
    }
}
