//! Grid tool
//!
//! Describes grids, slices lon/lat boxes out of them and locates nearest
//! grid points, reading CDO-style grid descriptions from files or inline text.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use met_grid::LonLatBox;

#[derive(Parser, Debug)]
#[command(name = "grid-tool")]
#[command(about = "Inspect, slice and query meteorological grids")]
struct Args {
    /// Log level
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "GRID_TOOL_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a grid's summary, shape and descriptor
    Describe {
        /// Grid description file or inline text
        grid: String,
    },
    /// Cut a lon/lat box out of a grid and print the resulting grid
    Box {
        /// Grid description file or inline text
        grid: String,
        #[arg(long, allow_hyphen_values = true)]
        west: f64,
        #[arg(long, allow_hyphen_values = true)]
        north: f64,
        #[arg(long, allow_hyphen_values = true)]
        east: f64,
        #[arg(long, allow_hyphen_values = true)]
        south: f64,
    },
    /// Find the grid point closest to a location
    Nearest {
        /// Grid description file or inline text
        grid: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);
    debug!(command = ?args.command, "starting grid-tool");

    let report = match &args.command {
        Command::Describe { grid } => commands::describe(grid)?,
        Command::Box {
            grid,
            west,
            north,
            east,
            south,
        } => commands::lonlatbox(grid, LonLatBox::new(*west, *north, *east, *south)?)?,
        Command::Nearest { grid, lat, lon } => commands::nearest(grid, *lat, *lon)?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
