//! mortar-calc: firing solutions from the command line.
//!
//! Usage:
//!   mortar-calc solve --mortar D6-7 --target "Hotel 9 kpad 5" --maps maps --map bootcamp
//!   mortar-calc solve --mortar 1000,1000,50 --target 1500,1300,120 --json
//!   mortar-calc grid --reference D6-7 --map-size 4096
//!   mortar-calc grid --xy 1200,850 --map-size 4096
//!   mortar-calc elevation --maps maps --map bootcamp --xy 1200,850

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mortar_ballistics::calculate_firing_solution;
use mortar_core::constants::DEFAULT_MAP_SIZE;
use mortar_core::solution::FiringSolution;
use mortar_core::types::WorldPoint;
use mortar_grid::{
    calculate_grid_scale, grid_to_xy, validate_grid_reference, xy_to_grid, GridReference,
};
use mortar_terrain::{LoadedMap, MapCache};

#[derive(Parser, Debug)]
#[command(name = "mortar-calc")]
#[command(about = "Mortar firing solutions over processed game maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a firing solution between two positions
    Solve {
        /// Mortar position: grid reference (D6-7) or x,y[,z]
        #[arg(long)]
        mortar: Position,

        /// Target position: grid reference (D6-7) or x,y[,z]
        #[arg(long)]
        target: Position,

        #[command(flatten)]
        map: MapArgs,

        /// Map edge length in meters when no map is loaded
        #[arg(long)]
        map_size: Option<f64>,

        /// Print the solution as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Convert between grid references and map coordinates
    Grid {
        /// Grid reference to convert to coordinates
        #[arg(long, conflicts_with = "xy", required_unless_present = "xy")]
        reference: Option<String>,

        /// Coordinates (x,y) to convert to a grid reference
        #[arg(long)]
        xy: Option<String>,

        /// Map edge length in meters
        #[arg(long, default_value_t = DEFAULT_MAP_SIZE)]
        map_size: f64,
    },

    /// Sample terrain elevation from a processed map
    Elevation {
        /// Processed maps directory
        #[arg(long)]
        maps: PathBuf,

        /// Map name (subdirectory of --maps)
        #[arg(long)]
        map: String,

        /// Coordinates (x,y)
        #[arg(long)]
        xy: String,
    },
}

#[derive(Args, Debug)]
struct MapArgs {
    /// Processed maps directory
    #[arg(long, requires = "map")]
    maps: Option<PathBuf>,

    /// Map name (subdirectory of --maps)
    #[arg(long, requires = "maps")]
    map: Option<String>,
}

/// A position as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Position {
    Grid(GridReference),
    Coords { x: f64, y: f64, z: Option<f64> },
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(',') {
            let values = parse_numbers(s)?;
            return match values[..] {
                [x, y] => Ok(Position::Coords { x, y, z: None }),
                [x, y, z] => Ok(Position::Coords { x, y, z: Some(z) }),
                _ => Err(format!("expected x,y or x,y,z, got '{s}'")),
            };
        }
        validate_grid_reference(s)
            .map(Position::Grid)
            .map_err(|e| e.to_string())
    }
}

fn parse_numbers(s: &str) -> Result<Vec<f64>, String> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid number '{}' in '{s}'", part.trim()))
        })
        .collect()
}

fn parse_xy(s: &str) -> Result<(f64, f64)> {
    let values = parse_numbers(s).map_err(anyhow::Error::msg)?;
    match values[..] {
        [x, y] => Ok((x, y)),
        _ => bail!("expected x,y, got '{s}'"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            mortar,
            target,
            map,
            map_size,
            json,
        } => cmd_solve(mortar, target, map, map_size, json),
        Commands::Grid {
            reference,
            xy,
            map_size,
        } => cmd_grid(reference.as_deref(), xy.as_deref(), map_size),
        Commands::Elevation { maps, map, xy } => cmd_elevation(maps, &map, &xy),
    }
}

fn load_map(maps: PathBuf, name: &str) -> Result<std::sync::Arc<LoadedMap>> {
    let mut cache = MapCache::new(maps);
    cache
        .get_or_load(name)
        .with_context(|| format!("Failed to load map '{name}' from {}", cache.root().display()))
}

fn cmd_solve(
    mortar: Position,
    target: Position,
    map_args: MapArgs,
    map_size: Option<f64>,
    json: bool,
) -> Result<()> {
    let map = match (map_args.maps, map_args.map) {
        (Some(maps), Some(name)) => Some(load_map(maps, &name)?),
        _ => None,
    };

    let grid_scale = match (&map, map_size) {
        (Some(map), Some(size)) if size != map.map_size() => {
            tracing::warn!(
                "--map-size {size} ignored, map {} is {}m",
                map.name(),
                map.map_size()
            );
            map.grid_scale()
        }
        (Some(map), _) => map.grid_scale(),
        (None, size) => calculate_grid_scale(size.unwrap_or(DEFAULT_MAP_SIZE)),
    };

    let mortar = resolve_position(mortar, grid_scale, map.as_deref())
        .context("Invalid mortar position")?;
    let target = resolve_position(target, grid_scale, map.as_deref())
        .context("Invalid target position")?;

    let solution = calculate_firing_solution(&mortar, &target);

    if json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        print_solution(&mortar, &target, &solution);
    }
    Ok(())
}

/// Map-space point for a command-line position.
///
/// An explicit z always wins; otherwise the elevation is sampled from the
/// map, or left at 0 without one.
fn resolve_position(
    position: Position,
    grid_scale: f64,
    map: Option<&LoadedMap>,
) -> Result<WorldPoint> {
    let (x, y, z) = match position {
        Position::Grid(gr) => {
            let p = grid_to_xy(gr.column, gr.row, gr.keypad, grid_scale)?;
            (p.x, p.y, None)
        }
        Position::Coords { x, y, z } => (x, y, z),
    };

    Ok(match (z, map) {
        (Some(z), _) => WorldPoint::new(x, y, z),
        (None, Some(map)) => map.point_at(x, y),
        (None, None) => WorldPoint::flat(x, y),
    })
}

fn print_solution(mortar: &WorldPoint, target: &WorldPoint, solution: &FiringSolution) {
    println!("Mortar:    ({:.1}, {:.1}) elev {:.1}m", mortar.x, mortar.y, mortar.z);
    println!("Target:    ({:.1}, {:.1}) elev {:.1}m", target.x, target.y, target.z);
    println!("Distance:  {:.1}m", solution.distance);
    println!("Azimuth:   {:.1}°", solution.azimuth);
    println!("Height Δ:  {:+.1}m", solution.height_delta);

    if let (Some(mils), Some(degrees)) = (solution.elevation_mils, solution.elevation_degrees) {
        println!("Elevation: {mils:.0} mils ({degrees:.1}°)");
    }
    if let Some(tof) = solution.time_of_flight {
        println!("Flight:    {tof:.1}s");
    }
    println!("Status:    {} - {}", solution.status, solution.message);
}

fn cmd_grid(reference: Option<&str>, xy: Option<&str>, map_size: f64) -> Result<()> {
    let grid_scale = calculate_grid_scale(map_size);

    match (reference, xy) {
        (Some(reference), _) => {
            let gr = validate_grid_reference(reference)?;
            let p = grid_to_xy(gr.column, gr.row, gr.keypad, grid_scale)?;
            println!("{gr}: ({:.1}, {:.1})", p.x, p.y);
        }
        (None, Some(xy)) => {
            let (x, y) = parse_xy(xy)?;
            let gr = xy_to_grid(x, y, grid_scale)?;
            println!("({x:.1}, {y:.1}): {gr}");
        }
        (None, None) => bail!("one of --reference or --xy is required"),
    }
    Ok(())
}

fn cmd_elevation(maps: PathBuf, name: &str, xy: &str) -> Result<()> {
    let (x, y) = parse_xy(xy)?;
    let map = load_map(maps, name)?;
    println!("{:.2}", map.elevation_at(x, y));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parsing() {
        assert_eq!(
            "D6-7".parse::<Position>().unwrap(),
            Position::Grid(GridReference::new('D', 6, 7).unwrap())
        );
        assert_eq!(
            "100, 200".parse::<Position>().unwrap(),
            Position::Coords {
                x: 100.0,
                y: 200.0,
                z: None
            }
        );
        assert_eq!(
            "1,2,3.5".parse::<Position>().unwrap(),
            Position::Coords {
                x: 1.0,
                y: 2.0,
                z: Some(3.5)
            }
        );
        assert!("Z9-9".parse::<Position>().is_err());
        assert!("1,2,3,4".parse::<Position>().is_err());
        assert!("1,north".parse::<Position>().is_err());
    }

    #[test]
    fn test_cli_parses_solve() {
        let cli = Cli::try_parse_from([
            "mortar-calc",
            "solve",
            "--mortar",
            "1000,1000,50",
            "--target",
            "Hotel 9 kpad 5",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Solve {
                mortar,
                target,
                map,
                json,
                ..
            } => {
                assert!(matches!(mortar, Position::Coords { z: Some(_), .. }));
                assert!(matches!(target, Position::Grid(_)));
                assert!(map.maps.is_none());
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_map_args_go_together() {
        let result = Cli::try_parse_from([
            "mortar-calc",
            "solve",
            "--mortar",
            "D6-7",
            "--target",
            "E7-5",
            "--maps",
            "maps",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_position_without_map() {
        let gr = GridReference::new('C', 3, 5).unwrap();
        let p = resolve_position(Position::Grid(gr), 100.0, None).unwrap();
        assert_eq!(p, WorldPoint::flat(250.0, 250.0));

        let p = resolve_position(
            Position::Coords {
                x: 10.0,
                y: 20.0,
                z: Some(5.0),
            },
            100.0,
            None,
        )
        .unwrap();
        assert_eq!(p, WorldPoint::new(10.0, 20.0, 5.0));
    }

    #[test]
    fn test_parse_xy() {
        assert_eq!(parse_xy("1200,850").unwrap(), (1200.0, 850.0));
        assert!(parse_xy("1200").is_err());
        assert!(parse_xy("1,2,3").is_err());
    }
}
