//! Cardspace CLI
//!
//! One-shot geometry queries against the layout engine. Every command prints
//! a single JSON value on stdout.

use anyhow::{bail, Context, Result};
use cardspace_core_layout::config::{CARD_SNAP_THRESHOLD, HEADER_HEIGHT, SNAP_GRID, SNAP_THRESHOLD};
use cardspace_core_layout::{
    align_to_cards, clamp_to_bounds, snap_geometry, snap_to_grid, snap_zone, Padding, Rect,
    WorkspaceBounds, Zone,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

#[derive(Parser)]
#[command(name = "cardspace-cli")]
#[command(author, version, about = "Query the cardspace layout engine")]
struct Cli {
    /// Workspace size as WIDTHxHEIGHT
    #[arg(short, long, default_value = "1920x1080", value_parser = parse_size, global = true)]
    workspace: WorkspaceBounds,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Which docking zone a card at this position would enter
    Zone {
        /// Card as X,Y,WIDTH,HEIGHT
        #[arg(value_parser = parse_rect, allow_hyphen_values = true)]
        card: Rect,
        /// Edge distance that enters a zone
        #[arg(short, long, default_value_t = SNAP_THRESHOLD)]
        threshold: f64,
    },
    /// Rectangle a card docked in a zone fills
    Geometry {
        #[arg(value_enum)]
        zone: ZoneArg,
    },
    /// Constrain a card position so it stays reachable
    Clamp {
        /// Card as X,Y,WIDTH,HEIGHT
        #[arg(value_parser = parse_rect, allow_hyphen_values = true)]
        card: Rect,
        /// Horizontal pixels that must stay inside the workspace
        #[arg(long, default_value_t = Padding::default().min_visible)]
        min_visible: f64,
        /// Card header height
        #[arg(long, default_value_t = HEADER_HEIGHT)]
        header: f64,
    },
    /// Round a position to the grid
    Grid {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        /// Grid cell size
        #[arg(short, long, default_value_t = SNAP_GRID)]
        size: f64,
    },
    /// Align a dragged card against other cards and the workspace edges
    Align {
        /// Dragged card as X,Y,WIDTH,HEIGHT
        #[arg(value_parser = parse_rect, allow_hyphen_values = true)]
        card: Rect,
        /// Another card as X,Y,WIDTH,HEIGHT (repeatable)
        #[arg(short, long = "other", value_parser = parse_rect, allow_hyphen_values = true)]
        others: Vec<Rect>,
        /// Distance at which edges align
        #[arg(short, long, default_value_t = CARD_SNAP_THRESHOLD)]
        threshold: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ZoneArg {
    Left,
    Right,
    Top,
    Bottom,
    Topleft,
    Topright,
    Bottomleft,
    Bottomright,
}

impl From<ZoneArg> for Zone {
    fn from(arg: ZoneArg) -> Self {
        match arg {
            ZoneArg::Left => Zone::Left,
            ZoneArg::Right => Zone::Right,
            ZoneArg::Top => Zone::Top,
            ZoneArg::Bottom => Zone::Bottom,
            ZoneArg::Topleft => Zone::TopLeft,
            ZoneArg::Topright => Zone::TopRight,
            ZoneArg::Bottomleft => Zone::BottomLeft,
            ZoneArg::Bottomright => Zone::BottomRight,
        }
    }
}

fn parse_size(s: &str) -> Result<WorkspaceBounds> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("Expected WIDTHxHEIGHT, got '{}'", s))?;
    let width: f64 = w.trim().parse().with_context(|| format!("Bad width '{}'", w))?;
    let height: f64 = h.trim().parse().with_context(|| format!("Bad height '{}'", h))?;
    Ok(WorkspaceBounds::new(width, height))
}

fn parse_rect(s: &str) -> Result<Rect> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Bad number in '{}'", s))?;
    match parts[..] {
        [x, y, width, height] => Ok(Rect::new(x, y, width, height)),
        _ => bail!("Expected X,Y,WIDTH,HEIGHT, got '{}'", s),
    }
}

fn run(cli: Cli) -> Result<serde_json::Value> {
    let bounds = cli.workspace;
    let value = match cli.command {
        Commands::Zone { card, threshold } => {
            json!({ "zone": snap_zone(card, bounds, threshold) })
        }
        Commands::Geometry { zone } => serde_json::to_value(snap_geometry(zone.into(), bounds))?,
        Commands::Clamp {
            card,
            min_visible,
            header,
        } => {
            let padding = Padding {
                min_visible,
                ..Padding::default()
            };
            let (x, y) = clamp_to_bounds(
                card.x,
                card.y,
                card.width,
                card.height,
                bounds,
                &padding,
                header,
            );
            json!({ "x": x, "y": y })
        }
        Commands::Grid { x, y, size } => {
            let (x, y) = snap_to_grid(x, y, size, true);
            json!({ "x": x, "y": y })
        }
        Commands::Align {
            card,
            others,
            threshold,
        } => serde_json::to_value(align_to_cards(card, &others, bounds, threshold))?,
    };
    Ok(value)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let value = run(cli)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> serde_json::Value {
        let mut argv = vec!["cardspace-cli"];
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_size() {
        let bounds = parse_size("800x600").unwrap();
        assert_eq!(bounds, WorkspaceBounds::new(800.0, 600.0));
        assert!(parse_size("800").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn test_parse_rect() {
        assert_eq!(
            parse_rect("-3, 4,300,200").unwrap(),
            Rect::new(-3.0, 4.0, 300.0, 200.0)
        );
        assert!(parse_rect("1,2,3").is_err());
        assert!(parse_rect("1,2,three,4").is_err());
    }

    #[test]
    fn test_zone_command() {
        let value = run_args(&["-w", "800x600", "zone", "3,4,300,200"]);
        assert_eq!(value["zone"], "topleft");

        let value = run_args(&["-w", "800x600", "zone", "300,200,100,100"]);
        assert!(value["zone"].is_null());
    }

    #[test]
    fn test_geometry_command() {
        let value = run_args(&["-w", "800x600", "geometry", "topleft"]);
        assert_eq!(value["width"], 400.0);
        assert_eq!(value["height"], 300.0);
    }

    #[test]
    fn test_clamp_command() {
        let value = run_args(&["-w", "800x600", "clamp", "-1000,-50,300,200"]);
        assert_eq!(value["x"], -200.0);
        assert_eq!(value["y"], 0.0);
    }

    #[test]
    fn test_grid_command() {
        let value = run_args(&["grid", "29", "31"]);
        assert_eq!(value["x"], 20.0);
        assert_eq!(value["y"], 40.0);
    }

    #[test]
    fn test_align_command() {
        let value = run_args(&[
            "-w",
            "2000x2000",
            "align",
            "303,50,250,150",
            "--other",
            "0,0,300,200",
        ]);
        assert_eq!(value["x"], 300.0);
        assert_eq!(value["guides"][0]["position"], 300.0);
    }
}
