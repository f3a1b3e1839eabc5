use agrimap_core::models::{CropType, Point, StatusTransition};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AgriMap - Land parcel registration and visit requests
#[derive(Parser, Debug)]
#[command(name = "agrimap")]
#[command(about = "Land parcel registration and visit-request feed", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./agrimap.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Registration service URL, overriding file and environment
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the area enclosed by a boundary
    Area(AreaArgs),

    /// Register a land parcel
    Submit(SubmitArgs),

    /// Follow incoming visit requests
    Watch(WatchArgs),

    /// Approve, reject or schedule a visit request
    Status(StatusArgs),

    /// Show effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct AreaArgs {
    /// Boundary vertex as LAT,LNG (repeat in click order)
    #[arg(long = "point", value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub points: Vec<Point>,

    /// Use the Shivapur demonstration farm
    #[arg(long, conflicts_with = "points")]
    pub demo: bool,

    /// Also report the area on the WGS84 ellipsoid
    #[arg(long)]
    pub ellipsoid: bool,
}

#[derive(Parser, Debug)]
pub struct SubmitArgs {
    /// Farmer name
    #[arg(long)]
    pub name: Option<String>,

    /// Farmer identifier
    #[arg(long)]
    pub farmer_id: Option<String>,

    /// Village
    #[arg(long)]
    pub village: Option<String>,

    /// Crop type (rice, wheat, corn, agroforestry, other)
    #[arg(long)]
    pub crop: Option<CropType>,

    /// Boundary vertex as LAT,LNG (repeat in click order)
    #[arg(long = "point", value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub points: Vec<Point>,

    /// Start from the Shivapur demonstration farm; other flags override it
    #[arg(long)]
    pub demo: bool,
}

#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Seconds to wait before reopening a dropped stream
    #[arg(long, value_name = "SECS")]
    pub reconnect_delay: Option<u64>,

    /// Give up after this many reconnections
    #[arg(long, value_name = "N")]
    pub max_reconnects: Option<u32>,

    /// Disable terminal alerts for new requests
    #[arg(long)]
    pub no_alerts: bool,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Notification id
    pub id: String,

    /// New status (approved, rejected or scheduled)
    pub status: StatusTransition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_points_parse() {
        let cli = Cli::try_parse_from([
            "agrimap", "area", "--point", "15.4865,75.117", "--point", "-15.484,75.1195",
        ])
        .unwrap();

        match cli.command {
            Commands::Area(args) => {
                assert_eq!(args.points.len(), 2);
                assert_eq!(args.points[1], Point::new(-15.484, 75.1195));
                assert!(!args.demo);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_point_rejected() {
        assert!(Cli::try_parse_from(["agrimap", "area", "--point", "15.4"]).is_err());
    }

    #[test]
    fn test_status_args() {
        let cli = Cli::try_parse_from(["agrimap", "--json", "status", "n1", "approve"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Status(args) => {
                assert_eq!(args.id, "n1");
                assert_eq!(args.status, StatusTransition::Approved);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "agrimap", "watch", "--base-url", "http://10.0.0.2:5000", "--max-reconnects", "3",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.2:5000"));
        match cli.command {
            Commands::Watch(args) => assert_eq!(args.max_reconnects, Some(3)),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
