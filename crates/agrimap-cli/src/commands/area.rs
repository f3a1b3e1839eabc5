//! Area command implementation

use crate::cli::AreaArgs;
use crate::output::OutputWriter;
use crate::output_types::AreaOutput;
use crate::terminal::ConsoleMap;
use agrimap_core::models::{DemoFarm, Point, MIN_POLYGON_POINTS};
use agrimap_geo::area::{square_meters_to_hectares, EarthModel};
use agrimap_geo::models::centroid;
use agrimap_geo::validation::validate_boundary;
use agrimap_mapping::BoundaryCollector;
use anyhow::{Context, Result};

pub fn execute(args: AreaArgs, output: &OutputWriter) -> Result<()> {
    let points: Vec<Point> = if args.demo { DemoFarm::shivapur().boundary } else { args.points };

    validate_boundary(&points).into_result().context("Boundary rejected")?;

    // Replay the vertices as clicks so the collector computes the area
    let mut collector = BoundaryCollector::new();
    collector.on_map_ready(ConsoleMap::new());
    for point in points {
        collector.add_point(point);
    }

    let square_meters = EarthModel::Sphere.area(collector.points());
    let result = AreaOutput {
        points: collector.point_count(),
        square_meters,
        hectares: collector.area_hectares(),
        centroid: if collector.has_polygon() { centroid(collector.points()) } else { None },
        ellipsoid_square_meters: args.ellipsoid.then(|| EarthModel::Wgs84.area(collector.points())),
    };

    if output.is_json() {
        return output.result(result);
    }

    if !collector.has_polygon() {
        output.warning(format!(
            "Please select at least {} points on the map to define the land parcel",
            MIN_POLYGON_POINTS
        ));
    }

    output.section("Parcel Area");
    output.kv("Points", result.points);
    output.kv("Area", format!("{:.2} m²", result.square_meters));
    output.kv("Area (hectares)", format!("{:.2}", result.hectares));
    if let Some(c) = result.centroid {
        output.kv("Centroid", c);
    }
    if let Some(wgs84) = result.ellipsoid_square_meters {
        output.kv(
            "Area on WGS84",
            format!("{:.2} m² ({:.2} ha)", wgs84, square_meters_to_hectares(wgs84)),
        );
    }

    Ok(())
}
