//! Conversions between boundaries and `geo` crate types.

use agrimap_core::models::Point;

/// Convert a boundary into a closed `geo::Polygon` (x = lng, y = lat)
pub fn to_geo_polygon(points: &[Point]) -> geo::Polygon {
    let mut coords: Vec<geo::Coord> =
        points.iter().map(|p| geo::Coord { x: p.lng, y: p.lat }).collect();

    if let (Some(first), Some(last)) = (coords.first().copied(), coords.last().copied()) {
        if first != last {
            coords.push(first);
        }
    }

    geo::Polygon::new(geo::LineString::new(coords), vec![])
}

/// Centroid of the boundary as a point, if it has one
pub fn centroid(points: &[Point]) -> Option<Point> {
    use geo::algorithm::centroid::Centroid;

    to_geo_polygon(points).centroid().map(|c| Point::new(c.y(), c.x()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 0.0),
        ]
    }

    #[test]
    fn test_polygon_is_closed() {
        let polygon = to_geo_polygon(&square());
        let exterior = polygon.exterior();
        assert_eq!(exterior.0.len(), 5);
        assert_eq!(exterior.0.first(), exterior.0.last());
    }

    #[test]
    fn test_centroid() {
        let center = centroid(&square()).unwrap();
        assert!((center.lat - 1.0).abs() < 1e-10);
        assert!((center.lng - 1.0).abs() < 1e-10);
    }
}
