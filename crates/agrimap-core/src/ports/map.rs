use crate::models::Point;

/// Handle to a polygon overlay drawn by the map provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Port for the map rendering collaborator.
///
/// Click and ready events flow the other way: the host forwards them to
/// `BoundaryCollector::add_point` and `BoundaryCollector::on_map_ready`.
pub trait MapSurface {
    /// Draw a closed polygon through `points` and return its handle
    fn render_polygon(&mut self, points: &[Point]) -> OverlayHandle;

    /// Remove a previously drawn polygon
    fn clear_polygon(&mut self, overlay: OverlayHandle);
}
