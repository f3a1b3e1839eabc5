//! Boundary capture state machine.
//!
//! All operations take `&mut self` and finish their render and area update
//! before returning, so clicks are applied strictly in arrival order.

use agrimap_core::models::{Boundary, BoundarySnapshot, Point, MIN_POLYGON_POINTS};
use agrimap_core::ports::{MapSurface, OverlayHandle};
use agrimap_geo::area::{square_meters_to_hectares, EarthModel};

/// Collects boundary points and keeps the area and overlay in sync with them.
///
/// The area is recomputed eagerly on every change, whether or not a map is
/// attached. Rendering needs a map; while none is attached the latest
/// polygon is remembered and drawn once by [`BoundaryCollector::on_map_ready`].
#[derive(Debug)]
pub struct BoundaryCollector<M: MapSurface> {
    points: Boundary,
    area_hectares: f64,
    model: EarthModel,
    map: Option<M>,
    overlay: Option<OverlayHandle>,
    render_pending: bool,
}

impl<M: MapSurface> Default for BoundaryCollector<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MapSurface> BoundaryCollector<M> {
    /// Create an empty collector using the spherical earth model
    pub fn new() -> Self {
        Self::with_model(EarthModel::default())
    }

    pub fn with_model(model: EarthModel) -> Self {
        Self {
            points: Vec::new(),
            area_hectares: 0.0,
            model,
            map: None,
            overlay: None,
            render_pending: false,
        }
    }

    /// Append a clicked point
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
        tracing::debug!(point = %point, count = self.points.len(), "Boundary point added");

        if self.points.len() >= MIN_POLYGON_POINTS {
            self.refresh();
        }
    }

    /// Clear the boundary, the area and any drawn polygon
    pub fn reset(&mut self) {
        self.points.clear();
        self.area_hectares = 0.0;
        self.render_pending = false;
        self.clear_overlay();
        tracing::debug!("Boundary reset");
    }

    /// Replace the whole boundary, e.g. from a demo or an import
    pub fn load_boundary(&mut self, points: Boundary) {
        self.points = points;
        tracing::debug!(
            count = self.points.len(),
            map_ready = self.map.is_some(),
            "Boundary loaded"
        );

        if self.points.len() >= MIN_POLYGON_POINTS {
            self.refresh();
        } else {
            self.area_hectares = 0.0;
            self.render_pending = false;
            self.clear_overlay();
        }
    }

    /// Attach the map once it has finished loading and draw any deferred polygon
    pub fn on_map_ready(&mut self, map: M) {
        if self.map.is_some() {
            self.detach_map();
        }

        self.map = Some(map);

        if self.render_pending && self.points.len() >= MIN_POLYGON_POINTS {
            self.render();
        }
        self.render_pending = false;
    }

    /// Remove the drawn polygon and hand the map back
    pub fn detach_map(&mut self) -> Option<M> {
        self.clear_overlay();
        self.render_pending = self.points.len() >= MIN_POLYGON_POINTS;
        self.map.take()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Current enclosed area in hectares (0 below three points)
    pub fn area_hectares(&self) -> f64 {
        self.area_hectares
    }

    pub fn has_polygon(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn is_map_ready(&self) -> bool {
        self.map.is_some()
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    /// Owned copy of the boundary and area
    pub fn snapshot(&self) -> BoundarySnapshot {
        BoundarySnapshot { points: self.points.clone(), area_hectares: self.area_hectares }
    }

    fn refresh(&mut self) {
        self.area_hectares = square_meters_to_hectares(self.model.area(&self.points));
        tracing::debug!(area_hectares = self.area_hectares, "Parcel area recomputed");

        if self.map.is_some() {
            self.render();
        } else {
            self.render_pending = true;
        }
    }

    fn render(&mut self) {
        self.clear_overlay();
        if let Some(map) = self.map.as_mut() {
            self.overlay = Some(map.render_polygon(&self.points));
        }
    }

    fn clear_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            if let Some(map) = self.map.as_mut() {
                map.clear_polygon(overlay);
            }
        }
    }
}
