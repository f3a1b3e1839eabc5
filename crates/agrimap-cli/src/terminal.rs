//! Terminal stand-ins for the alert and map collaborators

use agrimap_core::error::Result;
use agrimap_core::models::Point;
use agrimap_core::ports::{AlertPermission, Alerter, MapSurface, OverlayHandle};
use console::{style, Term};

/// Alerts as a bell plus a highlighted line on stderr
pub struct TerminalAlerter {
    enabled: bool,
    term: Term,
}

impl TerminalAlerter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, term: Term::stderr() }
    }
}

impl Alerter for TerminalAlerter {
    fn permission(&self) -> AlertPermission {
        if !self.enabled {
            AlertPermission::Denied
        } else if self.term.features().is_attended() {
            AlertPermission::Granted
        } else {
            AlertPermission::Default
        }
    }

    fn alert(&self, title: &str, body: &str) -> Result<()> {
        self.term.write_line(&format!(
            "\x07{} {}",
            style(format!("🔔 {}", title)).magenta().bold(),
            body
        ))?;
        Ok(())
    }
}

/// Map surface that records overlays in the log instead of drawing them
#[derive(Debug, Default)]
pub struct ConsoleMap {
    next_handle: u64,
    drawn: Option<OverlayHandle>,
}

impl ConsoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn drawn(&self) -> Option<OverlayHandle> {
        self.drawn
    }
}

impl MapSurface for ConsoleMap {
    fn render_polygon(&mut self, points: &[Point]) -> OverlayHandle {
        self.next_handle += 1;
        let handle = OverlayHandle(self.next_handle);
        tracing::debug!(handle = handle.0, points = points.len(), "Polygon rendered");
        self.drawn = Some(handle);
        handle
    }

    fn clear_polygon(&mut self, overlay: OverlayHandle) {
        tracing::debug!(handle = overlay.0, "Polygon cleared");
        if self.drawn == Some(overlay) {
            self.drawn = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_alerter_is_denied() {
        assert_eq!(TerminalAlerter::new(false).permission(), AlertPermission::Denied);
    }

    #[test]
    fn test_console_map_tracks_latest_overlay() {
        let mut map = ConsoleMap::new();
        let first = map.render_polygon(&[Point::new(0.0, 0.0)]);
        map.clear_polygon(first);
        let second = map.render_polygon(&[Point::new(0.0, 0.0)]);

        assert_ne!(first, second);
        assert_eq!(map.drawn(), Some(second));
    }
}
