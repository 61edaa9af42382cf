// Pointer tracking - page to surface coordinate translation and the listener
// bookkeeping that keeps exactly one hit-test listener per grid.

use crate::display::format_location;
use crate::grid::cell::CellIndex;
use crate::grid::geometry::GridGeometry;
use crate::surface::{
    DrawingSurface, ListenerId, PageMetrics, PointerEvent, PointerEventKind, PointerListener,
};
use log::{debug, info};
use std::rc::Rc;

/// Callback receiving the hit-test result of every pointer move
pub type CellReporter = Rc<dyn Fn(Option<CellIndex>)>;

/// Translate page coordinates into surface-relative coordinates
pub fn to_surface_coords(event: &PointerEvent, metrics: &PageMetrics) -> (f64, f64) {
    let origin_x = metrics.bounding_rect.left + metrics.scroll_x;
    let origin_y = metrics.bounding_rect.top + metrics.scroll_y;
    (event.page_x - origin_x, event.page_y - origin_y)
}

/// Listener that hit-tests against a snapshot of the geometry it was built with
pub fn cell_tracker(geometry: GridGeometry, reporter: Option<CellReporter>) -> PointerListener {
    Box::new(move |event, metrics| {
        let (x, y) = to_surface_coords(event, metrics);
        let location = geometry.locate(x, y);
        info!("🖱️ Pointer at ({:.1}, {:.1}) -> {}", x, y, format_location(location));
        if let Some(report) = &reporter {
            report(location);
        }
    })
}

/// Listeners a grid has registered on its surface
#[derive(Debug, Default)]
pub struct ListenerSet {
    ids: Vec<ListenerId>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every registered listener under every event kind.
    /// Returns the number of registrations actually removed.
    pub fn clear<S: DrawingSurface>(&mut self, surface: &mut S) -> usize {
        let mut removed = 0;
        for id in self.ids.drain(..) {
            for kind in PointerEventKind::ALL {
                if surface.remove_listener(kind, id) {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            debug!("Removed {} pointer listener(s)", removed);
        }
        removed
    }

    /// Replace all previous listeners with a single mouse-move listener
    pub fn install<S: DrawingSurface>(&mut self, surface: &mut S, listener: PointerListener) {
        self.clear(surface);
        let id = surface.add_listener(PointerEventKind::MouseMove, listener);
        self.ids.push(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridConfig, LayoutConfig};
    use crate::surface::{MemorySurface, SurfaceRect};
    use std::cell::RefCell;

    #[test]
    fn test_translation_accounts_for_scroll() {
        let metrics = PageMetrics {
            bounding_rect: SurfaceRect {
                left: 10.0,
                top: 20.0,
                width: 100.0,
                height: 50.0,
            },
            scroll_x: 5.0,
            scroll_y: 100.0,
        };
        let event = PointerEvent::mouse_move(40.0, 150.0);
        assert_eq!(to_surface_coords(&event, &metrics), (25.0, 30.0));
    }

    #[test]
    fn test_install_replaces_previous_listener() {
        let mut surface = MemorySurface::new(10, 10);
        let mut set = ListenerSet::new();
        set.install(&mut surface, Box::new(|_, _| {}));
        set.install(&mut surface, Box::new(|_, _| {}));

        assert_eq!(set.len(), 1);
        assert_eq!(surface.listener_count(PointerEventKind::MouseMove), 1);
        assert_eq!(set.clear(&mut surface), 1);
        assert!(set.is_empty());
        assert_eq!(surface.listener_count(PointerEventKind::MouseMove), 0);
    }

    #[test]
    fn test_tracker_reports_location() {
        let geometry = GridGeometry::compute(
            (100.0, 100.0),
            &LayoutConfig::default(),
            GridConfig::new(2, 2),
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let reporter: CellReporter = Rc::new(move |loc| sink.borrow_mut().push(loc));

        let mut surface = MemorySurface::new(100, 100);
        let mut set = ListenerSet::new();
        set.install(&mut surface, cell_tracker(geometry, Some(reporter)));

        surface.dispatch(&PointerEvent::mouse_move(75.0, 25.0));
        surface.dispatch(&PointerEvent::mouse_move(1.0, 25.0));
        assert_eq!(*seen.borrow(), vec![Some(CellIndex::new(1, 0)), None]);
    }
}
