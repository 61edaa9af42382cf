// In-memory drawing surface: RGBA raster, transform, listeners and a draw log.
// Handles are cheap clones sharing the same state, like a DOM element reference.

use super::{
    DrawingSurface, ListenerId, PageMetrics, PointerEvent, PointerEventKind, PointerListener,
    SurfaceRect,
};
use crate::color::Rgba;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Drawing operation as issued, in logical units
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

struct ListenerEntry {
    kind: PointerEventKind,
    id: ListenerId,
    callback: PointerListener,
}

struct SurfaceState {
    supports_2d: bool,
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    scale: f64,
    fill: Rgba,
    display_size: Option<(f64, f64)>,
    position: (f64, f64),
    scroll: (f64, f64),
    listeners: Vec<ListenerEntry>,
    next_listener_id: ListenerId,
    ops: Vec<DrawOp>,
}

impl SurfaceState {
    fn paint(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        let (x0, x1) = span(x * self.scale, width * self.scale, self.width);
        let (y0, y1) = span(y * self.scale, height * self.scale, self.height);
        for py in y0..y1 {
            let row = py as usize * self.width as usize;
            for px in x0..x1 {
                self.pixels[row + px as usize] = color;
            }
        }
    }
}

/// Device pixels whose centers fall inside `[start, start + len)`, clipped to `limit`
fn span(start: f64, len: f64, limit: u32) -> (u32, u32) {
    let (lo, hi) = if len < 0.0 {
        (start + len, start)
    } else {
        (start, start + len)
    };
    let first = (lo - 0.5).ceil().max(0.0);
    let last = (hi - 0.5).ceil().max(0.0);
    let first = (first as u64).min(limit as u64) as u32;
    let last = (last as u64).min(limit as u64) as u32;
    (first, last.max(first))
}

#[derive(Clone)]
pub struct MemorySurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl MemorySurface {
    /// Surface with the given backing size, displayed at the same size
    pub fn new(width: u32, height: u32) -> Self {
        Self::build(width, height, true)
    }

    /// Surface that refuses to provide a 2D context
    pub fn without_2d(width: u32, height: u32) -> Self {
        Self::build(width, height, false)
    }

    fn build(width: u32, height: u32, supports_2d: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(SurfaceState {
                supports_2d,
                width,
                height,
                pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
                scale: 1.0,
                fill: Rgba::BLACK,
                display_size: None,
                position: (0.0, 0.0),
                scroll: (0.0, 0.0),
                listeners: Vec::new(),
                next_listener_id: 1,
                ops: Vec::new(),
            })),
        }
    }

    /// Place the surface's top-left corner in the viewport
    pub fn set_page_position(&self, left: f64, top: f64) {
        self.state.borrow_mut().position = (left, top);
    }

    pub fn set_scroll_offset(&self, x: f64, y: f64) {
        self.state.borrow_mut().scroll = (x, y);
    }

    /// Backing pixel at device coordinates
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let state = self.state.borrow();
        if x >= state.width || y >= state.height {
            return None;
        }
        state
            .pixels
            .get(y as usize * state.width as usize + x as usize)
            .copied()
    }

    /// Pixel under a logical coordinate, using the current transform
    pub fn logical_pixel(&self, x: f64, y: f64) -> Option<Rgba> {
        let scale = self.state.borrow().scale;
        let (px, py) = ((x * scale).floor(), (y * scale).floor());
        if px < 0.0 || py < 0.0 {
            return None;
        }
        self.pixel(px as u32, py as u32)
    }

    pub fn current_scale(&self) -> f64 {
        self.state.borrow().scale
    }

    pub fn ops(&self) -> Vec<DrawOp> {
        self.state.borrow().ops.clone()
    }

    /// Drain the draw log
    pub fn take_ops(&self) -> Vec<DrawOp> {
        std::mem::take(&mut self.state.borrow_mut().ops)
    }

    /// Deliver an event to every listener of its kind, in registration order.
    /// Returns how many listeners ran.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let (mut running, metrics) = {
            let mut state = self.state.borrow_mut();
            let metrics = PageMetrics {
                bounding_rect: bounding_rect_of(&state),
                scroll_x: state.scroll.0,
                scroll_y: state.scroll.1,
            };
            let (running, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.listeners)
                .into_iter()
                .partition(|entry| entry.kind == event.kind);
            state.listeners = kept;
            (running, metrics)
        };

        for entry in running.iter_mut() {
            (entry.callback)(event, &metrics);
        }

        let invoked = running.len();
        let mut state = self.state.borrow_mut();
        let added_during_dispatch = std::mem::take(&mut state.listeners);
        state.listeners = running;
        state.listeners.extend(added_during_dispatch);
        invoked
    }
}

fn bounding_rect_of(state: &SurfaceState) -> SurfaceRect {
    let (width, height) = state
        .display_size
        .unwrap_or((state.width as f64, state.height as f64));
    SurfaceRect {
        left: state.position.0,
        top: state.position.1,
        width,
        height,
    }
}

impl DrawingSurface for MemorySurface {
    fn supports_2d(&self) -> bool {
        self.state.borrow().supports_2d
    }

    fn backing_size(&self) -> (u32, u32) {
        let state = self.state.borrow();
        (state.width, state.height)
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        let mut state = self.state.borrow_mut();
        debug!(
            "Backing store {}x{} -> {}x{}",
            state.width, state.height, width, height
        );
        state.width = width;
        state.height = height;
        state.pixels = vec![Rgba::TRANSPARENT; width as usize * height as usize];
        state.scale = 1.0;
    }

    fn set_scale_transform(&mut self, scale: f64) {
        self.state.borrow_mut().scale = scale;
    }

    fn display_size(&self) -> (f64, f64) {
        let state = self.state.borrow();
        state
            .display_size
            .unwrap_or((state.width as f64, state.height as f64))
    }

    fn set_display_size(&mut self, width: f64, height: f64) {
        self.state.borrow_mut().display_size = Some((width, height));
    }

    fn set_fill_color(&mut self, color: &str) {
        match color.parse::<Rgba>() {
            Ok(parsed) => self.state.borrow_mut().fill = parsed,
            Err(e) => debug!("Keeping previous fill color: {}", e),
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let mut state = self.state.borrow_mut();
        let color = state.fill;
        state.paint(x, y, width, height, color);
        state.ops.push(DrawOp::Fill {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let mut state = self.state.borrow_mut();
        state.paint(x, y, width, height, Rgba::TRANSPARENT);
        state.ops.push(DrawOp::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn bounding_rect(&self) -> SurfaceRect {
        bounding_rect_of(&self.state.borrow())
    }

    fn scroll_offset(&self) -> (f64, f64) {
        self.state.borrow().scroll
    }

    fn add_listener(&mut self, kind: PointerEventKind, listener: PointerListener) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.listeners.push(ListenerEntry {
            kind,
            id,
            callback: listener,
        });
        id
    }

    fn remove_listener(&mut self, kind: PointerEventKind, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state
            .listeners
            .retain(|entry| !(entry.kind == kind && entry.id == id));
        state.listeners.len() != before
    }

    fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.kind == kind)
            .count()
    }
}
