// Drawing surface module - the capability set the grid paints onto
pub mod memory;
pub mod registry;

pub use memory::{DrawOp, MemorySurface};
pub use registry::SurfaceRegistry;

/// Identifier handed out by [`DrawingSurface::add_listener`]
pub type ListenerId = u64;

/// Callback invoked for every dispatched pointer event of the subscribed kind
pub type PointerListener = Box<dyn FnMut(&PointerEvent, &PageMetrics)>;

/// Pointer event kinds a surface can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Click,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseOver,
}

impl PointerEventKind {
    pub const ALL: [PointerEventKind; 5] = [
        PointerEventKind::Click,
        PointerEventKind::MouseDown,
        PointerEventKind::MouseMove,
        PointerEventKind::MouseUp,
        PointerEventKind::MouseOver,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PointerEventKind::Click => "click",
            PointerEventKind::MouseDown => "mousedown",
            PointerEventKind::MouseMove => "mousemove",
            PointerEventKind::MouseUp => "mouseup",
            PointerEventKind::MouseOver => "mouseover",
        }
    }
}

/// Pointer event in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub page_x: f64,
    pub page_y: f64,
}

impl PointerEvent {
    pub fn mouse_move(page_x: f64, page_y: f64) -> Self {
        Self {
            kind: PointerEventKind::MouseMove,
            page_x,
            page_y,
        }
    }
}

/// Viewport-relative rectangle of a surface as it is displayed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Surface position and page scroll sampled when an event is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageMetrics {
    pub bounding_rect: SurfaceRect,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// 2D drawing surface consumed by the grid.
///
/// Drawing coordinates are logical units: the surface multiplies them by the
/// current scale transform before touching backing pixels.
pub trait DrawingSurface {
    /// Whether a 2D drawing context is available
    fn supports_2d(&self) -> bool;

    /// Backing store size in device pixels
    fn backing_size(&self) -> (u32, u32);

    /// Resize the backing store. Discards all pixels and resets the transform.
    fn set_backing_size(&mut self, width: u32, height: u32);

    /// Replace the drawing transform with a uniform scale
    fn set_scale_transform(&mut self, scale: f64);

    /// Size the surface is displayed at, in layout units
    fn display_size(&self) -> (f64, f64);

    fn set_display_size(&mut self, width: f64, height: f64);

    /// Set the fill color from CSS hex text; unparsable text keeps the old color
    fn set_fill_color(&mut self, color: &str);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn bounding_rect(&self) -> SurfaceRect;

    fn scroll_offset(&self) -> (f64, f64);

    fn add_listener(&mut self, kind: PointerEventKind, listener: PointerListener) -> ListenerId;

    /// Returns false when no listener with that id is registered for `kind`
    fn remove_listener(&mut self, kind: PointerEventKind, id: ListenerId) -> bool;

    fn listener_count(&self, kind: PointerEventKind) -> usize;
}

/// A surface given directly or by lookup key
pub enum SurfaceRef<'a, S> {
    Handle(S),
    Key(&'a str),
}

/// Host-side lookup of surfaces by key
pub trait SurfaceResolver {
    type Surface: DrawingSurface;

    fn resolve(&self, key: &str) -> Option<Self::Surface>;
}
