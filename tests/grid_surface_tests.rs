//! Integration tests: construction, geometry, hit-testing and pointer tracking
use grid_surface::{
    CellIndex, DrawingSurface, GridSurface, GridSurfaceError, GridTrait, LayoutConfig,
    MemorySurface, PixelPoint, PointerEvent, PointerEventKind, Rgba, SurfaceRef, SurfaceRegistry,
    DEFAULT_SCALE,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

fn registry_with(key: &str, surface: MemorySurface) -> SurfaceRegistry<MemorySurface> {
    let mut registry = SurfaceRegistry::new();
    registry.register(key, surface);
    registry
}

#[test]
fn test_scenario_three_by_two() {
    let grid = GridSurface::new(MemorySurface::new(300, 150), Some(3), Some(2)).unwrap();
    assert_eq!(grid.cells().len(), 3);
    assert_eq!(grid.cells()[0].len(), 2);
    assert_eq!(grid.cell_count(), 6);
}

#[test]
fn test_cells_cover_every_index_once() {
    for (columns, rows) in [(1, 1), (3, 2), (7, 5), (12, 8)] {
        let grid =
            GridSurface::new(MemorySurface::new(640, 480), Some(columns), Some(rows)).unwrap();
        let indices: HashSet<CellIndex> = grid
            .cells()
            .iter()
            .flatten()
            .map(|cell| cell.index())
            .collect();

        assert_eq!(grid.cells().len(), columns);
        assert!(grid.cells().iter().all(|column| column.len() == rows));
        assert_eq!(indices.len(), columns * rows);
        assert!(indices.iter().all(|i| i.x < columns && i.y < rows));
    }
}

#[test]
fn test_cell_size_is_uniform() {
    let grid = GridSurface::new(MemorySurface::new(501, 333), Some(7), Some(4)).unwrap();
    let size = grid.cell_pixel_size().unwrap();
    assert!(grid
        .cells()
        .iter()
        .flatten()
        .all(|cell| cell.pixel_size() == size));
}

#[test]
fn test_origin_matches_formula_with_default_frames() {
    let mut grid = GridSurface::new(MemorySurface::new(304, 154), Some(3), Some(2)).unwrap();
    let layout = grid.layout_config().clone();
    let size = grid.cell_pixel_size().unwrap();

    let origin = grid.paint_cell_border(0, 0).unwrap();
    assert_eq!(
        origin,
        PixelPoint {
            x: layout.outer_frame_width,
            y: layout.outer_frame_width
        }
    );

    let origin = grid.paint_cell_border(1, 1).unwrap();
    let expected_x = layout.outer_frame_width + (size.width + layout.cell_frame_width);
    let expected_y = layout.outer_frame_width + (size.height + layout.cell_frame_width);
    assert!((origin.x - expected_x).abs() < 1e-9);
    assert!((origin.y - expected_y).abs() < 1e-9);
}

#[test]
fn test_origin_with_zero_frames() {
    let mut grid = GridSurface::new(MemorySurface::new(300, 200), None, None).unwrap();
    grid.set_layout_config_json(r#"{"outerFrameWidth": 0, "cellFrameWidth": 0}"#)
        .unwrap();
    grid.initialize_with(3, 2).unwrap();

    assert_eq!(grid.paint_cell_border(0, 0).unwrap(), PixelPoint { x: 0.0, y: 0.0 });
    assert_eq!(
        grid.paint_cell_border(2, 1).unwrap(),
        PixelPoint { x: 200.0, y: 100.0 }
    );
}

#[test]
fn test_locate_inverts_cell_origin() {
    let grid = GridSurface::new(MemorySurface::new(640, 480), Some(8), Some(6)).unwrap();
    let size = grid.cell_pixel_size().unwrap();
    for column in grid.cells() {
        for cell in column {
            let origin = cell.pixel_origin().unwrap();
            let hit = grid
                .locate_cell(origin.x + size.width * 0.25, origin.y + size.height * 0.25)
                .unwrap();
            assert_eq!(hit, Some(cell.index()), "cell {}", cell.index());
        }
    }
}

#[test]
fn test_locate_on_outer_frame_is_unresolved() {
    let grid = GridSurface::new(MemorySurface::new(640, 480), Some(8), Some(6)).unwrap();
    let frame = grid.layout_config().outer_frame_width;
    assert_eq!(grid.locate_cell(frame, 100.0).unwrap(), None);
    assert_eq!(grid.locate_cell(100.0, frame - 0.5).unwrap(), None);
    assert_eq!(grid.locate_cell(640.0 - frame, 100.0).unwrap(), None);
    assert_eq!(grid.locate_cell(100.0, 480.0).unwrap(), None);
}

#[test]
fn test_locate_half_frame_offset_is_preserved() {
    // Boundaries sit F/2 to the left of the painted borders, so the tail of
    // column 0's content already resolves to column 1
    let grid = GridSurface::new(MemorySurface::new(304, 154), Some(3), Some(2)).unwrap();
    let size = grid.cell_pixel_size().unwrap();
    let content_end = 2.0 + size.width;

    assert_eq!(
        grid.locate_cell(content_end - 0.25, 10.0).unwrap(),
        Some(CellIndex::new(1, 0))
    );
    assert_eq!(
        grid.locate_cell(content_end - 1.5, 10.0).unwrap(),
        Some(CellIndex::new(0, 0))
    );
}

#[test]
fn test_out_of_range_and_parse_errors() {
    let mut grid = GridSurface::new(MemorySurface::new(300, 150), Some(3), Some(2)).unwrap();
    assert!(matches!(
        grid.paint_cell_border(-1, 0),
        Err(GridSurfaceError::OutOfRange { .. })
    ));
    assert!(matches!(
        grid.set_layout_config_json("{not json"),
        Err(GridSurfaceError::ConfigParseError(_))
    ));
    assert!(matches!(
        grid.set_layout_config_json("\"just a string\""),
        Err(GridSurfaceError::InvalidArgument(_))
    ));
}

#[test]
fn test_layout_round_trip() {
    let mut grid = GridSurface::new(MemorySurface::new(300, 150), Some(3), Some(2)).unwrap();
    grid.set_layout_config_json(r##"{"cellFrameColor": "#123456", "unknown": 1}"##)
        .unwrap();
    let before = grid.layout_config().clone();

    let json = grid.layout_config_json();
    grid.set_layout_config_json(&json).unwrap();
    assert_eq!(grid.layout_config(), &before);
    assert_eq!(before.cell_frame_color, "#123456");
}

#[test]
fn test_scale_change_keeps_displayed_size() {
    let surface = MemorySurface::new(200, 100);
    let mut grid = GridSurface::new(surface.clone(), None, None).unwrap();

    grid.set_scale(2.0).unwrap();
    assert_eq!(surface.backing_size(), (400, 200));
    assert_eq!(surface.display_size(), (200.0, 100.0));

    grid.set_scale(3.0).unwrap();
    assert_eq!(surface.backing_size(), (600, 300));
    assert_eq!(surface.display_size(), (200.0, 100.0));
    assert_eq!(surface.current_scale(), 3.0);
}

#[test]
fn test_construct_by_key() {
    let surface = MemorySurface::new(120, 80);
    let registry = registry_with("#board", surface.clone());

    let grid = GridSurface::from_ref(SurfaceRef::Key("#board"), &registry, Some(4), Some(4))
        .unwrap();
    assert_eq!(grid.cell_count(), 16);
    assert_eq!(surface.backing_size(), (240, 160));
    assert_eq!(grid.scale(), DEFAULT_SCALE);
}

#[test]
fn test_construct_by_handle_ignores_registry() {
    let registry: SurfaceRegistry<MemorySurface> = SurfaceRegistry::new();
    let grid = GridSurface::from_ref(
        SurfaceRef::Handle(MemorySurface::new(50, 50)),
        &registry,
        None,
        None,
    )
    .unwrap();
    assert!(grid.cells().is_empty());
}

#[test]
fn test_construct_errors() {
    let registry = registry_with("#flat", MemorySurface::without_2d(10, 10));

    assert!(matches!(
        GridSurface::from_ref(SurfaceRef::Key(""), &registry, None, None),
        Err(GridSurfaceError::InvalidArgument(_))
    ));
    assert!(matches!(
        GridSurface::from_ref(SurfaceRef::Key("#nothing"), &registry, None, None),
        Err(GridSurfaceError::InvalidArgument(_))
    ));
    assert!(matches!(
        GridSurface::from_ref(SurfaceRef::Key("#flat"), &registry, None, None),
        Err(GridSurfaceError::UnsupportedSurface(_))
    ));
}

#[test]
fn test_reinitializing_keeps_one_listener() {
    let surface = MemorySurface::new(300, 150);
    let mut grid = GridSurface::new(surface.clone(), Some(3), Some(2)).unwrap();
    let reports = Rc::new(RefCell::new(Vec::new()));
    let sink = reports.clone();
    grid.set_cell_reporter(move |location| sink.borrow_mut().push(location));

    grid.initialize().unwrap();
    grid.initialize().unwrap();
    grid.initialize_with(4, 4).unwrap();

    assert_eq!(grid.active_listener_count(), 1);
    for kind in PointerEventKind::ALL {
        let expected = usize::from(kind == PointerEventKind::MouseMove);
        assert_eq!(surface.listener_count(kind), expected, "{}", kind.name());
    }

    assert_eq!(surface.dispatch(&PointerEvent::mouse_move(150.0, 75.0)), 1);
    assert_eq!(reports.borrow().len(), 1);
    assert_eq!(reports.borrow()[0], Some(CellIndex::new(2, 2)));
}

#[test]
fn test_pointer_uses_page_position_and_scroll() {
    let surface = MemorySurface::new(300, 150);
    surface.set_page_position(100.0, 50.0);
    surface.set_scroll_offset(0.0, 20.0);

    let mut grid = GridSurface::new(surface.clone(), Some(3), Some(2)).unwrap();
    let reports = Rc::new(RefCell::new(Vec::new()));
    let sink = reports.clone();
    grid.set_cell_reporter(move |location| sink.borrow_mut().push(location));

    // surface-relative (250, 100): last column, bottom row
    surface.dispatch(&PointerEvent::mouse_move(350.0, 170.0));
    // surface-relative (1, 1): on the frame
    surface.dispatch(&PointerEvent::mouse_move(101.0, 71.0));

    assert_eq!(
        *reports.borrow(),
        vec![Some(CellIndex::new(2, 1)), None]
    );
}

#[test]
fn test_other_event_kinds_are_not_tracked() {
    let surface = MemorySurface::new(300, 150);
    let mut grid = GridSurface::new(surface.clone(), Some(3), Some(2)).unwrap();
    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();
    grid.set_cell_reporter(move |_| *sink.borrow_mut() += 1);

    let click = PointerEvent {
        kind: PointerEventKind::Click,
        page_x: 150.0,
        page_y: 75.0,
    };
    assert_eq!(surface.dispatch(&click), 0);
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn test_painted_pixels_follow_layout_colors() {
    let surface = MemorySurface::new(100, 100);
    let mut grid = GridSurface::new(surface.clone(), None, None).unwrap();
    grid.set_layout_config_json(
        r##"{"outerFrameColor": "#ff0000", "cellFrameColor": "#0000ff", "cellFrameWidth": 2}"##,
    )
    .unwrap();
    grid.initialize_with(2, 2).unwrap();

    let red = Rgba::opaque(255, 0, 0);
    let blue = Rgba::opaque(0, 0, 255);
    let layout: &LayoutConfig = grid.layout_config();
    assert_eq!(layout.cell_frame_width, 2.0);

    // outer frame corner
    assert_eq!(surface.logical_pixel(0.5, 0.5), Some(red));
    // shared vertical border between the two columns at x = 2 + 47 .. 2 + 49
    assert_eq!(surface.logical_pixel(50.0, 25.0), Some(blue));
    // cell interior stays unpainted
    assert_eq!(surface.logical_pixel(25.0, 25.0), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_reinit_discards_previous_paint() {
    let surface = MemorySurface::new(100, 100);
    let mut grid = GridSurface::new(surface.clone(), Some(4), Some(4)).unwrap();
    // horizontal border below row 1 spans y = 49.75..50.25
    assert_ne!(surface.logical_pixel(25.0, 49.8), Some(Rgba::TRANSPARENT));

    // resizing the backing store on initialization drops old pixels
    grid.initialize_with(1, 1).unwrap();
    assert_eq!(surface.logical_pixel(25.0, 49.8), Some(Rgba::TRANSPARENT));
    assert_eq!(grid.cell_count(), 1);
}
