// Terminal demo: renders a grid surface with half-block characters and reports
// the cell under the mouse
//
// Usage: grid_surface_demo [columns] [rows] [layout.json]

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use grid_surface::display::format_location;
use grid_surface::{
    CellIndex, DrawingSurface, GridSurface, LayoutConfig, MemorySurface, PointerEvent, Rgba,
    SurfaceRef, SurfaceRegistry,
};
use log::{error, info};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

const SURFACE_KEY: &str = "#demo";

struct DemoArgs {
    columns: usize,
    rows: usize,
    layout_path: Option<String>,
}

fn parse_args() -> Result<DemoArgs, Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let columns = match args.first() {
        Some(value) => value.parse()?,
        None => 8,
    };
    let rows = match args.get(1) {
        Some(value) => value.parse()?,
        None => 4,
    };
    Ok(DemoArgs {
        columns,
        rows,
        layout_path: args.get(2).cloned(),
    })
}

/// First painted device pixel inside the logical unit at (x, y)
fn sample(surface: &MemorySurface, x: u32, y: u32) -> Rgba {
    let scale = surface.current_scale();
    let x0 = (x as f64 * scale).floor() as u32;
    let x1 = ((x + 1) as f64 * scale).ceil() as u32;
    let y0 = (y as f64 * scale).floor() as u32;
    let y1 = ((y + 1) as f64 * scale).ceil() as u32;

    for py in y0..y1 {
        for px in x0..x1 {
            if let Some(color) = surface.pixel(px, py) {
                if color.a > 0 {
                    return color;
                }
            }
        }
    }
    Rgba::TRANSPARENT
}

fn to_terminal_color(color: Rgba) -> Color {
    if color.a == 0 {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

fn draw(
    out: &mut impl Write,
    grid: &GridSurface<MemorySurface>,
    hovered: Option<CellIndex>,
) -> io::Result<()> {
    let surface = grid.surface();
    let (width, height) = grid.logical_size();
    let (width, text_rows) = (width as u32, (height as u32) / 2);

    queue!(out, cursor::MoveTo(0, 0))?;
    for row in 0..text_rows {
        for column in 0..width {
            let top = sample(surface, column, row * 2);
            let bottom = sample(surface, column, row * 2 + 1);
            queue!(
                out,
                SetForegroundColor(to_terminal_color(top)),
                SetBackgroundColor(to_terminal_color(bottom)),
                Print('▀')
            )?;
        }
        queue!(out, ResetColor, cursor::MoveToNextLine(1))?;
    }

    queue!(
        out,
        Clear(ClearType::CurrentLine),
        Print(format!(
            "{}x{} grid | cell: {} | q to quit",
            grid.columns().unwrap_or(0),
            grid.rows().unwrap_or(0),
            format_location(hovered)
        ))
    )?;
    out.flush()
}

fn run(
    grid: &GridSurface<MemorySurface>,
    surface: &MemorySurface,
    hovered: &Rc<RefCell<Option<CellIndex>>>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dirty = true;
    loop {
        if dirty {
            draw(out, grid, *hovered.borrow())?;
            dirty = false;
        }
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                // one text row holds two logical units
                let event =
                    PointerEvent::mouse_move(mouse.column as f64 + 0.5, mouse.row as f64 * 2.0 + 1.0);
                surface.dispatch(&event);
                dirty = true;
            }
            Event::Resize(..) => dirty = true,
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = parse_args()?;

    let (term_columns, term_rows) = terminal::size()?;
    let surface = MemorySurface::new(
        term_columns as u32,
        term_rows.saturating_sub(1) as u32 * 2,
    );
    let mut registry = SurfaceRegistry::new();
    registry.register(SURFACE_KEY, surface.clone());

    let mut grid = GridSurface::from_ref(SurfaceRef::Key(SURFACE_KEY), &registry, None, None)?;
    if let Some(path) = &args.layout_path {
        let layout = LayoutConfig::load_from_file(path)?;
        grid.set_layout_config_json(&layout.to_json())?;
    }

    let hovered: Rc<RefCell<Option<CellIndex>>> = Rc::new(RefCell::new(None));
    let sink = hovered.clone();
    grid.set_cell_reporter(move |location| *sink.borrow_mut() = location);
    grid.initialize_with(args.columns, args.rows)?;
    info!(
        "Demo surface {}x{} logical units",
        surface.display_size().0,
        surface.display_size().1
    );

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

    let result = run(&grid, &surface, &hovered, &mut stdout);

    execute!(stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    if let Err(e) = &result {
        error!("❌ Demo failed: {}", e);
    }
    result
}
