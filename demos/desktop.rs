//! Desktop Example - Two overlapping windows of buttons in the terminal
//!
//! - Click a window to raise it
//! - Hover buttons to highlight them, click to press
//! - The bottom-right button of each window closes it
//! - `q` or Escape quits
//!
//! Logs go to `desktop.log`; set `RUST_LOG=spark_desk=trace` to see routing.
//!
//! Run with: cargo run --example desktop

use std::cell::Cell;
use std::fs::File;
use std::io::{self, Stdout, Write};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::info;
use tracing_subscriber::EnvFilter;

use spark_desk::state::input::{disable_mouse, enable_mouse, poll_event};
use spark_desk::{
    AttachOptions, Button, ButtonStyle, CellSpan, Desktop, Event, FloatRect, RenderTarget, Rgba,
    Table, Vec2, View, Widget,
};

/// Paints filled rectangles as colored terminal cells.
struct TerminalTarget {
    out: Stdout,
    view: View,
}

impl RenderTarget for TerminalTarget {
    fn view(&self) -> View {
        self.view
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
    }

    fn fill_rect(&mut self, rect: FloatRect, color: Rgba) {
        let origin = self.view.viewport.position();
        let left = (rect.left + origin.x).max(0.0) as u16;
        let top = (rect.top + origin.y).max(0.0) as u16;
        let right = (rect.left + rect.width + origin.x).max(0.0) as u16;
        let bottom = (rect.top + rect.height + origin.y).max(0.0) as u16;
        if right <= left {
            return;
        }

        let blank = " ".repeat(usize::from(right - left));
        let color = Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        };
        for row in top..bottom {
            let _ = queue!(
                self.out,
                MoveTo(left, row),
                SetBackgroundColor(color),
                Print(&blank)
            );
        }
    }
}

fn window_style(base: Rgba) -> ButtonStyle {
    ButtonStyle {
        normal: base,
        prelight: Rgba::rgb(base.r.saturating_add(60), base.g.saturating_add(60), base.b.saturating_add(60)),
        active: Rgba::WHITE,
        ..Default::default()
    }
}

/// A 2x2 grid of buttons; the last one closes the window.
fn window(desktop: &Rc<Desktop>, rect: FloatRect, base: Rgba) -> Rc<Table> {
    let table = Table::new();
    table.set_column_spacings(1.0);

    for (column, row) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let button = Button::with_style(Vec2::new(8.0, 1.0), window_style(base));
        table.attach(
            button.clone(),
            CellSpan::single(column, row),
            AttachOptions::FILL | AttachOptions::EXPAND,
            AttachOptions::FILL | AttachOptions::EXPAND,
            Vec2::ZERO,
        );

        if (column, row) == (1, 1) {
            let desktop = Rc::downgrade(desktop);
            let table = Rc::downgrade(&table);
            button.on_click(move |_| {
                if let (Some(desktop), Some(table)) = (desktop.upgrade(), table.upgrade()) {
                    info!("closing window");
                    desktop.remove(table);
                }
            });
        } else {
            button.on_click(move |position| info!(column, row, ?position, "button clicked"));
        }
    }

    table.allocate_size(rect);
    table
}

fn run(out: &mut TerminalTarget) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let desktop = Rc::new(Desktop::new(FloatRect::new(
        0.0,
        0.0,
        f32::from(width),
        f32::from(height),
    )));

    desktop.add(window(&desktop, FloatRect::new(2.0, 1.0, 30.0, 8.0), Rgba::rgb(40, 60, 120)));
    desktop.add(window(&desktop, FloatRect::new(20.0, 5.0, 30.0, 8.0), Rgba::rgb(120, 50, 40)));

    let quit = Rc::new(Cell::new(false));

    while !quit.get() && !desktop.is_empty() {
        queue!(out.out, ResetColor, Clear(ClearType::All))?;
        desktop.expose(out);
        queue!(out.out, ResetColor)?;
        out.out.flush()?;

        for event in poll_event(Duration::from_millis(50))? {
            match &event {
                Event::KeyPressed(key) if key.key == "q" || key.key == "Escape" => quit.set(true),
                Event::Resized { width, height } => {
                    desktop.set_viewport(FloatRect::new(0.0, 0.0, *width as f32, *height as f32));
                }
                _ => {}
            }
            desktop.handle_event(&event);
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let log = File::create("desktop.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let mut target = TerminalTarget {
        out: io::stdout(),
        view: View::default(),
    };

    terminal::enable_raw_mode()?;
    execute!(target.out, EnterAlternateScreen, Hide)?;
    enable_mouse()?;

    let result = run(&mut target);

    disable_mouse()?;
    execute!(target.out, ResetColor, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}
