//! Terminal front end: the window, event pump and presentation for a [`Scene`].
//!
//! Each character cell shows two pixels stacked vertically with an upper half
//! block: the foreground is the upper pixel, the background the lower one.

use anyhow::Context;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use cubeturn::canvas::channels;
use cubeturn::{Canvas, Config, FrameInput, Scene, Vec2};
use log::{debug, info};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

const UPPER_HALF_BLOCK: char = '▀';

/// Raw mode, alternate screen and mouse capture; undone on drop
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)
            .context("failed to set up the terminal")?;
        Ok(TerminalGuard { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Terminal size in cells as `(cols, rows)`
fn terminal_size() -> anyhow::Result<(u16, u16)> {
    if let Some(size) = termsize::get() {
        return Ok((size.cols, size.rows));
    }
    terminal::size().context("failed to query the terminal size")
}

/// Canvas size in pixels for a terminal of `cols` × `rows` cells
fn canvas_size(cols: u16, rows: u16) -> (usize, usize) {
    (cols as usize, rows as usize * 2)
}

/// Bitmap position of the upper pixel in a cell, y measured from the bottom
fn cell_to_pointer(column: u16, row: u16, canvas_height: usize) -> Vec2 {
    let y = canvas_height as f64 - 1.0 - 2.0 * row as f64;
    Vec2::new(column as f64 + 0.5, y + 0.5)
}

fn to_color(pixel: u32) -> Color {
    let (r, g, b) = channels(pixel);
    Color::Rgb { r, g, b }
}

pub struct App {
    scene: Scene,
    input: FrameInput,
    frame_interval: Duration,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl App {
    pub fn new(config: Config, frame_interval: Duration) -> anyhow::Result<Self> {
        let (cols, rows) = terminal_size()?;
        let (width, height) = canvas_size(cols, rows);
        let scene = Scene::new(config, width, height).context("invalid configuration")?;
        Ok(App {
            scene,
            input: FrameInput::default(),
            frame_interval,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        })
    }

    /// Runs until the user quits
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        info!("entered terminal ui");
        loop {
            if event::poll(self.frame_interval).context("failed to poll for events")? {
                // Drain everything queued so one frame sees the latest input.
                loop {
                    let pending = event::read().context("failed to read event")?;
                    if !self.handle_event(pending) {
                        return Ok(());
                    }
                    if !event::poll(Duration::ZERO).context("failed to poll for events")? {
                        break;
                    }
                }
            }

            self.scene.render_frame(&self.input);
            present(&mut guard.out, self.scene.canvas()).context("failed to draw frame")?;
            self.update_fps();
        }
    }

    /// Returns `false` when the app should quit
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return false,
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    info!("reset");
                    self.scene.reset();
                    self.input.primary = false;
                    self.input.secondary = false;
                }
                _ => {}
            },
            Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
            Event::Resize(cols, rows) => {
                let (width, height) = canvas_size(cols, rows);
                self.scene.resize(width, height);
            }
            _ => {}
        }
        true
    }

    fn handle_mouse(&mut self, mouse_event: MouseEvent) {
        let pointer = cell_to_pointer(
            mouse_event.column,
            mouse_event.row,
            self.scene.canvas().height(),
        );
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.input.primary = true,
            MouseEventKind::Up(MouseButton::Left) => self.input.primary = false,
            MouseEventKind::Down(MouseButton::Right) => self.input.secondary = true,
            MouseEventKind::Up(MouseButton::Right) => self.input.secondary = false,
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {}
            _ => return,
        }
        self.input.pointer = pointer;
    }

    fn update_fps(&mut self) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
            debug!("fps: {:.2}", self.fps);
        }
    }
}

/// Writes the canvas to the terminal, two pixel rows per cell row
fn present(out: &mut impl Write, canvas: &Canvas) -> io::Result<()> {
    let height = canvas.height() as i64;
    let rows = canvas.height() / 2;
    for row in 0..rows {
        queue!(out, MoveTo(0, row as u16))?;
        let upper_y = height - 1 - 2 * row as i64;
        let mut current: Option<(u32, u32)> = None;
        for x in 0..canvas.width() as i64 {
            let colors = (canvas.pixel_at(x, upper_y), canvas.pixel_at(x, upper_y - 1));
            if current != Some(colors) {
                queue!(
                    out,
                    SetForegroundColor(to_color(colors.0)),
                    SetBackgroundColor(to_color(colors.1))
                )?;
                current = Some(colors);
            }
            queue!(out, Print(UPPER_HALF_BLOCK))?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}
