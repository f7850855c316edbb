/// Terminal display for the flatshade renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use flatshade_core::{Display, FrameBuffer, FrameInfo};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::debug;

pub mod cli;
pub mod renderer;

pub use cli::Cli;
pub use renderer::CellRenderer;

/// Presents frames on the alternate screen and polls the exit key.
///
/// The last terminal row holds a status line. Raw mode and the alternate
/// screen are restored by [`TerminalDisplay::leave`] or on drop.
pub struct TerminalDisplay {
    out: Stdout,
    cells: CellRenderer,
    exit_key: KeyCode,
    active: bool,
    last_fps_sample: Instant,
    frames_since_sample: u32,
    fps: f32,
}

impl TerminalDisplay {
    pub fn new(exit_key: KeyCode) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self {
            out: stdout(),
            cells: CellRenderer::new(columns as usize, rows.saturating_sub(1) as usize),
            exit_key,
            active: false,
            last_fps_sample: Instant::now(),
            frames_since_sample: 0,
            fps: 0.0,
        })
    }

    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        // Raw mode must be undone by leave() even if the screen switch fails.
        self.active = true;
        execute!(self.out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.out, terminal::LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }

    fn is_exit(&self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        key.code == self.exit_key
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    }

    fn update_fps(&mut self) {
        self.frames_since_sample += 1;
        let elapsed = self.last_fps_sample.elapsed();
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frames_since_sample as f32 / elapsed.as_secs_f32();
            self.frames_since_sample = 0;
            self.last_fps_sample = Instant::now();
        }
    }

    fn draw_status(&mut self, info: &FrameInfo) -> io::Result<()> {
        let status = format!(
            "flatshade | frame {} | angle {:>5.1} | faces {} drawn {} culled | FPS {:.1} | {} quits",
            info.index,
            info.angle,
            info.stats.faces_drawn,
            info.stats.faces_culled,
            self.fps,
            key_label(self.exit_key),
        );
        let width = self.cells.columns();
        let status: String = status.chars().take(width).collect();
        queue!(
            self.out,
            cursor::MoveTo(0, self.cells.rows() as u16),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )
    }
}

impl Display for TerminalDisplay {
    type Error = io::Error;

    fn present(&mut self, frame: &FrameBuffer, info: &FrameInfo) -> io::Result<()> {
        self.update_fps();
        self.cells.sample(frame);
        self.cells.draw(&mut self.out)?;
        self.draw_status(info)?;
        self.out.flush()
    }

    fn poll_exit(&mut self, timeout: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(false);
            }
            match event::read()? {
                Event::Key(key) if self.is_exit(&key) => return Ok(true),
                Event::Resize(columns, rows) => {
                    debug!(columns, rows, "Terminal resized");
                    self.cells
                        .resize(columns as usize, rows.saturating_sub(1) as usize);
                    execute!(self.out, terminal::Clear(ClearType::All))?;
                }
                _ => {}
            }
            if remaining.is_zero() {
                return Ok(false);
            }
        }
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{other:?}"),
    }
}
