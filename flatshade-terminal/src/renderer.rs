/// Downsamples a rendered framebuffer into coloured terminal cells
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use flatshade_core::{FrameBuffer, Rgb};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Rgb,
}

const EMPTY: Cell = Cell {
    character: ' ',
    color: Rgb::BLACK,
};

/// A grid of terminal cells sampled from the most recent frame
pub struct CellRenderer {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl CellRenderer {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![EMPTY; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn resize(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
        self.cells = vec![EMPTY; columns * rows];
    }

    /// Nearest-sample the frame at each cell centre. Pixels no triangle
    /// covered stay blank.
    pub fn sample(&mut self, frame: &FrameBuffer) {
        if frame.width() == 0 || frame.height() == 0 {
            self.cells.fill(EMPTY);
            return;
        }

        for row in 0..self.rows {
            let y = ((row as f32 + 0.5) * frame.height() as f32 / self.rows as f32) as usize;
            for col in 0..self.columns {
                let x = ((col as f32 + 0.5) * frame.width() as f32 / self.columns as f32) as usize;
                let cell = match (frame.color(x, y), frame.depth(x, y)) {
                    (Some(color), Some(depth)) if depth != f32::NEG_INFINITY => Cell {
                        character: ramp_char(color),
                        color,
                    },
                    _ => EMPTY,
                };
                self.cells[row * self.columns + col] = cell;
            }
        }
    }

    pub fn char_at(&self, column: usize, row: usize) -> Option<char> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.cells[row * self.columns + column].character)
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            let mut current: Option<Rgb> = None;
            for cell in &self.cells[row * self.columns..(row + 1) * self.columns] {
                if current != Some(cell.color) {
                    let Rgb { r, g, b } = cell.color;
                    writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map a covered pixel's brightness onto the ramp. Even a black face gets a
/// visible glyph.
fn ramp_char(color: Rgb) -> char {
    let index = (color.luminance() * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatshade_core::{Mesh, Renderer};

    #[test]
    fn test_ramp_extremes() {
        assert_eq!(ramp_char(Rgb::BLACK), '.');
        assert_eq!(ramp_char(Rgb::new(255, 255, 255)), '@');
    }

    #[test]
    fn test_sample_empty_frame_is_blank() {
        let frame = FrameBuffer::new(40, 40, Rgb::BLACK);
        let mut cells = CellRenderer::new(10, 5);
        cells.sample(&frame);
        for row in 0..5 {
            for col in 0..10 {
                assert_eq!(cells.char_at(col, row), Some(' '));
            }
        }
    }

    #[test]
    fn test_sample_cube_lights_centre_only() {
        let mut frame = FrameBuffer::new(80, 80, Rgb::BLACK);
        Renderer::default().render_frame(&Mesh::cube(1.0), 0.0, &mut frame);

        let mut cells = CellRenderer::new(20, 10);
        cells.sample(&frame);
        assert_eq!(cells.char_at(10, 5), Some('@'));
        assert_eq!(cells.char_at(0, 0), Some(' '));
        assert_eq!(cells.char_at(19, 9), Some(' '));
        assert_eq!(cells.char_at(20, 0), None);
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut cells = CellRenderer::new(4, 2);
        cells.sample(&FrameBuffer::new(8, 8, Rgb::BLACK));
        let mut out = Vec::new();
        cells.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches(' ').count(), 8);
    }

    #[test]
    fn test_resize() {
        let mut cells = CellRenderer::new(4, 2);
        cells.resize(6, 3);
        assert_eq!((cells.columns(), cells.rows()), (6, 3));
        assert_eq!(cells.char_at(5, 2), Some(' '));
    }
}
