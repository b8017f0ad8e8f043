//! Rendering layer — all terminal I/O lives here.
//!
//! `TerminalSink` collects one frame of draw submissions into a cell grid
//! scaled from the world playfield, then `present` writes that grid out.
//! No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use shmup::config::{HEIGHT, WIDTH};
use shmup::entities::{GameState, Sprite, Tint};
use shmup::motion::alive_count;
use shmup::render::DrawSink;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HITS: Color = Color::Red;
const C_HUD_FOCUS: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Rows above the playfield reserved for the HUD.
const HUD_ROWS: u16 = 1;
/// Rows below the playfield reserved for the controls hint.
const HINT_ROWS: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

pub struct TerminalSink {
    cols: u16,
    rows: u16,
    cells: Vec<Option<Cell>>,
    background: Option<Color>,
    line: String,
}

impl TerminalSink {
    pub fn new(width: u16, height: u16) -> Self {
        let cols = width.max(1);
        let rows = height.saturating_sub(HUD_ROWS + HINT_ROWS).max(1);
        Self {
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
            background: None,
            line: String::with_capacity(cols as usize * 4),
        }
    }

    /// Write the collected frame plus HUD, then reset for the next frame.
    pub fn present<W: Write>(&mut self, out: &mut W, state: &GameState) -> std::io::Result<()> {
        draw_hud(out, state, self.cols)?;

        let bg = self.background.unwrap_or(Color::Reset);
        out.queue(style::SetBackgroundColor(bg))?;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, HUD_ROWS + row))?;
            let start = row as usize * self.cols as usize;
            let mut current: Option<Color> = None;
            self.line.clear();

            for cell in &self.cells[start..start + self.cols as usize] {
                let (glyph, color) = match cell {
                    Some(c) => (c.glyph, c.color),
                    None => (' ', Color::Reset),
                };
                if current != Some(color) {
                    if !self.line.is_empty() {
                        out.queue(Print(&self.line))?;
                        self.line.clear();
                    }
                    out.queue(style::SetForegroundColor(color))?;
                    current = Some(color);
                }
                self.line.push(glyph);
            }
            out.queue(Print(&self.line))?;
        }
        out.queue(style::SetBackgroundColor(Color::Reset))?;

        draw_controls_hint(out, HUD_ROWS + self.rows)?;

        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, HUD_ROWS + self.rows))?;
        out.flush()?;

        self.cells.iter_mut().for_each(|c| *c = None);
        self.background = None;
        Ok(())
    }

    /// Cell span `[lo, hi)` covered by `[start, start + len)` on an axis of
    /// `world` px mapped onto `cells` cells. Always at least one cell wide
    /// when any part is on screen.
    fn span(start: f64, len: f64, world: f64, cells: u16) -> Option<(usize, usize)> {
        let scale = cells as f64 / world;
        let lo = (start * scale).floor().max(0.0);
        let hi = ((start + len) * scale).ceil().min(cells as f64);
        if hi <= 0.0 || lo >= cells as f64 {
            return None;
        }
        let lo = lo as usize;
        Some((lo, (hi as usize).max(lo + 1)))
    }
}

impl DrawSink for TerminalSink {
    fn draw(&mut self, sprite: &Sprite, x: f64, y: f64) {
        let Some((c0, c1)) = Self::span(x, sprite.width, WIDTH, self.cols) else {
            return;
        };
        let Some((r0, r1)) = Self::span(y, sprite.height, HEIGHT, self.rows) else {
            return;
        };

        // Sprites smaller than a cell show as a dot rather than a block.
        let cell_w = WIDTH / self.cols as f64;
        let glyph = if sprite.width < cell_w { '•' } else { '█' };
        let cell = Cell {
            glyph,
            color: to_color(sprite.tint),
        };

        for row in r0..r1 {
            let base = row * self.cols as usize;
            for col in c0..c1 {
                self.cells[base + col] = Some(cell);
            }
        }
    }

    fn fill(&mut self, tint: Tint) {
        self.background = Some(to_color(tint));
    }
}

fn to_color(t: Tint) -> Color {
    Color::Rgb {
        r: t.r,
        g: t.g,
        b: t.b,
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    // Focus indicator — centre
    if state.player.is_focus {
        let tag = "[ FOCUS ]";
        out.queue(cursor::MoveTo((width / 2).saturating_sub(tag.len() as u16 / 2), 0))?;
        out.queue(style::SetForegroundColor(C_HUD_FOCUS))?;
        out.queue(Print(tag))?;
    }

    // Hits and live bullets — right
    let live: usize = alive_count(&state.player.bullets)
        + state
            .enemies
            .iter()
            .map(|e| alive_count(&e.pattern.bullets))
            .sum::<usize>();
    let right_str = format!("Bullets:{:>5}  Hits:{:>4}", live, state.player_hits);
    let rx = width.saturating_sub(right_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HITS))?;
    out.queue(Print(&right_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "←↑↓→ / WASD : Move   SPACE/Z : Shoot   X/Shift : Focus   Q : Quit",
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(size: f64) -> Sprite {
        Sprite {
            width: size,
            height: size,
            tint: Tint::WHITE,
        }
    }

    #[test]
    fn draw_marks_covered_cells() {
        // 64 cols over 640 px → 10 px per cell.
        let mut sink = TerminalSink::new(64, 50);
        sink.draw(&sprite(20.0), 100.0, 0.0);
        let row0: Vec<_> = sink.cells[..64].iter().map(|c| c.is_some()).collect();
        assert!(row0[10] && row0[11]);
        assert!(!row0[9] && !row0[12]);
    }

    #[test]
    fn tiny_sprite_still_occupies_one_cell() {
        let mut sink = TerminalSink::new(64, 50);
        sink.draw(&sprite(2.0), 0.0, 0.0);
        assert_eq!(sink.cells.iter().filter(|c| c.is_some()).count(), 1);
        assert_eq!(sink.cells[0].map(|c| c.glyph), Some('•'));
    }

    #[test]
    fn offscreen_sprite_is_ignored() {
        let mut sink = TerminalSink::new(64, 50);
        sink.draw(&sprite(8.0), -50.0, 10.0);
        sink.draw(&sprite(8.0), 10.0, HEIGHT + 1.0);
        assert!(sink.cells.iter().all(|c| c.is_none()));
    }

    #[test]
    fn hit_sets_flash_background() {
        let mut sink = TerminalSink::new(64, 50);
        sink.hit();
        assert_eq!(sink.background, Some(Color::Rgb { r: 255, g: 0, b: 0 }));
    }
}
