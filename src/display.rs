/// Terminal front end. All terminal I/O lives here.
///
/// The game core paints in pixels; this module keeps a character-cell back
/// buffer, maps each pixel coordinate onto a cell, and writes the buffer out
/// with crossterm once per loop iteration. Sound cues become the terminal
/// bell and modal prompts become a text box in the middle of the screen.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use space_dodger::constants::{
    ASTEROID_HEIGHT, ASTEROID_WIDTH, FUEL_TANK_HEIGHT, FUEL_TANK_WIDTH,
};
use space_dodger::entities::{FuelColor, Sprite};
use space_dodger::frontend::{HighScoreStore, Notifier, RenderSurface};
use space_dodger::geometry::Viewport;
use space_dodger::store::ScoreStore;

// ── Colour palette ────────────────────────────────────────────────────────────

/// Background gradient stops, spread over twice the viewport height.
const GRADIENT_TOP: (u8, u8, u8) = (0x14, 0x14, 0x18);
const GRADIENT_BOTTOM: (u8, u8, u8) = (0x2b, 0x25, 0x51);

const C_TEXT: Color = Color::White;
const C_STAR: Color = Color::White;
const C_SHIP: Color = Color::Cyan;
const C_ASTEROID: Color = Color::DarkYellow;
const C_FUEL_TANK: Color = Color::Green;
const C_DIALOG: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

/// A modal prompt: title plus the label of its action button.
#[derive(Clone, Debug, PartialEq)]
struct Dialog {
    title: &'static str,
    action: &'static str,
}

pub struct TerminalFrontend {
    cols: u16,
    rows: u16,
    cell_width: f64,
    cell_height: f64,
    /// Natural size of the ship sprite in pixels.
    ship_size: (f64, f64),
    cells: Vec<Cell>,
    dialog: Option<Dialog>,
    sound_on: bool,
    bells: u32,
    store: ScoreStore,
}

impl TerminalFrontend {
    pub fn new(
        cols: u16,
        rows: u16,
        cell_size: (f64, f64),
        ship_size: (f64, f64),
        store: ScoreStore,
    ) -> Self {
        let mut frontend = TerminalFrontend {
            cols,
            rows,
            cell_width: cell_size.0,
            cell_height: cell_size.1,
            ship_size,
            cells: Vec::new(),
            dialog: None,
            sound_on: false,
            bells: 0,
            store,
        };
        frontend.allocate();
        frontend
    }

    /// Pixel size of a `cols` × `rows` terminal.
    pub fn pixels_for(&self, cols: u16, rows: u16) -> (f64, f64) {
        (
            f64::from(cols) * self.cell_width,
            f64::from(rows) * self.cell_height,
        )
    }

    fn allocate(&mut self) {
        let blank = Cell {
            ch: ' ',
            fg: C_TEXT,
            bg: Color::Black,
        };
        self.cells = vec![blank; usize::from(self.cols) * usize::from(self.rows)];
    }

    /// Cell under pixel (`x`, `y`), if it falls inside the grid.
    fn cell_at(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let col = (x / self.cell_width).floor();
        let row = (y / self.cell_height).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(self.cols) || row >= f64::from(self.rows) {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn put(&mut self, col: u16, row: u16, ch: char, fg: Color) {
        if col >= self.cols || row >= self.rows {
            return;
        }
        let index = usize::from(row) * usize::from(self.cols) + usize::from(col);
        self.cells[index].ch = ch;
        self.cells[index].fg = fg;
    }

    /// Write `text` starting at a cell, clipped to the row.
    fn put_str(&mut self, col: u16, row: u16, text: &str, fg: Color) {
        for (offset, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            self.put(col.saturating_add(offset), row, ch, fg);
        }
    }

    /// Number of cells a pixel span covers, at least one.
    fn span(pixels: f64, cell: f64) -> i32 {
        ((pixels / cell).round() as i32).max(1)
    }

    // ── Output ───────────────────────────────────────────────────────────────

    /// Write the back buffer, any open dialog, and pending bells.
    pub fn flush<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let mut fg = None;
        let mut bg = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = usize::from(row) * usize::from(self.cols);
            for cell in &self.cells[start..start + usize::from(self.cols)] {
                if fg != Some(cell.fg) {
                    out.queue(style::SetForegroundColor(cell.fg))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    out.queue(style::SetBackgroundColor(cell.bg))?;
                    bg = Some(cell.bg);
                }
                out.queue(Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;

        self.draw_sound_indicator(out)?;
        if let Some(dialog) = &self.dialog {
            draw_dialog(out, dialog, self.cols, self.rows)?;
        }

        // Bell failures are not worth reporting.
        if self.bells > 0 {
            let _ = out.queue(Print('\x07'));
            self.bells = 0;
        }

        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()
    }

    fn draw_sound_indicator<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let label = if self.sound_on { "[M] sound on " } else { "[M] sound off" };
        let col = self.cols.saturating_sub(label.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(label))?;
        out.queue(style::ResetColor)?;
        Ok(())
    }

    fn ring(&mut self) {
        if self.sound_on {
            self.bells += 1;
        }
    }
}

// ── Drawing surface ───────────────────────────────────────────────────────────

fn gradient_row(row: u16, rows: u16) -> Color {
    // The gradient runs over twice the height, so the bottom row sits halfway.
    let t = f64::from(row) / (f64::from(rows.max(1)) * 2.0);
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb {
        r: mix(GRADIENT_TOP.0, GRADIENT_BOTTOM.0),
        g: mix(GRADIENT_TOP.1, GRADIENT_BOTTOM.1),
        b: mix(GRADIENT_TOP.2, GRADIENT_BOTTOM.2),
    }
}

/// Glyph for one cell of a sprite box `cols` wide.
fn sprite_glyph(sprite: Sprite, col: i32, row: i32, cols: i32) -> char {
    let last = cols - 1;
    match sprite {
        //  ═══▶
        //  ═══▶
        Sprite::Ship => {
            if col == last {
                '▶'
            } else {
                '═'
            }
        }
        //  (@@@@)
        Sprite::Asteroid => match col {
            0 => '(',
            c if c == last => ')',
            _ if row % 2 == 0 => '@',
            _ => '#',
        },
        //  [FUEL]
        Sprite::FuelTank => match col {
            0 => '[',
            c if c == last => ']',
            c => "FUEL".chars().nth((c - 1) as usize % 4).unwrap_or('F'),
        },
    }
}

fn sprite_color(sprite: Sprite) -> Color {
    match sprite {
        Sprite::Ship => C_SHIP,
        Sprite::Asteroid => C_ASTEROID,
        Sprite::FuelTank => C_FUEL_TANK,
    }
}

fn fuel_color(color: FuelColor) -> Color {
    match color {
        FuelColor::Green => Color::Green,
        FuelColor::Yellow => Color::Yellow,
        FuelColor::Red => Color::Red,
    }
}

impl RenderSurface for TerminalFrontend {
    fn viewport(&self) -> Viewport {
        let (width, height) = self.pixels_for(self.cols, self.rows);
        Viewport::new(width, height)
    }

    /// Widths come from [`pixels_for`](Self::pixels_for), so rounding
    /// recovers the terminal's cell count. The overlapping part of the old
    /// buffer is kept: a stopped game does not repaint after a resize.
    fn resize(&mut self, width: f64, height: f64) {
        let old_cols = self.cols;
        let old_rows = self.rows;
        let old_cells = std::mem::take(&mut self.cells);

        self.cols = (width / self.cell_width).round().max(1.0) as u16;
        self.rows = (height / self.cell_height).round().max(1.0) as u16;
        self.allocate();

        let keep_cols = usize::from(old_cols.min(self.cols));
        for row in 0..usize::from(old_rows.min(self.rows)) {
            let from = row * usize::from(old_cols);
            let to = row * usize::from(self.cols);
            self.cells[to..to + keep_cols].copy_from_slice(&old_cells[from..from + keep_cols]);
        }
    }

    fn clear_and_paint_background(&mut self, _width: f64, _height: f64) {
        let cols = usize::from(self.cols);
        for (index, cell) in self.cells.iter_mut().enumerate() {
            let row = (index / cols) as u16;
            *cell = Cell {
                ch: ' ',
                fg: C_TEXT,
                bg: gradient_row(row, self.rows),
            };
        }
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64, size: Option<(f64, f64)>) {
        let (w, h) = size.unwrap_or(match sprite {
            Sprite::Ship => self.ship_size,
            Sprite::Asteroid => (ASTEROID_WIDTH, ASTEROID_HEIGHT),
            Sprite::FuelTank => (FUEL_TANK_WIDTH, FUEL_TANK_HEIGHT),
        });
        let cols = Self::span(w, self.cell_width);
        let rows = Self::span(h, self.cell_height);
        let left = (x / self.cell_width).floor() as i32;
        let top = (y / self.cell_height).floor() as i32;
        let fg = sprite_color(sprite);

        for row in 0..rows {
            for col in 0..cols {
                let (Ok(c), Ok(r)) = (u16::try_from(left + col), u16::try_from(top + row)) else {
                    continue;
                };
                self.put(c, r, sprite_glyph(sprite, col, row, cols), fg);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        if let Some((col, row)) = self.cell_at(x, y) {
            self.put_str(col, row, text, C_TEXT);
        }
    }

    fn draw_filled_rect(&mut self, x: f64, y: f64, w: f64, _h: f64, color: FuelColor) {
        let Some((col, row)) = self.cell_at(x, y) else {
            return;
        };
        let cells = (w / self.cell_width).ceil().max(0.0) as u16;
        for offset in 0..cells {
            self.put(col.saturating_add(offset), row, '█', fuel_color(color));
        }
    }

    fn draw_star(&mut self, x: f64, y: f64, size: u8) {
        if let Some((col, row)) = self.cell_at(x, y) {
            let ch = match size {
                0 | 1 => '·',
                2 => '+',
                _ => '*',
            };
            self.put(col, row, ch, C_STAR);
        }
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

impl HighScoreStore for TerminalFrontend {
    fn load_high_score(&mut self) -> Option<u32> {
        self.store.load_high_score()
    }

    fn save_high_score(&mut self, score: u32) {
        self.store.save_high_score(score);
    }
}

// ── Sound & prompts ───────────────────────────────────────────────────────────

impl Notifier for TerminalFrontend {
    fn on_collision(&mut self) {
        self.ring();
    }

    fn on_fuel_pickup(&mut self) {
        self.ring();
    }

    fn on_maneuver(&mut self) {
        self.ring();
    }

    fn on_game_over(&mut self) {
        self.dialog = Some(Dialog {
            title: "Game over!",
            action: "Try again",
        });
    }

    fn on_pause(&mut self) {
        self.ring();
        self.dialog = Some(Dialog {
            title: "Game paused",
            action: "Continue",
        });
    }

    fn on_resume(&mut self) {
        self.ring();
        self.dialog = None;
    }

    fn on_sound_toggled(&mut self, enabled: bool) {
        self.sound_on = enabled;
        self.ring();
    }
}

// ── Dialog overlay ────────────────────────────────────────────────────────────

fn draw_dialog<W: Write>(
    out: &mut W,
    dialog: &Dialog,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let action = format!("[Enter] {}   [Q] Quit", dialog.action);
    let inner = dialog.title.chars().count().max(action.chars().count()) + 4;
    let border = "═".repeat(inner);
    let lines = [
        format!("╔{}╗", border),
        format!("║{:^inner$}║", dialog.title),
        format!("║{:^inner$}║", action),
        format!("╚{}╝", border),
    ];

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(C_DIALOG))?;
    out.queue(style::SetBackgroundColor(Color::Black))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontend() -> TerminalFrontend {
        TerminalFrontend::new(80, 24, (10.0, 20.0), (60.0, 40.0), ScoreStore::Unavailable)
    }

    fn painted(frontend: &TerminalFrontend) -> usize {
        frontend.cells.iter().filter(|cell| cell.ch != ' ').count()
    }

    fn flushed(frontend: &mut TerminalFrontend) -> String {
        let mut out = Vec::new();
        frontend.flush(&mut out).unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    // ── Pixel mapping ─────────────────────────────────────────────────────────

    #[test]
    fn pixels_map_onto_cells() {
        let f = frontend();
        assert_eq!(f.cell_at(0.0, 0.0), Some((0, 0)));
        assert_eq!(f.cell_at(25.0, 45.0), Some((2, 2)));
        assert_eq!(f.cell_at(799.9, 479.9), Some((79, 23)));
    }

    #[test]
    fn pixels_outside_the_grid_have_no_cell() {
        let f = frontend();
        assert_eq!(f.cell_at(-0.5, 10.0), None);
        assert_eq!(f.cell_at(10.0, -0.5), None);
        assert_eq!(f.cell_at(800.0, 10.0), None);
        assert_eq!(f.cell_at(10.0, 480.0), None);
    }

    #[test]
    fn viewport_matches_the_grid() {
        let f = frontend();
        assert_eq!(f.viewport(), Viewport::new(800.0, 480.0));
    }

    // ── Sprites & HUD ─────────────────────────────────────────────────────────

    #[test]
    fn asteroid_covers_its_box_in_cells() {
        let mut f = frontend();
        f.draw_sprite(Sprite::Asteroid, 100.0, 100.0, None);
        // 60x60 px over 10x20 px cells.
        assert_eq!(painted(&f), 6 * 3);
    }

    #[test]
    fn sprite_is_clipped_at_the_left_edge() {
        let mut f = frontend();
        f.draw_sprite(Sprite::Asteroid, -30.0, 0.0, None);
        assert_eq!(painted(&f), 3 * 3);
    }

    #[test]
    fn sprite_is_clipped_at_the_right_edge() {
        let mut f = frontend();
        f.draw_sprite(Sprite::Asteroid, 780.0, 0.0, None);
        assert_eq!(painted(&f), 2 * 3);
    }

    #[test]
    fn sprite_fully_off_screen_paints_nothing() {
        let mut f = frontend();
        f.draw_sprite(Sprite::FuelTank, 10_000.0, 0.0, None);
        f.draw_sprite(Sprite::FuelTank, -200.0, 0.0, None);
        assert_eq!(painted(&f), 0);
    }

    #[test]
    fn ship_ends_in_its_nose() {
        let mut f = frontend();
        f.draw_sprite(Sprite::Ship, 0.0, 0.0, None);
        // 60x40 px: six columns, two rows.
        assert_eq!(f.cells[5].ch, '▶');
        assert_eq!(f.cells[0].ch, '═');
        assert_eq!(f.cells[80 + 5].ch, '▶');
        assert_eq!(painted(&f), 12);
    }

    #[test]
    fn glyphs_frame_each_sprite() {
        assert_eq!(sprite_glyph(Sprite::Asteroid, 0, 0, 6), '(');
        assert_eq!(sprite_glyph(Sprite::Asteroid, 5, 0, 6), ')');
        assert_eq!(sprite_glyph(Sprite::FuelTank, 0, 0, 6), '[');
        assert_eq!(sprite_glyph(Sprite::FuelTank, 1, 0, 6), 'F');
        assert_eq!(sprite_glyph(Sprite::FuelTank, 5, 0, 6), ']');
    }

    #[test]
    fn span_is_at_least_one_cell() {
        assert_eq!(TerminalFrontend::span(60.0, 10.0), 6);
        assert_eq!(TerminalFrontend::span(2.0, 20.0), 1);
    }

    #[test]
    fn fuel_bar_width_rounds_up_to_whole_cells() {
        let mut f = frontend();
        f.draw_filled_rect(20.0, 20.0, 100.0, 20.0, FuelColor::Green);
        assert_eq!(painted(&f), 10);
        assert_eq!(f.cells[80 + 2].ch, '█');
        assert_eq!(f.cells[80 + 2].fg, Color::Green);

        let mut f = frontend();
        f.draw_filled_rect(20.0, 20.0, 0.05, 20.0, FuelColor::Red);
        assert_eq!(painted(&f), 1);
    }

    #[test]
    fn empty_fuel_bar_paints_nothing() {
        let mut f = frontend();
        f.draw_filled_rect(20.0, 20.0, 0.0, 20.0, FuelColor::Red);
        assert_eq!(painted(&f), 0);
    }

    #[test]
    fn text_is_clipped_to_the_row() {
        let mut f = frontend();
        f.draw_text("Score: 12", 770.0, 0.0);
        assert_eq!(painted(&f), 3);
        assert_eq!(f.cells[77].ch, 'S');
    }

    // ── Resize ────────────────────────────────────────────────────────────────

    #[test]
    fn resize_keeps_the_frozen_frame() {
        let mut f = frontend();
        f.draw_sprite(Sprite::Asteroid, 0.0, 0.0, None);
        assert_eq!(painted(&f), 18);

        f.resize(800.0, 480.0);
        assert_eq!(painted(&f), 18);

        f.resize(400.0, 240.0);
        assert_eq!((f.cols, f.rows), (40, 12));
        assert_eq!(painted(&f), 18);
        assert_eq!(f.cells[0].ch, '(');
    }

    #[test]
    fn shrinking_drops_cells_past_the_new_edge() {
        let mut f = frontend();
        f.draw_sprite(Sprite::Asteroid, 780.0, 0.0, None);
        f.resize(400.0, 480.0);
        assert_eq!(painted(&f), 0);
        assert_eq!(f.cells.len(), 40 * 24);
    }

    #[test]
    fn resize_recovers_the_terminal_cell_count() {
        for cell_width in [7.3, 8.1, 9.7, 11.3] {
            let mut f = TerminalFrontend::new(
                80,
                24,
                (cell_width, 13.1),
                (60.0, 40.0),
                ScoreStore::Unavailable,
            );
            for cols in 1..300u16 {
                let (width, height) = f.pixels_for(cols, 37);
                f.resize(width, height);
                assert_eq!((f.cols, f.rows), (cols, 37), "cell width {cell_width}");
            }
        }
    }

    // ── Sound & prompts ───────────────────────────────────────────────────────

    #[test]
    fn muted_front_end_never_rings() {
        let mut f = frontend();
        f.on_collision();
        f.on_fuel_pickup();
        f.on_maneuver();
        f.on_pause();
        f.on_resume();
        assert_eq!(f.bells, 0);
        assert!(!flushed(&mut f).contains('\x07'));
    }

    #[test]
    fn cues_ring_once_sound_is_on() {
        let mut f = frontend();
        f.on_sound_toggled(true);
        assert_eq!(f.bells, 1);
        f.on_collision();
        f.on_pause();
        assert_eq!(f.bells, 3);

        assert!(flushed(&mut f).contains('\x07'));
        assert_eq!(f.bells, 0);
    }

    #[test]
    fn turning_sound_off_is_silent() {
        let mut f = frontend();
        f.sound_on = true;
        f.on_sound_toggled(false);
        assert_eq!(f.bells, 0);
    }

    #[test]
    fn pause_and_game_over_open_their_dialogs() {
        let mut f = frontend();
        f.on_pause();
        assert!(flushed(&mut f).contains("Game paused"));

        f.on_resume();
        assert_eq!(f.dialog, None);
        assert!(!flushed(&mut f).contains("Game paused"));

        f.on_game_over();
        assert!(flushed(&mut f).contains("Try again"));
    }

    #[test]
    fn sound_indicator_follows_the_toggle() {
        let mut f = frontend();
        assert!(flushed(&mut f).contains("sound off"));
        f.on_sound_toggled(true);
        assert!(flushed(&mut f).contains("sound on"));
    }
}
