/// The seam between the game core and whatever presents it.
///
/// The session owns one [`Frontend`] and calls into it; the front end in turn
/// drives the session through [`crate::session::Command`]s. Notifications are
/// fire-and-forget: the core never looks at their outcome.

use crate::entities::{FuelColor, Sprite};
use crate::geometry::Viewport;

pub trait RenderSurface {
    /// Current drawing-surface size, read once per redraw.
    fn viewport(&self) -> Viewport;

    /// Resize the drawing surface itself.
    fn resize(&mut self, width: f64, height: f64);

    fn clear_and_paint_background(&mut self, width: f64, height: f64);

    /// Draw `sprite` with its top-left corner at (`x`, `y`). `size` scales the
    /// image; `None` draws it at its natural size.
    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64, size: Option<(f64, f64)>);

    fn draw_text(&mut self, text: &str, x: f64, y: f64);

    fn draw_filled_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: FuelColor);

    fn draw_star(&mut self, x: f64, y: f64, size: u8);
}

/// Key-value persistence for the single high-score scalar.
pub trait HighScoreStore {
    /// `None` means persistence is not available at all; `Some(0)` means it is
    /// available but nothing has been saved yet.
    fn load_high_score(&mut self) -> Option<u32>;

    fn save_high_score(&mut self, score: u32);
}

/// Sound cues and modal prompts.
pub trait Notifier {
    fn on_collision(&mut self);
    fn on_fuel_pickup(&mut self);
    fn on_maneuver(&mut self);
    fn on_game_over(&mut self);
    fn on_pause(&mut self);
    fn on_resume(&mut self);
    fn on_sound_toggled(&mut self, enabled: bool);
}

/// Everything the session needs from its presentation layer.
pub trait Frontend: RenderSurface + HighScoreStore + Notifier {}

impl<T: RenderSurface + HighScoreStore + Notifier> Frontend for T {}
