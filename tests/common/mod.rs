#![allow(dead_code)]

use space_dodger::entities::{FuelColor, Sprite};
use space_dodger::frontend::{HighScoreStore, Notifier, RenderSurface};
use space_dodger::geometry::Viewport;
use space_dodger::session::{GameSession, SessionOptions};

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 600.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Background,
    Sprite(Sprite, f64, f64),
    Text(String),
    FuelBar(f64, FuelColor),
    Star,
    Collision,
    FuelPickup,
    Maneuver,
    GameOver,
    Pause,
    Resume,
    SoundToggled(bool),
}

/// A front end that records every call the session makes into it.
#[derive(Debug)]
pub struct RecordingFrontend {
    pub viewport: Viewport,
    pub calls: Vec<Call>,
    /// `None` models a front end without persistence.
    pub stored: Option<u32>,
    pub saves: Vec<u32>,
}

impl RecordingFrontend {
    pub fn new(stored: Option<u32>) -> Self {
        RecordingFrontend {
            viewport: Viewport::new(WIDTH, HEIGHT),
            calls: Vec::new(),
            stored,
            saves: Vec::new(),
        }
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn ship_draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Sprite(Sprite::Ship, _, _)))
            .count()
    }
}

impl RenderSurface for RecordingFrontend {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    fn clear_and_paint_background(&mut self, _width: f64, _height: f64) {
        self.calls.push(Call::Background);
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64, _size: Option<(f64, f64)>) {
        self.calls.push(Call::Sprite(sprite, x, y));
    }

    fn draw_text(&mut self, text: &str, _x: f64, _y: f64) {
        self.calls.push(Call::Text(text.to_string()));
    }

    fn draw_filled_rect(&mut self, _x: f64, _y: f64, w: f64, _h: f64, color: FuelColor) {
        self.calls.push(Call::FuelBar(w, color));
    }

    fn draw_star(&mut self, _x: f64, _y: f64, _size: u8) {
        self.calls.push(Call::Star);
    }
}

impl HighScoreStore for RecordingFrontend {
    fn load_high_score(&mut self) -> Option<u32> {
        self.stored
    }

    fn save_high_score(&mut self, score: u32) {
        self.stored = Some(score);
        self.saves.push(score);
    }
}

impl Notifier for RecordingFrontend {
    fn on_collision(&mut self) {
        self.calls.push(Call::Collision);
    }

    fn on_fuel_pickup(&mut self) {
        self.calls.push(Call::FuelPickup);
    }

    fn on_maneuver(&mut self) {
        self.calls.push(Call::Maneuver);
    }

    fn on_game_over(&mut self) {
        self.calls.push(Call::GameOver);
    }

    fn on_pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn on_resume(&mut self) {
        self.calls.push(Call::Resume);
    }

    fn on_sound_toggled(&mut self, enabled: bool) {
        self.calls.push(Call::SoundToggled(enabled));
    }
}

pub fn options() -> SessionOptions {
    SessionOptions {
        seed: Some(42),
        ..SessionOptions::default()
    }
}

/// A seeded session whose store starts with `stored`.
pub fn session_with_store(stored: Option<u32>) -> GameSession<RecordingFrontend> {
    GameSession::new(RecordingFrontend::new(stored), options())
}

pub fn session() -> GameSession<RecordingFrontend> {
    session_with_store(Some(0))
}

/// Move every asteroid and tank far off-screen so only the test's own
/// placements can collide with the ship.
pub fn park_rocks(session: &mut GameSession<RecordingFrontend>) {
    for asteroid in &mut session.field.asteroids {
        asteroid.x = 10_000.0;
        asteroid.y = 0.0;
    }
    for tank in &mut session.field.fuel_tanks {
        tank.x = 10_000.0;
        tank.y = 0.0;
    }
}

/// Deliver the pending render tick.
pub fn tick(session: &mut GameSession<RecordingFrontend>) -> bool {
    match session.pending_frame() {
        Some(token) => session.tick(token),
        None => false,
    }
}
