/// All game entity types: plain data. The rules live in `field`, `ship`
/// and `session`.

use crate::constants::{
    ASTEROID_HEIGHT, ASTEROID_WIDTH, FUEL_GREEN_ABOVE, FUEL_TANK_HEIGHT, FUEL_TANK_WIDTH,
    FUEL_YELLOW_ABOVE,
};
use crate::geometry::Rect;

/// Which image the front end should paint. Pool entities share one sprite
/// per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Ship,
    Asteroid,
    FuelTank,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    Paused,
    GameOver,
}

/// Fuel bar colour band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FuelColor {
    Green,
    Yellow,
    Red,
}

impl FuelColor {
    pub fn for_quantity(fuel: f64) -> Self {
        if fuel > FUEL_GREEN_ABOVE {
            FuelColor::Green
        } else if fuel > FUEL_YELLOW_ABOVE {
            FuelColor::Yellow
        } else {
            FuelColor::Red
        }
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f64,
    pub y: f64,
    /// Sprite box, fixed for the lifetime of the session.
    pub width: f64,
    pub height: f64,
}

impl Ship {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Pool entities ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub x: f64,
    pub y: f64,
}

impl Asteroid {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ASTEROID_WIDTH, ASTEROID_HEIGHT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuelTank {
    pub x: f64,
    pub y: f64,
}

impl FuelTank {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, FUEL_TANK_WIDTH, FUEL_TANK_HEIGHT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// 1 to 3 pixels.
    pub size: u8,
    /// Close stars scroll faster (parallax).
    pub is_close: bool,
}

// ── Session status ────────────────────────────────────────────────────────────

/// Score, fuel and lifecycle bookkeeping for one session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameStatus {
    pub score: u32,
    /// `None` when the front end has no persistence; stays `None` for the
    /// whole session in that case.
    pub high_score: Option<u32>,
    pub fuel: f64,
    pub lifecycle: Lifecycle,
    pub sound_enabled: bool,
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }
}
