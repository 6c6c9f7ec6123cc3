/// Ship movement. Each command moves one fixed step and clamps the ship to
/// the viewport; whether a command is allowed at all is decided by the
/// session.

use crate::constants::{SHIP_START_X, SHIP_STEP};
use crate::entities::Ship;
use crate::geometry::Viewport;

impl Ship {
    /// A ship at the start position for `viewport`.
    pub fn new(width: f64, height: f64, viewport: Viewport) -> Self {
        let mut ship = Ship {
            x: 0.0,
            y: 0.0,
            width,
            height,
        };
        ship.reset(viewport);
        ship
    }

    pub fn reset(&mut self, viewport: Viewport) {
        self.x = SHIP_START_X;
        self.y = viewport.height / 2.0;
    }

    pub fn move_up(&mut self) {
        self.y = if self.y - SHIP_STEP > 0.0 {
            self.y - SHIP_STEP
        } else {
            0.0
        };
    }

    pub fn move_down(&mut self, viewport: Viewport) {
        let floor = viewport.height - self.height;
        self.y = if self.y + SHIP_STEP < floor {
            self.y + SHIP_STEP
        } else {
            floor
        };
    }

    pub fn move_left(&mut self) {
        self.x = if self.x - SHIP_STEP > 0.0 {
            self.x - SHIP_STEP
        } else {
            0.0
        };
    }

    pub fn move_right(&mut self, viewport: Viewport) {
        let wall = viewport.width - self.width;
        self.x = if self.x + SHIP_STEP < wall {
            self.x + SHIP_STEP
        } else {
            wall
        };
    }
}
