/// Gameplay constants. Sizes and positions are in pixels.

// ── Pools ────────────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 100;
pub const ASTEROID_COUNT: usize = 5;
pub const FUEL_TANK_COUNT: usize = 2;

/// Every n-th star (by creation order) scrolls with the faster parallax layer.
pub const CLOSE_STAR_EVERY: usize = 10;

// ── Sprite boxes ─────────────────────────────────────────────────────────────

pub const ASTEROID_WIDTH: f64 = 60.0;
pub const ASTEROID_HEIGHT: f64 = 60.0;
pub const FUEL_TANK_WIDTH: f64 = 60.0;
pub const FUEL_TANK_HEIGHT: f64 = 63.0;

// ── Scrolling ────────────────────────────────────────────────────────────────

pub const ROCK_SCROLL_STEP: f64 = 10.0;
pub const CLOSE_STAR_STEP: f64 = 1.5;
pub const FAR_STAR_STEP: f64 = 0.5;

/// Asteroids and tanks left of this x are recycled.
pub const ROCK_DESPAWN_X: f64 = -60.0;
/// Initial spawn lifts rocks this far above the random y.
pub const ROCK_SPAWN_LIFT: f64 = 60.0;
/// Recycled rocks re-enter this far past the right edge.
pub const ROCK_RESPAWN_MARGIN: f64 = 100.0;
pub const STAR_RESPAWN_MARGIN: f64 = 5.0;

// ── Ship ─────────────────────────────────────────────────────────────────────

pub const SHIP_STEP: f64 = 100.0;
pub const SHIP_START_X: f64 = 60.0;

// ── Fuel & score ─────────────────────────────────────────────────────────────

pub const FUEL_CAPACITY: f64 = 120.0;
pub const INITIAL_FUEL: f64 = 100.0;
pub const FUEL_BURN_PER_REDRAW: f64 = 0.1;
pub const FUEL_PER_TANK: f64 = 10.0;
pub const FUEL_GREEN_ABOVE: f64 = 70.0;
pub const FUEL_YELLOW_ABOVE: f64 = 30.0;

// ── HUD layout ───────────────────────────────────────────────────────────────

pub const FUEL_BAR_X: f64 = 20.0;
pub const FUEL_BAR_Y: f64 = 20.0;
pub const FUEL_BAR_HEIGHT: f64 = 20.0;
pub const SCORE_TEXT_X: f64 = 20.0;
pub const SCORE_TEXT_Y: f64 = 65.0;
pub const HIGH_SCORE_TEXT_Y: f64 = 90.0;
