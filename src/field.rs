/// The scrolling background: fixed-size pools of stars, asteroids and fuel
/// tanks that are recycled in place instead of being destroyed.
///
/// Every function that needs randomness takes the RNG as a parameter so
/// callers control determinism (tests use a seeded `StdRng`).

use rand::Rng;

use crate::constants::{
    ASTEROID_COUNT, CLOSE_STAR_EVERY, CLOSE_STAR_STEP, FAR_STAR_STEP, FUEL_TANK_COUNT,
    ROCK_DESPAWN_X, ROCK_RESPAWN_MARGIN, ROCK_SCROLL_STEP, ROCK_SPAWN_LIFT, STAR_COUNT,
    STAR_RESPAWN_MARGIN,
};
use crate::entities::{Asteroid, FuelTank, Star};
use crate::geometry::Viewport;

/// `base + random · span`, truncated toward zero.
pub fn random_coord(rng: &mut impl Rng, base: f64, span: f64) -> f64 {
    (base + rng.gen::<f64>() * span).trunc()
}

#[derive(Clone, Debug)]
pub struct EntityField {
    pub stars: Vec<Star>,
    pub asteroids: Vec<Asteroid>,
    pub fuel_tanks: Vec<FuelTank>,
}

// ── Seeding ──────────────────────────────────────────────────────────────────

impl EntityField {
    /// Fresh pools for a new run. Rocks start off-screen to the right, stars
    /// are spread over the visible area.
    pub fn seed(viewport: Viewport, rng: &mut impl Rng) -> Self {
        let Viewport { width, height } = viewport;

        let stars = (0..STAR_COUNT)
            .map(|i| {
                let size = (1.0 + rng.gen::<f64>() * 3.0).trunc() as u8;
                Star {
                    size,
                    x: random_coord(rng, 0.0, width),
                    y: random_coord(rng, 0.0, height),
                    is_close: i % CLOSE_STAR_EVERY == 0,
                }
            })
            .collect();

        let asteroids = (0..ASTEROID_COUNT)
            .map(|_| Asteroid {
                x: random_coord(rng, width, width),
                y: random_coord(rng, -ROCK_SPAWN_LIFT, height),
            })
            .collect();

        let fuel_tanks = (0..FUEL_TANK_COUNT)
            .map(|_| FuelTank {
                x: random_coord(rng, width, width),
                y: random_coord(rng, -ROCK_SPAWN_LIFT, height),
            })
            .collect();

        EntityField {
            stars,
            asteroids,
            fuel_tanks,
        }
    }
}

// ── Scroll ticks ─────────────────────────────────────────────────────────────
//
// Each entity is either respawned or moved in a given tick, never both: the
// off-screen test looks at the position from the previous tick.

fn respawn_x(viewport: Viewport) -> f64 {
    viewport.width + ROCK_RESPAWN_MARGIN
}

impl EntityField {
    pub fn scroll_stars(&mut self, viewport: Viewport) {
        for star in &mut self.stars {
            if star.x < 0.0 {
                star.x = viewport.width + STAR_RESPAWN_MARGIN;
            } else if star.is_close {
                star.x -= CLOSE_STAR_STEP;
            } else {
                star.x -= FAR_STAR_STEP;
            }
        }
    }

    pub fn scroll_asteroids(&mut self, viewport: Viewport, rng: &mut impl Rng) {
        for asteroid in &mut self.asteroids {
            if asteroid.x < ROCK_DESPAWN_X {
                asteroid.x = respawn_x(viewport);
                asteroid.y = random_coord(rng, 0.0, viewport.height);
            } else {
                asteroid.x -= ROCK_SCROLL_STEP;
            }
        }
    }

    pub fn scroll_fuel_tanks(&mut self, viewport: Viewport, rng: &mut impl Rng) {
        for tank in &mut self.fuel_tanks {
            if tank.x < ROCK_DESPAWN_X {
                tank.x = respawn_x(viewport);
                tank.y = random_coord(rng, 0.0, viewport.height);
            } else {
                tank.x -= ROCK_SCROLL_STEP;
            }
        }
    }

    /// Move a consumed tank off-screen right away so it cannot be picked up
    /// twice. Out-of-range indices are ignored.
    pub fn relocate_tank(&mut self, index: usize, viewport: Viewport, rng: &mut impl Rng) {
        if let Some(tank) = self.fuel_tanks.get_mut(index) {
            tank.x = respawn_x(viewport);
            tank.y = random_coord(rng, 0.0, viewport.height);
        }
    }
}
