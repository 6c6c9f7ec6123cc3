/// Loop driver: delivers render ticks at the frame cadence and runs the three
/// scroll timers on theirs.
///
/// The driver never reads a clock itself. Callers pass the elapsed time since
/// start, which keeps it deterministic under test.

use std::time::Duration;

use crate::frontend::Frontend;
use crate::session::GameSession;

/// Cadences for the loop driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cadence {
    pub frame: Duration,
    pub stars: Duration,
    pub asteroids: Duration,
    pub fuel_tanks: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Cadence {
            frame: Duration::from_millis(33), // ≈30 FPS
            stars: Duration::from_millis(200),
            asteroids: Duration::from_millis(100),
            fuel_tanks: Duration::from_millis(100),
        }
    }
}

/// A repeating timer. A late poll fires once and restarts the period from
/// the poll time rather than bursting to catch up.
#[derive(Clone, Copy, Debug)]
pub struct PeriodicTimer {
    interval: Duration,
    next_due: Duration,
}

impl PeriodicTimer {
    /// First firing one full `interval` after `start`.
    pub fn new(interval: Duration, start: Duration) -> Self {
        PeriodicTimer {
            interval,
            next_due: start + interval,
        }
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// True if the timer fired at `now`.
    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}

/// What a single [`LoopDriver::advance`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fired {
    pub frame: bool,
    pub stars: bool,
    pub asteroids: bool,
    pub fuel_tanks: bool,
}

pub struct LoopDriver {
    frame: PeriodicTimer,
    stars: PeriodicTimer,
    asteroids: PeriodicTimer,
    fuel_tanks: PeriodicTimer,
}

impl LoopDriver {
    pub fn new(cadence: Cadence) -> Self {
        let start = Duration::ZERO;
        LoopDriver {
            frame: PeriodicTimer::new(cadence.frame, start),
            stars: PeriodicTimer::new(cadence.stars, start),
            asteroids: PeriodicTimer::new(cadence.asteroids, start),
            fuel_tanks: PeriodicTimer::new(cadence.fuel_tanks, start),
        }
    }

    /// Run everything due at `now`. Scroll timers go first so the ship is
    /// drawn over the freshest backdrop; each scroll is followed by its
    /// background redraw. The timers keep running in every lifecycle state,
    /// the session turns their work into no-ops unless the game is running.
    pub fn advance<F: Frontend>(&mut self, session: &mut GameSession<F>, now: Duration) -> Fired {
        let mut fired = Fired::default();

        if self.stars.poll(now) {
            session.scroll_stars();
            session.redraw_background();
            fired.stars = true;
        }
        if self.asteroids.poll(now) {
            session.scroll_asteroids();
            session.redraw_background();
            fired.asteroids = true;
        }
        if self.fuel_tanks.poll(now) {
            session.scroll_fuel_tanks();
            session.redraw_background();
            fired.fuel_tanks = true;
        }
        if self.frame.poll(now) {
            if let Some(token) = session.pending_frame() {
                session.tick(token);
            }
            fired.frame = true;
        }

        fired
    }

    /// Earliest time at which [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&self) -> Duration {
        self.frame
            .next_due()
            .min(self.stars.next_due())
            .min(self.asteroids.next_due())
            .min(self.fuel_tanks.next_due())
    }
}
