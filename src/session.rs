/// The game state machine.
///
/// A [`GameSession`] owns every piece of mutable game state together with its
/// front end. It is advanced from outside: the loop driver calls [`tick`] once
/// per displayed frame and the scroll updates on their own timers, and the
/// front end feeds player input through [`handle`].
///
/// [`tick`]: GameSession::tick
/// [`handle`]: GameSession::handle

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{
    ASTEROID_HEIGHT, ASTEROID_WIDTH, FUEL_BAR_HEIGHT, FUEL_BAR_X, FUEL_BAR_Y,
    FUEL_BURN_PER_REDRAW, FUEL_CAPACITY, FUEL_PER_TANK, FUEL_TANK_HEIGHT, FUEL_TANK_WIDTH,
    HIGH_SCORE_TEXT_Y, INITIAL_FUEL, SCORE_TEXT_X, SCORE_TEXT_Y,
};
use crate::entities::{FuelColor, GameStatus, Lifecycle, Ship, Sprite};
use crate::field::EntityField;
use crate::frontend::Frontend;
use crate::geometry::{overlaps, Viewport};

/// Player and UI commands. Commands that make no sense in the current
/// lifecycle state are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Pause,
    Resume,
    /// Pause when running, resume otherwise.
    TogglePause,
    Restart,
    ToggleSound,
}

/// Identifies one scheduled render tick. Scheduling hands out a fresh token;
/// cancelling drops it, which turns any tick still carrying it into a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken(u64);

#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Ship sprite box in pixels.
    pub ship_width: f64,
    pub ship_height: f64,
    pub draw_stars: bool,
    pub sound_enabled: bool,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            ship_width: 60.0,
            ship_height: 40.0,
            draw_stars: true,
            sound_enabled: false,
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GameOverCause {
    Collision,
    OutOfFuel,
}

pub struct GameSession<F: Frontend> {
    pub status: GameStatus,
    pub ship: Ship,
    pub field: EntityField,
    frontend: F,
    options: SessionOptions,
    rng: StdRng,
    pending_frame: Option<FrameToken>,
    next_token: u64,
    /// Last value known to be in the store, so game over only writes
    /// improvements.
    stored_high_score: Option<u32>,
}

// ── Construction & (re)initialisation ────────────────────────────────────────

impl<F: Frontend> GameSession<F> {
    /// Read the persisted high score, seed the first run and schedule its
    /// first tick.
    pub fn new(mut frontend: F, options: SessionOptions) -> Self {
        let viewport = frontend.viewport();
        let high_score = frontend.load_high_score();
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        match high_score {
            Some(score) => info!("loaded high score {score}"),
            None => info!("high score persistence unavailable"),
        }

        let mut session = GameSession {
            status: GameStatus {
                score: 0,
                high_score,
                fuel: INITIAL_FUEL,
                lifecycle: Lifecycle::Running,
                sound_enabled: options.sound_enabled,
            },
            ship: Ship::new(options.ship_width, options.ship_height, viewport),
            field: EntityField::seed(viewport, &mut rng),
            frontend,
            options,
            rng,
            pending_frame: None,
            next_token: 0,
            stored_high_score: high_score,
        };
        if session.status.sound_enabled {
            session.frontend.on_sound_toggled(true);
        }
        session.init();
        session
    }

    /// Start a fresh run: new pools, ship back at the start, full-ish tank.
    /// The high score and sound preference carry over.
    fn init(&mut self) {
        let viewport = self.frontend.viewport();
        self.field = EntityField::seed(viewport, &mut self.rng);
        self.ship.reset(viewport);
        self.status.fuel = INITIAL_FUEL;
        self.status.score = 0;
        self.status.lifecycle = Lifecycle::Running;

        self.paint_backdrop(viewport);
        self.paint_score();
        self.schedule_tick();
        info!("run started in a {}x{} viewport", viewport.width, viewport.height);
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.status.lifecycle
    }

    /// The render tick the driver should deliver next, if any.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending_frame
    }

    fn schedule_tick(&mut self) {
        self.next_token += 1;
        self.pending_frame = Some(FrameToken(self.next_token));
    }

    fn cancel_tick(&mut self) {
        self.pending_frame = None;
    }
}

// ── Render tick ──────────────────────────────────────────────────────────────

impl<F: Frontend> GameSession<F> {
    /// One animation frame: crash check, fuel pickup, ship draw, reschedule.
    /// Returns `false` when `token` is not the pending tick (it was cancelled
    /// or already delivered) and nothing happened.
    pub fn tick(&mut self, token: FrameToken) -> bool {
        if self.pending_frame != Some(token) {
            debug!("dropping stale tick {:?}", token);
            return false;
        }
        self.pending_frame = None;
        if !self.status.is_running() {
            return false;
        }

        let ship = self.ship.bounds();
        if self
            .field
            .asteroids
            .iter()
            .any(|asteroid| overlaps(asteroid.bounds(), ship))
        {
            self.game_over(GameOverCause::Collision);
            return true;
        }

        let viewport = self.frontend.viewport();
        for index in 0..self.field.fuel_tanks.len() {
            if overlaps(self.field.fuel_tanks[index].bounds(), ship) {
                self.tank_up(index, viewport);
            }
        }

        self.frontend.draw_sprite(Sprite::Ship, self.ship.x, self.ship.y, None);
        self.schedule_tick();
        true
    }

    fn tank_up(&mut self, index: usize, viewport: Viewport) {
        self.status.fuel = (self.status.fuel + FUEL_PER_TANK).min(FUEL_CAPACITY);
        self.field.relocate_tank(index, viewport, &mut self.rng);
        if self.status.sound_enabled {
            self.frontend.on_fuel_pickup();
        }
        debug!("fuel tank collected, fuel now {:.1}", self.status.fuel);
    }

    fn game_over(&mut self, cause: GameOverCause) {
        info!("game over ({:?}) with score {}", cause, self.status.score);
        self.status.lifecycle = Lifecycle::GameOver;
        self.status.score = 0;
        self.cancel_tick();
        self.frontend.on_game_over();

        if let Some(high) = self.status.high_score {
            let improved = high > 0 && self.stored_high_score.map_or(true, |stored| high > stored);
            if improved {
                self.frontend.save_high_score(high);
                self.stored_high_score = Some(high);
                info!("new high score {high} saved");
            }
        }

        if cause == GameOverCause::Collision && self.status.sound_enabled {
            self.frontend.on_collision();
        }
    }
}

// ── Background redraw & scroll updates ───────────────────────────────────────

impl<F: Frontend> GameSession<F> {
    /// Repaint the backdrop and HUD, burn fuel and award a point. Does nothing
    /// unless the game is running, so a paused or ended game keeps its last
    /// frame on screen.
    pub fn redraw_background(&mut self) {
        if !self.status.is_running() {
            return;
        }
        let viewport = self.frontend.viewport();
        self.paint_backdrop(viewport);

        self.status.fuel -= FUEL_BURN_PER_REDRAW;
        if self.status.fuel <= 0.0 {
            self.status.fuel = 0.0;
            self.game_over(GameOverCause::OutOfFuel);
            return;
        }

        self.paint_score();
        self.status.score += 1;
        if let Some(high) = self.status.high_score.as_mut() {
            if self.status.score > *high {
                *high = self.status.score;
            }
        }
    }

    pub fn scroll_stars(&mut self) {
        if self.status.is_running() {
            let viewport = self.frontend.viewport();
            self.field.scroll_stars(viewport);
        }
    }

    pub fn scroll_asteroids(&mut self) {
        if self.status.is_running() {
            let viewport = self.frontend.viewport();
            self.field.scroll_asteroids(viewport, &mut self.rng);
        }
    }

    pub fn scroll_fuel_tanks(&mut self) {
        if self.status.is_running() {
            let viewport = self.frontend.viewport();
            self.field.scroll_fuel_tanks(viewport, &mut self.rng);
        }
    }

    /// Resize the surface and repaint in the new dimensions.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.frontend.resize(width, height);
        self.redraw_background();
    }

    fn paint_backdrop(&mut self, viewport: Viewport) {
        self.frontend.clear_and_paint_background(viewport.width, viewport.height);

        if self.options.draw_stars {
            for star in &self.field.stars {
                self.frontend.draw_star(star.x, star.y, star.size);
            }
        }
        for asteroid in &self.field.asteroids {
            self.frontend.draw_sprite(
                Sprite::Asteroid,
                asteroid.x,
                asteroid.y,
                Some((ASTEROID_WIDTH, ASTEROID_HEIGHT)),
            );
        }
        for tank in &self.field.fuel_tanks {
            self.frontend.draw_sprite(
                Sprite::FuelTank,
                tank.x,
                tank.y,
                Some((FUEL_TANK_WIDTH, FUEL_TANK_HEIGHT)),
            );
        }

        let fuel = self.status.fuel;
        self.frontend.draw_filled_rect(
            FUEL_BAR_X,
            FUEL_BAR_Y,
            fuel,
            FUEL_BAR_HEIGHT,
            FuelColor::for_quantity(fuel),
        );
    }

    fn paint_score(&mut self) {
        let score = format!("Score: {}", self.status.score);
        self.frontend.draw_text(&score, SCORE_TEXT_X, SCORE_TEXT_Y);
        if let Some(high) = self.status.high_score.filter(|&high| high > 0) {
            let line = format!("High score: {high}");
            self.frontend.draw_text(&line, SCORE_TEXT_X, HIGH_SCORE_TEXT_Y);
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────────────

impl<F: Frontend> GameSession<F> {
    /// Apply a command. Returns `false` when the command was ignored because
    /// it does not apply in the current state.
    pub fn handle(&mut self, command: Command) -> bool {
        let applied = match command {
            Command::MoveUp | Command::MoveDown | Command::MoveLeft | Command::MoveRight => {
                self.steer(command)
            }
            Command::Pause => self.pause(),
            Command::Resume | Command::Restart => self.resume(command),
            Command::TogglePause => {
                if self.status.is_running() {
                    self.pause()
                } else {
                    self.resume(Command::Resume)
                }
            }
            Command::ToggleSound => {
                self.status.sound_enabled = !self.status.sound_enabled;
                self.frontend.on_sound_toggled(self.status.sound_enabled);
                true
            }
        };
        if !applied {
            debug!("ignored {:?} while {:?}", command, self.status.lifecycle);
        }
        applied
    }

    fn steer(&mut self, command: Command) -> bool {
        if !self.status.is_running() {
            return false;
        }
        let viewport = self.frontend.viewport();
        match command {
            Command::MoveUp => self.ship.move_up(),
            Command::MoveDown => self.ship.move_down(viewport),
            Command::MoveLeft => self.ship.move_left(),
            Command::MoveRight => self.ship.move_right(viewport),
            _ => return false,
        }
        if self.status.sound_enabled {
            self.frontend.on_maneuver();
        }
        self.redraw_background();
        true
    }

    fn pause(&mut self) -> bool {
        if !self.status.is_running() {
            return false;
        }
        self.status.lifecycle = Lifecycle::Paused;
        self.cancel_tick();
        self.frontend.on_pause();
        info!("paused");
        true
    }

    fn resume(&mut self, command: Command) -> bool {
        match (self.status.lifecycle, command) {
            (Lifecycle::Paused, Command::Resume) => {
                self.status.lifecycle = Lifecycle::Running;
                self.schedule_tick();
                info!("resumed");
            }
            (Lifecycle::GameOver, _) => self.init(),
            _ => return false,
        }
        self.frontend.on_resume();
        true
    }
}
