mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand, QueueableCommand,
};
use log::{info, warn};

use space_dodger::config::GameConfig;
use space_dodger::driver::LoopDriver;
use space_dodger::error::GameResult;
use space_dodger::session::{Command, GameSession};
use space_dodger::store::ScoreStore;

use display::TerminalFrontend;

/// Upper bound on one idle sleep so input stays responsive.
const MAX_SLEEP: Duration = Duration::from_millis(10);

#[derive(Parser)]
#[command(name = "space_dodger")]
#[command(about = "Dodge asteroids, grab fuel, and keep flying")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = "space_dodger.toml")]
    config: PathBuf,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Start with sound (terminal bell) enabled
    #[arg(long)]
    sound: bool,

    /// Do not read or write the high-score file
    #[arg(long)]
    no_persist: bool,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw alternate-screen mode while playing, so logs go to
/// a file or nowhere.
fn init_logging(path: Option<&PathBuf>) -> GameResult<()> {
    if let Some(path) = path {
        let file = File::create(path)?;
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Input {
    Command(Command),
    Resize(u16, u16),
    Quit,
}

fn map_event(event: Event) -> Option<Input> {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => {
            let command = match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Some(Input::Quit)
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Input::Quit),
                KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::MoveUp,
                KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::MoveDown,
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::MoveLeft,
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::MoveRight,
                KeyCode::Esc => Command::TogglePause,
                KeyCode::Char('p') | KeyCode::Char('P') => Command::Pause,
                // The dialog's action button: continue or try again.
                KeyCode::Enter => Command::Resume,
                KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
                KeyCode::Char('m') | KeyCode::Char('M') => Command::ToggleSound,
                _ => return None,
            };
            Some(Input::Command(command))
        }
        Event::Resize(cols, rows) => Some(Input::Resize(cols, rows)),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession<TerminalFrontend>,
    driver: &mut LoopDriver,
    rx: &mpsc::Receiver<Event>,
) -> GameResult<()> {
    let start = Instant::now();
    session.frontend_mut().flush(out)?;

    loop {
        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            match map_event(event) {
                Some(Input::Quit) => return Ok(()),
                Some(Input::Command(command)) => {
                    session.handle(command);
                }
                Some(Input::Resize(cols, rows)) => {
                    out.queue(terminal::Clear(terminal::ClearType::All))?;
                    let (width, height) = session.frontend().pixels_for(cols, rows);
                    session.on_resize(width, height);
                }
                None => {}
            }
        }

        // Background redraws erase the ship until the next render tick puts
        // it back, so the screen is only written on frame boundaries.
        let fired = driver.advance(session, start.elapsed());
        if fired.frame {
            session.frontend_mut().flush(out)?;
        }

        let next = driver.next_deadline();
        let now = start.elapsed();
        if next > now {
            thread::sleep((next - now).min(MAX_SLEEP));
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> GameResult<()> {
    let args = Args::parse();
    let mut config = GameConfig::load(&args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.sound {
        config.audio.sound_on_start = true;
    }
    if args.no_persist {
        config.storage.persist = false;
    }
    if args.log_file.is_some() {
        config.log_file = args.log_file.clone();
    }
    init_logging(config.log_file.as_ref())?;

    let store = if config.storage.persist {
        ScoreStore::open(config.storage.high_score_file.clone())
    } else {
        ScoreStore::Unavailable
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config, store);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        warn!("exiting with error: {err}");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    store: ScoreStore,
) -> GameResult<()> {
    let (cols, rows) = terminal::size()?;
    let display = &config.display;
    let frontend = TerminalFrontend::new(
        cols,
        rows,
        (display.cell_width, display.cell_height),
        (display.ship_width, display.ship_height),
        store,
    );

    let options = config.session_options();
    info!("starting in a {cols}x{rows} terminal");

    let mut session = GameSession::new(frontend, options);
    let mut driver = LoopDriver::new(config.cadence());
    game_loop(out, &mut session, &mut driver, rx)
}
