/// High-score persistence backed by a single text file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{GameError, GameResult};
use crate::frontend::HighScoreStore;

const SCORE_FILE_NAME: &str = ".space_dodger_score";

/// `$HOME/.space_dodger_score`, or `None` when there is no home directory to
/// put it in.
pub fn default_score_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(SCORE_FILE_NAME))
}

#[derive(Clone, Debug)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as 0.
    pub fn read(&self) -> GameResult<u32> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        contents
            .trim()
            .parse()
            .map_err(|_| GameError::ScoreParse {
                path: self.path.clone(),
                contents: contents.trim().to_string(),
            })
    }

    pub fn write(&self, score: u32) -> GameResult<()> {
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

/// The store handed to the session. Failures are logged and never reach the
/// game: an unreadable file counts as no score yet, a failed write is lost.
#[derive(Clone, Debug)]
pub enum ScoreStore {
    File(ScoreFile),
    Unavailable,
}

impl ScoreStore {
    /// File store at `path`, falling back to the default location, or
    /// `Unavailable` if neither exists.
    pub fn open(path: Option<PathBuf>) -> Self {
        match path.or_else(default_score_path) {
            Some(path) => ScoreStore::File(ScoreFile::new(path)),
            None => ScoreStore::Unavailable,
        }
    }
}

impl HighScoreStore for ScoreStore {
    fn load_high_score(&mut self) -> Option<u32> {
        match self {
            ScoreStore::File(file) => match file.read() {
                Ok(score) => Some(score),
                Err(err) => {
                    warn!("ignoring stored high score: {err}");
                    Some(0)
                }
            },
            ScoreStore::Unavailable => None,
        }
    }

    fn save_high_score(&mut self, score: u32) {
        if let ScoreStore::File(file) = self {
            if let Err(err) = file.write(score) {
                warn!("could not save high score to {}: {err}", file.path().display());
            }
        }
    }
}
