use std::fs;

use space_dodger::error::GameError;
use space_dodger::frontend::HighScoreStore;
use space_dodger::store::{ScoreFile, ScoreStore};

#[test]
fn missing_file_reads_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let file = ScoreFile::new(dir.path().join("score"));
    assert_eq!(file.read().unwrap(), 0);
}

#[test]
fn written_score_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ScoreStore::open(Some(dir.path().join("score")));
    assert_eq!(store.load_high_score(), Some(0));
    store.save_high_score(1234);
    assert_eq!(store.load_high_score(), Some(1234));
    store.save_high_score(1300);
    assert_eq!(store.load_high_score(), Some(1300));
}

#[test]
fn surrounding_whitespace_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    fs::write(&path, "  77\n").unwrap();
    assert_eq!(ScoreFile::new(&path).read().unwrap(), 77);
}

#[test]
fn corrupt_file_is_an_error_but_the_store_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    fs::write(&path, "not a number").unwrap();

    let err = ScoreFile::new(&path).read().unwrap_err();
    assert!(matches!(err, GameError::ScoreParse { .. }));

    let mut store = ScoreStore::open(Some(path));
    assert_eq!(store.load_high_score(), Some(0));
}

#[test]
fn unwritable_location_does_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be makes the write fail.
    let path = dir.path().join("score");
    fs::create_dir(&path).unwrap();
    let mut store = ScoreStore::open(Some(path));
    store.save_high_score(10);
}

#[test]
fn unavailable_store_has_no_score() {
    let mut store = ScoreStore::Unavailable;
    assert_eq!(store.load_high_score(), None);
    store.save_high_score(10);
    assert_eq!(store.load_high_score(), None);
}
