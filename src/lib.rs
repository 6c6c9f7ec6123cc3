//! Space Dodger: steer a ship through an asteroid field, grab fuel tanks, and
//! keep the engines burning for as long as possible.
//!
//! The library holds the game core. Presentation (drawing, sound, prompts,
//! score persistence) is supplied by whoever implements [`frontend::Frontend`].

pub mod config;
pub mod constants;
pub mod driver;
pub mod entities;
pub mod error;
pub mod field;
pub mod frontend;
pub mod geometry;
pub mod session;
pub mod ship;
pub mod store;
