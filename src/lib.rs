//! Flappy Owl - terminal side-scrolling avoidance game.
//!
//! The library holds everything except drawing: the game core, key mapping,
//! frame scheduling, configuration, and logging setup.

pub mod build_info;
pub mod clock;
pub mod config;
pub mod constants;
pub mod game;
pub mod input;
pub mod logger;

pub use clock::FrameClock;
pub use config::GameConfig;
pub use game::{GameInput, GameSession, Preset, ViewportSize};
