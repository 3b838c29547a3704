//! Flappy Owl game core.
//!
//! An owl falls a fixed distance every frame, the player nudges it upward with
//! discrete jumps, and paired obstacles scroll in from the right. Touching an
//! obstacle, the ground, or the ceiling ends the run until it is restarted.
//!
//! Nothing here draws or reads the terminal; the host feeds in key presses and
//! the current viewport size and renders the resulting [`GameSession`].

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
