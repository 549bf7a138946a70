//! Platform abstraction layer
//!
//! The simulation never touches the OS directly. Frontends provide:
//! - Time (elapsed seconds between frames)
//! - Input (held keys and presses per frame)

pub mod input;
pub mod time;

pub use input::{Action, InputSource, KeyState};
pub use time::{Clock, FixedClock, SystemClock};
