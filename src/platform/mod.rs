//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (shield expiry)
//!
//! Input and frame scheduling live in the binary; storage lives in
//! `highscores` and `settings`.

pub mod time;

pub use time::{Clock, ManualClock, SystemClock};
