#![forbid(unsafe_code)]

pub mod model;
pub mod progression;
pub mod rehydrate;
pub mod time;

pub use progression::{GATE_REJECTED_NOTICE, ProgressionError};
pub use rehydrate::Rehydrated;
pub use time::Clock;
