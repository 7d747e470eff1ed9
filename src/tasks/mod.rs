//! Background Tasks Module
//!
//! Contains background tasks that keep the pattern cache tidy.
//!
//! # Tasks
//! - Sweep: Removes stale and excess cache entries at a fixed interval

mod sweep;

pub use sweep::{spawn_configured_sweep_task, spawn_sweep_task};
