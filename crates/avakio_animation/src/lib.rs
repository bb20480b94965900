//! Avakio Animation System
//!
//! Frame-driven progress animations for chart geometry.
//!
//! # Features
//!
//! - **Easing**: the ease-out-cubic curve that drives chart entry
//! - **Progress**: a single `[0, 1]` value restarted on every data change,
//!   guarded by a generation counter so stale frame callbacks stop on their own
//! - **Scheduling**: a `FrameScheduler` abstraction over the host's
//!   "call me before the next repaint" hook, plus a `ManualScheduler` that is
//!   stepped explicitly by tests and headless hosts

pub mod easing;
pub mod progress;
pub mod scheduler;

pub use easing::ease_out_cubic;
pub use progress::{AnimationProgress, FrameStatus};
pub use scheduler::{FrameCallback, FrameScheduler, ManualScheduler};
