//! Two-agent stepping adapter over the Overcooked simulation.
//!
//! `Overcooked` wraps a built-in kitchen with a 400-step horizon and exposes
//! it through discrete action indices:
//!
//! | index | action    |
//! |-------|-----------|
//! | 0     | `(0, -1)` north |
//! | 1     | `(0, 1)` south  |
//! | 2     | `(1, 0)` east   |
//! | 3     | `(-1, 0)` west  |
//! | 4     | `(0, 0)` stay   |
//! | 5     | `interact`      |
//!
//! Observations are the lossless per-player featurization of the state.

mod adapter;
mod diagnostics;

pub use adapter::{Overcooked, ACTION_MAP, DEFAULT_HORIZON};
