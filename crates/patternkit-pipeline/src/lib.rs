//! # PatternKit Pipeline
//!
//! Live-recompute plumbing between a parameter-editing UI and the
//! drafting engine: a debounced, cancellable background session that
//! owns the current [`PatternDocument`], plus cheap ghost deltas for
//! instant feedback while a slider is mid-drag.
//!
//! The math lives entirely in `patternkit-drafting`; this crate is only
//! the scheduling wrapper around it.
//!
//! [`PatternDocument`]: patternkit_core::PatternDocument

pub mod ghost;
pub mod session;

pub use ghost::GhostDelta;
pub use session::{spawn_session, SessionConfig, SessionHandle, DEFAULT_DEBOUNCE};
