//! Two-state cellular automaton engine advanced by a frame-throttled clock.
//!
//! The display loop calls [`SimulationClock::tick`] once per frame; the clock
//! decides whether enough frames have passed to compute a new generation and
//! hands each new [`Grid`] to an injected [`RenderSink`].

pub mod config;
pub mod error;
pub mod simulation;

pub use config::SimulationConfig;
pub use error::{EngineError, Result};
pub use simulation::{ClockState, Grid, RenderSink, Rule, RuleSet, SimulationClock};
