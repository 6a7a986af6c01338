mod grid;
pub mod clock;
pub mod patterns;
pub mod rules;
pub mod seed;

pub use clock::{ClockState, RenderSink, SimulationClock};
pub use grid::Grid;
pub use rules::{Rule, RuleSet};
