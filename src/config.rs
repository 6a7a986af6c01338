use rand::Rng;

use crate::error::{EngineError, Result};
use crate::simulation::{seed, Grid, RuleSet};

/// Ticks per generation when nothing else is configured
pub const DEFAULT_TIMESCALE: u32 = 1;

/// Side of one rendered cell in physical pixels
pub const CELL_SIZE: u32 = 8;

/// Initial window size (the classic 800x600 stage)
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;

/// Initial grid dimensions derived from the window
pub const DEFAULT_GRID_WIDTH: usize = (DEFAULT_WINDOW_WIDTH / CELL_SIZE) as usize;
pub const DEFAULT_GRID_HEIGHT: usize = (DEFAULT_WINDOW_HEIGHT / CELL_SIZE) as usize;

/// Probability of a cell starting alive in the windowed driver
pub const DEFAULT_RANDOM_BIAS: f64 = 0.3;

/// Display frames per generation in the windowed driver
pub const DRIVER_TIMESCALE: u32 = 4;

/// Live and dead cell colors (linear RGBA)
pub const LIVE_COLOR: [f32; 4] = [0.45, 0.85, 0.55, 1.0];
pub const DEAD_COLOR: [f32; 4] = [0.05, 0.05, 0.08, 1.0];

/// Construction-time settings for a [`SimulationClock`](crate::SimulationClock).
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub timescale: u32,
    pub ruleset: RuleSet,
    /// Explicit starting pattern. Exclusive with `random_bias`.
    pub seed: Option<Vec<Vec<u8>>>,
    /// Per-cell probability of starting alive. Exclusive with `seed`.
    pub random_bias: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            timescale: DEFAULT_TIMESCALE,
            ruleset: RuleSet::classic(),
            seed: None,
            random_bias: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_timescale(mut self, timescale: u32) -> Self {
        self.timescale = timescale;
        self
    }

    pub fn with_ruleset(mut self, ruleset: RuleSet) -> Self {
        self.ruleset = ruleset;
        self
    }

    pub fn with_seed<R: AsRef<[u8]>>(mut self, rows: &[R]) -> Self {
        self.seed = Some(rows.iter().map(|r| r.as_ref().to_vec()).collect());
        self
    }

    pub fn with_random_bias(mut self, bias: f64) -> Self {
        self.random_bias = Some(bias);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.timescale == 0 {
            return Err(EngineError::InvalidArgument(
                "timescale must be at least 1".into(),
            ));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(EngineError::InvalidArgument(format!(
                "grid of {}x{} cells overflows",
                self.width, self.height
            )));
        }
        match (&self.seed, self.random_bias) {
            (Some(_), Some(_)) => Err(EngineError::InvalidArgument(
                "seed and random_bias are mutually exclusive".into(),
            )),
            (None, Some(bias)) => seed::check_bias(bias),
            _ => Ok(()),
        }
    }

    /// Build the starting grid: a random fill, the seed pattern fitted to
    /// `width x height`, or an all-dead grid.
    pub fn initial_grid<G: Rng>(&self, rng: &mut G) -> Result<Grid> {
        self.validate()?;
        match (&self.seed, self.random_bias) {
            (_, Some(bias)) => seed::random(self.width, self.height, bias, rng),
            (Some(rows), None) => {
                seed::from_pattern(rows.as_slice())?.resize(self.width, self.height)
            }
            (None, None) => Grid::new(self.width, self.height),
        }
    }
}
