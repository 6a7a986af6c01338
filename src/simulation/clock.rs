use crate::config::SimulationConfig;
use crate::error::{EngineError, Result};
use crate::simulation::rules::{self, RuleSet};
use crate::simulation::Grid;

/// Receives each newly computed generation.
pub trait RenderSink {
    fn render(&mut self, grid: &Grid);
}

impl<F: FnMut(&Grid)> RenderSink for F {
    fn render(&mut self, grid: &Grid) {
        self(grid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
}

/// Frame-throttled driver for the automaton.
///
/// The external display loop calls [`tick`](Self::tick) once per frame; a new
/// generation is computed only once `timescale` ticks have passed since the
/// last one. The clock owns the live grid and hands the rule engine a shared
/// borrow for the duration of one step.
pub struct SimulationClock<S> {
    grid: Grid,
    ruleset: RuleSet,
    timescale: u32,
    /// Ticks taken so far. The tick in progress has this 0-based index.
    frame_count: u64,
    last_stepped_frame: i64,
    generation: u64,
    state: ClockState,
    sink: S,
}

impl<S: RenderSink> SimulationClock<S> {
    /// Create an idle clock around an initial grid.
    pub fn new(grid: Grid, ruleset: RuleSet, timescale: u32, sink: S) -> Result<Self> {
        check_timescale(timescale)?;
        Ok(Self {
            grid,
            ruleset,
            timescale,
            frame_count: 0,
            last_stepped_frame: -i64::from(timescale),
            generation: 0,
            state: ClockState::Idle,
            sink,
        })
    }

    /// Validate `config`, seed the initial grid, and create an idle clock.
    pub fn from_config<G: rand::Rng>(
        config: &SimulationConfig,
        rng: &mut G,
        sink: S,
    ) -> Result<Self> {
        let grid = config.initial_grid(rng)?;
        log::info!(
            "Seeded {}x{} grid with {} live cells",
            grid.width(),
            grid.height(),
            grid.population()
        );
        Self::new(grid, config.ruleset.clone(), config.timescale, sink)
    }

    pub fn start(&mut self) {
        if self.state == ClockState::Idle {
            log::info!("Simulation started at frame {}", self.frame_count);
            self.state = ClockState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.state == ClockState::Running {
            log::info!("Simulation stopped at generation {}", self.generation);
            self.state = ClockState::Idle;
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Advance one display frame. Returns whether a generation was computed.
    ///
    /// Fails with `InvalidState` while idle.
    pub fn tick(&mut self) -> Result<bool> {
        if self.state != ClockState::Running {
            return Err(EngineError::InvalidState(
                "tick requires a running clock".into(),
            ));
        }

        let frame = self.frame_count as i64;
        self.frame_count += 1;

        if frame < self.last_stepped_frame + i64::from(self.timescale) {
            return Ok(false);
        }

        self.grid = rules::step(&self.grid, &self.ruleset);
        self.last_stepped_frame = frame;
        self.generation += 1;
        log::debug!(
            "Generation {} at frame {}: {} live cells",
            self.generation,
            frame,
            self.grid.population()
        );

        self.sink.render(&self.grid);
        Ok(true)
    }

    /// Change ticks-per-generation. Idle only.
    ///
    /// Before the first generation the next tick still steps.
    pub fn set_timescale(&mut self, timescale: u32) -> Result<()> {
        self.require_idle("change timescale")?;
        check_timescale(timescale)?;
        log::info!("Timescale {} -> {}", self.timescale, timescale);
        self.timescale = timescale;
        if self.generation == 0 {
            self.last_stepped_frame = self.frame_count as i64 - i64::from(timescale);
        }
        Ok(())
    }

    /// Apply a viewport size notification. Idle only; the overlap survives.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.require_idle("resize")?;
        if (width, height) == (self.grid.width(), self.grid.height()) {
            return Ok(());
        }
        self.grid = self.grid.resize(width, height)?;
        log::info!("Grid resized to {}x{}", width, height);
        Ok(())
    }

    /// Replace the live grid wholesale. Idle only.
    pub fn reseed(&mut self, grid: Grid) -> Result<()> {
        self.require_idle("reseed")?;
        log::info!(
            "Reseeded {}x{} grid with {} live cells",
            grid.width(),
            grid.height(),
            grid.population()
        );
        self.grid = grid;
        Ok(())
    }

    fn require_idle(&self, action: &str) -> Result<()> {
        match self.state {
            ClockState::Idle => Ok(()),
            ClockState::Running => Err(EngineError::InvalidState(format!(
                "cannot {action} while running"
            ))),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    pub fn timescale(&self) -> u32 {
        self.timescale
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Generations computed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

fn check_timescale(timescale: u32) -> Result<()> {
    if timescale == 0 {
        return Err(EngineError::InvalidArgument(
            "timescale must be at least 1".into(),
        ));
    }
    Ok(())
}
