mod app;
mod gpu;

use std::error::Error;

use winit::event_loop::{ControlFlow, EventLoop};

use throttled_life::config::{DEFAULT_RANDOM_BIAS, DRIVER_TIMESCALE};
use throttled_life::{SimulationClock, SimulationConfig};

use app::{App, GridUpload};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimulationConfig::default()
        .with_timescale(DRIVER_TIMESCALE)
        .with_random_bias(DEFAULT_RANDOM_BIAS);
    log::info!(
        "Starting {}x{} simulation, {} frames per generation",
        config.width,
        config.height,
        config.timescale
    );

    let clock =
        SimulationClock::from_config(&config, &mut rand::thread_rng(), GridUpload::default())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(clock);
    event_loop.run_app(&mut app)?;

    Ok(())
}
