//! Headless simulator of a room with pickup items.

pub mod config;
pub mod scenario;
pub mod sim;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rogueroom::room::RoomConfig;

use scenario::Scenario;
use sim::{Sim, SimError};


pub fn main() -> Result<(), SimError> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // The handler only notifies the loop, which stops between two ticks.
    let (stop_sender, stop_receiver) = crossbeam_channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = stop_sender.try_send(());
    })?;

    let room_config = RoomConfig {
        space_unit: config::space_unit()?,
        ..RoomConfig::default()
    };

    let ticks = config::ticks()?;
    let fast = config::fast();
    info!("running {ticks} ticks with space unit {} (fast: {fast})", room_config.space_unit);

    let mut sim = Sim::new(room_config, Scenario::demo())?;

    for _ in 0..ticks {
        if stop_receiver.try_recv().is_ok() {
            info!("interrupted at tick {}", sim.time());
            break;
        }
        if fast {
            sim.tick();
        } else {
            sim.tick_padded();
        }
    }

    sim.report();
    Ok(())

}
