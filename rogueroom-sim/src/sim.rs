//! The simulation driving a room from a scenario at a fixed tick rate.

use std::time::{Duration, Instant};

use glam::DVec2;
use tracing::{debug, info, trace, warn};

use rogueroom::geom::Circle;
use rogueroom::input::{InputState, KeyBindings};
use rogueroom::item::{ItemError, ItemKind};
use rogueroom::player::PlayerState;
use rogueroom::room::{Event, ItemEvent, Room, RoomConfig};
use rogueroom::view;

use crate::config::ConfigError;
use crate::scenario::Scenario;


/// Target tick duration. Currently 20 TPS, so 50 ms/tick.
pub const TICK_DURATION: Duration = Duration::from_millis(50);


/// Errors that stop the simulator.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("item: {0}")]
    Item(#[from] ItemError),
    #[error("signal: {0}")]
    Signal(#[from] ctrlc::Error),
}


/// A simulated room with its player.
pub struct Sim {
    room: Room,
    player: PlayerState,
    scenario: Scenario,
    bindings: KeyBindings,
    /// Ids of the items currently carried, with their index in the scenario.
    carried: Vec<(u32, usize)>,
    /// Number of ticks run so far.
    time: u32,
    /// Number of items picked so far.
    picked: u32,
}

impl Sim {

    /// Create the room and spawn the scenario's items in it. Items that cannot be
    /// constructed are skipped.
    pub fn new(config: RoomConfig, scenario: Scenario) -> Result<Self, SimError> {

        let mut room = Room::new(config)?;
        room.swap_events(Some(Vec::new()));

        let unit = config.space_unit;
        let player = PlayerState::new(
            Circle::new(
                scenario.player_start.x * unit,
                scenario.player_start.y * unit,
                scenario.player_radius * unit)?,
            scenario.player_max_life);

        for spawn in &scenario.spawns {
            let spawned = ItemKind::from_raw(spawn.category, spawn.subtype)
                .and_then(|kind| room.spawn_item(kind, spawn.pos * unit));
            if let Err(e) = spawned {
                warn!("skipping spawn {spawn:?}: {e}");
            }
        }

        let mut carried = Vec::new();
        for (index, carry) in scenario.carried.iter().enumerate() {
            let spawned = ItemKind::from_raw(carry.category, carry.subtype)
                .and_then(|kind| room.spawn_item(kind, carry.from * unit));
            match spawned {
                Ok(id) => {
                    let center = carry.from * unit;
                    room.reposition_item(id, center.x, center.y);
                    carried.push((id, index));
                }
                Err(e) => warn!("skipping carried {carry:?}: {e}"),
            }
        }

        info!("room ready with {} items", room.len());

        Ok(Self {
            room,
            player,
            scenario,
            bindings: KeyBindings::default(),
            carried,
            time: 0,
            picked: 0,
        })

    }

    #[inline]
    pub fn room(&self) -> &Room {
        &self.room
    }

    #[inline]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    #[inline]
    pub fn time(&self) -> u32 {
        self.time
    }

    /// Run a single tick and wait for it to approximately last for 50 ms (20 TPS),
    /// there is no sleep if the tick was too long, in such case a warning is logged.
    pub fn tick_padded(&mut self) {

        let start = Instant::now();
        self.tick();
        let elapsed = start.elapsed();

        if let Some(missing) = TICK_DURATION.checked_sub(elapsed) {
            std::thread::sleep(missing);
        } else {
            warn!("tick too long {:?}, expected {:?}", elapsed, TICK_DURATION);
        }

    }

    /// Run a single tick of the simulation.
    pub fn tick(&mut self) {

        let unit = self.room.space_unit();
        let time = self.time;

        // Move the player and the carried items before ticking the room.
        let player_pos = self.scenario.player_pos(time) * unit;
        let collision = self.player.collision().with_center(player_pos);
        self.player.set_collision(collision);

        let damage = self.scenario.damage_at(time);
        if damage != 0 {
            self.player.damage(damage);
            info!("player hurt, life {}/{}", self.player.life(), self.player.max_life());
        }

        // Carried items follow their carrier but never leave the room.
        let bounds = self.scenario.bounds * unit;
        self.carried.retain(|&(id, index)| {
            let carry = &self.scenario.carried[index];
            let Some(item) = self.room.get_item(id) else { return false };
            let delta = carry.pos_at(time) * unit - item.collision().center();
            let inside = |ghost: Circle| {
                let center = ghost.center();
                center.cmpge(DVec2::ZERO).all() && center.cmple(bounds).all()
            };
            if !self.room.move_item(id, delta, inside) {
                debug!("[{time}] carried item #{id} blocked at {}", carry.pos_at(time));
            }
            time < carry.drop_tick
        });

        let input = InputState::from_keys(&self.scenario.keys_at(time), &self.bindings);
        self.room.tick(TICK_DURATION.as_secs_f64(), &mut self.player, input);

        self.handle_events();

        for grant in self.player.drain_weapon_grants() {
            info!("weapon {} granted at {} with offset {}", grant.subtype, grant.pos, grant.offset);
        }

        self.time += 1;

    }

    /// Log the events of the last tick, as a frontend would consume them.
    fn handle_events(&mut self) {

        let Some(mut events) = self.room.swap_events(None) else { return };

        for event in events.drain(..) {
            match event {
                Event::Item { id, inner: ItemEvent::Pickup { effect } } => {
                    self.picked += 1;
                    info!("[{}] item #{id} picked: {effect:?}", self.time);
                }
                Event::Item { id, inner: ItemEvent::Position { pos } } => {
                    // Carried items move on every tick, too verbose for info.
                    trace!("[{}] item #{id} moved to {pos}", self.time);
                }
                event => debug!("[{}] {event:?}", self.time),
            }
        }

        // Give back the allocation.
        self.room.swap_events(Some(events));

    }

    /// Log a summary of the simulation.
    pub fn report(&self) {
        info!("simulated {} ticks, {} items picked, {} items left", self.time, self.picked, self.room.len());
        info!("player life {}/{}, keys caught {}, has key {}",
            self.player.life(), self.player.max_life(), self.player.key_count(), self.player.has_key());
        for item_view in view::iter_views(&self.room) {
            info!("remaining item #{} ({}) at {}", item_view.id, item_view.sprite.name, item_view.pos);
        }
    }

}
