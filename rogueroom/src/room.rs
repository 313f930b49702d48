//! Room container owning the active items.

use std::mem;

use glam::DVec2;
use indexmap::IndexMap;

use tracing::{debug, instrument, trace, warn};

use crate::effect::Effect;
use crate::geom::Circle;
use crate::input::InputState;
use crate::item::{Item, ItemError, ItemKind, Update};
use crate::player::PlayerState;
use crate::timer::ACTIVATION_DELAY;


/// Default pixel size of one space unit.
pub const DEFAULT_SPACE_UNIT: f64 = 4.0;


/// Configuration of a room, shared by every item spawned in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomConfig {
    /// Pixel size of one logical space unit, all item geometry is scaled by it.
    pub space_unit: f64,
    /// Time before a freshly spawned item can be picked.
    pub activation_delay: f64,
}

impl RoomConfig {

    /// Check that the space unit is strictly positive and the delay is not negative.
    pub fn validate(&self) -> Result<(), ItemError> {
        if !self.space_unit.is_finite() || self.space_unit <= 0.0 {
            return Err(ItemError::InvalidGeometry("space unit must be strictly positive"));
        }
        if !self.activation_delay.is_finite() || self.activation_delay < 0.0 {
            return Err(ItemError::InvalidGeometry("activation delay must be positive"));
        }
        Ok(())
    }

}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            space_unit: DEFAULT_SPACE_UNIT,
            activation_delay: ACTIVATION_DELAY,
        }
    }
}


/// A room holding the items that are currently lying in it.
///
/// # Ticking
///
/// Items are ticked in their spawn order, and the player state is mutated as soon as
/// an item is picked, so the following items of the same tick see the updated player.
/// Picked items are destroyed on the tick they are picked, but only physically removed
/// from the room's storage after all items have been ticked.
///
/// # Events
///
/// Like the world's events of a server, events are only recorded when enabled, by
/// swapping a `Vec<Event>` into the room with [`Room::swap_events`].
#[derive(Debug, Clone)]
pub struct Room {
    /// Configuration given to spawned items.
    config: RoomConfig,
    /// Events queue, if enabled.
    events: Option<Vec<Event>>,
    /// Total items count spawned in this room, used to give items a unique id.
    items_count: u32,
    /// Items by their unique id, in spawn order.
    items: IndexMap<u32, Item>,
}

impl Room {

    /// Create a new empty room, fails if the configuration is not valid.
    pub fn new(config: RoomConfig) -> Result<Self, ItemError> {
        config.validate()?;
        Ok(Self {
            config,
            events: None,
            items_count: 0,
            items: IndexMap::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Pixel size of one logical space unit.
    #[inline]
    pub fn space_unit(&self) -> f64 {
        self.config.space_unit
    }

    /// Convert a size in space units to pixels.
    #[inline]
    pub fn to_pixel_size(&self, units: f64) -> f64 {
        units * self.config.space_unit
    }

    /// Swap the events queue of this room, none disables events recording.
    pub fn swap_events(&mut self, events: Option<Vec<Event>>) -> Option<Vec<Event>> {
        mem::replace(&mut self.events, events)
    }

    /// Return true if this room has an events queue.
    pub fn has_events(&self) -> bool {
        self.events.is_some()
    }

    /// Push an event in this room, only if events are enabled.
    #[inline]
    pub fn push_event(&mut self, event: Event) {
        if let Some(events) = &mut self.events {
            events.push(event);
        }
    }

    /// Spawn an item of the given kind with the top-left corner of its sprite at the
    /// given position, returning its unique id. The item is not registered if it
    /// cannot be constructed.
    pub fn spawn_item(&mut self, kind: ItemKind, pos: DVec2) -> Result<u32, ItemError> {

        let item = match Item::new(kind, pos, &self.config) {
            Ok(item) => item,
            Err(e) => {
                warn!("rejected item {kind:?} at {pos}: {e}");
                return Err(e);
            }
        };

        let id = self.items_count;
        self.items_count = self.items_count.checked_add(1)
            .expect("item count overflow");

        debug!("spawn item #{id} ({kind:?}) at {pos}");

        self.items.insert(id, item);
        self.push_event(Event::Item { id, inner: ItemEvent::Spawn });
        Ok(id)

    }

    /// Remove an item from this room, return false if no item has this id, removing
    /// twice is therefore harmless.
    pub fn remove_item(&mut self, id: u32) -> bool {

        let Some(mut item) = self.items.shift_remove(&id) else { return false };
        item.destroy();

        trace!("remove item #{id}");

        self.push_event(Event::Item { id, inner: ItemEvent::Remove });
        true

    }

    /// Return true if an item with this id is in the room.
    pub fn contains_item(&self, id: u32) -> bool {
        self.items.contains_key(&id)
    }

    /// Get an item from its id.
    pub fn get_item(&self, id: u32) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Iterate over all items of this room with their id, in spawn order.
    pub fn iter_items(&self) -> impl Iterator<Item = (u32, &Item)> + '_ {
        self.items.iter().map(|(&id, item)| (id, item))
    }

    /// Return the number of items in this room.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Move an item so that its collision shape is centered on the given point, this
    /// is typically used when the item is carried by a moving entity. Return false if
    /// no item has this id.
    pub fn reposition_item(&mut self, id: u32, x: f64, y: f64) -> bool {
        let Some(item) = self.items.get_mut(&id) else { return false };
        item.reposition(x, y);
        let pos = item.pos();
        self.push_event(Event::Item { id, inner: ItemEvent::Position { pos } });
        true
    }

    /// Try moving an item by the given delta, the movement is applied only if the
    /// validation function accepts the moved collision shape. Return false if no item
    /// has this id or if the movement was refused.
    pub fn move_item(&mut self, id: u32, delta: DVec2, validate: impl FnOnce(Circle) -> bool) -> bool {
        let Some(item) = self.items.get_mut(&id) else { return false };
        if !item.try_move(delta, validate) {
            return false;
        }
        let pos = item.pos();
        self.push_event(Event::Item { id, inner: ItemEvent::Position { pos } });
        true
    }

    /// Tick every item present in the room for the given delta time, against the
    /// player and the pick signals sampled for this tick.
    #[instrument(skip_all)]
    pub fn tick(&mut self, dt: f64, player: &mut PlayerState, input: InputState) {

        let mut picked = 0usize;

        for (&id, item) in self.items.iter_mut() {

            let Update::Picked(effect) = item.update(dt, player, input) else { continue };

            debug!("item #{id} ({:?}) picked: {effect:?}", item.kind());

            item.destroy();
            picked += 1;

            if let Some(events) = &mut self.events {
                events.push(Event::Item { id, inner: ItemEvent::Pickup { effect } });
                if let Effect::Weapon { .. } = effect {
                    events.push(Event::WeaponIcons);
                }
                events.push(Event::Sound(Sound::PickItem));
                events.push(Event::Item { id, inner: ItemEvent::Remove });
            }

        }

        // Destroyed items are removed only now, so that no item is skipped or ticked
        // twice because of removals in the loop.
        if picked != 0 {
            self.items.retain(|_, item| !item.is_destroyed());
        }

    }

}


/// An event that happened in a room.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An event with an item given its id.
    Item {
        /// The unique id of the item.
        id: u32,
        /// Inner item event.
        inner: ItemEvent,
    },
    /// A sound should be played.
    Sound(Sound),
    /// The weapon icons of the player should be refreshed.
    WeaponIcons,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemEvent {
    /// The item has been spawned.
    Spawn,
    /// The item has been removed, its visual resources can be released.
    Remove,
    /// The item has been moved, this is the new top-left position of its sprite.
    Position {
        pos: DVec2,
    },
    /// The item has been picked by the player, the event is followed by the removal.
    Pickup {
        effect: Effect,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    PickItem,
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::item::ItemState;
    use crate::weapon;

    fn room() -> Room {
        let mut room = Room::new(RoomConfig { space_unit: 4.0, activation_delay: 1.0 }).unwrap();
        room.swap_events(Some(Vec::new()));
        room
    }

    fn player_at(x: f64, y: f64) -> PlayerState {
        PlayerState::new(Circle { x, y, r: 8.0 }, 3)
    }

    fn take_events(room: &mut Room) -> Vec<Event> {
        room.swap_events(Some(Vec::new())).unwrap()
    }

    #[test]
    fn invalid_config() {
        assert!(Room::new(RoomConfig { space_unit: 0.0, ..RoomConfig::default() }).is_err());
        assert!(Room::new(RoomConfig { activation_delay: -1.0, ..RoomConfig::default() }).is_err());
        assert!(Room::new(RoomConfig::default()).is_ok());
    }

    #[test]
    fn pixel_size() {
        let room = room();
        assert_eq!(room.space_unit(), 4.0);
        assert_eq!(room.to_pixel_size(2.0), 8.0);
    }

    #[test]
    fn rejected_spawn_not_registered() {

        let mut room = room();
        assert_eq!(room.spawn_item(ItemKind::Weapon(77), DVec2::ZERO), Err(ItemError::UnknownVariant { category: 2, subtype: 77 }));
        assert!(room.is_empty());
        assert!(take_events(&mut room).is_empty());

        // Ids are not consumed by rejected items.
        assert_eq!(room.spawn_item(ItemKind::Key, DVec2::ZERO), Ok(0));

    }

    #[test]
    fn remove_idempotent() {

        let mut room = room();
        let id = room.spawn_item(ItemKind::Heart, DVec2::ZERO).unwrap();

        assert!(room.remove_item(id));
        assert!(!room.remove_item(id));
        assert!(!room.contains_item(id));

        assert_eq!(take_events(&mut room), [
            Event::Item { id, inner: ItemEvent::Spawn },
            Event::Item { id, inner: ItemEvent::Remove },
        ]);

    }

    #[test]
    fn key_pickup_events() {

        let mut room = room();
        let id = room.spawn_item(ItemKind::Key, DVec2::ZERO).unwrap();
        let mut player = player_at(16.0, 28.0);
        take_events(&mut room);

        room.tick(1.0, &mut player, InputState::NONE);
        assert_eq!(room.get_item(id).unwrap().state(), ItemState::Active);
        assert!(take_events(&mut room).is_empty());

        room.tick(1.0, &mut player, InputState::NONE);
        assert!(room.is_empty());
        assert!(player.has_key());
        assert_eq!(player.key_count(), 1);

        assert_eq!(take_events(&mut room), [
            Event::Item { id, inner: ItemEvent::Pickup { effect: Effect::Key { count: 1 } } },
            Event::Sound(Sound::PickItem),
            Event::Item { id, inner: ItemEvent::Remove },
        ]);

        room.tick(1.0, &mut player, InputState::NONE);
        assert_eq!(player.key_count(), 1);

    }

    #[test]
    fn weapon_pickup_refreshes_icons() {

        let mut room = room();
        let id = room.spawn_item(ItemKind::Weapon(weapon::HAMMER), DVec2::ZERO).unwrap();
        let center = room.get_item(id).unwrap().collision().center();
        let mut player = player_at(center.x, center.y);
        take_events(&mut room);

        let backward = InputState { pick_forward: false, pick_backward: true };
        room.tick(1.0, &mut player, backward);
        room.tick(1.0, &mut player, backward);

        assert_eq!(take_events(&mut room), [
            Event::Item { id, inner: ItemEvent::Pickup { effect: Effect::Weapon { subtype: weapon::HAMMER, offset: 1 } } },
            Event::WeaponIcons,
            Event::Sound(Sound::PickItem),
            Event::Item { id, inner: ItemEvent::Remove },
        ]);

    }

    #[test]
    fn removal_during_tick() {

        let mut room = room();
        let mut player = player_at(16.0, 28.0);

        // Two keys under the player, one far away, and another key under the player.
        let a = room.spawn_item(ItemKind::Key, DVec2::ZERO).unwrap();
        let b = room.spawn_item(ItemKind::Key, DVec2::ZERO).unwrap();
        let far = room.spawn_item(ItemKind::Key, DVec2::new(1000.0, 1000.0)).unwrap();
        let c = room.spawn_item(ItemKind::Key, DVec2::ZERO).unwrap();

        room.tick(1.0, &mut player, InputState::NONE);
        take_events(&mut room);
        room.tick(1.0, &mut player, InputState::NONE);

        assert_eq!(player.key_count(), 3);
        assert_eq!(room.iter_items().map(|(id, _)| id).collect::<Vec<_>>(), [far]);

        let picked = take_events(&mut room).into_iter()
            .filter_map(|event| match event {
                Event::Item { id, inner: ItemEvent::Pickup { .. } } => Some(id),
                _ => None,
            })
            .collect::<Vec<_>>();

        assert_eq!(picked, [a, b, c]);

    }

    #[test]
    fn hearts_see_updated_life() {

        let mut room = room();
        let mut player = player_at(14.0, 12.0);
        player.damage(1);

        let first = room.spawn_item(ItemKind::Heart, DVec2::ZERO).unwrap();
        let second = room.spawn_item(ItemKind::Heart, DVec2::ZERO).unwrap();

        room.tick(1.0, &mut player, InputState::NONE);
        room.tick(1.0, &mut player, InputState::NONE);

        // Only one life was missing, the second heart stays.
        assert_eq!(player.life(), 3);
        assert!(!room.contains_item(first));
        assert_eq!(room.get_item(second).unwrap().state(), ItemState::Active);

        player.damage(1);
        room.tick(1.0, &mut player, InputState::NONE);
        assert_eq!(player.life(), 3);
        assert!(room.is_empty());

    }

    #[test]
    fn reposition_event() {

        let mut room = room();
        let id = room.spawn_item(ItemKind::Key, DVec2::ZERO).unwrap();
        take_events(&mut room);

        assert!(room.reposition_item(id, 116.0, 128.0));
        assert!(!room.reposition_item(id + 1, 0.0, 0.0));

        assert_eq!(take_events(&mut room), [
            Event::Item { id, inner: ItemEvent::Position { pos: DVec2::new(100.0, 100.0) } },
        ]);

    }

    #[test]
    fn move_item_validated() {

        let mut room = room();
        let id = room.spawn_item(ItemKind::Key, DVec2::ZERO).unwrap();
        take_events(&mut room);

        // Refused movement leaves the item and its ghost in place.
        assert!(!room.move_item(id, DVec2::new(0.0, -40.0), |ghost| ghost.y >= 0.0));
        let item = room.get_item(id).unwrap();
        assert_eq!(item.pos(), DVec2::ZERO);
        assert_eq!(item.ghost(), item.collision());
        assert!(take_events(&mut room).is_empty());

        assert!(room.move_item(id, DVec2::new(4.0, 8.0), |ghost| ghost.y >= 0.0));
        assert!(!room.move_item(id + 1, DVec2::ONE, |_| true));
        assert_eq!(take_events(&mut room), [
            Event::Item { id, inner: ItemEvent::Position { pos: DVec2::new(4.0, 8.0) } },
        ]);

    }

    #[test]
    fn events_disabled() {
        let mut room = Room::new(RoomConfig::default()).unwrap();
        assert!(!room.has_events());
        room.spawn_item(ItemKind::Key, DVec2::ZERO).unwrap();
        assert_eq!(room.swap_events(None), None);
    }

}
