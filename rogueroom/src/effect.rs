//! Effects applied to the player when an item is picked up.

use std::fmt;

use glam::DVec2;
use tracing::trace;

use crate::input::InputState;
use crate::item::ItemKind;
use crate::player::PlayerState;


/// The effect of a consumed item, as applied to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// A key has been given, `count` is the new total of keys caught.
    Key {
        count: u32,
    },
    /// One life has been added, `life` is the new player life.
    Heart {
        life: u32,
    },
    /// A weapon has been granted.
    Weapon {
        subtype: u8,
        offset: i8,
    },
}

/// The reason why an overlapping item has not been consumed. This is not an error,
/// the item stays active and is checked again on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declined {
    /// The player already has its maximum life.
    LifeFull,
    /// No pick signal is held this tick.
    NoPickInput,
}

impl fmt::Display for Declined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declined::LifeFull => f.write_str("life is full"),
            Declined::NoPickInput => f.write_str("no pick input"),
        }
    }
}


/// Apply the effect of an item of the given kind that is overlapping the player. The
/// position is the one of the item, used when granting weapons.
pub fn dispatch(kind: ItemKind, pos: DVec2, player: &mut PlayerState, input: InputState) -> Result<Effect, Declined> {
    match kind {
        ItemKind::Key => {
            let count = player.give_key();
            Ok(Effect::Key { count })
        }
        ItemKind::Heart => {
            if player.add_life() {
                Ok(Effect::Heart { life: player.life() })
            } else {
                Err(Declined::LifeFull)
            }
        }
        ItemKind::Weapon(subtype) => {
            // Forward is checked first so only one grant happens if both are held.
            let offset = if input.pick_forward {
                -1
            } else if input.pick_backward {
                1
            } else {
                return Err(Declined::NoPickInput);
            };
            trace!("grant weapon {subtype} with offset {offset}");
            player.grant_weapon(pos, subtype, offset);
            Ok(Effect::Weapon { subtype, offset })
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::geom::Circle;
    use crate::weapon;

    fn player() -> PlayerState {
        PlayerState::new(Circle { x: 0.0, y: 0.0, r: 8.0 }, 3)
    }

    #[test]
    fn key_always_consumed() {
        let mut player = player();
        assert_eq!(dispatch(ItemKind::Key, DVec2::ZERO, &mut player, InputState::NONE), Ok(Effect::Key { count: 1 }));
        assert_eq!(dispatch(ItemKind::Key, DVec2::ZERO, &mut player, InputState::NONE), Ok(Effect::Key { count: 2 }));
        assert!(player.has_key());
    }

    #[test]
    fn heart_gated_by_life() {

        let mut player = player();
        assert_eq!(dispatch(ItemKind::Heart, DVec2::ZERO, &mut player, InputState::NONE), Err(Declined::LifeFull));
        assert_eq!(player.life(), 3);

        player.damage(1);
        assert_eq!(dispatch(ItemKind::Heart, DVec2::ZERO, &mut player, InputState::NONE), Ok(Effect::Heart { life: 3 }));

    }

    #[test]
    fn weapon_needs_input() {

        let mut player = player();
        let kind = ItemKind::Weapon(weapon::SPEAR);
        let pos = DVec2::new(10.0, 20.0);

        assert_eq!(dispatch(kind, pos, &mut player, InputState::NONE), Err(Declined::NoPickInput));
        assert_eq!(player.drain_weapon_grants().count(), 0);

        let backward = InputState { pick_forward: false, pick_backward: true };
        assert_eq!(dispatch(kind, pos, &mut player, backward), Ok(Effect::Weapon { subtype: weapon::SPEAR, offset: 1 }));

    }

    #[test]
    fn weapon_forward_priority() {

        let mut player = player();
        let both = InputState { pick_forward: true, pick_backward: true };

        assert_eq!(dispatch(ItemKind::Weapon(weapon::AXE), DVec2::ZERO, &mut player, both), Ok(Effect::Weapon { subtype: weapon::AXE, offset: -1 }));

        let grants = player.drain_weapon_grants().collect::<Vec<_>>();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].offset, -1);

    }

}
