//! Scripted scenario played by the simulator: where items are spawned, how the player
//! walks through the room and which keys are held.

use std::collections::HashSet;

use glam::DVec2;

use rogueroom::player::DEFAULT_MAX_LIFE;


/// Raw spawn table: category id, subtype, position in space units.
const SPAWNS: &[(u8, u8, f64, f64)] = &[
    (0, 0, 20.0, 36.0),     // key
    (1, 0, 40.0, 38.0),     // heart
    (2, 0, 70.0, 34.0),     // sword
    (2, 1, 100.0, 36.0),    // axe
];

/// Keys held by the player, as (first tick, last tick, key).
const KEY_PRESSES: &[(u32, u32, char)] = &[
    (75, 80, 'b'),
    (100, 105, 'B'),
];

/// Damage taken by the player, as (tick, amount).
const DAMAGES: &[(u32, u32)] = &[
    (40, 1),
];


/// An item spawned at the start of the scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub category: u8,
    pub subtype: u8,
    /// Top-left position in space units.
    pub pos: DVec2,
}

/// An item carried by a moving entity before being dropped, it is repositioned on
/// each tick until the drop tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carried {
    pub category: u8,
    pub subtype: u8,
    /// Center position in space units at the start.
    pub from: DVec2,
    /// Center position in space units where it's dropped.
    pub to: DVec2,
    /// Tick of the drop.
    pub drop_tick: u32,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    /// Size of the room in space units, carried items cannot leave it.
    pub bounds: DVec2,
    pub spawns: Vec<Spawn>,
    pub carried: Vec<Carried>,
    /// Player center in space units at tick 0.
    pub player_start: DVec2,
    /// Player velocity in space units per tick.
    pub player_vel: DVec2,
    /// Player collision radius in space units.
    pub player_radius: f64,
    pub player_max_life: u32,
    key_presses: Vec<(u32, u32, char)>,
    damages: Vec<(u32, u32)>,
}

impl Scenario {

    /// The demo scenario, the player walks from left to right through a key, a heart,
    /// a sword and an axe, and a spear is dropped by a moving carrier on its way.
    pub fn demo() -> Self {
        Self {
            bounds: DVec2::new(160.0, 60.0),
            spawns: SPAWNS.iter()
                .map(|&(category, subtype, x, y)| Spawn { category, subtype, pos: DVec2::new(x, y) })
                .collect(),
            carried: vec![Carried {
                category: 2,
                subtype: 2,
                from: DVec2::new(133.0, 0.0),
                to: DVec2::new(133.0, 44.0),
                drop_tick: 44,
            }],
            player_start: DVec2::new(0.0, 40.0),
            player_vel: DVec2::new(1.0, 0.0),
            player_radius: 3.0,
            player_max_life: DEFAULT_MAX_LIFE,
            key_presses: KEY_PRESSES.to_vec(),
            damages: DAMAGES.to_vec(),
        }
    }

    /// Player center in space units at the given tick.
    pub fn player_pos(&self, tick: u32) -> DVec2 {
        self.player_start + self.player_vel * tick as f64
    }

    /// Keys held at the given tick.
    pub fn keys_at(&self, tick: u32) -> HashSet<char> {
        self.key_presses.iter()
            .filter(|&&(from, to, _)| (from..=to).contains(&tick))
            .map(|&(_, _, key)| key)
            .collect()
    }

    /// Total damage taken at the given tick.
    pub fn damage_at(&self, tick: u32) -> u32 {
        self.damages.iter()
            .filter(|&&(t, _)| t == tick)
            .map(|&(_, amount)| amount)
            .sum()
    }

}

impl Carried {

    /// Center position in space units at the given tick, it moves linearly until the
    /// drop tick and then stays still.
    pub fn pos_at(&self, tick: u32) -> DVec2 {
        if self.drop_tick == 0 {
            return self.to;
        }
        let t = (tick.min(self.drop_tick) as f64) / self.drop_tick as f64;
        self.from.lerp(self.to, t)
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn demo_timeline() {

        let scenario = Scenario::demo();
        assert_eq!(scenario.player_pos(10), DVec2::new(10.0, 40.0));
        assert_eq!(scenario.player_max_life, DEFAULT_MAX_LIFE);

        assert!(scenario.keys_at(74).is_empty());
        assert!(scenario.keys_at(75).contains(&'b'));
        assert!(scenario.keys_at(80).contains(&'b'));
        assert!(scenario.keys_at(81).is_empty());

        assert_eq!(scenario.damage_at(40), 1);
        assert_eq!(scenario.damage_at(41), 0);

    }

    #[test]
    fn carried_stops_at_drop() {
        let carried = Scenario::demo().carried[0];
        assert_eq!(carried.pos_at(0), DVec2::new(133.0, 0.0));
        assert_eq!(carried.pos_at(22), DVec2::new(133.0, 22.0));
        assert_eq!(carried.pos_at(44), carried.to);
        assert_eq!(carried.pos_at(1000), carried.to);
    }

}
