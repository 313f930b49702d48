//! Player state shared by every item of a room during a tick.

use glam::DVec2;

use crate::geom::Circle;


/// Default maximum life of a player.
pub const DEFAULT_MAX_LIFE: u32 = 3;


/// The player state read and mutated by items. All mutations go through methods that
/// keep the invariants, such as life never exceeding the maximum life.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Collision shape of the player in room pixel coordinates.
    collision: Circle,
    /// Current life, in `0..=max_life`.
    life: u32,
    /// Maximum life.
    max_life: u32,
    /// True if the player is carrying a key.
    has_key: bool,
    /// Total number of keys caught since the start of the game.
    key_count: u32,
    /// Weapon grants waiting to be handled by the weapon logic of the player.
    weapon_grants: Vec<WeaponGrant>,
}

/// A weapon granted to the player by an item, the weapon logic is responsible for
/// actually switching the weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponGrant {
    /// Position of the item that granted the weapon, this is where a replaced weapon
    /// should be dropped.
    pub pos: DVec2,
    /// Weapon subtype.
    pub subtype: u8,
    /// Offset of the weapon slot cycling, -1 or 1.
    pub offset: i8,
}

impl PlayerState {

    /// Create a new player with full life.
    pub fn new(collision: Circle, max_life: u32) -> Self {
        Self {
            collision,
            life: max_life,
            max_life,
            has_key: false,
            key_count: 0,
            weapon_grants: Vec::new(),
        }
    }

    #[inline]
    pub fn collision(&self) -> Circle {
        self.collision
    }

    /// Update the collision shape of the player, usually after it moved.
    #[inline]
    pub fn set_collision(&mut self, collision: Circle) {
        self.collision = collision;
    }

    #[inline]
    pub fn life(&self) -> u32 {
        self.life
    }

    #[inline]
    pub fn max_life(&self) -> u32 {
        self.max_life
    }

    #[inline]
    pub fn has_key(&self) -> bool {
        self.has_key
    }

    #[inline]
    pub fn key_count(&self) -> u32 {
        self.key_count
    }

    /// Use the key currently carried, for example to open a door. Return false if the
    /// player has no key.
    pub fn use_key(&mut self) -> bool {
        std::mem::take(&mut self.has_key)
    }

    /// Give a key to the player, returning the new total of keys caught.
    pub fn give_key(&mut self) -> u32 {
        self.has_key = true;
        self.key_count += 1;
        self.key_count
    }

    /// Add one life to the player, only if the player is not already at maximum life.
    /// Return true if life has been added.
    pub fn add_life(&mut self) -> bool {
        if self.life < self.max_life {
            self.life += 1;
            true
        } else {
            false
        }
    }

    /// Remove the given amount of life, saturating to zero.
    pub fn damage(&mut self, amount: u32) {
        self.life = self.life.saturating_sub(amount);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life == 0
    }

    /// Grant a weapon, the grant is queued until drained by the weapon logic.
    pub fn grant_weapon(&mut self, pos: DVec2, subtype: u8, offset: i8) {
        self.weapon_grants.push(WeaponGrant { pos, subtype, offset });
    }

    /// Take all weapon grants that have not been handled yet.
    pub fn drain_weapon_grants(&mut self) -> impl Iterator<Item = WeaponGrant> + '_ {
        self.weapon_grants.drain(..)
    }

}
