//! Item entity and its lifecycle state machine.
//!
//! An item is spawned [`ItemState::Inert`] and becomes [`ItemState::Active`] once its
//! activation timer has elapsed. While active, it's checked against the player on each
//! tick and applies its effect when overlapping, it's then [`ItemState::Picked`] and
//! should be destroyed by its owner on the same tick.

use glam::DVec2;
use tracing::trace;

use crate::effect::{self, Declined, Effect};
use crate::input::InputState;
use crate::player::PlayerState;
use crate::room::RoomConfig;
use crate::sprite::{self, Sprite};
use crate::geom::Circle;
use crate::timer::ActivationTimer;


/// Errors that prevent an item from being constructed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemError {
    #[error("unknown item variant, category {category} subtype {subtype}")]
    UnknownVariant {
        category: u8,
        subtype: u8,
    },
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),
}


/// The category of an item, this determines its palette and the kind of effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ItemCategory {
    Key = 0,
    Heart = 1,
    Weapon = 2,
}

impl ItemCategory {

    pub const ALL: [Self; 3] = [Self::Key, Self::Heart, Self::Weapon];

    /// Get a category from its numeric id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

}

/// The kind of an item, weapons carry their subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Key,
    Heart,
    Weapon(u8),
}

impl ItemKind {

    /// Construct an item kind from raw category id and subtype, as found in spawn
    /// tables. The subtype is ignored for categories other than weapons, and weapons
    /// must have a registered subtype.
    pub fn from_raw(category: u8, subtype: u8) -> Result<Self, ItemError> {
        let kind = match ItemCategory::from_id(category) {
            Some(ItemCategory::Key) => Self::Key,
            Some(ItemCategory::Heart) => Self::Heart,
            Some(ItemCategory::Weapon) => Self::Weapon(subtype),
            None => return Err(ItemError::UnknownVariant { category, subtype }),
        };
        // Fail early if the weapon subtype is unknown.
        sprite::resolve(kind)?;
        Ok(kind)
    }

    #[inline]
    pub fn category(self) -> ItemCategory {
        match self {
            Self::Key => ItemCategory::Key,
            Self::Heart => ItemCategory::Heart,
            Self::Weapon(_) => ItemCategory::Weapon,
        }
    }

    /// Get the subtype of this kind, only weapons have a subtype.
    #[inline]
    pub fn subtype(self) -> Option<u8> {
        match self {
            Self::Weapon(subtype) => Some(subtype),
            _ => None,
        }
    }

    /// Scale of the sprite glyphs, in space units.
    #[inline]
    pub fn scale(self) -> f64 {
        match self {
            Self::Heart => 1.0,
            _ => 2.0,
        }
    }

}


/// State of an item, it only goes forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemState {
    /// Just spawned, waiting for the activation timer.
    Inert,
    /// Checked against the player on each tick.
    Active,
    /// The item's effect has been applied.
    Picked,
    /// The item has been removed from its room.
    Destroyed,
}

/// Result of a single item update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Nothing happened.
    Idle,
    /// The activation timer elapsed, the item is now active. No collision check has
    /// been made on this tick.
    Activated,
    /// The item overlapped the player but its effect has not been applied.
    Declined(Declined),
    /// The item overlapped the player and its effect has been applied.
    Picked(Effect),
}


/// A pickup item.
#[derive(Debug, Clone)]
pub struct Item {
    /// Kind of item.
    kind: ItemKind,
    /// Sprite resolved from the kind at construction.
    sprite: &'static Sprite,
    /// Position of the top-left corner of the sprite.
    pos: DVec2,
    /// Pixel size of a sprite glyph.
    size: f64,
    /// Pixel size of one space unit of the room this item was created for.
    space_unit: f64,
    /// The collision shape centered on the sprite, with a radius of the largest sprite
    /// dimension.
    collision: Circle,
    /// Copy of the collision shape used to validate movements before applying them.
    ghost: Circle,
    /// Timer gating the first collision check.
    timer: ActivationTimer,
    /// Current state.
    state: ItemState,
}

impl Item {

    /// Construct a new item of the given kind with the top-left corner of its sprite
    /// at the given position. Nothing is constructed if the kind or the geometry is
    /// not valid.
    pub fn new(kind: ItemKind, pos: DVec2, config: &RoomConfig) -> Result<Self, ItemError> {

        config.validate()?;

        let sprite = sprite::resolve(kind)?;
        sprite.validate()?;

        let size = kind.scale() * config.space_unit;
        let width = sprite.width() as f64 * size;
        let height = sprite.height() as f64 * size;

        let collision = Circle::new(
            pos.x + width / 2.0,
            pos.y + height / 2.0,
            width.max(height))?;

        Ok(Self {
            kind,
            sprite,
            pos,
            size,
            space_unit: config.space_unit,
            collision,
            ghost: collision,
            timer: ActivationTimer::new(config.activation_delay),
            state: ItemState::Inert,
        })

    }

    #[inline]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    #[inline]
    pub fn sprite(&self) -> &'static Sprite {
        self.sprite
    }

    /// Position of the top-left corner of the sprite.
    #[inline]
    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    /// Pixel size of a sprite glyph.
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[inline]
    pub fn space_unit(&self) -> f64 {
        self.space_unit
    }

    /// Pixel dimensions of the sprite.
    #[inline]
    pub fn dimensions(&self) -> DVec2 {
        DVec2::new(self.sprite.width() as f64, self.sprite.height() as f64) * self.size
    }

    #[inline]
    pub fn collision(&self) -> Circle {
        self.collision
    }

    #[inline]
    pub fn ghost(&self) -> Circle {
        self.ghost
    }

    #[inline]
    pub fn state(&self) -> ItemState {
        self.state
    }

    #[inline]
    pub fn timer(&self) -> &ActivationTimer {
        &self.timer
    }

    /// Return true once the item has been picked or destroyed, this never goes back
    /// to false.
    #[inline]
    pub fn is_picked(&self) -> bool {
        self.state >= ItemState::Picked
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.state == ItemState::Destroyed
    }

    /// Update the item for one tick. While inert, only the activation timer advances.
    /// While active, the item is checked against the player collision shape and its
    /// effect is dispatched if overlapping. Once picked, this does nothing.
    pub fn update(&mut self, dt: f64, player: &mut PlayerState, input: InputState) -> Update {
        match self.state {
            ItemState::Inert => {
                self.timer.advance(dt);
                if self.timer.is_elapsed() {
                    trace!("item {:?} activated", self.kind);
                    self.state = ItemState::Active;
                    Update::Activated
                } else {
                    Update::Idle
                }
            }
            ItemState::Active => {

                if !player.collision().overlaps(self.collision) {
                    return Update::Idle;
                }

                match effect::dispatch(self.kind, self.pos, player, input) {
                    Ok(effect) => {
                        self.state = ItemState::Picked;
                        Update::Picked(effect)
                    }
                    Err(reason) => {
                        trace!("item {:?} declined: {reason}", self.kind);
                        Update::Declined(reason)
                    }
                }

            }
            ItemState::Picked | ItemState::Destroyed => Update::Idle,
        }
    }

    /// Mark this item as destroyed, it will never be updated again.
    pub fn destroy(&mut self) {
        self.state = ItemState::Destroyed;
    }

    /// Move the center of this item's collision shape to the given point, the sprite
    /// position follows so that it stays centered.
    pub fn reposition(&mut self, x: f64, y: f64) {
        let center = DVec2::new(x, y);
        self.collision = self.collision.with_center(center);
        self.ghost = self.collision;
        self.pos = center - self.dimensions() / 2.0;
    }

    /// Try moving this item by the given delta. The moved ghost shape is given to the
    /// validation function, the movement is applied only if it returns true.
    pub fn try_move(&mut self, delta: DVec2, validate: impl FnOnce(Circle) -> bool) -> bool {
        self.ghost = self.collision.offset(delta);
        if validate(self.ghost) {
            let center = self.ghost.center();
            self.reposition(center.x, center.y);
            true
        } else {
            self.ghost = self.collision;
            false
        }
    }

}
