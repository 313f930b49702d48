//! Pickup items living in the rooms of a 2D action game.
//! 
//! Items are data-only entities: they hold their geometry, their sprite and a small
//! lifecycle state machine, while the [`room::Room`] owns them, ticks them and reports
//! what happened through an event queue that presentation layers can drain.

pub mod geom;
pub mod sprite;
pub mod weapon;
pub mod timer;

pub mod player;
pub mod input;
pub mod effect;

pub mod item;
pub mod room;
pub mod view;
