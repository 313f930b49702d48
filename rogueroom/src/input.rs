//! Pick signals sampled once per tick.

use std::collections::HashSet;


/// The pick signals for one tick. These are held-key signals, an item that is not
/// picked is checked again on the next tick while they are still held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    /// Pick the weapon while cycling the weapon slots backward (offset -1). This signal
    /// has priority over `pick_backward` when both are held.
    pub pick_forward: bool,
    /// Pick the weapon while cycling the weapon slots forward (offset 1).
    pub pick_backward: bool,
}

impl InputState {

    pub const NONE: Self = Self { pick_forward: false, pick_backward: false };

    /// Sample the pick signals from the set of keys currently held.
    pub fn from_keys(keys: &HashSet<char>, bindings: &KeyBindings) -> Self {
        let held = |bound: &[char]| bound.iter().any(|key| keys.contains(key));
        Self {
            pick_forward: held(&bindings.pick_forward),
            pick_backward: held(&bindings.pick_backward),
        }
    }

    /// Return true if any pick signal is active.
    #[inline]
    pub fn is_picking(self) -> bool {
        self.pick_forward || self.pick_backward
    }

}


/// Keys bound to each pick signal. A key may be bound to both signals, such as the
/// shifted key of the default bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub pick_forward: Vec<char>,
    pub pick_backward: Vec<char>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            pick_forward: vec!['v', 'B'],
            pick_backward: vec!['b', 'B'],
        }
    }
}
