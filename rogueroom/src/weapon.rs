//! Weapon subtypes that can be dropped as items.

use crate::sprite::Sprite;


/// Maximum number of weapon subtypes.
const WEAPONS_COUNT: usize = 16;


/// Internal macro to easily define the weapons registry.
macro_rules! weapons {
    (
        $($name:ident / $id:literal : $init:expr),* $(,)?
    ) => {

        static WEAPONS: [Option<Weapon>; WEAPONS_COUNT] = {
            let mut arr = [None; WEAPONS_COUNT];
            $(arr[$id as usize] = Some($init);)*
            arr
        };

        $(pub const $name: u8 = $id;)*

    };
}

weapons! {
    SWORD/0:    Weapon::new("sword", &[
        ".w.",
        ".w.",
        ".w.",
        ".w.",
        ".w.",
        "www",
        ".w.",
    ]),
    AXE/1:      Weapon::new("axe", &[
        "ww.",
        "www",
        "ww.",
        ".w.",
        ".w.",
        ".w.",
    ]),
    SPEAR/2:    Weapon::new("spear", &[
        ".w.",
        "www",
        ".w.",
        ".w.",
        ".w.",
        ".w.",
        ".w.",
        ".w.",
    ]),
    DAGGER/3:   Weapon::new("dagger", &[
        ".w.",
        ".w.",
        ".w.",
        "www",
        ".w.",
    ]),
    HAMMER/4:   Weapon::new("hammer", &[
        "wwww",
        "wwww",
        ".w..",
        ".w..",
        ".w..",
        ".w..",
    ]),
}


/// Get a weapon from its subtype id, none if not registered.
pub fn from_id(id: u8) -> Option<&'static Weapon> {
    WEAPONS.get(id as usize)?.as_ref()
}

/// Iterate over all registered weapons with their subtype id.
pub fn iter() -> impl Iterator<Item = (u8, &'static Weapon)> {
    WEAPONS.iter()
        .enumerate()
        .filter_map(|(id, weapon)| weapon.as_ref().map(|weapon| (id as u8, weapon)))
}

/// Return the number of registered weapons.
pub fn count() -> usize {
    iter().count()
}


/// This structure describe a weapon subtype.
#[derive(Debug, Clone, Copy)]
pub struct Weapon {
    /// The name of the weapon, used for debug purpose.
    pub name: &'static str,
    /// The sprite drawn when the weapon is lying on the ground.
    pub sprite: Sprite,
}

impl Weapon {

    pub const fn new(name: &'static str, rows: &'static [&'static str]) -> Self {
        Self {
            name,
            sprite: Sprite::new(name, rows),
        }
    }

}
