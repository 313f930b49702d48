//! Sprite and palette registry for items.
//!
//! Sprites are stored as rows of glyph characters, the `.` glyph is transparent and
//! every other glyph is resolved to a color through the palette of the item category.

use crate::item::{ItemCategory, ItemError, ItemKind};
use crate::weapon;


/// The transparent glyph, never present in palettes.
pub const TRANSPARENT: char = '.';

/// Sprite of the room key.
pub static KEY: Sprite = Sprite::new("key", &[
    ".ww.",
    "w..w",
    ".ww.",
    "..w.",
    "..ww",
    "..w.",
    "..ww",
]);

/// Sprite of the heart, drawn with the heart palette.
pub static HEART: Sprite = Sprite::new("heart", &[
    ".oo.oo.",
    "oiioiio",
    "oiiiiio",
    ".oiiio.",
    "..oio..",
    "...o...",
]);

/// Two-color palette used by hearts.
pub static HEART_PALETTE: Palette = Palette::new("heart", &[
    ('o', "#edeef7"),
    ('i', "#a80000"),
]);

/// Generic palette used by keys and weapons.
pub static GENERIC_PALETTE: Palette = Palette::new("generic", &[
    ('w', "#cd9722"),
]);


/// A static sprite, each row must have the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    /// The name of the sprite, used for debug purpose.
    pub name: &'static str,
    /// Rows of glyphs, from top to bottom.
    pub rows: &'static [&'static str],
}

impl Sprite {

    pub const fn new(name: &'static str, rows: &'static [&'static str]) -> Self {
        Self { name, rows }
    }

    /// Width of the sprite in glyphs, this is the length of its first row.
    #[inline]
    pub fn width(&self) -> usize {
        self.rows.first().map(|row| row.chars().count()).unwrap_or(0)
    }

    /// Height of the sprite in glyphs.
    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Get the glyph at the given coordinates, none if out of bounds or transparent.
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y)?
            .chars()
            .nth(x)
            .filter(|&glyph| glyph != TRANSPARENT)
    }

    /// Check that this sprite is neither empty nor ragged.
    pub fn validate(&self) -> Result<(), ItemError> {
        let width = self.width();
        if width == 0 || self.height() == 0 {
            return Err(ItemError::InvalidGeometry("sprite has no width or height"));
        }
        if self.rows.iter().any(|row| row.chars().count() != width) {
            return Err(ItemError::InvalidGeometry("sprite rows have different lengths"));
        }
        Ok(())
    }

}


/// A palette mapping glyphs to CSS hex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [(char, &'static str)],
}

impl Palette {

    pub const fn new(name: &'static str, colors: &'static [(char, &'static str)]) -> Self {
        Self { name, colors }
    }

    /// Get the color of the given glyph, if it's known by this palette.
    pub fn color(&self, glyph: char) -> Option<&'static str> {
        self.colors.iter()
            .find(|&&(g, _)| g == glyph)
            .map(|&(_, color)| color)
    }

}


/// Resolve the sprite of an item kind. This fails if the kind is a weapon whose
/// subtype is not registered.
pub fn resolve(kind: ItemKind) -> Result<&'static Sprite, ItemError> {
    match kind {
        ItemKind::Key => Ok(&KEY),
        ItemKind::Heart => Ok(&HEART),
        ItemKind::Weapon(subtype) => weapon::from_id(subtype)
            .map(|weapon| &weapon.sprite)
            .ok_or(ItemError::UnknownVariant {
                category: ItemCategory::Weapon.id(),
                subtype,
            }),
    }
}

/// Get the palette used to draw items of the given category.
pub fn palette(category: ItemCategory) -> &'static Palette {
    match category {
        ItemCategory::Heart => &HEART_PALETTE,
        ItemCategory::Key | ItemCategory::Weapon => &GENERIC_PALETTE,
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn builtin_sprites_valid() {

        KEY.validate().unwrap();
        HEART.validate().unwrap();

        for id in 0..=u8::MAX {
            if let Some(weapon) = weapon::from_id(id) {
                weapon.sprite.validate().unwrap();
            }
        }

    }

    #[test]
    fn builtin_palettes_cover_sprites() {

        let check = |sprite: &Sprite, palette: &Palette| {
            for y in 0..sprite.height() {
                for x in 0..sprite.width() {
                    if let Some(glyph) = sprite.glyph(x, y) {
                        assert!(palette.color(glyph).is_some(), "{} glyph {glyph:?} missing in {}", sprite.name, palette.name);
                    }
                }
            }
        };

        check(&KEY, palette(ItemCategory::Key));
        check(&HEART, palette(ItemCategory::Heart));
        check(&weapon::from_id(weapon::SWORD).unwrap().sprite, palette(ItemCategory::Weapon));

    }

    #[test]
    fn invalid_sprites() {
        assert!(Sprite::new("empty", &[]).validate().is_err());
        assert!(Sprite::new("empty_row", &[""]).validate().is_err());
        assert!(Sprite::new("ragged", &["ww", "w"]).validate().is_err());
    }

    #[test]
    fn resolve_kinds() {

        assert_eq!(resolve(ItemKind::Key).unwrap().name, "key");
        assert_eq!(resolve(ItemKind::Heart).unwrap().name, "heart");
        assert_eq!(resolve(ItemKind::Weapon(weapon::AXE)).unwrap().name, "axe");

        assert_eq!(resolve(ItemKind::Weapon(200)), Err(ItemError::UnknownVariant { category: 2, subtype: 200 }));

    }

    #[test]
    fn glyph_lookup() {
        assert_eq!(HEART.glyph(0, 0), None);
        assert_eq!(HEART.glyph(1, 0), Some('o'));
        assert_eq!(HEART.glyph(1, 1), Some('i'));
        assert_eq!(HEART.glyph(99, 0), None);
        assert_eq!(HEART_PALETTE.color('i'), Some("#a80000"));
        assert_eq!(GENERIC_PALETTE.color('i'), None);
    }

}
