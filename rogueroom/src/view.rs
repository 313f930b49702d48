//! Read-only views of items for renderers.
//!
//! The simulation never draws anything, a renderer reads these views after each tick
//! and uses the room's events to know when to release its resources.

use glam::DVec2;

use crate::item::Item;
use crate::room::Room;
use crate::sprite::{self, Palette, Sprite};


/// Color of the shadow drawn under items.
pub const SHADOW_COLOR: &str = "#00000033";


/// Everything needed to draw an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemView {
    pub id: u32,
    /// Top-left corner of the sprite.
    pub pos: DVec2,
    pub sprite: &'static Sprite,
    pub palette: &'static Palette,
    /// Pixel size of one glyph.
    pub size: f64,
    pub shadow: Rect,
    /// Fill color of the shadow rectangle.
    pub shadow_color: &'static str,
    pub destroyed: bool,
}

/// An axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: DVec2,
    pub size: DVec2,
}

impl ItemView {

    pub fn new(id: u32, item: &Item) -> Self {

        let size = item.size();
        let height = item.sprite().height() as f64 * size;

        // The shadow is 5 glyphs of 2 space units wide, centered on the sprite's base.
        let shadow_size = 2.0 * item.space_unit() * 5.0;
        let shadow = Rect {
            pos: item.pos() + DVec2::new(-size, height - shadow_size / 2.0),
            size: DVec2::splat(shadow_size),
        };

        Self {
            id,
            pos: item.pos(),
            sprite: item.sprite(),
            palette: sprite::palette(item.kind().category()),
            size,
            shadow,
            shadow_color: SHADOW_COLOR,
            destroyed: item.is_destroyed(),
        }

    }

    /// Iterate over the colored pixels of the sprite, transparent glyphs and glyphs
    /// missing from the palette are skipped.
    pub fn pixels(&self) -> impl Iterator<Item = (Rect, &'static str)> + '_ {
        let sprite = self.sprite;
        (0..sprite.height())
            .flat_map(move |y| (0..sprite.width()).map(move |x| (x, y)))
            .filter_map(move |(x, y)| {
                let color = self.palette.color(sprite.glyph(x, y)?)?;
                let rect = Rect {
                    pos: self.pos + DVec2::new(x as f64, y as f64) * self.size,
                    size: DVec2::splat(self.size),
                };
                Some((rect, color))
            })
    }

}


/// Iterate over the views of all items in the room.
pub fn iter_views(room: &Room) -> impl Iterator<Item = ItemView> + '_ {
    room.iter_items().map(|(id, item)| ItemView::new(id, item))
}
