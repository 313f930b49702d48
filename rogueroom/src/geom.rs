//! Circle geometry used for item and player collisions.

use std::fmt;

use glam::DVec2;

use crate::item::ItemError;


/// A circle in pixel coordinates, used as the collision shape of both the items and
/// the player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {

    /// Construct a new circle from its center and radius, the radius must be positive
    /// or zero and every component must be finite.
    pub fn new(x: f64, y: f64, r: f64) -> Result<Self, ItemError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ItemError::InvalidGeometry("circle center is not finite"));
        }
        if !r.is_finite() || r < 0.0 {
            return Err(ItemError::InvalidGeometry("circle radius is negative or not finite"));
        }
        Ok(Self { x, y, r })
    }

    /// Get the center of this circle.
    #[inline]
    pub fn center(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Return the same circle moved to the given center.
    #[inline]
    pub fn with_center(self, center: DVec2) -> Self {
        Self { x: center.x, y: center.y, r: self.r }
    }

    /// Offset this circle's center by the given delta.
    #[inline]
    pub fn offset(self, delta: DVec2) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y, r: self.r }
    }

    /// Return true if this circle overlaps the given one. Circles that are only
    /// touching on their boundary do not overlap.
    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let radii = self.r + other.r;
        dx * dx + dy * dy < radii * radii
    }

}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}) r={:.2}", self.x, self.y, self.r)
    }
}


/// Return true if both circles overlap, see [`Circle::overlaps`].
#[inline]
pub fn overlaps(a: Circle, b: Circle) -> bool {
    a.overlaps(b)
}
