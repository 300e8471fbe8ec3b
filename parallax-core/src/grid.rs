//! Pixel-grid alignment.
//!
//! [`align`] is the pure rounding function used by the controller after
//! absolute updates. [`GridSnap`] wraps it with per-axis constraints for
//! objects that snap on their own, outside any parallax controller.

use glam::{BVec3, Vec3};

use crate::entity::Positionable;

/// Rounds `position` to the nearest point on a grid of `grid_size` cells per
/// unit, then shifts it by `offset` cells.
///
/// Per axis: `round(p * grid_size) / grid_size + offset / grid_size`.
/// Ties round half away from zero (`f32::round`), so results are
/// reproducible across platforms. Aligning an aligned position again is a
/// no-op as long as `offset` stays within half a pixel.
///
/// ### Parameters
/// - `position` - Position to align.
/// - `grid_size` - Grid resolution in pixels per unit. Must be non-zero.
/// - `offset` - Sub-cell offset in pixels; `0.5` is half a pixel.
pub fn align(position: Vec3, grid_size: f32, offset: Vec3) -> Vec3 {
    debug_assert!(grid_size != 0.0, "grid alignment with zero grid size");
    (position * grid_size).round() / grid_size + offset / grid_size
}

/// Standalone grid snapping with optional fixed axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSnap {
    /// Number of pixels per unit. Zero disables snapping.
    pub pixels_per_unit: f32,
    /// Offset in pixels.
    pub offset: Vec3,
    /// Axes pinned to `fixed_position` instead of the aligned value.
    pub fixed: BVec3,
    pub fixed_position: Vec3,
}

impl Default for GridSnap {
    fn default() -> Self {
        Self {
            pixels_per_unit: 0.0,
            offset: Vec3::ZERO,
            fixed: BVec3::FALSE,
            fixed_position: Vec3::ZERO,
        }
    }
}

impl GridSnap {
    pub fn new(pixels_per_unit: f32) -> Self {
        Self {
            pixels_per_unit,
            ..Self::default()
        }
    }

    /// Returns the snapped position, or `None` if `pixels_per_unit` is zero.
    pub fn apply(&self, position: Vec3) -> Option<Vec3> {
        if self.pixels_per_unit == 0.0 {
            return None;
        }
        let aligned = align(position, self.pixels_per_unit, self.offset);
        Some(Vec3::select(self.fixed, self.fixed_position, aligned))
    }

    /// Snaps an entity in place. Returns `false` if snapping is disabled.
    pub fn snap<E: Positionable + ?Sized>(&self, entity: &mut E) -> bool {
        match self.apply(entity.position()) {
            Some(p) => {
                entity.set_position(p);
                true
            }
            None => false,
        }
    }
}
