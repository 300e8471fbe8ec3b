//! Per-tick phases of the parallax pipeline.
//!
//! The controller runs them in this order:
//! 1. [`setup_phase`] — once, captures every layer's baselines.
//! 2. [`adaptive_scale_phase`] — at setup and whenever the adaptive settings
//!    change, derives each layer's scale from its depth.
//! 3. [`update_phase`] — every tick, moves each layer after the reference.
//! 4. [`snap_phase`] — every tick, after all updates, rounds positions to the
//!    pixel grid when absolute snapping is configured.

use glam::{Vec2, Vec3};

use crate::{config::ControllerConfig, entity::Positionable, grid, layer::Layer};

/// Captures baselines for every layer.
///
/// ### Parameters
/// - `layers` - All layers of the controller.
/// - `reference_position` - Current reference position.
/// - `reference_baseline` - Reference point that absolute updates measure
///   displacement from.
pub fn setup_phase<E: Positionable>(
    layers: &mut [Layer<E>],
    reference_position: Vec3,
    reference_baseline: Vec2,
) {
    for layer in layers.iter_mut() {
        layer.setup(reference_position, reference_baseline);
    }
}

/// Sets every layer's scale to `z / horizon_distance`.
///
/// Skipped entirely when `horizon_distance` is zero. Layers without an entity
/// keep their scale.
///
/// ### Returns
/// `true` if scales were recomputed.
pub fn adaptive_scale_phase<E: Positionable>(
    layers: &mut [Layer<E>],
    horizon_distance: f32,
) -> bool {
    if horizon_distance == 0.0 {
        return false;
    }
    for layer in layers.iter_mut() {
        layer.set_scale(horizon_distance);
    }
    true
}

/// Moves every layer for one tick according to `cfg`.
pub fn update_phase<E: Positionable>(
    layers: &mut [Layer<E>],
    cfg: &ControllerConfig,
    reference_position: Vec3,
) {
    for layer in layers.iter_mut() {
        layer.update(cfg.scroll_behaviour, reference_position, cfg.affect_axes);
    }
}

/// Aligns every layer's position to the pixel grid.
///
/// Runs only when [`ControllerConfig::snaps`] holds, and must run after
/// [`update_phase`] so it sees this tick's positions.
///
/// ### Returns
/// Number of layers snapped.
pub fn snap_phase<E: Positionable>(layers: &mut [Layer<E>], cfg: &ControllerConfig) -> usize {
    if !cfg.snaps() {
        return 0;
    }

    let grid_size = cfg.pixels_per_unit as f32;
    let offset = cfg.pixel_offset.extend(0.0);

    let mut snapped = 0;
    for object in layers.iter_mut().filter_map(|l| l.object.as_mut()) {
        object.set_position(grid::align(object.position(), grid_size, offset));
        snapped += 1;
    }
    snapped
}
