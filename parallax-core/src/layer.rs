use glam::{Vec2, Vec3};
use tracing::{trace, warn};

use crate::{config::LayerConfig, entity::Positionable, types::ScrollBehaviour};

/// One parallax layer: a host entity plus its scroll settings.
///
/// The layer owns the handle to its entity and keeps the baseline state that
/// both scroll behaviours need:
///
/// - `object_start_position` - where the entity sat at setup, shifted by whole
///   windows whenever an absolute update wraps.
/// - `start_reference_position` - the reference baseline for absolute updates.
/// - `last_reference_position` - the reference at the previous tick. Kept
///   current under both behaviours so switching to relative never jumps.
#[derive(Debug, Clone)]
pub struct Layer<E> {
    pub object: Option<E>,
    pub config: LayerConfig,

    object_start_position: Vec3,
    last_reference_position: Vec3,
    start_reference_position: Vec3,
}

impl<E: Positionable> Layer<E> {
    pub fn new(object: E, config: LayerConfig) -> Self {
        Self {
            object: Some(object),
            config,
            object_start_position: Vec3::ZERO,
            last_reference_position: Vec3::ZERO,
            start_reference_position: Vec3::ZERO,
        }
    }

    /// A layer with no entity attached. Only useful as a placeholder; updates
    /// on it do nothing but track the reference.
    pub fn detached(config: LayerConfig) -> Self {
        Self {
            object: None,
            config,
            object_start_position: Vec3::ZERO,
            last_reference_position: Vec3::ZERO,
            start_reference_position: Vec3::ZERO,
        }
    }

    #[inline]
    pub fn parallax_scale(&self) -> f32 {
        self.config.parallax_scale
    }

    /// Current entity position, if the layer has an entity.
    #[inline]
    pub fn position(&self) -> Option<Vec3> {
        self.object.as_ref().map(Positionable::position)
    }

    #[inline]
    pub fn object_start_position(&self) -> Vec3 {
        self.object_start_position
    }

    #[inline]
    pub fn last_reference_position(&self) -> Vec3 {
        self.last_reference_position
    }

    #[inline]
    pub fn start_reference_position(&self) -> Vec3 {
        self.start_reference_position
    }

    /// Captures the baselines for later updates. Must run once before any
    /// [`Layer::update`].
    ///
    /// ### Parameters
    /// - `reference_position` - The reference's position right now.
    /// - `reference_baseline` - The reference point absolute updates measure
    ///   displacement from. Its depth is taken from `reference_position`.
    pub fn setup(&mut self, reference_position: Vec3, reference_baseline: Vec2) {
        self.last_reference_position = reference_position;
        self.start_reference_position = reference_baseline.extend(reference_position.z);
        self.object_start_position = self.position().unwrap_or(Vec3::ZERO);
    }

    /// Sets the parallax scale from the entity's depth:
    /// `scale = z / horizon_distance`.
    ///
    /// Does nothing if the layer has no entity. The caller must not pass a
    /// zero horizon.
    pub fn set_scale(&mut self, horizon_distance: f32) {
        if let Some(position) = self.position() {
            self.config.parallax_scale = position.z / horizon_distance;
        }
    }

    /// Moves the entity for one tick using the layer's own scale.
    pub fn update(
        &mut self,
        behaviour: ScrollBehaviour,
        reference_position: Vec3,
        affect_axes: Vec2,
    ) {
        self.update_with_scale(
            behaviour,
            reference_position,
            affect_axes,
            self.config.parallax_scale,
        );
    }

    /// Moves the entity for one tick with an explicit scale.
    ///
    /// ### Parameters
    /// - `behaviour` - Which algorithm to use; see [`ScrollBehaviour`].
    /// - `reference_position` - The reference's position this tick.
    /// - `affect_axes` - Per-axis strength of the reference movement.
    /// - `parallax_scale` - Scale to use instead of the configured one.
    pub fn update_with_scale(
        &mut self,
        behaviour: ScrollBehaviour,
        reference_position: Vec3,
        affect_axes: Vec2,
        parallax_scale: f32,
    ) {
        if self.object.is_none() {
            warn!("parallax layer has no object; skipping update");
        } else {
            match behaviour {
                ScrollBehaviour::Relative => {
                    self.update_relative(reference_position, affect_axes, parallax_scale)
                }
                ScrollBehaviour::Absolute => {
                    self.update_absolute(reference_position, affect_axes, parallax_scale)
                }
            }
        }

        self.last_reference_position = reference_position;
    }

    fn update_relative(&mut self, reference_position: Vec3, affect_axes: Vec2, scale: f32) {
        let moved_by = reference_position - self.last_reference_position;
        let delta = layer_delta(moved_by, affect_axes, scale);

        let Some(object) = self.object.as_mut() else {
            return;
        };
        let mut position = object.position() + delta;
        if self.config.wrap {
            position += wrap_shift(position - reference_position, self.config.wrap_length);
        }
        object.set_position(position);
    }

    fn update_absolute(&mut self, reference_position: Vec3, affect_axes: Vec2, scale: f32) {
        let moved_by = reference_position - self.start_reference_position;
        let delta = layer_delta(moved_by, affect_axes, scale);

        let Some(object) = self.object.as_mut() else {
            return;
        };
        // Checked against where the layer sits before this tick's move, so a
        // wrap shows up one tick late.
        if self.config.wrap {
            self.object_start_position +=
                wrap_shift(object.position() - reference_position, self.config.wrap_length);
        }
        object.set_position(self.object_start_position + delta);
    }
}

/// Layer displacement for a reference displacement. Depth never changes.
#[inline]
fn layer_delta(moved_by: Vec3, affect_axes: Vec2, scale: f32) -> Vec3 {
    (moved_by.truncate() * affect_axes * scale).extend(0.0)
}

/// Whole-window correction for a layer `dist` away from the reference.
///
/// Each axis is checked on its own: once the layer is more than half a
/// window away, it jumps one window back toward the reference.
fn wrap_shift(dist: Vec3, wrap_length: Vec2) -> Vec3 {
    let mut shift = Vec3::ZERO;
    if dist.x.abs() > wrap_length.x / 2.0 {
        shift.x = -wrap_length.x * dist.x.signum();
    }
    if dist.y.abs() > wrap_length.y / 2.0 {
        shift.y = -wrap_length.y * dist.y.signum();
    }
    if shift != Vec3::ZERO {
        trace!(?dist, ?shift, "parallax layer wrapped");
    }
    shift
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const AXES: Vec2 = Vec2::ONE;

    fn layer_at(pos: Vec3, config: LayerConfig) -> Layer<Vec3> {
        let mut layer = Layer::new(pos, config);
        layer.setup(Vec3::ZERO, Vec2::ZERO);
        layer
    }

    fn pos(layer: &Layer<Vec3>) -> Vec3 {
        layer.position().unwrap()
    }

    #[test]
    fn setup_captures_baselines() {
        let mut layer = Layer::new(Vec3::new(4.0, 5.0, 2.0), LayerConfig::with_scale(0.5));
        layer.setup(Vec3::new(1.0, 2.0, -10.0), Vec2::new(7.0, 8.0));

        assert_eq!(layer.last_reference_position(), Vec3::new(1.0, 2.0, -10.0));
        assert_eq!(layer.start_reference_position(), Vec3::new(7.0, 8.0, -10.0));
        assert_eq!(layer.object_start_position(), Vec3::new(4.0, 5.0, 2.0));
    }

    #[test]
    fn set_scale_divides_depth_by_horizon() {
        let mut layer = Layer::new(Vec3::new(0.0, 0.0, 5.0), LayerConfig::default());
        layer.set_scale(10.0);
        assert_eq!(layer.parallax_scale(), 0.5);
    }

    #[test]
    fn set_scale_without_object_is_a_no_op() {
        let mut layer: Layer<Vec3> = Layer::detached(LayerConfig::with_scale(0.25));
        layer.set_scale(10.0);
        assert_eq!(layer.parallax_scale(), 0.25);
    }

    #[test]
    fn relative_moves_by_scaled_reference_delta() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let scale = rng.random_range(-3.0..3.0);
            let axes = Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));
            let start = Vec3::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
                3.0,
            );
            let d = Vec3::new(
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
            );

            let mut layer = layer_at(start, LayerConfig::with_scale(scale));
            layer.update(ScrollBehaviour::Relative, d, axes);

            let expected = start + Vec3::new(d.x * axes.x * scale, d.y * axes.y * scale, 0.0);
            assert_abs_diff_eq!(pos(&layer), expected, epsilon = 1e-4);
        }
    }

    #[test]
    fn relative_continues_from_externally_moved_position() {
        let mut layer = layer_at(Vec3::ZERO, LayerConfig::with_scale(0.5));
        layer.update(ScrollBehaviour::Relative, Vec3::new(2.0, 0.0, 0.0), AXES);
        assert_eq!(pos(&layer), Vec3::new(1.0, 0.0, 0.0));

        layer.object = Some(Vec3::new(100.0, 100.0, 0.0));
        layer.update(ScrollBehaviour::Relative, Vec3::new(4.0, 0.0, 0.0), AXES);
        assert_eq!(pos(&layer), Vec3::new(101.0, 100.0, 0.0));
    }

    #[test]
    fn scale_one_mirrors_reference_in_relative() {
        let mut layer = layer_at(Vec3::new(3.0, -1.0, 0.0), LayerConfig::with_scale(1.0));
        let mut reference = Vec3::ZERO;
        let steps = [
            Vec3::new(1.5, 0.25, 0.0),
            Vec3::new(-4.0, 2.0, 0.0),
            Vec3::new(0.5, -7.0, 0.0),
        ];
        for step in steps {
            let before = pos(&layer);
            reference += step;
            layer.update(ScrollBehaviour::Relative, reference, AXES);
            assert_abs_diff_eq!(pos(&layer) - before, step, epsilon = 1e-6);
        }
    }

    #[test]
    fn scale_zero_never_moves() {
        for behaviour in [ScrollBehaviour::Relative, ScrollBehaviour::Absolute] {
            let start = Vec3::new(5.0, 6.0, 1.0);
            let mut layer = layer_at(start, LayerConfig::with_scale(0.0));
            let references = [
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(-300.0, 42.0, 0.0),
                Vec3::ZERO,
            ];
            for reference in references {
                layer.update(behaviour, reference, AXES);
                assert_eq!(pos(&layer), start, "{behaviour:?} moved a scale-0 layer");
            }
        }
    }

    #[test]
    fn depth_is_never_changed() {
        let mut layer = layer_at(Vec3::new(0.0, 0.0, 7.0), LayerConfig::with_scale(2.0));
        layer.update(ScrollBehaviour::Relative, Vec3::new(1.0, 1.0, 50.0), AXES);
        assert_eq!(pos(&layer).z, 7.0);
        layer.update(ScrollBehaviour::Absolute, Vec3::new(3.0, 1.0, -50.0), AXES);
        assert_eq!(pos(&layer).z, 7.0);
    }

    #[test]
    fn absolute_depends_only_on_current_reference() {
        let mut rng = StdRng::seed_from_u64(3);
        let start = Vec3::new(2.0, -3.0, 0.0);
        let mut layer = layer_at(start, LayerConfig::with_scale(0.3));

        let mut reference = Vec3::ZERO;
        for _ in 0..100 {
            reference = Vec3::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                0.0,
            );
            layer.update(ScrollBehaviour::Absolute, reference, AXES);
        }

        let mut fresh = layer_at(start, LayerConfig::with_scale(0.3));
        fresh.update(ScrollBehaviour::Absolute, reference, AXES);
        assert_abs_diff_eq!(pos(&layer), pos(&fresh), epsilon = 1e-5);
        assert_abs_diff_eq!(
            pos(&layer),
            start + reference * Vec3::new(0.3, 0.3, 0.0),
            epsilon = 1e-4
        );
    }

    #[test]
    fn absolute_overwrites_external_moves() {
        let mut layer = layer_at(Vec3::ZERO, LayerConfig::with_scale(0.5));
        layer.update(ScrollBehaviour::Absolute, Vec3::new(4.0, 0.0, 0.0), AXES);
        assert_eq!(pos(&layer), Vec3::new(2.0, 0.0, 0.0));

        layer.object = Some(Vec3::new(-99.0, 99.0, 0.0));
        layer.update(ScrollBehaviour::Absolute, Vec3::new(4.0, 0.0, 0.0), AXES);
        assert_eq!(pos(&layer), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn absolute_measures_from_custom_baseline() {
        let mut layer = Layer::new(Vec3::ZERO, LayerConfig::with_scale(1.0));
        layer.setup(Vec3::new(10.0, 10.0, 0.0), Vec2::new(4.0, 0.0));
        layer.update(ScrollBehaviour::Absolute, Vec3::new(10.0, 10.0, 0.0), AXES);
        assert_eq!(pos(&layer), Vec3::new(6.0, 10.0, 0.0));
    }

    #[test]
    fn absolute_keeps_last_reference_current() {
        let mut layer = layer_at(Vec3::ZERO, LayerConfig::with_scale(0.5));
        layer.update(ScrollBehaviour::Absolute, Vec3::new(8.0, 2.0, 0.0), AXES);
        assert_eq!(layer.last_reference_position(), Vec3::new(8.0, 2.0, 0.0));
    }

    #[test]
    fn switching_absolute_to_relative_does_not_jump() {
        let mut layer = layer_at(Vec3::ZERO, LayerConfig::with_scale(0.5));
        for x in [2.0, 4.0, 6.0] {
            layer.update(ScrollBehaviour::Absolute, Vec3::new(x, 0.0, 0.0), AXES);
        }
        assert_eq!(pos(&layer), Vec3::new(3.0, 0.0, 0.0));

        // Same reference: relative sees no movement.
        layer.update(ScrollBehaviour::Relative, Vec3::new(6.0, 0.0, 0.0), AXES);
        assert_eq!(pos(&layer), Vec3::new(3.0, 0.0, 0.0));

        layer.update(ScrollBehaviour::Relative, Vec3::new(8.0, 0.0, 0.0), AXES);
        assert_eq!(pos(&layer), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn wrap_shift_uses_each_axis_own_sign() {
        // x is far to the right, y is far below: the y shift must follow dist.y.
        let shift = wrap_shift(Vec3::new(6.0, -6.0, 0.0), Vec2::new(10.0, 10.0));
        assert_eq!(shift, Vec3::new(-10.0, 10.0, 0.0));

        let only_y = wrap_shift(Vec3::new(-1.0, 5.5, 0.0), Vec2::new(10.0, 10.0));
        assert_eq!(only_y, Vec3::new(0.0, -10.0, 0.0));
    }

    #[test]
    fn wrap_shift_ignores_infinite_length() {
        let shift = wrap_shift(Vec3::new(1e9, -1e9, 0.0), Vec2::INFINITY);
        assert_eq!(shift, Vec3::ZERO);
    }

    #[test]
    fn relative_wrap_jumps_one_window() {
        let mut layer = layer_at(
            Vec3::new(4.0, 0.0, 0.0),
            LayerConfig::wrapping(0.0, Vec2::new(10.0, 10.0)),
        );
        layer.update(ScrollBehaviour::Relative, Vec3::new(-2.0, 0.0, 0.0), AXES);

        // dist = 4 - (-2) = 6 > 5, so jump left by 10.
        assert_eq!(pos(&layer), Vec3::new(-6.0, 0.0, 0.0));
    }

    #[test]
    fn absolute_wrap_shifts_start_position() {
        let mut layer = layer_at(Vec3::ZERO, LayerConfig::wrapping(0.0, Vec2::new(10.0, 4.0)));
        layer.update(ScrollBehaviour::Absolute, Vec3::new(6.0, 3.0, 0.0), AXES);

        assert_eq!(layer.object_start_position(), Vec3::new(10.0, 4.0, 0.0));
        assert_eq!(pos(&layer), Vec3::new(10.0, 4.0, 0.0));

        // Back inside the window, so the shifted start sticks.
        layer.update(ScrollBehaviour::Absolute, Vec3::new(6.0, 3.0, 0.0), AXES);
        assert_eq!(pos(&layer), Vec3::new(10.0, 4.0, 0.0));
    }

    #[test]
    fn absolute_wrap_checks_position_before_the_move() {
        let mut layer = layer_at(Vec3::ZERO, LayerConfig::wrapping(0.5, Vec2::new(10.0, 10.0)));
        layer.update(ScrollBehaviour::Absolute, Vec3::new(8.0, 0.0, 0.0), AXES);

        // Before the move the layer is at 0, 8 behind the reference: jump right
        // by one window, then apply this tick's delta of 4.
        assert_eq!(layer.object_start_position(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(pos(&layer), Vec3::new(14.0, 0.0, 0.0));

        // Now 6 ahead, so the next tick brings it back.
        layer.update(ScrollBehaviour::Absolute, Vec3::new(8.0, 0.0, 0.0), AXES);
        assert_eq!(layer.object_start_position(), Vec3::ZERO);
        assert_eq!(pos(&layer), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn update_with_scale_overrides_configured_scale() {
        for behaviour in [ScrollBehaviour::Relative, ScrollBehaviour::Absolute] {
            let mut layer = layer_at(Vec3::new(1.0, 1.0, 0.0), LayerConfig::with_scale(0.5));
            layer.update_with_scale(behaviour, Vec3::new(4.0, 0.0, 0.0), AXES, 2.0);

            assert_eq!(pos(&layer), Vec3::new(9.0, 1.0, 0.0), "{behaviour:?}");
            assert_eq!(layer.parallax_scale(), 0.5, "{behaviour:?} kept the override");
        }
    }

    #[test]
    fn wrap_keeps_layer_within_half_window() {
        let window = Vec2::new(12.0, 8.0);
        let max_step = Vec2::new(5.0, 2.0);
        for behaviour in [ScrollBehaviour::Relative, ScrollBehaviour::Absolute] {
            let mut rng = StdRng::seed_from_u64(11);
            let scale = 0.25;
            // Absolute wraps one tick late, so allow one tick of relative motion.
            let bound = match behaviour {
                ScrollBehaviour::Relative => window / 2.0,
                ScrollBehaviour::Absolute => window / 2.0 + max_step * (1.0 - scale),
            };
            let mut layer = layer_at(
                Vec3::new(1.0, 1.0, 0.0),
                LayerConfig::wrapping(scale, window),
            );
            let mut reference = Vec3::ZERO;

            for _ in 0..1000 {
                // Per-tick motion well inside one window.
                reference += Vec3::new(
                    rng.random_range(-3.0..5.0),
                    rng.random_range(-2.0..2.0),
                    0.0,
                );
                layer.update(behaviour, reference, AXES);

                let dist = pos(&layer) - reference;
                assert!(
                    dist.x.abs() <= bound.x + 1e-3 && dist.y.abs() <= bound.y + 1e-3,
                    "{behaviour:?}: layer escaped the wrap window, dist = {dist:?}"
                );
            }
        }
    }

    #[test]
    fn update_without_object_only_tracks_reference() {
        let mut layer: Layer<Vec3> = Layer::detached(LayerConfig::with_scale(1.0));
        layer.setup(Vec3::ZERO, Vec2::ZERO);
        layer.update(ScrollBehaviour::Relative, Vec3::new(3.0, 3.0, 0.0), AXES);

        assert!(layer.position().is_none());
        assert_eq!(layer.last_reference_position(), Vec3::new(3.0, 3.0, 0.0));
    }
}
