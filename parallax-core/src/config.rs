use glam::Vec2;

use crate::{error::ConfigError, types::ScrollBehaviour};

/// Controller-wide parallax settings.
///
/// All fields are read during [`crate::controller::ScrollController::tick`]
/// and may be edited between ticks. After changing
/// `adaptive_parallax_scale` or `horizon_distance` through
/// [`crate::controller::ScrollController::config_mut`], call
/// [`crate::controller::ScrollController::reconfigure`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    /// How much reference movement propagates to layers, per axis.
    /// `0` ignores the axis, `1` is full strength, negative values invert.
    pub affect_axes: Vec2,
    pub scroll_behaviour: ScrollBehaviour,

    /// Derive each layer's scale from its depth (`z / horizon_distance`).
    pub adaptive_parallax_scale: bool,
    pub horizon_distance: f32,

    /// Use `start_reference` as the absolute baseline instead of the
    /// reference position at setup time.
    pub custom_reference_position: bool,
    pub start_reference: Vec2,

    /// Snap layer positions to a pixel grid. Only applied under
    /// [`ScrollBehaviour::Absolute`].
    pub snap_to_pixel_grid: bool,
    pub pixels_per_unit: u32,
    /// Grid offset in pixels; `0.5` is a half-pixel shift.
    pub pixel_offset: Vec2,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            affect_axes: Vec2::ONE,
            scroll_behaviour: ScrollBehaviour::Relative,
            adaptive_parallax_scale: false,
            horizon_distance: 10.0,
            custom_reference_position: false,
            start_reference: Vec2::ZERO,
            snap_to_pixel_grid: false,
            pixels_per_unit: 16,
            pixel_offset: Vec2::ZERO,
        }
    }
}

impl ControllerConfig {
    /// Checks the settings the tick loop relies on.
    ///
    /// ### Returns
    /// - `Err(ConfigError::ZeroPixelsPerUnit)` if snapping is on with a zero grid.
    /// - `Err(ConfigError::NonFiniteHorizonDistance)` if adaptive scaling is on
    ///   with a NaN or infinite horizon.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snap_to_pixel_grid && self.pixels_per_unit == 0 {
            return Err(ConfigError::ZeroPixelsPerUnit);
        }
        if self.adaptive_parallax_scale && !self.horizon_distance.is_finite() {
            return Err(ConfigError::NonFiniteHorizonDistance(self.horizon_distance));
        }
        Ok(())
    }

    /// Whether layer scales should currently be derived from depth.
    ///
    /// A zero horizon would divide by zero, so it disables adaptive scaling.
    #[inline]
    pub fn adaptive_scale_active(&self) -> bool {
        self.adaptive_parallax_scale && self.horizon_distance != 0.0
    }

    /// Whether [`crate::grid::align`] runs after the layer updates.
    #[inline]
    pub fn snaps(&self) -> bool {
        self.scroll_behaviour == ScrollBehaviour::Absolute
            && self.snap_to_pixel_grid
            && self.pixels_per_unit != 0
    }
}

/// Per-layer parallax settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerConfig {
    /// Speed relative to the reference:
    ///
    /// - `>1` inverts direction
    /// - `=1` stays on the screen
    /// - `0..1` background
    /// - `=0` main layer, doesn't move
    /// - `<0` foreground
    pub parallax_scale: f32,
    pub wrap: bool,
    /// Size of the window, centered on the reference, the layer wraps within.
    pub wrap_length: Vec2,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            parallax_scale: 0.0,
            wrap: false,
            wrap_length: Vec2::INFINITY,
        }
    }
}

impl LayerConfig {
    /// A non-wrapping layer with the given scale.
    pub fn with_scale(parallax_scale: f32) -> Self {
        Self {
            parallax_scale,
            ..Self::default()
        }
    }

    /// A layer that wraps within `wrap_length`.
    pub fn wrapping(parallax_scale: f32, wrap_length: Vec2) -> Self {
        Self {
            parallax_scale,
            wrap: true,
            wrap_length,
        }
    }

    /// Rejects wrap lengths that would wrap every tick (zero or negative)
    /// or never compare sensibly (NaN). Only checked when wrap is enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.wrap {
            return Ok(());
        }
        for (axis, value) in [('x', self.wrap_length.x), ('y', self.wrap_length.y)] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::InvalidWrapLength { axis, value });
            }
        }
        Ok(())
    }
}
