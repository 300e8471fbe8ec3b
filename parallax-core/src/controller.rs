use glam::Vec3;
use tracing::debug;

use crate::{
    config::{ControllerConfig, LayerConfig},
    entity::Positionable,
    error::ConfigError,
    layer::Layer,
    phases,
    types::{LayerId, ScrollBehaviour},
};

/// Drives a set of parallax layers from a moving reference point.
///
/// Typical use:
/// 1. Build the layers and call [`ScrollController::new`].
/// 2. Call [`ScrollController::setup`] once with the reference's starting
///    position.
/// 3. Call [`ScrollController::tick`] every frame with the reference's
///    current position.
///
/// The reference itself (usually a camera) is never stored; it is passed
/// into each call.
#[derive(Debug)]
pub struct ScrollController<E> {
    config: ControllerConfig,
    layers: Vec<Layer<E>>,

    /// Adaptive settings as of the last [`ScrollController::reconfigure`].
    observed_adaptive: bool,
    observed_horizon: f32,
}

impl<E: Positionable> ScrollController<E> {
    /// Creates a controller after validating the controller and layer
    /// settings.
    ///
    /// ### Returns
    /// - `Err(ConfigError::Layer)` naming the first invalid layer.
    /// - Any error from [`ControllerConfig::validate`].
    pub fn new(config: ControllerConfig, layers: Vec<Layer<E>>) -> Result<Self, ConfigError> {
        config.validate()?;
        for (index, layer) in layers.iter().enumerate() {
            layer
                .config
                .validate()
                .map_err(|source| ConfigError::Layer {
                    index,
                    source: Box::new(source),
                })?;
        }

        Ok(Self {
            observed_adaptive: config.adaptive_parallax_scale,
            observed_horizon: config.horizon_distance,
            config,
            layers,
        })
    }

    /// Builds layers from `(entity, config)` pairs and creates a controller.
    pub fn from_entities(
        config: ControllerConfig,
        entities: impl IntoIterator<Item = (E, LayerConfig)>,
    ) -> Result<Self, ConfigError> {
        let layers = entities
            .into_iter()
            .map(|(object, layer_config)| Layer::new(object, layer_config))
            .collect();
        Self::new(config, layers)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Mutable access to the settings. Call [`ScrollController::reconfigure`]
    /// after changing the adaptive scale settings.
    pub fn config_mut(&mut self) -> &mut ControllerConfig {
        &mut self.config
    }

    pub fn layers(&self) -> &[Layer<E>] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer<E>] {
        &mut self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer<E>> {
        self.layers.get(id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer<E>> {
        self.layers.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Captures the starting state of every layer. Must run once, before the
    /// first [`ScrollController::tick`].
    ///
    /// Unless `custom_reference_position` is set, the reference's current
    /// (x, y) becomes the absolute baseline and is written back to
    /// `start_reference`. With adaptive scaling enabled, every layer's scale
    /// is derived from its depth afterwards.
    pub fn setup(&mut self, reference_position: Vec3) {
        if !self.config.custom_reference_position {
            self.config.start_reference = reference_position.truncate();
        }

        phases::setup_phase(
            &mut self.layers,
            reference_position,
            self.config.start_reference,
        );
        if self.config.adaptive_scale_active() {
            phases::adaptive_scale_phase(&mut self.layers, self.config.horizon_distance);
        }

        self.observed_adaptive = self.config.adaptive_parallax_scale;
        self.observed_horizon = self.config.horizon_distance;

        debug!(
            layers = self.layers.len(),
            ?reference_position,
            start_reference = ?self.config.start_reference,
            behaviour = ?self.config.scroll_behaviour,
            "parallax controller set up"
        );
    }

    /// Moves every layer after the reference, then snaps to the pixel grid if
    /// configured. Snapping is only done under [`ScrollBehaviour::Absolute`].
    pub fn tick(&mut self, reference_position: Vec3) {
        phases::update_phase(&mut self.layers, &self.config, reference_position);
        phases::snap_phase(&mut self.layers, &self.config);
    }

    /// Re-derives layer scales if the adaptive settings changed since the
    /// last call.
    ///
    /// Repeated calls without a settings change do nothing. Disabling
    /// adaptive scaling leaves the current scales in place.
    ///
    /// ### Returns
    /// `true` if layer scales were recomputed.
    pub fn reconfigure(&mut self) -> bool {
        let adaptive = self.config.adaptive_parallax_scale;
        let horizon = self.config.horizon_distance;
        if adaptive == self.observed_adaptive && horizon == self.observed_horizon {
            return false;
        }

        self.observed_adaptive = adaptive;
        self.observed_horizon = horizon;

        if !self.config.adaptive_scale_active() {
            return false;
        }
        debug!(horizon, "recomputing adaptive parallax scales");
        phases::adaptive_scale_phase(&mut self.layers, horizon)
    }

    pub fn set_adaptive_parallax_scale(&mut self, enabled: bool) -> bool {
        self.config.adaptive_parallax_scale = enabled;
        self.reconfigure()
    }

    pub fn set_horizon_distance(&mut self, horizon_distance: f32) -> bool {
        self.config.horizon_distance = horizon_distance;
        self.reconfigure()
    }

    /// Switches behaviour between ticks. Going from absolute to relative is
    /// seamless because layers track the reference in both behaviours.
    pub fn set_scroll_behaviour(&mut self, behaviour: ScrollBehaviour) {
        if self.config.scroll_behaviour != behaviour {
            debug!(
                from = ?self.config.scroll_behaviour,
                to = ?behaviour,
                "scroll behaviour changed"
            );
            self.config.scroll_behaviour = behaviour;
        }
    }
}
