//! 2-D parallax scrolling core.
//!
//! Main components:
//! - [`controller`] — the scroll controller that drives all layers per tick.
//! - [`layer`] — one layer's settings, baselines and both scroll algorithms.
//! - [`phases`] — the setup / adaptive-scale / update / snap pipeline.
//! - [`grid`] — pixel-grid alignment and standalone grid snapping.
//! - [`config`] — controller and layer settings with validation.
//! - [`entity`] — the position accessor implemented by host objects.
//! - [`error`] — configuration errors.
//! - [`types`] — shared type aliases and enums.

pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod grid;
pub mod layer;
pub mod phases;
pub mod types;

pub use config::{ControllerConfig, LayerConfig};
pub use controller::ScrollController;
pub use entity::Positionable;
pub use error::ConfigError;
pub use layer::Layer;
pub use types::{LayerId, ScrollBehaviour};
