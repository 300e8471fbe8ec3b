use thiserror::Error;

use crate::types::LayerId;

/// Rejected parallax configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("pixel grid snapping is enabled with zero pixels per unit")]
    ZeroPixelsPerUnit,

    #[error("wrap length on the {axis} axis must be positive or infinite, got {value}")]
    InvalidWrapLength { axis: char, value: f32 },

    #[error("horizon distance must be finite, got {0}")]
    NonFiniteHorizonDistance(f32),

    #[error("layer {index}: {source}")]
    Layer {
        index: LayerId,
        #[source]
        source: Box<ConfigError>,
    },
}
