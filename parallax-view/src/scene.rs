//! Demo scene: a handful of terrain bands at different depths.
//!
//! Each band is one [`Sprite`] driven by one parallax layer. Bands are
//! drawn as a strip of columns whose heights are randomized once at
//! construction.

use glam::{Vec2, Vec3};
use parallax_core::{ControllerConfig, LayerConfig, Positionable, ScrollController};
use rand::Rng;

/// Horizontal extent of one band, in world units. Wrapping bands use it as
/// their wrap length so the repeated copies tile seamlessly.
pub const BAND_WIDTH: f32 = 160.0;

/// A drawable band owned by the viewer and moved by the parallax core.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub name: &'static str,
    pub position: Vec3,
    /// Column heights, left to right, spanning [`BAND_WIDTH`].
    pub columns: Vec<f32>,
    pub color: egui::Color32,
}

impl Positionable for Sprite {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

struct BandSpec {
    name: &'static str,
    depth: f32,
    base_y: f32,
    height: (f32, f32),
    scale: f32,
    wrap: bool,
    color: egui::Color32,
}

const BANDS: [BandSpec; 5] = [
    BandSpec {
        name: "sky",
        depth: 9.5,
        base_y: 30.0,
        height: (2.0, 6.0),
        scale: 0.95,
        wrap: true,
        color: egui::Color32::from_rgb(200, 220, 255),
    },
    BandSpec {
        name: "mountains",
        depth: 7.0,
        base_y: 0.0,
        height: (20.0, 45.0),
        scale: 0.7,
        wrap: true,
        color: egui::Color32::from_rgb(110, 120, 160),
    },
    BandSpec {
        name: "hills",
        depth: 3.0,
        base_y: -10.0,
        height: (8.0, 18.0),
        scale: 0.3,
        wrap: true,
        color: egui::Color32::from_rgb(70, 140, 80),
    },
    BandSpec {
        name: "ground",
        depth: 0.0,
        base_y: -25.0,
        height: (4.0, 6.0),
        scale: 0.0,
        wrap: false,
        color: egui::Color32::from_rgb(120, 90, 60),
    },
    BandSpec {
        name: "foreground",
        depth: -4.0,
        base_y: -40.0,
        height: (6.0, 14.0),
        scale: -0.4,
        wrap: true,
        color: egui::Color32::from_rgb(30, 60, 30),
    },
];

/// Number of columns per band.
const COLUMNS: usize = 48;

/// Builds the demo bands with randomized outlines.
pub fn build_sprites(rng: &mut impl Rng) -> Vec<(Sprite, LayerConfig)> {
    BANDS
        .iter()
        .map(|band| {
            let columns = (0..COLUMNS)
                .map(|_| rng.random_range(band.height.0..=band.height.1))
                .collect();
            let sprite = Sprite {
                name: band.name,
                position: Vec3::new(0.0, band.base_y, band.depth),
                columns,
                color: band.color,
            };
            let layer = if band.wrap {
                LayerConfig::wrapping(band.scale, Vec2::new(BAND_WIDTH, f32::INFINITY))
            } else {
                LayerConfig::with_scale(band.scale)
            };
            (sprite, layer)
        })
        .collect()
}

/// Builds a controller over freshly generated bands and runs setup with the
/// camera at `camera`.
pub fn build_controller(
    cfg: ControllerConfig,
    camera: Vec3,
    rng: &mut impl Rng,
) -> Result<ScrollController<Sprite>, parallax_core::ConfigError> {
    let mut controller = ScrollController::from_entities(cfg, build_sprites(rng))?;
    controller.setup(camera);
    Ok(controller)
}
