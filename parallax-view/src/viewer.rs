//! Interactive parallax scrolling demo built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the scroll controller, the
//! camera that acts as its reference point, and implements [`eframe::App`]
//! to render the layers and edit every controller setting live.

use eframe::App;
use glam::{Vec2, Vec3};
use parallax_core::{ConfigError, ControllerConfig, ScrollBehaviour, ScrollController};
use rand::rngs::ThreadRng;
use tracing::{error, info};

use crate::scene::{self, BAND_WIDTH, Sprite};

/// Main application state for the demo.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions (config edits, camera drags).
/// 2. If `running`, advance the camera by `camera_velocity * dt`.
/// 3. Call [`Viewer::step_once`] to tick the controller.
/// 4. Draw every band relative to the camera.
///
/// ### Fields
/// - `controller` - Parallax controller driving one [`Sprite`] per band.
/// - `camera` - World position of the reference point.
/// - `camera_velocity` - Auto-scroll speed in world units per second.
/// - `rng` - Used to regenerate band outlines on reset.
/// - `running` - Whether the camera auto-scrolls.
/// - `zoom` - Pixels per world unit when drawing.
/// - `ticks` - Controller ticks since the last reset.
pub struct Viewer {
    controller: ScrollController<Sprite>,
    camera: Vec3,
    camera_velocity: Vec2,

    rng: ThreadRng,

    running: bool,
    zoom: f32,
    ticks: u64,
}

impl Viewer {
    /// Creates a viewer with the default controller settings and the camera
    /// at the origin.
    ///
    /// ### Returns
    /// - `Err` if the demo scene is rejected by the controller.
    pub fn new() -> Result<Self, ConfigError> {
        let mut rng = rand::rng();
        let camera = Vec3::ZERO;
        let controller = scene::build_controller(ControllerConfig::default(), camera, &mut rng)?;

        Ok(Self {
            controller,
            camera,
            camera_velocity: Vec2::new(12.0, 0.0),
            rng,
            running: false,
            zoom: 4.0,
            ticks: 0,
        })
    }

    /// Rebuilds the scene with the current settings and re-runs setup with
    /// the camera back at the origin.
    ///
    /// Settings the controller rejects leave the current scene untouched.
    fn reset(&mut self) {
        let cfg = *self.controller.config();
        match scene::build_controller(cfg, Vec3::ZERO, &mut self.rng) {
            Ok(controller) => {
                self.controller = controller;
                self.camera = Vec3::ZERO;
                self.ticks = 0;
                self.running = false;
                info!(behaviour = ?cfg.scroll_behaviour, "parallax demo reset");
            }
            Err(err) => error!(%err, "rejected parallax settings, keeping current scene"),
        }
    }

    /// Ticks the controller once with the current camera position.
    fn step_once(&mut self) {
        self.controller.tick(self.camera);
        self.ticks += 1;
    }

    /// Converts a world-space position to screen-space.
    ///
    /// The camera sits at the center of `rect`; the y-axis is flipped so that
    /// positive y goes up in world space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        let rel = p - self.camera.truncate();
        egui::pos2(center.x + rel.x * self.zoom, center.y - rel.y * self.zoom)
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x) / self.zoom;
        let y = (center.y - p.y) / self.zoom;
        self.camera.truncate() + Vec2::new(x, y)
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.camera += self.camera_velocity.extend(0.0) / 60.0;
                    self.step_once();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(
                    egui::DragValue::new(&mut self.camera_velocity.x)
                        .prefix("vx = ")
                        .range(-200.0..=200.0)
                        .speed(0.5),
                );
                ui.add(
                    egui::DragValue::new(&mut self.camera_velocity.y)
                        .prefix("vy = ")
                        .range(-200.0..=200.0)
                        .speed(0.5),
                );

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.5..=12.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (camera position, tick count).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("ticks = {}", self.ticks));
                ui.separator();
                ui.label(format!(
                    "camera = ({:.2}, {:.2})",
                    self.camera.x, self.camera.y
                ));
                ui.label(format!("layers = {}", self.controller.len()));
            });
        });
    }

    /// Builds the right-hand panel for controller and per-layer settings.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.ui_controller_settings(ui);
                    ui.separator();
                    self.ui_layer_settings(ui);
                });
            });
    }

    fn ui_controller_settings(&mut self, ui: &mut egui::Ui) {
        let mut cfg = *self.controller.config();

        ui.heading("Controller");

        ui.separator();
        ui.label("Scroll behaviour");
        ui.horizontal(|ui| {
            ui.radio_value(&mut cfg.scroll_behaviour, ScrollBehaviour::Relative, "Relative");
            ui.radio_value(&mut cfg.scroll_behaviour, ScrollBehaviour::Absolute, "Absolute");
        });

        ui.separator();
        ui.label("Affect axes");
        Self::labeled_drag_f32(ui, "x:", &mut cfg.affect_axes.x, -2.0..=2.0, 0.05);
        Self::labeled_drag_f32(ui, "y:", &mut cfg.affect_axes.y, -2.0..=2.0, 0.05);

        ui.separator();
        ui.checkbox(&mut cfg.adaptive_parallax_scale, "Adaptive parallax scale");
        Self::labeled_drag_f32(
            ui,
            "horizon_distance:",
            &mut cfg.horizon_distance,
            -100.0..=100.0,
            0.1,
        );

        ui.separator();
        ui.checkbox(&mut cfg.custom_reference_position, "Custom start reference");
        ui.add_enabled_ui(cfg.custom_reference_position, |ui| {
            Self::labeled_drag_f32(
                ui,
                "start.x:",
                &mut cfg.start_reference.x,
                -500.0..=500.0,
                1.0,
            );
            Self::labeled_drag_f32(
                ui,
                "start.y:",
                &mut cfg.start_reference.y,
                -500.0..=500.0,
                1.0,
            );
            ui.label("Applied on reset");
        });

        ui.separator();
        ui.add_enabled_ui(cfg.scroll_behaviour == ScrollBehaviour::Absolute, |ui| {
            ui.checkbox(&mut cfg.snap_to_pixel_grid, "Snap to pixel grid");
            ui.horizontal(|ui| {
                ui.label("pixels_per_unit:");
                ui.add(
                    egui::DragValue::new(&mut cfg.pixels_per_unit)
                        .range(1..=256)
                        .speed(1.0),
                );
            });
            Self::labeled_drag_f32(ui, "offset.x:", &mut cfg.pixel_offset.x, -0.5..=0.5, 0.05);
            Self::labeled_drag_f32(ui, "offset.y:", &mut cfg.pixel_offset.y, -0.5..=0.5, 0.05);
        });

        ui.separator();
        if ui.button("Reset settings to default").clicked() {
            cfg = ControllerConfig::default();
        }

        self.apply_controller_config(cfg);
    }

    /// Replaces the controller settings and re-derives adaptive scales if
    /// they changed.
    fn apply_controller_config(&mut self, cfg: ControllerConfig) {
        if cfg != *self.controller.config() {
            *self.controller.config_mut() = cfg;
            self.controller.reconfigure();
        }
    }

    fn ui_layer_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Layers");
        let adaptive = self.controller.config().adaptive_parallax_scale;

        for layer in self.controller.layers_mut() {
            let name = layer.object.as_ref().map_or("(detached)", |s| s.name);
            ui.collapsing(name, |ui| {
                ui.add_enabled_ui(!adaptive, |ui| {
                    Self::labeled_drag_f32(
                        ui,
                        "scale:",
                        &mut layer.config.parallax_scale,
                        -3.0..=3.0,
                        0.01,
                    );
                });
                ui.checkbox(&mut layer.config.wrap, "Wrap");
                if let Some(z) = layer.position().map(|p| p.z) {
                    ui.label(format!("depth = {z:.1}"));
                }
            });
        }
    }

    /// Draws one band, repeated one wrap window to each side when it wraps
    /// so the strip reads as continuous.
    fn draw_band(&self, painter: &egui::Painter, rect: egui::Rect, sprite: &Sprite, wraps: bool) {
        let copies: &[f32] = if wraps { &[-1.0, 0.0, 1.0] } else { &[0.0] };
        let column_width = BAND_WIDTH / sprite.columns.len() as f32;
        let origin = sprite.position.truncate() - Vec2::new(BAND_WIDTH / 2.0, 0.0);

        for &copy in copies {
            let start = origin + Vec2::new(copy * BAND_WIDTH, 0.0);
            for (i, &height) in sprite.columns.iter().enumerate() {
                let x0 = start.x + i as f32 * column_width;
                let bottom_left = self.world_to_screen(Vec2::new(x0, start.y), rect);
                let top_right =
                    self.world_to_screen(Vec2::new(x0 + column_width, start.y + height), rect);
                let column = egui::Rect::from_two_pos(bottom_left, top_right);
                if column.intersects(rect) {
                    painter.rect_filled(column, 0.0, sprite.color);
                }
            }
        }
    }

    /// Builds the central panel where the bands are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_rgb(25, 30, 50)))
            .show(ctx, |ui| {
                let response =
                    ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                // Drag moves the camera; the world follows the pointer.
                if response.dragged() {
                    let delta = response.drag_delta();
                    self.camera.x -= delta.x / self.zoom;
                    self.camera.y += delta.y / self.zoom;
                }

                if self.running {
                    let dt = ctx.input(|i| i.stable_dt).min(0.1);
                    self.camera += (self.camera_velocity * dt).extend(0.0);
                }

                self.step_once();

                for layer in self.controller.layers() {
                    if let Some(sprite) = layer.object.as_ref() {
                        self.draw_band(&painter, rect, sprite, layer.config.wrap);
                    }
                }

                // Reference marker at the camera position.
                let cam = self.world_to_screen(self.camera.truncate(), rect);
                painter.circle_stroke(cam, 4.0, egui::Stroke::new(1.5, egui::Color32::YELLOW));

                if let Some(hover) = response.hover_pos() {
                    let world = self.screen_to_world(hover, rect);
                    painter.text(
                        hover + egui::vec2(12.0, -12.0),
                        egui::Align2::LEFT_BOTTOM,
                        format!("({:.1}, {:.1})", world.x, world.y),
                        egui::FontId::monospace(12.0),
                        egui::Color32::WHITE,
                    );
                }

                if self.running || response.dragged() {
                    ctx.request_repaint();
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
