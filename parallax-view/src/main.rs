//! Application entry point for the parallax scrolling demo.
//!
//! This binary installs logging, sets up eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod scene;
mod viewer;

use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Starts the native eframe application.
///
/// Log verbosity follows `RUST_LOG` (default `info`); use
/// `RUST_LOG=parallax_core=trace` to see every wrap correction.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the demo scene is invalid or eframe fails to create the
///   native window or event loop.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let viewer = Viewer::new()?;
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Parallax Scroller",
        options,
        Box::new(|_cc| Ok(Box::new(viewer))),
    )
    .map_err(|err| anyhow::anyhow!("eframe failed: {err}"))
}
