mod app;
mod cli;

use anyhow::Context;
use clap::Parser;
use diorama_engine::device::GpuInit;
use diorama_engine::logging::{init_logging, LoggingConfig};
use diorama_engine::mesh::MeshLibrary;
use diorama_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::StudioApp;
use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(match &cli.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let scene = cli.build_scene().context("invalid scene configuration")?;
    let library = MeshLibrary::new(cli.icosphere_subdivisions)
        .context("failed to build mesh library")?;

    let config = RuntimeConfig {
        title: scene.title().to_string(),
        initial_size: LogicalSize::new(cli.width, cli.height),
        max_frame_delta: cli.max_frame_delta(),
    };

    log::info!("starting {} ({}x{})", config.title, cli.width, cli.height);

    Runtime::run(config, GpuInit::default(), StudioApp::new(scene, library))
        .context("diorama runtime error")
}
