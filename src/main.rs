#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use anyhow::Context;
use blitz45::{Config, FileStorage};
use iced::Theme;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blitz45=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let storage = FileStorage::open(config.data_dir.clone())
        .with_context(|| format!("Failed to open data directory {}", config.data_dir.display()))?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        export_dir = %config.export_dir.display(),
        urgency_mode = ?config.urgency_mode,
        "Starting BLITZ 45 Dias"
    );

    iced::application(
        move || app::init(config.clone(), storage.clone()),
        app::update,
        app::view,
    )
    .title("BLITZ 45 Dias")
    .theme(|_: &app::State| Theme::Dark)
    .window(iced::window::Settings {
        size: iced::Size::new(980.0, 760.0),
        ..Default::default()
    })
    .run()?;

    Ok(())
}
