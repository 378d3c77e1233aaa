mod app;
mod config;
mod editor;
mod error;
mod fixtures;
mod roster;
mod screens;
mod selection;
mod sorting;
mod store;

use app::App;
use app::state::WINDOW_SIZE;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!(version = env!("CARGO_PKG_VERSION"), "starting classroom dashboard");

    iced::application("Classes", App::update, App::view)
        .theme(|app: &App| app.theme.clone())
        .subscription(App::subscription)
        .window_size(WINDOW_SIZE)
        .run()
}
