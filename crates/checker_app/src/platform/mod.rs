mod app;
mod cli;
mod config;
mod logging;
mod surface;
mod ui;

pub use app::run_app;
