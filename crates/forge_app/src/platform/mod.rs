pub mod app;
pub mod config;
pub mod effects;
pub mod host;
pub mod logging;
pub mod page;
pub mod persist;
pub mod ui;

pub use app::run_app;
