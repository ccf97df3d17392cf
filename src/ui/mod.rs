mod app;
mod headless;
mod screens;

pub use app::TuiApp;
pub use headless::run_headless;
