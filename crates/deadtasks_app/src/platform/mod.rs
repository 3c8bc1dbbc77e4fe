pub mod app;
pub mod effects;
pub mod input;
pub mod logging;
pub mod settings;
pub mod ui;
