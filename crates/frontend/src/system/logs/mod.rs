pub mod api;
pub mod loader;
pub mod model;
pub mod ui;
