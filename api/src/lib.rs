// Library exports for testing and external use

pub mod app;
pub mod routes;

pub use app::{create_app, AppState};
