// Export our modules for use in binaries and tests
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod event;
pub mod store;
pub mod terminal;
pub mod ui;

pub use domain::{Rating, SurveyRecord};
