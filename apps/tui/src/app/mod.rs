// App module for spectrum-logger
// Handles application state and survey statistics

pub mod actions;
pub mod input;
pub mod state;

pub use actions::SurveyStats;
pub use input::handle_input;
pub use state::{App, AppScreen, EntryFormState, FormField};
