// UI module for spectrum-logger
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Dashboard => screens::main::render_dashboard(app, f),
        AppScreen::EntryForm => screens::entry::render_entry_form(app, f),
        AppScreen::Records => screens::records::render_records_view(app, f),
        AppScreen::RecordDetails => screens::record_details::render_record_details(app, f),
    }

    if app.show_help {
        screens::help::render_help_popup(f);
    }
}
