use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod entry;
mod help;
mod main;
mod record_details;
mod records;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Dashboard => main::handle_dashboard_input(app, key).await,
        AppScreen::EntryForm => entry::handle_entry_input(app, key),
        AppScreen::Records => records::handle_records_input(app, key).await,
        AppScreen::RecordDetails => record_details::handle_record_details_input(app, key),
    }
}
