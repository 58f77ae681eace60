use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_record_details_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.screen = AppScreen::Records;
        }
        KeyCode::Char('d') => {
            app.confirm_delete = app.selected_position();
            app.screen = AppScreen::Records;
        }
        _ => {}
    }
}
