use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub async fn handle_records_input(app: &mut App, key: KeyCode) {
    if let Some(position) = app.confirm_delete {
        handle_confirm_input(app, key, position).await;
        return;
    }

    if app.searching {
        handle_search_input(app, key);
        return;
    }

    let visible = app.visible_positions().len();

    match key {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.screen = AppScreen::Dashboard;
        }
        KeyCode::Char('/') => {
            app.searching = true;
        }
        KeyCode::Up => {
            app.selected_row = app.selected_row.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.selected_row + 1 < visible {
                app.selected_row += 1;
            }
        }
        KeyCode::PageUp => {
            app.selected_row = app.selected_row.saturating_sub(5);
        }
        KeyCode::PageDown => {
            app.selected_row = (app.selected_row + 5).min(visible.saturating_sub(1));
        }
        KeyCode::Home => {
            app.selected_row = 0;
        }
        KeyCode::End => {
            app.selected_row = visible.saturating_sub(1);
        }
        KeyCode::Enter => {
            if app.selected_position().is_some() {
                app.screen = AppScreen::RecordDetails;
            }
        }
        KeyCode::Char('d') => {
            app.confirm_delete = app.selected_position();
        }
        _ => {}
    }
}

async fn handle_confirm_input(app: &mut App, key: KeyCode, position: usize) {
    match key {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.delete_at(position).await;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.confirm_delete = None;
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.searching = false;
            app.search_query.clear();
            app.clamp_selected_row();
        }
        KeyCode::Enter => {
            app.searching = false;
            app.clamp_selected_row();
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.selected_row = 0;
        }
        _ => {}
    }
}
