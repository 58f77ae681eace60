use crate::app::state::{App, AppScreen, FormField};
use crossterm::event::KeyCode;

pub fn handle_entry_input(app: &mut App, key: KeyCode) {
    if app.pending_submit {
        // Keystrokes are ignored while the save machine drains the submit.
        return;
    }

    match key {
        KeyCode::Esc => {
            app.screen = AppScreen::Dashboard;
        }
        KeyCode::Up => {
            app.form.field = app.form.field.prev();
        }
        KeyCode::Down => {
            app.form.field = app.form.field.next();
        }
        KeyCode::Enter => {
            if app.form.field.is_last() {
                app.pending_submit = true;
            } else {
                app.form.field = app.form.field.next();
            }
        }
        KeyCode::Left => handle_left_right(app, -1),
        KeyCode::Right => handle_left_right(app, 1),
        KeyCode::PageUp => app.form.bump(10),
        KeyCode::PageDown => app.form.bump(-10),
        KeyCode::Home => app.form.zero_slider(),
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Char(c) => app.form.push_char(c),
        _ => {}
    }
}

fn handle_left_right(app: &mut App, direction: i64) {
    match app.form.field {
        FormField::Location => {
            if direction < 0 {
                app.form.prev_location();
            } else {
                app.form.next_location();
            }
        }
        _ => app.form.bump(direction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::EntryFormState;
    use crate::config::AppConfig;
    use crate::store::RecordStore;

    fn test_app() -> App {
        let root = std::env::temp_dir().join(format!(
            "spectrum-logger-entry-input-{}",
            std::process::id()
        ));
        App::new(RecordStore::open(&AppConfig {
            csv_path: root.join("survey_data.csv"),
            photos_dir: root.join("photos"),
            sheet: None,
        }))
    }

    #[test]
    fn enter_on_the_last_field_queues_the_submit() {
        let mut app = test_app();
        app.screen = AppScreen::EntryForm;
        app.form = EntryFormState::new();

        for _ in 0..FormField::ORDER.len() - 1 {
            handle_entry_input(&mut app, KeyCode::Enter);
        }
        assert!(!app.pending_submit);
        assert_eq!(app.form.field, FormField::PhotoPath);

        handle_entry_input(&mut app, KeyCode::Enter);
        assert!(app.pending_submit);
    }

    #[test]
    fn sliders_respond_to_arrows_and_paging() {
        let mut app = test_app();
        app.form.field = FormField::SoftX;

        handle_entry_input(&mut app, KeyCode::Right);
        handle_entry_input(&mut app, KeyCode::PageUp);
        assert_eq!(app.form.soft_x, 11);

        handle_entry_input(&mut app, KeyCode::Home);
        assert_eq!(app.form.soft_x, 0);

        handle_entry_input(&mut app, KeyCode::Left);
        assert_eq!(app.form.soft_x, -1);
    }

    #[test]
    fn escape_abandons_the_form() {
        let mut app = test_app();
        app.screen = AppScreen::EntryForm;
        handle_entry_input(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::Dashboard);
    }
}
