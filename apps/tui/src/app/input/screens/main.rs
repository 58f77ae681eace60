use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen, CHART_TABS};
use crossterm::event::KeyCode;

pub async fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Left => {
            app.chart_tab_index = wrap_decrement(app.chart_tab_index, CHART_TABS.len());
        }
        KeyCode::Right => {
            app.chart_tab_index = wrap_increment(app.chart_tab_index, CHART_TABS.len());
        }
        KeyCode::Char('n') => {
            app.open_entry_form();
        }
        KeyCode::Char('l') => {
            app.store.refresh().await;
            app.selected_row = 0;
            app.search_query.clear();
            app.searching = false;
            app.screen = AppScreen::Records;
        }
        KeyCode::Char('r') => {
            app.store.refresh().await;
            app.status_message = format!("Refreshed ({} records)", app.store.len());
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
