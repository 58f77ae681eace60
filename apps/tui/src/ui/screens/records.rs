use crate::app::App;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render_records_view(app: &App, f: &mut Frame<'_>) {
    let area = f.area();
    let positions = app.visible_positions();

    if positions.is_empty() && app.search_query.is_empty() && !app.searching {
        let block = Block::default()
            .title("Survey Records")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new("No records yet. Press Esc, then 'n' to add one.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Location"),
        Cell::from("H-Y"),
        Cell::from("H-X"),
        Cell::from("S-Y"),
        Cell::from("S-X"),
        Cell::from("Timestamp"),
        Cell::from("Photo"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = positions.len();
    let max_visible_rows = area.height.saturating_sub(7) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_row);

    let rows = positions
        .iter()
        .skip(offset)
        .take(max_visible_rows)
        .enumerate()
        .map(|(i, position)| {
            let record = &app.store.records()[*position];
            let is_selected = i + offset == app.selected_row;
            let style = if is_selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if record.map_coords().is_some() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(record.location.clone()),
                Cell::from(record.hard_y_authenticity.raw().to_string()),
                Cell::from(record.hard_x_affect.raw().to_string()),
                Cell::from(record.soft_y_correctness.raw().to_string()),
                Cell::from(record.soft_x_affect.raw().to_string()),
                Cell::from(record.timestamp.clone()),
                Cell::from(if record.has_photo() { "Yes" } else { "" }),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Min(24),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(19),
        Constraint::Length(5),
    ];

    let title = if !app.search_query.is_empty() {
        format!(
            "Survey Records (filter: \"{}\", {total_rows} match)",
            app.search_query
        )
    } else if total_rows == 0 {
        "Survey Records (empty)".to_string()
    } else {
        format!(
            "Survey Records ({} of {total_rows}, newest first)",
            app.selected_row.min(total_rows - 1) + 1
        )
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .column_spacing(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    f.render_widget(table, chunks[0]);
    render_footer(app, f, chunks[1]);

    if let Some(position) = app.confirm_delete {
        render_delete_confirm(app, f, position);
    }
}

fn render_footer(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let line = if app.searching {
        TextLine::from(vec![
            Span::styled(
                "Search: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{}_", app.search_query)),
            Span::styled("   (Enter: apply, Esc: clear)", Style::default().fg(Color::Gray)),
        ])
    } else {
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        TextLine::from(vec![
            Span::styled("ESC", key_style),
            Span::raw(": Back   "),
            Span::styled("↑/↓", key_style),
            Span::raw(": Navigate   "),
            Span::styled("PgUp/PgDn", key_style),
            Span::raw(": Jump 5 rows   "),
            Span::styled("/", key_style),
            Span::raw(": Search   "),
            Span::styled("Enter", key_style),
            Span::raw(": Details   "),
            Span::styled("d", key_style),
            Span::raw(": Delete"),
        ])
    };

    let footer = Paragraph::new(line)
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn render_delete_confirm(app: &App, f: &mut Frame<'_>, position: usize) {
    let Some(record) = app.store.records().get(position) else {
        return;
    };

    let popup_area = centered_rect(50, 30, f.area());
    f.render_widget(ClearWidget, popup_area);

    let block = Block::default()
        .title(" Delete record? ")
        .title_style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let mut lines = vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            record.location.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(record.timestamp.clone()),
    ];

    if record.has_photo() {
        lines.push(TextLine::from(Span::styled(
            "The photo file will be deleted too.",
            Style::default().fg(Color::Yellow),
        )));
    }

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": Delete   ", Style::default().fg(Color::Gray)),
        Span::styled(
            "n",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": Keep", Style::default().fg(Color::Gray)),
    ]));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::store::RecordStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn searching_an_empty_store_shows_an_empty_title() {
        let root = std::env::temp_dir().join(format!(
            "spectrum-logger-records-ui-{}",
            std::process::id()
        ));
        let mut app = App::new(RecordStore::open(&AppConfig {
            csv_path: root.join("survey_data.csv"),
            photos_dir: root.join("photos"),
            sheet: None,
        }));
        app.screen = crate::app::AppScreen::Records;
        app.searching = true;

        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_records_view(&app, f)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();

        assert!(content.contains("Survey Records (empty)"));
        assert!(!content.contains("1 of 0"));
    }
}
