use crate::app::App;
use crate::ui::widgets::charts::{render_chart_panel, render_chart_tabs};
use crate::ui::widgets::map::render_map;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let main_layout = build_main_layout(f);

    render_title_section(app, f, main_layout[0]);
    render_content_section(app, f, main_layout[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);
}

fn build_main_layout(f: &Frame<'_>) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(10),   // Content area
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)))
        .to_vec()
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== Okinawa Spectrum Logger ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let title_line = TextLine::from(vec![
        Span::styled(
            format!("{} records", app.store.len()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  |  backend: {}", app.store.backend_caption()),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let title_paragraph = Paragraph::new(title_line)
        .block(title_block)
        .alignment(Alignment::Left);
    f.render_widget(title_paragraph, area);
}

fn render_content_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let horizontal_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_map(app, f, horizontal_split[0]);

    let right_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(8)])
        .split(horizontal_split[1]);

    render_chart_tabs(app, f, right_split[0]);
    render_chart_panel(app, f, right_split[1]);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if app.status_message.is_empty() {
        Text::from(Span::styled(
            "Ready",
            Style::default().fg(Color::Gray),
        ))
    } else {
        let style = if app.status_message.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        Text::from(Span::styled(&app.status_message, style))
    };

    let status_paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let shortcuts_paragraph = Paragraph::new(shortcuts_line()).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}

fn shortcuts_line() -> TextLine<'static> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    TextLine::from(vec![
        Span::styled("n", key_style),
        Span::styled(": New record | ", text_style),
        Span::styled("l", key_style),
        Span::styled(": Records | ", text_style),
        Span::styled("r", key_style),
        Span::styled(": Refresh | ", text_style),
        Span::styled("Left/Right", key_style),
        Span::styled(": Chart tab | ", text_style),
        Span::styled("F1", key_style),
        Span::styled(": Help | ", text_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", text_style),
    ])
}
