use crate::app::App;
use ratatui::layout::{Alignment, Margin};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_record_details(app: &App, f: &mut Frame<'_>) {
    let area = f.area().inner(Margin::new(2, 1));

    let Some(position) = app.selected_position() else {
        let paragraph = Paragraph::new("Record no longer exists. Press Esc.")
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    };
    let record = &app.store.records()[position];

    let block = Block::default()
        .title(format!(" {} ", record.location))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::White);

    let map_line = record.map_coords().map_or_else(
        || "not on the map (freeform location)".to_string(),
        |(lat, lon)| format!("{lat:.3}, {lon:.3}"),
    );

    let lines = vec![
        TextLine::from(""),
        detail_line("Timestamp", &record.timestamp, label_style, value_style),
        detail_line("Map position", &map_line, label_style, value_style),
        TextLine::from(""),
        detail_line(
            "Hard Y (authenticity)",
            record.hard_y_authenticity.raw(),
            label_style,
            Style::default().fg(Color::Red),
        ),
        detail_line(
            "Hard X (affect)",
            record.hard_x_affect.raw(),
            label_style,
            Style::default().fg(Color::Red),
        ),
        detail_line(
            "Soft Y (correctness)",
            record.soft_y_correctness.raw(),
            label_style,
            Style::default().fg(Color::Blue),
        ),
        detail_line(
            "Soft X (affect)",
            record.soft_x_affect.raw(),
            label_style,
            Style::default().fg(Color::Blue),
        ),
        TextLine::from(""),
        detail_line(
            "Photo",
            if record.has_photo() {
                &record.image_path
            } else {
                "(none)"
            },
            label_style,
            value_style,
        ),
        TextLine::from(""),
        detail_line(
            "Comment",
            if record.comment.is_empty() {
                "(none)"
            } else {
                &record.comment
            },
            label_style,
            value_style,
        ),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Esc: back   d: delete",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn detail_line(
    label: &str,
    value: &str,
    label_style: Style,
    value_style: Style,
) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(value.to_string(), value_style),
    ])
}
