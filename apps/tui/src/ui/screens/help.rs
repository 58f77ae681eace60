use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help_popup(f: &mut Frame<'_>) {
    let popup_area = centered_rect(80, 80, f.area());
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Text::from(TextLine::from(vec![Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )])))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let shortcut = |key: &'static str, text: &'static str| {
        TextLine::from(vec![
            Span::styled(format!("  {key}"), key_style),
            Span::styled(format!(" - {text}"), Style::default()),
        ])
    };

    vec![
        TextLine::from(vec![Span::styled(
            "Okinawa Spectrum Logger",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Log field-survey impressions of heritage sites on two rating planes and review them on the map and charts.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Dashboard:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        shortcut("n", "New survey record"),
        shortcut("l", "Open the records table"),
        shortcut("r", "Refresh from the worksheet backend"),
        shortcut("Left/Right", "Switch chart tab (Hard / Soft / Vector)"),
        shortcut("q", "Quit"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Entry form:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        shortcut("Up/Down", "Move between fields"),
        shortcut("Left/Right", "Cycle locations / adjust a rating by 1"),
        shortcut("PgUp/PgDn", "Adjust a rating by 10"),
        shortcut("Home", "Reset a rating to 0"),
        shortcut("Enter", "Next field; on the photo field, save the record"),
        shortcut("Esc", "Discard the form"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Records table:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        shortcut("/", "Fuzzy-filter by location"),
        shortcut("Enter", "Record details"),
        shortcut("d", "Delete the selected record (with its photo)"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Rating planes:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        TextLine::from("  Hard Y - material authenticity (replica -50 .. +50 original)"),
        TextLine::from("  Hard X - environmental affect (harsh -50 .. +50 comfort)"),
        TextLine::from("  Soft Y - factual correctness (fiction -50 .. +50 fact)"),
        TextLine::from("  Soft X - experiential affect (painful -50 .. +50 fun)"),
    ]
}
