use crate::app::state::FormField;
use crate::app::App;
use crate::domain::{RATING_MAX, RATING_MIN};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const SLIDER_WIDTH: usize = 25;

pub fn render_entry_form(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(1)])
        .split(f.area().inner(Margin::new(2, 1)));

    let block = Block::default()
        .title("== New Survey Record ==")
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let mut lines = Vec::new();
    for field in FormField::ORDER {
        lines.push(field_line(app, field));
        lines.push(TextLine::from(""));
    }

    if app.pending_submit {
        lines.push(TextLine::from(Span::styled(
            "Saving record...",
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, layout[0]);

    let hint = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Up/Down",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": Field | ", Style::default().fg(Color::Gray)),
        Span::styled(
            "Left/Right",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": Adjust | ", Style::default().fg(Color::Gray)),
        Span::styled(
            "PgUp/PgDn",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": Adjust x10 | ", Style::default().fg(Color::Gray)),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": Next / Save | ", Style::default().fg(Color::Gray)),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": Cancel", Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(hint, layout[1]);
}

fn field_line(app: &App, field: FormField) -> TextLine<'static> {
    let selected = app.form.field == field;
    let label_style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let prefix = if selected { "> " } else { "  " };

    let value = match field {
        FormField::Location => app.form.location_caption(),
        FormField::Comment => app.form.comment.clone(),
        FormField::PhotoPath => {
            if app.form.photo_path.is_empty() {
                "(none)".to_string()
            } else {
                app.form.photo_path.clone()
            }
        }
        slider => slider_bar(app.form.slider_value(slider)),
    };

    TextLine::from(vec![
        Span::styled(format!("{prefix}{}", field.label()), label_style),
        Span::raw("  "),
        Span::styled(value, Style::default().fg(Color::Cyan)),
    ])
}

/// Text slider: a bar from -50 to 50 with the current value marked.
fn slider_bar(value: i64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let fraction = (value - RATING_MIN) as f64 / (RATING_MAX - RATING_MIN) as f64;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let marker = ((fraction * (SLIDER_WIDTH - 1) as f64).round() as usize).min(SLIDER_WIDTH - 1);

    let mut bar = String::with_capacity(SLIDER_WIDTH + 16);
    bar.push('[');
    for i in 0..SLIDER_WIDTH {
        bar.push(if i == marker { '@' } else { '-' });
    }
    bar.push(']');
    bar.push_str(&format!(" {value:+}"));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_marker_tracks_the_value() {
        let min = slider_bar(RATING_MIN);
        let max = slider_bar(RATING_MAX);
        let mid = slider_bar(0);

        assert!(min.starts_with("[@"));
        assert!(max.contains("@]"));

        let marker_index = mid.find('@').unwrap();
        assert!((marker_index as i64 - (SLIDER_WIDTH as i64 / 2)).abs() <= 1);
        assert!(mid.ends_with("+0"));
    }
}
