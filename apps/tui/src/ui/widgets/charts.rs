//! Rating-plane scatters: one canvas per plane with fixed [-60, 60] bounds,
//! zero reference lines, and each point labeled by its location.

use crate::app::state::CHART_TABS;
use crate::app::App;
use crate::domain::CHART_BOUND;
use crate::ui::widgets::short_label;
use crate::ui::widgets::vectors::render_vector_panel;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

/// Which rating plane a scatter is drawn from.
#[derive(Clone, Copy)]
pub enum RatingAxis {
    Hard,
    Soft,
}

impl RatingAxis {
    const fn title(self) -> &'static str {
        match self {
            Self::Hard => "Hard Axis: material authenticity",
            Self::Soft => "Soft Axis: factual correctness",
        }
    }

    const fn x_caption(self) -> &'static str {
        match self {
            Self::Hard => "harsh <- affect -> comfort",
            Self::Soft => "painful <- affect -> fun",
        }
    }

    const fn y_caption(self) -> &'static str {
        match self {
            Self::Hard => "replica <- -> original",
            Self::Soft => "fiction <- -> fact",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Hard => Color::Red,
            Self::Soft => Color::Blue,
        }
    }
}

pub fn render_chart_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = CHART_TABS
        .iter()
        .map(|title| TextLine::from(*title))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.chart_tab_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

pub fn render_chart_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    match app.chart_tab_index {
        0 => render_rating_scatter(app, f, area, RatingAxis::Hard),
        1 => render_rating_scatter(app, f, area, RatingAxis::Soft),
        _ => render_vector_panel(app, f, area),
    }
}

pub fn render_rating_scatter(app: &App, f: &mut Frame<'_>, area: Rect, axis: RatingAxis) {
    let records = app.store.records();
    let block = Block::default()
        .title(axis.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if records.is_empty() {
        let paragraph = Paragraph::new("No records yet")
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let labeled: Vec<(f64, f64, String)> = records
        .iter()
        .map(|record| {
            let (x, y) = match axis {
                RatingAxis::Hard => record.hard_point(),
                RatingAxis::Soft => record.soft_point(),
            };
            (x, y, short_label(&record.location).to_string())
        })
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([-CHART_BOUND, CHART_BOUND])
        .y_bounds([-CHART_BOUND, CHART_BOUND])
        .paint(move |ctx| {
            // Zero reference lines
            ctx.draw(&CanvasLine {
                x1: -CHART_BOUND,
                y1: 0.0,
                x2: CHART_BOUND,
                y2: 0.0,
                color: Color::DarkGray,
            });
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: -CHART_BOUND,
                x2: 0.0,
                y2: CHART_BOUND,
                color: Color::DarkGray,
            });

            let points: Vec<(f64, f64)> = labeled.iter().map(|(x, y, _)| (*x, *y)).collect();
            ctx.draw(&Points {
                coords: &points,
                color: axis.color(),
            });

            for (x, y, label) in &labeled {
                ctx.print(
                    *x + 2.0,
                    *y,
                    Span::styled(label.clone(), Style::default().fg(axis.color())),
                );
            }

            ctx.print(
                CHART_BOUND - 30.0,
                -CHART_BOUND + 2.0,
                Span::styled(axis.x_caption(), Style::default().fg(Color::Gray)),
            );
            ctx.print(
                -CHART_BOUND + 2.0,
                CHART_BOUND - 2.0,
                Span::styled(axis.y_caption(), Style::default().fg(Color::Gray)),
            );
        });

    f.render_widget(canvas, area);
}
