//! Hard-to-Soft vector view: one arrow per record, drawn from the record's
//! Hard plane point to its Soft plane point on a shared [-60, 60] canvas.

use crate::app::App;
use crate::domain::CHART_BOUND;
use crate::ui::widgets::short_label;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const ARROWHEAD_LENGTH: f64 = 4.0;
const ARROWHEAD_ANGLE: f64 = 150.0 * std::f64::consts::PI / 180.0;

pub fn render_vector_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Hard -> Soft Vectors")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let records = app.store.records();
    if records.is_empty() {
        let paragraph = Paragraph::new("No records yet")
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let arrows: Vec<((f64, f64), (f64, f64), String)> = records
        .iter()
        .map(|record| {
            (
                record.hard_point(),
                record.soft_point(),
                short_label(&record.location).to_string(),
            )
        })
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([-CHART_BOUND, CHART_BOUND])
        .y_bounds([-CHART_BOUND, CHART_BOUND])
        .paint(move |ctx| {
            // Zero axes
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

            for ((hard_x, hard_y), (soft_x, soft_y), label) in &arrows {
                ctx.draw(&CanvasLine {
                    x1: *hard_x,
                    y1: *hard_y,
                    x2: *soft_x,
                    y2: *soft_y,
                    color: Color::Gray,
                });

                for (head_x, head_y) in arrowhead(*hard_x, *hard_y, *soft_x, *soft_y) {
                    ctx.draw(&CanvasLine {
                        x1: *soft_x,
                        y1: *soft_y,
                        x2: head_x,
                        y2: head_y,
                        color: Color::Gray,
                    });
                }

                ctx.draw(&Circle {
                    x: *hard_x,
                    y: *hard_y,
                    radius: 1.0,
                    color: Color::Red,
                });
                ctx.draw(&Circle {
                    x: *soft_x,
                    y: *soft_y,
                    radius: 1.0,
                    color: Color::Blue,
                });
                ctx.print(
                    *soft_x + 2.0,
                    *soft_y,
                    ratatui::text::Span::styled(
                        label.clone(),
                        Style::default().fg(Color::Blue),
                    ),
                );
            }

            ctx.print(
                -CHART_BOUND + 2.0,
                CHART_BOUND - 3.0,
                ratatui::text::Span::styled("red: hard  blue: soft", Style::default().fg(Color::Gray)),
            );
        });

    f.render_widget(canvas, area);
}

/// Endpoints of the two arrowhead strokes at the tip of a vector. Degenerate
/// (zero-length) vectors get no arrowhead.
fn arrowhead(from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> Vec<(f64, f64)> {
    let dx = to_x - from_x;
    let dy = to_y - from_y;
    if dx == 0.0 && dy == 0.0 {
        return Vec::new();
    }

    let angle = dy.atan2(dx);
    [angle + ARROWHEAD_ANGLE, angle - ARROWHEAD_ANGLE]
        .into_iter()
        .map(|stroke| {
            (
                stroke.cos().mul_add(ARROWHEAD_LENGTH, to_x),
                stroke.sin().mul_add(ARROWHEAD_LENGTH, to_y),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{Rating, SurveyRecord};
    use crate::store::RecordStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[tokio::test]
    async fn soft_endpoints_are_labeled_by_location() {
        let root = std::env::temp_dir().join(format!(
            "spectrum-logger-vectors-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&root).unwrap();
        let mut app = App::new(RecordStore::open(&AppConfig {
            csv_path: root.join("survey_data.csv"),
            photos_dir: root.join("photos"),
            sheet: None,
        }));
        app.store
            .append(SurveyRecord {
                location: "座喜味城跡 (読谷)".to_string(),
                hard_y_authenticity: Rating::from_score(20),
                hard_x_affect: Rating::from_score(-10),
                soft_y_correctness: Rating::from_score(30),
                soft_x_affect: Rating::from_score(40),
                comment: String::new(),
                image_path: String::new(),
                timestamp: "2026-01-15 09:30:12".to_string(),
            })
            .await;

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_vector_panel(&app, f, f.area()))
            .unwrap();
        // Cells covered by a preceding wide (e.g. CJK) glyph are reset to
        // blank fillers in the buffer; skip them so the joined string matches
        // what the terminal actually displays.
        use ratatui::buffer::CellWidth;
        let mut content = String::new();
        let mut hidden: u16 = 0;
        for cell in terminal.backend().buffer().content() {
            if hidden > 0 {
                hidden -= 1;
                continue;
            }
            content.push_str(cell.symbol());
            hidden = cell.cell_width().saturating_sub(1);
        }

        assert!(content.contains("座喜味城跡"));
    }

    #[test]
    fn arrowhead_strokes_point_back_toward_the_origin() {
        let heads = arrowhead(0.0, 0.0, 10.0, 0.0);
        assert_eq!(heads.len(), 2);
        for (x, _) in heads {
            assert!(x < 10.0);
        }
    }

    #[test]
    fn zero_length_vectors_get_no_arrowhead() {
        assert!(arrowhead(5.0, 5.0, 5.0, 5.0).is_empty());
    }
}
