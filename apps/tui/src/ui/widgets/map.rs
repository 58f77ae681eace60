//! Survey-area map. Records whose location matches the site registry are
//! plotted at the registered coordinates; everything else stays off the map.

use crate::app::App;
use crate::domain::SITE_REGISTRY;
use crate::ui::widgets::short_label;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

// Viewport around the surveyed stretch of the Okinawa west coast,
// padded past the registry's coordinate extremes.
const LON_BOUNDS: [f64; 2] = [127.60, 127.83];
const LAT_BOUNDS: [f64; 2] = [26.15, 26.48];

pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Survey Map")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if area.width < 8 || area.height < 6 {
        f.render_widget(block, area);
        return;
    }

    let mut positive: Vec<(f64, f64)> = Vec::new();
    let mut negative: Vec<(f64, f64)> = Vec::new();
    for record in app.store.records() {
        if let Some((lat, lon)) = record.map_coords() {
            if record.hard_y_authenticity.chart_value() >= 0.0 {
                positive.push((lon, lat));
            } else {
                negative.push((lon, lat));
            }
        }
    }

    let canvas = Canvas::default()
        .block(block)
        .x_bounds(LON_BOUNDS)
        .y_bounds(LAT_BOUNDS)
        .paint(move |ctx| {
            for (name, lat, lon) in SITE_REGISTRY {
                ctx.draw(&Circle {
                    x: lon,
                    y: lat,
                    radius: 0.004,
                    color: Color::DarkGray,
                });
                ctx.print(lon, lat, short_label(name));
            }

            ctx.draw(&Points {
                coords: &positive,
                color: Color::Blue,
            });
            ctx.draw(&Points {
                coords: &negative,
                color: Color::Red,
            });
        });

    f.render_widget(canvas, area);
}
