pub mod charts;
pub mod map;
pub mod popup;
pub mod tables;
pub mod vectors;

/// Location name up to the first space, enough to identify a marker or a
/// plotted point without flooding the canvas.
pub fn short_label(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}
