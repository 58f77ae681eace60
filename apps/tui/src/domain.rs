/// Inclusive slider range for all four rating axes.
pub const RATING_MIN: i64 = -50;
pub const RATING_MAX: i64 = 50;

/// Fixed half-width of every chart plane, independent of the data.
pub const CHART_BOUND: f64 = 60.0;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const PHOTO_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Known survey sites and their coordinates (latitude, longitude).
/// Read-only at runtime; records with any other location string are kept
/// but never placed on the map.
pub const SITE_REGISTRY: [(&str, f64, f64); 7] = [
    ("アメリカンビレッジ (北谷)", 26.316, 127.756),
    ("ピザハウス (夕食)", 26.262, 127.733),
    ("むら咲むら (読谷)", 26.406, 127.718),
    ("ホテル日航アリビラ (ランチ)", 26.413, 127.715),
    ("座喜味城跡 (読谷)", 26.408, 127.742),
    ("佐喜眞美術館 (宜野湾)", 26.273, 127.754),
    ("那覇港・フェリー (海上)", 26.216, 127.674),
];

/// Placeholder offered when the researcher picks the freeform option.
pub const FREEFORM_DEFAULT: &str = "名もなきグスク";

/// Looks up registry coordinates by exact name match.
pub fn site_coords(name: &str) -> Option<(f64, f64)> {
    SITE_REGISTRY
        .iter()
        .find(|(site, _, _)| *site == name)
        .map(|(_, lat, lon)| (*lat, *lon))
}

pub fn site_names() -> impl Iterator<Item = &'static str> {
    SITE_REGISTRY.iter().map(|(name, _, _)| *name)
}

pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn photo_stamp_now() -> String {
    chrono::Local::now().format(PHOTO_STAMP_FORMAT).to_string()
}

/// A rating value as stored: raw text from the backend, coerced to a number
/// only at charting time. Anything that fails to parse charts as 0; the
/// stored text is never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rating(String);

impl Rating {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_score(score: i64) -> Self {
        Self(score.to_string())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Value used on every chart. Missing or non-numeric text maps to 0.
    pub fn chart_value(&self) -> f64 {
        self.0.trim().parse().unwrap_or(0.0)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// One survey observation. Append-only: constructed by the entry form,
/// never mutated, removed only by explicit deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyRecord {
    pub location: String,
    pub hard_y_authenticity: Rating,
    pub hard_x_affect: Rating,
    pub soft_y_correctness: Rating,
    pub soft_x_affect: Rating,
    pub comment: String,
    pub image_path: String,
    pub timestamp: String,
}

impl SurveyRecord {
    /// Fixed column order shared by the worksheet service and the CSV
    /// snapshot.
    pub const COLUMNS: [&'static str; 8] = [
        "Location",
        "Hard_Y_Authenticity",
        "Hard_X_Affect",
        "Soft_Y_Correctness",
        "Soft_X_Affect",
        "Comment",
        "Image_Path",
        "Timestamp",
    ];

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.location.clone(),
            self.hard_y_authenticity.raw().to_string(),
            self.hard_x_affect.raw().to_string(),
            self.soft_y_correctness.raw().to_string(),
            self.soft_x_affect.raw().to_string(),
            self.comment.clone(),
            self.image_path.clone(),
            self.timestamp.clone(),
        ]
    }

    /// Builds a record from a stored row. Short rows pad with empty cells so
    /// a truncated backend row still loads.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |index: usize| row.get(index).cloned().unwrap_or_default();

        Self {
            location: cell(0),
            hard_y_authenticity: Rating::new(cell(1)),
            hard_x_affect: Rating::new(cell(2)),
            soft_y_correctness: Rating::new(cell(3)),
            soft_x_affect: Rating::new(cell(4)),
            comment: cell(5),
            image_path: cell(6),
            timestamp: cell(7),
        }
    }

    /// (x, y) on the Hard plane: environmental affect against material
    /// authenticity.
    pub fn hard_point(&self) -> (f64, f64) {
        (
            self.hard_x_affect.chart_value(),
            self.hard_y_authenticity.chart_value(),
        )
    }

    /// (x, y) on the Soft plane: experiential affect against factual
    /// correctness.
    pub fn soft_point(&self) -> (f64, f64) {
        (
            self.soft_x_affect.chart_value(),
            self.soft_y_correctness.chart_value(),
        )
    }

    /// Registry coordinates for the map, or None for freeform locations.
    pub fn map_coords(&self) -> Option<(f64, f64)> {
        site_coords(&self.location)
    }

    pub const fn has_photo(&self) -> bool {
        !self.image_path.is_empty()
    }
}

pub fn clamp_rating(value: i64) -> i64 {
    value.clamp(RATING_MIN, RATING_MAX)
}
