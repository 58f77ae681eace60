use crate::domain::{self, clamp_rating, SurveyRecord};
use crate::store::RecordStore;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Dashboard,
    EntryForm,
    Records,
    RecordDetails,
}

/// Chart tabs on the dashboard.
pub const CHART_TABS: [&str; 3] = ["Hard", "Soft", "Vector"];

/// Fields of the entry form in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Location,
    HardY,
    HardX,
    SoftY,
    SoftX,
    Comment,
    PhotoPath,
}

impl FormField {
    pub const ORDER: [Self; 7] = [
        Self::Location,
        Self::HardY,
        Self::HardX,
        Self::SoftY,
        Self::SoftX,
        Self::Comment,
        Self::PhotoPath,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::HardY => "H-Y authenticity (replica <-> original)",
            Self::HardX => "H-X affect (harsh <-> comfort)",
            Self::SoftY => "S-Y correctness (fiction <-> fact)",
            Self::SoftX => "S-X affect (painful <-> fun)",
            Self::Comment => "Comment",
            Self::PhotoPath => "Photo file",
        }
    }

    pub const fn is_slider(self) -> bool {
        matches!(self, Self::HardY | Self::HardX | Self::SoftY | Self::SoftX)
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    pub const fn is_last(self) -> bool {
        matches!(self, Self::PhotoPath)
    }
}

/// Working state of the entry form. Sliders are born at 0 and clamped to
/// the rating range on every bump; nothing else is validated.
#[derive(Debug, Clone)]
pub struct EntryFormState {
    pub field: FormField,
    /// Index into the registry; one past the end selects freeform entry.
    pub location_index: usize,
    pub custom_location: String,
    pub hard_y: i64,
    pub hard_x: i64,
    pub soft_y: i64,
    pub soft_x: i64,
    pub comment: String,
    pub photo_path: String,
}

impl EntryFormState {
    pub fn new() -> Self {
        Self {
            field: FormField::Location,
            location_index: 0,
            custom_location: domain::FREEFORM_DEFAULT.to_string(),
            hard_y: 0,
            hard_x: 0,
            soft_y: 0,
            soft_x: 0,
            comment: String::new(),
            photo_path: String::new(),
        }
    }

    fn location_count() -> usize {
        domain::SITE_REGISTRY.len() + 1
    }

    pub fn is_freeform(&self) -> bool {
        self.location_index == domain::SITE_REGISTRY.len()
    }

    pub fn next_location(&mut self) {
        self.location_index = (self.location_index + 1) % Self::location_count();
    }

    pub fn prev_location(&mut self) {
        let count = Self::location_count();
        self.location_index = (self.location_index + count - 1) % count;
    }

    /// The location the submitted record will carry.
    pub fn selected_location(&self) -> String {
        domain::site_names()
            .nth(self.location_index)
            .map_or_else(|| self.custom_location.clone(), str::to_string)
    }

    /// Picker caption for the location row.
    pub fn location_caption(&self) -> String {
        if self.is_freeform() {
            format!("その他 (自由入力): {}", self.custom_location)
        } else {
            self.selected_location()
        }
    }

    pub const fn slider_value(&self, field: FormField) -> i64 {
        match field {
            FormField::HardY => self.hard_y,
            FormField::HardX => self.hard_x,
            FormField::SoftY => self.soft_y,
            FormField::SoftX => self.soft_x,
            _ => 0,
        }
    }

    /// Adjusts the focused slider, clamped to the rating range. Ignored for
    /// non-slider fields.
    pub fn bump(&mut self, delta: i64) {
        let slot = match self.field {
            FormField::HardY => &mut self.hard_y,
            FormField::HardX => &mut self.hard_x,
            FormField::SoftY => &mut self.soft_y,
            FormField::SoftX => &mut self.soft_x,
            _ => return,
        };
        *slot = clamp_rating(*slot + delta);
    }

    pub fn zero_slider(&mut self) {
        match self.field {
            FormField::HardY => self.hard_y = 0,
            FormField::HardX => self.hard_x = 0,
            FormField::SoftY => self.soft_y = 0,
            FormField::SoftX => self.soft_x = 0,
            _ => {}
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self.field {
            FormField::Location if self.is_freeform() => self.custom_location.push(c),
            FormField::Comment => self.comment.push(c),
            FormField::PhotoPath => self.photo_path.push(c),
            _ => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.field {
            FormField::Location if self.is_freeform() => {
                self.custom_location.pop();
            }
            FormField::Comment => {
                self.comment.pop();
            }
            FormField::PhotoPath => {
                self.photo_path.pop();
            }
            _ => {}
        }
    }

    /// Builds the record the form describes. The image path is the stored
    /// photo path, already resolved by the caller.
    pub fn build_record(&self, image_path: String, timestamp: String) -> SurveyRecord {
        SurveyRecord {
            location: self.selected_location(),
            hard_y_authenticity: domain::Rating::from_score(self.hard_y),
            hard_x_affect: domain::Rating::from_score(self.hard_x),
            soft_y_correctness: domain::Rating::from_score(self.soft_y),
            soft_x_affect: domain::Rating::from_score(self.soft_x),
            comment: self.comment.clone(),
            image_path,
            timestamp,
        }
    }
}

impl Default for EntryFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub store: RecordStore,
    pub form: EntryFormState,
    pub status_message: String,
    pub show_help: bool,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub chart_tab_index: usize,
    /// Row selected in the reverse-chronological records table.
    pub selected_row: usize,
    pub search_query: String,
    pub searching: bool,
    /// Store position awaiting delete confirmation.
    pub confirm_delete: Option<usize>,
    /// Set by the entry form; drained by the event loop's save machine.
    pub pending_submit: bool,
}

impl App {
    pub fn new(store: RecordStore) -> Self {
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            store,
            form: EntryFormState::new(),
            status_message: String::new(),
            show_help: false,
            animation_counter: 0.0,
            last_frame: Instant::now(),
            chart_tab_index: 0,
            selected_row: 0,
            search_query: String::new(),
            searching: false,
            confirm_delete: None,
            pending_submit: false,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Animation counter cycles between 0 and 2*PI
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
    }

    /// Store positions shown in the records table: newest first, optionally
    /// narrowed by the fuzzy location filter.
    pub fn visible_positions(&self) -> Vec<usize> {
        let matcher = SkimMatcherV2::default();
        let query = self.search_query.trim();

        (0..self.store.len())
            .rev()
            .filter(|position| {
                if query.is_empty() {
                    return true;
                }
                let location = &self.store.records()[*position].location;
                matcher.fuzzy_match(location, query).is_some()
            })
            .collect()
    }

    /// Store position of the currently selected table row.
    pub fn selected_position(&self) -> Option<usize> {
        self.visible_positions().get(self.selected_row).copied()
    }

    pub fn clamp_selected_row(&mut self) {
        let visible = self.visible_positions().len();
        if visible == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= visible {
            self.selected_row = visible - 1;
        }
    }

    pub fn open_entry_form(&mut self) {
        self.form = EntryFormState::new();
        self.screen = AppScreen::EntryForm;
        self.status_message.clear();
    }

    /// One full submit pass: photo copy, record construction, append,
    /// persist. Returns true when the remote (if any) accepted the row; the
    /// in-memory store and snapshot gain the row either way.
    pub async fn submit_form(&mut self) -> bool {
        let photo_source = self.form.photo_path.trim().to_string();
        let image_path = if photo_source.is_empty() {
            String::new()
        } else {
            self.store.store_photo(Path::new(&photo_source))
        };

        let record = self
            .form
            .build_record(image_path, domain::timestamp_now());

        let remote_ok = self.store.append(record).await;

        self.form = EntryFormState::new();
        self.screen = AppScreen::Dashboard;
        remote_ok
    }

    /// Deletes by store position and keeps the table selection in range.
    pub async fn delete_at(&mut self, position: usize) {
        if self.store.delete(position).await.is_some() {
            self.status_message = format!("Record deleted ({} remaining)", self.store.len());
        }
        self.confirm_delete = None;
        self.clamp_selected_row();
        if self.store.is_empty() {
            self.screen = AppScreen::Dashboard;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{RATING_MAX, RATING_MIN};
    use std::path::PathBuf;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "spectrum-logger-app-{}-{name}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn test_app(name: &str) -> App {
        let root = temp_root(name);
        App::new(RecordStore::open(&AppConfig {
            csv_path: root.join("survey_data.csv"),
            photos_dir: root.join("photos"),
            sheet: None,
        }))
    }

    #[test]
    fn sliders_clamp_to_the_rating_range() {
        let mut form = EntryFormState::new();
        form.field = FormField::HardY;

        for _ in 0..200 {
            form.bump(1);
        }
        assert_eq!(form.hard_y, RATING_MAX);

        for _ in 0..500 {
            form.bump(-1);
        }
        assert_eq!(form.hard_y, RATING_MIN);

        form.bump(10);
        assert_eq!(form.hard_y, RATING_MIN + 10);
    }

    #[test]
    fn field_navigation_wraps_in_both_directions() {
        let first = FormField::ORDER[0];
        let last = FormField::ORDER[FormField::ORDER.len() - 1];
        assert_eq!(first.prev(), last);
        assert_eq!(last.next(), first);
    }

    #[test]
    fn freeform_location_is_typed_not_picked() {
        let mut form = EntryFormState::new();
        for _ in 0..domain::SITE_REGISTRY.len() {
            form.next_location();
        }
        assert!(form.is_freeform());

        form.custom_location.clear();
        form.field = FormField::Location;
        for c in "新しい場所".chars() {
            form.push_char(c);
        }
        assert_eq!(form.selected_location(), "新しい場所");

        form.next_location();
        assert_eq!(form.selected_location(), domain::SITE_REGISTRY[0].0);
    }

    #[tokio::test]
    async fn submitting_the_form_appends_one_full_record() {
        let mut app = test_app("submit");
        app.store.hydrate().await;

        app.form.location_index = 4; // 座喜味城跡 (読谷)
        app.form.hard_y = 20;
        app.form.hard_x = -10;
        app.form.soft_y = 30;
        app.form.soft_x = 40;

        assert!(app.submit_form().await);

        assert_eq!(app.store.len(), 1);
        let record = &app.store.records()[0];
        assert_eq!(record.location, "座喜味城跡 (読谷)");
        assert_eq!(record.hard_point(), (-10.0, 20.0));
        assert_eq!(record.soft_point(), (40.0, 30.0));
        assert!(record.image_path.is_empty());
        assert_eq!(record.timestamp.len(), "2026-01-15 09:30:12".len());
        assert_eq!(app.screen, AppScreen::Dashboard);
    }

    #[tokio::test]
    async fn records_table_lists_newest_first() {
        let mut app = test_app("ordering");
        for name in ["first", "second", "third"] {
            app.form = EntryFormState::new();
            app.form.location_index = domain::SITE_REGISTRY.len();
            app.form.custom_location = name.to_string();
            app.submit_form().await;
        }

        let positions = app.visible_positions();
        assert_eq!(positions, vec![2, 1, 0]);
        app.selected_row = 0;
        assert_eq!(app.selected_position(), Some(2));
    }

    #[tokio::test]
    async fn fuzzy_filter_narrows_visible_rows() {
        let mut app = test_app("filter");
        for name in ["座喜味城跡 (読谷)", "American Village", "Sakima Museum"] {
            app.form = EntryFormState::new();
            app.form.location_index = domain::SITE_REGISTRY.len();
            app.form.custom_location = name.to_string();
            app.submit_form().await;
        }

        app.search_query = "museum".to_string();
        let positions = app.visible_positions();
        assert_eq!(positions.len(), 1);
        assert_eq!(app.store.records()[positions[0]].location, "Sakima Museum");
    }
}
