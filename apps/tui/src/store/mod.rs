//! Persistence adapter and session record store.
//!
//! Exactly one backend is authoritative per run: the remote worksheet
//! service when credentials are configured, otherwise the local CSV
//! snapshot. The snapshot is additionally rewritten as a backup on every
//! mutation while the remote is active. Adapter operations return
//! `Result<_, PersistenceError>`; the store logs and degrades instead of
//! propagating, so the UI never sees a persistence failure.

pub mod csv;
pub mod photos;
pub mod sheet;

use crate::config::AppConfig;
use crate::domain::SurveyRecord;
use sheet::SheetClient;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("worksheet request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("worksheet returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("snapshot file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Authoritative in-memory record list for the active session.
///
/// Constructed once at startup, mutated only through [`append`] and
/// [`delete`], torn down with the process.
///
/// [`append`]: RecordStore::append
/// [`delete`]: RecordStore::delete
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<SurveyRecord>,
    sheet: Option<SheetClient>,
    csv_path: PathBuf,
    photos_dir: PathBuf,
}

impl RecordStore {
    /// Builds the store from configuration. A worksheet client that cannot
    /// be constructed falls back to local mode silently.
    pub fn open(config: &AppConfig) -> Self {
        let sheet = config.sheet.clone().and_then(|sheet_config| {
            match SheetClient::new(sheet_config) {
                Ok(client) => Some(client),
                Err(e) => {
                    log::warn!("worksheet client unavailable, using local mode: {e}");
                    None
                }
            }
        });

        Self {
            records: Vec::new(),
            sheet,
            csv_path: config.csv_path.clone(),
            photos_dir: config.photos_dir.clone(),
        }
    }

    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub const fn is_remote(&self) -> bool {
        self.sheet.is_some()
    }

    pub const fn backend_caption(&self) -> &'static str {
        if self.is_remote() {
            "remote worksheet (CSV backup)"
        } else {
            "local CSV"
        }
    }

    pub fn photos_dir(&self) -> &std::path::Path {
        &self.photos_dir
    }

    /// Loads session state from the active backend. A failing remote loads
    /// as empty; a missing or malformed snapshot loads as empty.
    pub async fn hydrate(&mut self) {
        self.records = if let Some(sheet) = &self.sheet {
            match sheet.load_all().await {
                Ok(records) => records,
                Err(e) => {
                    log::warn!("worksheet load failed, starting empty: {e}");
                    Vec::new()
                }
            }
        } else {
            match csv::read_snapshot(&self.csv_path) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!("snapshot load failed, starting empty: {e}");
                    Vec::new()
                }
            }
        };
    }

    /// Re-pulls the latest rows from the remote. No-op in local mode, where
    /// the in-memory list is already authoritative; a failing remote keeps
    /// the current list instead of emptying it.
    pub async fn refresh(&mut self) {
        if let Some(sheet) = &self.sheet {
            match sheet.load_all().await {
                Ok(records) => self.records = records,
                Err(e) => {
                    log::warn!("worksheet refresh failed, keeping current records: {e}");
                }
            }
        }
    }

    /// Appends one record: remote refresh first so the row lands below
    /// everything written since the last pull, then in-memory, then
    /// best-effort remote append, then the full snapshot rewrite. Returns
    /// whether the remote accepted the row (always true in local mode).
    pub async fn append(&mut self, record: SurveyRecord) -> bool {
        self.refresh().await;
        self.records.push(record);

        let remote_ok = match (&self.sheet, self.records.last()) {
            (Some(sheet), Some(newest)) => match sheet.append_record(newest).await {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("worksheet append failed, row kept locally: {e}");
                    false
                }
            },
            _ => true,
        };

        self.rewrite_backup();
        remote_ok
    }

    /// Deletes the record at a 0-based position; later positions shift down
    /// by one. Refreshes from the remote first so the position addresses the
    /// current worksheet, removes the photo file and the remote counterpart,
    /// then rewrites the snapshot. Out-of-range positions are ignored.
    pub async fn delete(&mut self, position: usize) -> Option<SurveyRecord> {
        self.refresh().await;
        if position >= self.records.len() {
            return None;
        }

        photos::remove_photo(&self.records[position].image_path);

        if let Some(sheet) = &self.sheet {
            if let Err(e) = sheet.delete_record(position).await {
                log::warn!("worksheet delete failed for row {position}: {e}");
            }
        }

        let removed = self.records.remove(position);
        self.rewrite_backup();
        Some(removed)
    }

    /// Copies an uploaded image into the photo directory, returning the
    /// stored path or an empty string when the copy fails.
    pub fn store_photo(&self, source: &std::path::Path) -> String {
        match photos::store_photo(&self.photos_dir, source) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("photo save failed, recording without image: {e}");
                String::new()
            }
        }
    }

    fn rewrite_backup(&self) {
        if let Err(e) = csv::write_snapshot(&self.csv_path, &self.records) {
            log::warn!("snapshot rewrite failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, SheetConfig};
    use crate::domain::Rating;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "spectrum-logger-store-{}-{name}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn local_config(root: &Path) -> AppConfig {
        AppConfig {
            csv_path: root.join("survey_data.csv"),
            photos_dir: root.join("photos"),
            sheet: None,
        }
    }

    fn record(location: &str, hard_y: i64) -> SurveyRecord {
        SurveyRecord {
            location: location.to_string(),
            hard_y_authenticity: Rating::from_score(hard_y),
            hard_x_affect: Rating::from_score(-10),
            soft_y_correctness: Rating::from_score(30),
            soft_x_affect: Rating::from_score(40),
            comment: String::new(),
            image_path: String::new(),
            timestamp: "2026-01-15 09:30:12".to_string(),
        }
    }

    #[tokio::test]
    async fn append_then_reload_yields_same_records_in_order() {
        let root = temp_root("round-trip");
        let config = local_config(&root);

        let mut store = RecordStore::open(&config);
        store.hydrate().await;
        assert!(store.is_empty());

        for i in 0..4 {
            assert!(store.append(record(&format!("site {i}"), i)).await);
        }

        let mut reloaded = RecordStore::open(&config);
        reloaded.hydrate().await;
        assert_eq!(reloaded.records(), store.records());
        assert_eq!(reloaded.len(), 4);
        assert_eq!(reloaded.records()[2].location, "site 2");

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn delete_shifts_later_positions_down() {
        let root = temp_root("delete-shift");
        let mut store = RecordStore::open(&local_config(&root));

        for i in 0..3 {
            store.append(record(&format!("site {i}"), i)).await;
        }

        let removed = store.delete(1).await.unwrap();
        assert_eq!(removed.location, "site 1");
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].location, "site 0");
        assert_eq!(store.records()[1].location, "site 2");

        assert!(store.delete(5).await.is_none());

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn delete_removes_the_records_photo_file() {
        let root = temp_root("delete-photo");
        let mut store = RecordStore::open(&local_config(&root));

        let photo = root.join("shot.jpg");
        std::fs::write(&photo, b"jpeg").unwrap();

        let mut with_photo = record("site", 1);
        with_photo.image_path = photo.to_string_lossy().into_owned();
        store.append(with_photo).await;

        store.delete(0).await;
        assert!(!photo.exists());
        assert!(store.is_empty());

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn backup_is_a_full_snapshot_after_every_mutation() {
        let root = temp_root("snapshot");
        let config = local_config(&root);
        let mut store = RecordStore::open(&config);

        store.append(record("a", 1)).await;
        store.append(record("b", 2)).await;
        store.delete(0).await;

        let snapshot = csv::read_snapshot(&config.csv_path).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].location, "b");

        std::fs::remove_dir_all(&root).ok();
    }

    /// One-request-per-connection worksheet service double: answers every
    /// GET with the given rows and logs each request line.
    async fn spawn_sheet_stub(
        rows: Vec<Vec<String>>,
    ) -> (SheetConfig, Arc<Mutex<Vec<String>>>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            let body = serde_json::json!({ "rows": rows }).to_string();
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };

                let mut buf = vec![0_u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                let line = request.lines().next().unwrap_or_default().to_string();
                seen.lock().unwrap().push(line.clone());

                let payload = if line.starts_with("GET") {
                    body.clone()
                } else {
                    "{}".to_string()
                };
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{payload}",
                    payload.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        (
            SheetConfig {
                base_url: format!("http://{addr}"),
                token: String::new(),
            },
            requests,
        )
    }

    fn header_row() -> Vec<String> {
        SurveyRecord::COLUMNS
            .iter()
            .map(|column| (*column).to_string())
            .collect()
    }

    #[tokio::test]
    async fn remote_append_refreshes_before_writing() {
        let root = temp_root("remote-append");
        let (sheet, requests) = spawn_sheet_stub(vec![
            header_row(),
            record("remote a", 1).to_row(),
            record("remote b", 2).to_row(),
        ])
        .await;

        let mut store = RecordStore::open(&AppConfig {
            csv_path: root.join("survey_data.csv"),
            photos_dir: root.join("photos"),
            sheet: Some(sheet),
        });
        // Stale session: rows were added remotely since this list was built.
        assert!(store.is_empty());

        assert!(store.append(record("local", 3)).await);

        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[0].location, "remote a");
        assert_eq!(store.records()[1].location, "remote b");
        assert_eq!(store.records()[2].location, "local");

        let seen = requests.lock().unwrap().clone();
        assert!(seen.iter().any(|line| line.starts_with("GET /rows")));
        assert!(seen.iter().any(|line| line.starts_with("POST /rows")));

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn remote_delete_targets_the_refreshed_row() {
        let root = temp_root("remote-delete");
        let (sheet, requests) = spawn_sheet_stub(vec![
            header_row(),
            record("remote a", 1).to_row(),
            record("remote b", 2).to_row(),
        ])
        .await;

        let mut store = RecordStore::open(&AppConfig {
            csv_path: root.join("survey_data.csv"),
            photos_dir: root.join("photos"),
            sheet: Some(sheet),
        });
        // Stale session again: position 1 only exists after a refresh.
        assert!(store.is_empty());

        let removed = store.delete(1).await.unwrap();
        assert_eq!(removed.location, "remote b");
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].location, "remote a");

        let seen = requests.lock().unwrap().clone();
        assert!(seen.iter().any(|line| line.starts_with("DELETE /rows/2 ")));

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_current_records() {
        let root = temp_root("refresh-degrade");
        let mut store = RecordStore::open(&AppConfig {
            csv_path: root.join("survey_data.csv"),
            photos_dir: root.join("photos"),
            sheet: Some(SheetConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                token: String::new(),
            }),
        });

        // Unreachable remote: the append still lands in memory and in the
        // snapshot, and a later refresh must not wipe it.
        assert!(!store.append(record("kept", 1)).await);
        assert_eq!(store.len(), 1);

        store.refresh().await;
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].location, "kept");

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn malformed_snapshot_hydrates_empty() {
        let root = temp_root("malformed");
        let config = local_config(&root);
        std::fs::write(&config.csv_path, "Location,Only\n\"unterminated").unwrap();

        let mut store = RecordStore::open(&config);
        store.hydrate().await;
        // Parser is lenient; worst case the store starts usable and empty
        // of valid rows rather than failing startup.
        assert!(store.len() <= 1);

        std::fs::remove_dir_all(&root).ok();
    }
}
