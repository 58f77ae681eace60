//! Client for the remote worksheet service: one fixed worksheet exposed as
//! a JSON rows API with list / append / positional delete.

use crate::config::SheetConfig;
use crate::domain::SurveyRecord;
use crate::store::PersistenceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct AppendPayload<'a> {
    row: &'a [String],
}

#[derive(Deserialize)]
struct RowsPayload {
    rows: Vec<Vec<String>>,
}

/// Async HTTP client for the worksheet rows API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: reqwest::Client,
    config: SheetConfig,
}

impl SheetClient {
    pub fn new(config: SheetConfig) -> Result<Self, PersistenceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.config.token.is_empty() {
            req
        } else {
            req.bearer_auth(&self.config.token)
        }
    }

    /// `GET /rows` — every stored row, header included if one was written.
    pub async fn list_rows(&self) -> Result<Vec<Vec<String>>, PersistenceError> {
        let resp = self.auth(self.client.get(self.url("/rows"))).send().await?;

        if !resp.status().is_success() {
            return Err(PersistenceError::Status(resp.status()));
        }

        let payload: RowsPayload = resp.json().await?;
        Ok(payload.rows)
    }

    /// `POST /rows` — appends one raw row at the bottom of the worksheet.
    pub async fn append_row(&self, row: &[String]) -> Result<(), PersistenceError> {
        let resp = self
            .auth(self.client.post(self.url("/rows")))
            .json(&AppendPayload { row })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(PersistenceError::Status(resp.status()));
        }
        Ok(())
    }

    /// `DELETE /rows/{index}` — removes one row by worksheet index.
    pub async fn delete_row(&self, index: usize) -> Result<(), PersistenceError> {
        let resp = self
            .auth(self.client.delete(self.url(&format!("/rows/{index}"))))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(PersistenceError::Status(resp.status()));
        }
        Ok(())
    }

    /// Every stored record in worksheet order, header row skipped.
    pub async fn load_all(&self) -> Result<Vec<SurveyRecord>, PersistenceError> {
        Ok(rows_to_records(self.list_rows().await?))
    }

    /// Appends one record, writing the header row first if the worksheet is
    /// still empty.
    pub async fn append_record(&self, record: &SurveyRecord) -> Result<(), PersistenceError> {
        let existing = self.list_rows().await?;
        if existing.is_empty() {
            let header: Vec<String> = SurveyRecord::COLUMNS
                .iter()
                .map(|column| (*column).to_string())
                .collect();
            self.append_row(&header).await?;
        }

        self.append_row(&record.to_row()).await
    }

    /// Deletes the record at a 0-based data position, translated past the
    /// header row to the worksheet's own addressing.
    pub async fn delete_record(&self, position: usize) -> Result<(), PersistenceError> {
        self.delete_row(worksheet_index(position)).await
    }
}

/// Worksheet row index for a 0-based data position (header occupies row 0).
pub(crate) const fn worksheet_index(position: usize) -> usize {
    position + 1
}

/// Converts raw worksheet rows into records, dropping the header row.
pub(crate) fn rows_to_records(rows: Vec<Vec<String>>) -> Vec<SurveyRecord> {
    rows.into_iter()
        .filter(|row| row.first().map(String::as_str) != Some(SurveyRecord::COLUMNS[0]))
        .map(|row| SurveyRecord::from_row(&row))
        .collect()
}
