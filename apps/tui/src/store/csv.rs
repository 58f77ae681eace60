//! Local CSV snapshot: a UTF-8 text table with a fixed header row, fully
//! rewritten on every mutation so the file is always a complete, consistent
//! copy of the session's records.

use crate::domain::SurveyRecord;
use crate::store::PersistenceError;
use std::path::Path;

/// Overwrites the snapshot with every current record. Whole-file rewrite,
/// no atomic rename.
pub fn write_snapshot(path: &Path, records: &[SurveyRecord]) -> Result<(), PersistenceError> {
    let mut out = String::new();
    push_row(
        &mut out,
        &SurveyRecord::COLUMNS.map(std::string::ToString::to_string),
    );
    for record in records {
        push_row(&mut out, &record.to_row());
    }

    std::fs::write(path, out)?;
    Ok(())
}

/// Reads the snapshot back in stored order. A missing or empty file is an
/// empty store, not an error.
pub fn read_snapshot(path: &Path) -> Result<Vec<SurveyRecord>, PersistenceError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let raw = std::fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let rows = parse_rows(&raw);
    let records = rows
        .into_iter()
        .filter(|row| row.first().map(String::as_str) != Some(SurveyRecord::COLUMNS[0]))
        .map(|row| SurveyRecord::from_row(&row))
        .collect();

    Ok(records)
}

fn push_row(out: &mut String, cells: &[String]) {
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_field(out, cell);
    }
    out.push('\n');
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field.contains([',', '"', '\n', '\r']);
    if needs_quotes {
        out.push('"');
        for c in field.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Splits quoted CSV text into rows of cells. Quoted fields may contain
/// commas, escaped quotes and newlines.
fn parse_rows(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;
    use std::path::PathBuf;

    fn temp_csv(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "spectrum-logger-{}-{name}.csv",
            std::process::id()
        ))
    }

    fn sample(location: &str, comment: &str) -> SurveyRecord {
        SurveyRecord {
            location: location.to_string(),
            hard_y_authenticity: Rating::from_score(20),
            hard_x_affect: Rating::from_score(-10),
            soft_y_correctness: Rating::from_score(30),
            soft_x_affect: Rating::from_score(40),
            comment: comment.to_string(),
            image_path: String::new(),
            timestamp: "2026-01-15 09:30:12".to_string(),
        }
    }

    #[test]
    fn snapshot_round_trip_preserves_order() {
        let path = temp_csv("round-trip");
        let records = vec![
            sample("座喜味城跡 (読谷)", "first"),
            sample("むら咲むら (読谷)", "second"),
            sample("自由入力の場所", "third"),
        ];

        write_snapshot(&path, &records).unwrap();
        let loaded = read_snapshot(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, records);
    }

    #[test]
    fn snapshot_starts_with_the_fixed_header() {
        let path = temp_csv("header");
        write_snapshot(&path, &[sample("x", "")]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let first_line = raw.lines().next().unwrap();
        assert_eq!(first_line, SurveyRecord::COLUMNS.join(","));
    }

    #[test]
    fn quoted_fields_survive_commas_quotes_and_newlines() {
        let path = temp_csv("quoting");
        let records = vec![sample(
            "城跡, 北側",
            "line one\nline \"two\", with comma",
        )];

        write_snapshot(&path, &records).unwrap();
        let loaded = read_snapshot(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, records);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let path = temp_csv("does-not-exist");
        std::fs::remove_file(&path).ok();
        assert!(read_snapshot(&path).unwrap().is_empty());
    }

    #[test]
    fn empty_file_reads_as_empty() {
        let path = temp_csv("empty");
        std::fs::write(&path, "").unwrap();
        let loaded = read_snapshot(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(loaded.is_empty());
    }

    #[test]
    fn parse_handles_crlf_and_trailing_line() {
        let rows = parse_rows("a,b\r\nc,d");
        assert_eq!(rows, vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ]);
    }
}
