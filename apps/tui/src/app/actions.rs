//! Aggregate statistics over the session's records, shared by the headless
//! renderer and the completion panel.

use crate::domain::SurveyRecord;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SurveyStats {
    pub total_records: usize,
    pub with_photo: usize,
    pub mapped_sites: usize,
    pub mean_hard_y: Option<f64>,
    pub mean_hard_x: Option<f64>,
    pub mean_soft_y: Option<f64>,
    pub mean_soft_x: Option<f64>,
    pub by_location: Vec<(String, usize)>,
    pub recent: Vec<RecentRecord>,
}

#[derive(Debug, Serialize)]
pub struct RecentRecord {
    pub location: String,
    pub hard_y: String,
    pub soft_y: String,
    pub timestamp: String,
}

impl SurveyStats {
    pub fn from_records(records: &[SurveyRecord]) -> Self {
        let total_records = records.len();
        let with_photo = records.iter().filter(|r| r.has_photo()).count();
        let mapped_sites = records.iter().filter(|r| r.map_coords().is_some()).count();

        let mut by_location: Vec<(String, usize)> = Vec::new();
        for record in records {
            match by_location
                .iter_mut()
                .find(|(location, _)| *location == record.location)
            {
                Some((_, count)) => *count += 1,
                None => by_location.push((record.location.clone(), 1)),
            }
        }
        by_location.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let recent = records
            .iter()
            .rev()
            .take(5)
            .map(|record| RecentRecord {
                location: record.location.clone(),
                hard_y: record.hard_y_authenticity.raw().to_string(),
                soft_y: record.soft_y_correctness.raw().to_string(),
                timestamp: record.timestamp.clone(),
            })
            .collect();

        Self {
            total_records,
            with_photo,
            mapped_sites,
            mean_hard_y: mean(records, |r| r.hard_y_authenticity.chart_value()),
            mean_hard_x: mean(records, |r| r.hard_x_affect.chart_value()),
            mean_soft_y: mean(records, |r| r.soft_y_correctness.chart_value()),
            mean_soft_x: mean(records, |r| r.soft_x_affect.chart_value()),
            by_location,
            recent,
        }
    }
}

fn mean(records: &[SurveyRecord], value: impl Fn(&SurveyRecord) -> f64) -> Option<f64> {
    if records.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = records.len() as f64;
    Some(records.iter().map(value).sum::<f64>() / count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;

    fn record(location: &str, hard_y: i64, image_path: &str) -> SurveyRecord {
        SurveyRecord {
            location: location.to_string(),
            hard_y_authenticity: Rating::from_score(hard_y),
            hard_x_affect: Rating::from_score(0),
            soft_y_correctness: Rating::from_score(10),
            soft_x_affect: Rating::from_score(0),
            comment: String::new(),
            image_path: image_path.to_string(),
            timestamp: "2026-01-15 09:30:12".to_string(),
        }
    }

    #[test]
    fn empty_input_yields_empty_stats() {
        let stats = SurveyStats::from_records(&[]);
        assert_eq!(stats.total_records, 0);
        assert!(stats.mean_hard_y.is_none());
        assert!(stats.by_location.is_empty());
        assert!(stats.recent.is_empty());
    }

    #[test]
    fn means_and_counts_cover_all_records() {
        let records = vec![
            record("座喜味城跡 (読谷)", 20, "photos/a.jpg"),
            record("座喜味城跡 (読谷)", -20, ""),
            record("somewhere else", 40, ""),
        ];

        let stats = SurveyStats::from_records(&records);
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.with_photo, 1);
        assert_eq!(stats.mapped_sites, 2);
        assert!((stats.mean_hard_y.unwrap() - 40.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.by_location[0], ("座喜味城跡 (読谷)".to_string(), 2));
    }

    #[test]
    fn recent_lists_newest_first_capped_at_five() {
        let records: Vec<SurveyRecord> = (0..8)
            .map(|i| record(&format!("site {i}"), i, ""))
            .collect();

        let stats = SurveyStats::from_records(&records);
        assert_eq!(stats.recent.len(), 5);
        assert_eq!(stats.recent[0].location, "site 7");
        assert_eq!(stats.recent[4].location, "site 3");
    }
}
