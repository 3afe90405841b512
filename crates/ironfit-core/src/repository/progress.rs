use crate::error::Result;
use crate::model::ProgressRecord;
use crate::storage::{Key, Store};

pub struct Progress<'a> {
    store: &'a Store,
}

impl<'a> Progress<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Result<Vec<ProgressRecord>> {
        self.store.read_collection(Key::ProgressRecords)
    }

    pub fn add(&self, record: ProgressRecord) -> Result<ProgressRecord> {
        self.store.append_record(Key::ProgressRecords, &record)?;
        tracing::debug!(
            "recorded {}kg on {} for {}",
            record.weight_kg,
            record.date,
            record.customer_id
        );
        Ok(record)
    }

    /// Every record for `customer_id`, latest date first. Records sharing a
    /// date are ordered by creation time, latest first.
    pub fn all_for_customer(&self, customer_id: &str) -> Result<Vec<ProgressRecord>> {
        let mut records: Vec<ProgressRecord> = self
            .all()?
            .into_iter()
            .filter(|r| r.customer_id == customer_id)
            .collect();
        records.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(records)
    }

    pub fn list_recent(&self, customer_id: &str, limit: usize) -> Result<Vec<ProgressRecord>> {
        let mut records = self.all_for_customer(customer_id)?;
        records.truncate(limit);
        Ok(records)
    }

    /// Latest recorded weight and the change since the earliest record.
    pub fn weight_trend(&self, customer_id: &str) -> Result<Option<WeightTrend>> {
        let records = self.all_for_customer(customer_id)?;
        let (Some(latest), Some(first)) = (records.first(), records.last()) else {
            return Ok(None);
        };
        Ok(Some(WeightTrend {
            latest_kg: latest.weight_kg,
            change_kg: ((latest.weight_kg - first.weight_kg) * 100.0).round() / 100.0,
            entries: records.len(),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTrend {
    pub latest_kg: f64,
    pub change_kg: f64,
    pub entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProgressInput;
    use chrono::{Duration, NaiveDate, Utc};

    fn record(customer: &str, date: &str, weight: f64) -> ProgressRecord {
        ProgressRecord::new(
            customer.into(),
            ProgressInput {
                weight_kg: weight,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                notes: String::new(),
                photo: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_list_recent_orders_by_date_desc() {
        let store = Store::in_memory();
        let progress = store.progress();
        progress.add(record("c1", "2024-01-01", 80.0)).unwrap();
        progress.add(record("c1", "2024-01-08", 79.5)).unwrap();

        let recent = progress.list_recent("c1", 5).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date.to_string(), "2024-01-08");
        assert_eq!(recent[1].date.to_string(), "2024-01-01");
    }

    #[test]
    fn test_list_recent_truncates_and_filters() {
        let store = Store::in_memory();
        let progress = store.progress();
        for day in 1..=7 {
            progress
                .add(record("c1", &format!("2024-02-0{day}"), 80.0 - day as f64))
                .unwrap();
        }
        progress.add(record("c2", "2024-03-01", 60.0)).unwrap();

        let recent = progress.list_recent("c1", 5).unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].date.to_string(), "2024-02-07");
        assert!(recent.iter().all(|r| r.customer_id == "c1"));
        assert!(progress.list_recent("c1", 0).unwrap().is_empty());
    }

    #[test]
    fn test_same_date_breaks_tie_on_created_at() {
        let store = Store::in_memory();
        let progress = store.progress();
        let mut early = record("c1", "2024-01-01", 81.0);
        early.created_at = Utc::now() - Duration::hours(2);
        let late = record("c1", "2024-01-01", 80.0);
        progress.add(late.clone()).unwrap();
        progress.add(early).unwrap();

        assert_eq!(progress.list_recent("c1", 1).unwrap()[0].id, late.id);
    }

    #[test]
    fn test_weight_trend() {
        let store = Store::in_memory();
        let progress = store.progress();
        assert!(progress.weight_trend("c1").unwrap().is_none());

        progress.add(record("c1", "2024-01-01", 80.0)).unwrap();
        progress.add(record("c1", "2024-01-08", 79.5)).unwrap();
        let trend = progress.weight_trend("c1").unwrap().unwrap();
        assert_eq!(trend.latest_kg, 79.5);
        assert_eq!(trend.change_kg, -0.5);
        assert_eq!(trend.entries, 2);
    }
}
