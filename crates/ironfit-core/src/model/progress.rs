use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::new_id;

/// One weigh-in. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub id: String,
    pub customer_id: String,
    pub weight_kg: f64,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    /// File name only; no image bytes are stored.
    #[serde(default)]
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn new(customer_id: String, input: ProgressInput, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            customer_id,
            weight_kg: input.weight_kg,
            date: input.date,
            notes: input.notes.trim().to_string(),
            photo: input.photo.filter(|p| !p.trim().is_empty()),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressInput {
    pub weight_kg: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub photo: Option<String>,
}
