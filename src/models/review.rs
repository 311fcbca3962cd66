use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Store-assigned identifier. Hosted tables hand out integers or UUID strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReviewId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewId::Number(id) => write!(f, "{id}"),
            ReviewId::Text(id) => f.write_str(id),
        }
    }
}

/// A stored row exactly as the store returned it, extra columns included.
pub type ReviewRow = serde_json::Value;

/// Admin-facing view of one row. `created_at` is kept as the stored text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub name: String,                // Submitter name
    pub stars: i64,                  // Rating, 1-5 expected but not enforced
    pub review: String,              // Review body
    #[serde(default)]
    pub improvement: Option<String>, // Optional suggestions
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Review {
    pub fn from_row(row: ReviewRow) -> Result<Self, serde_json::Error> {
        serde_json::from_value(row)
    }

    /// Calendar date of submission, the first ten characters of the ISO timestamp.
    pub fn date_label(&self) -> String {
        self.created_at
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.chars().take(10).collect())
            .unwrap_or_else(|| "Unknown date".to_string())
    }

    pub fn improvement_text(&self) -> Option<&str> {
        self.improvement
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Insert payload; the store assigns the id.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewReview {
    pub name: String,
    pub stars: i64,
    pub review: String,
    pub improvement: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Formats a timestamp the way it is written to the stores.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(value))
}
