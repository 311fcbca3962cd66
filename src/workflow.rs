//! What each page and the feed need from the review store.
//!
//! Every operation is a single request/response transaction. Store failures are
//! degraded here, in plain sight, rather than bubbling into the handlers.
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::db::Gateway;
use crate::error::{StoreError, SubmissionError};
use crate::models::review::{NewReview, Review, ReviewRow};
use crate::models::summary::RatingSummary;

/// Raw form fields as posted by the public page.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ReviewSubmission {
    pub name: Option<String>,
    pub stars: Option<String>,
    pub review: Option<String>,
    pub improvement: Option<String>,
}

fn required(field: &'static str, value: Option<String>) -> Result<String, SubmissionError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(SubmissionError::MissingField(field))
}

impl ReviewSubmission {
    /// Checks the required fields and coerces the rating. A rating of zero
    /// counts as missing; the 1-5 range itself is left to the form.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewReview, SubmissionError> {
        let name = required("name", self.name)?;
        let raw_stars = required("stars", self.stars)?;
        let stars: i64 = raw_stars
            .parse()
            .map_err(|_| SubmissionError::InvalidRating(raw_stars.clone()))?;
        if stars == 0 {
            return Err(SubmissionError::MissingField("stars"));
        }
        let review = required("review", self.review)?;
        let improvement = self
            .improvement
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(NewReview {
            name,
            stars,
            review,
            improvement,
            created_at: now,
        })
    }
}

/// Outcome of a submission, shown once on the public page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Submitted,
    Failed,
    Incomplete,
}

impl Notice {
    pub fn code(self) -> &'static str {
        match self {
            Notice::Submitted => "submitted",
            Notice::Failed => "failed",
            Notice::Incomplete => "incomplete",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "submitted" => Some(Notice::Submitted),
            "failed" => Some(Notice::Failed),
            "incomplete" => Some(Notice::Incomplete),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::Submitted => "Thank you for your review!",
            Notice::Failed => "There was an error submitting your review. Please try again.",
            Notice::Incomplete => "Please fill in all required fields.",
        }
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Notice::Submitted)
    }
}

/// Everything the admin page shows.
#[derive(Debug, Clone, Default)]
pub struct AdminView {
    pub reviews: Vec<Review>,
    pub summary: RatingSummary,
}

fn degrade<T: Default>(result: Result<T, StoreError>, action: &str) -> T {
    match result {
        Ok(value) => value,
        Err(StoreError::Unavailable(reason)) => {
            warn!(%reason, "Review store unavailable while {action}, using empty data");
            T::default()
        }
        Err(err) => {
            error!(error = %err, "Review store failed while {action}, using empty data");
            T::default()
        }
    }
}

/// Aggregate for the public page. Only ratings are read; review text never is.
pub async fn public_summary(gateway: &Gateway) -> RatingSummary {
    let stars = degrade(gateway.fetch_ratings_only().await, "fetching ratings");
    RatingSummary::from_stars(stars)
}

/// Validates and stores one submission. The store is only called for a valid form.
pub async fn submit_review(gateway: &Gateway, submission: ReviewSubmission) -> Notice {
    let new_review = match submission.validate(Utc::now()) {
        Ok(new_review) => new_review,
        Err(err) => {
            info!(reason = %err, "Rejected review submission");
            return Notice::Incomplete;
        }
    };

    match gateway.insert_review(&new_review).await {
        Ok(()) => {
            info!(name = %new_review.name, stars = new_review.stars, "Stored review");
            Notice::Submitted
        }
        Err(err) => {
            error!(error = %err, "Error submitting review");
            Notice::Failed
        }
    }
}

/// Rows that cannot be read as a review are skipped; the rest still render.
pub async fn admin_view(gateway: &Gateway) -> AdminView {
    let rows = degrade(gateway.fetch_all_reviews().await, "fetching reviews");
    let reviews: Vec<Review> = rows
        .into_iter()
        .filter_map(|row| match Review::from_row(row) {
            Ok(review) => Some(review),
            Err(err) => {
                warn!(error = %err, "Skipping unreadable review row");
                None
            }
        })
        .collect();
    let summary = RatingSummary::from_stars(reviews.iter().map(|review| review.stars));
    AdminView { reviews, summary }
}

/// Rows for the JSON feed, exactly as stored. Failures are surfaced, not degraded.
pub async fn review_feed(gateway: &Gateway) -> Result<Vec<ReviewRow>, StoreError> {
    gateway.fetch_all_reviews().await.map_err(|err| {
        error!(error = %err, "Review feed unavailable");
        err
    })
}
