use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use reviewbox::db::ReviewStore;
use reviewbox::error::StoreError;
use reviewbox::models::review::{format_timestamp, NewReview, Review, ReviewId, ReviewRow};

/// In-memory review store that counts every call made against it.
#[derive(Default)]
pub struct CountingStore {
    reviews: Mutex<Vec<Review>>,
    reads: AtomicUsize,
    inserts: AtomicUsize,
    failing: bool,
}

impl CountingStore {
    /// A store whose every call fails like an unreachable service.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.reads() + self.inserts()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Status {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for CountingStore {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn fetch_ratings_only(&self) -> Result<Vec<i64>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews.iter().map(|review| review.stars).collect())
    }

    async fn fetch_all_reviews(&self) -> Result<Vec<ReviewRow>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut reviews = self.reviews.lock().unwrap().clone();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let rows = reviews
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?;
        Ok(rows)
    }

    async fn insert_review(&self, review: &NewReview) -> Result<(), StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut reviews = self.reviews.lock().unwrap();
        let id = reviews.len() as i64 + 1;
        reviews.push(Review {
            id: ReviewId::Number(id),
            name: review.name.clone(),
            stars: review.stars,
            review: review.review.clone(),
            improvement: review.improvement.clone(),
            created_at: Some(format_timestamp(&review.created_at)),
        });
        Ok(())
    }
}
