use serde::Serialize;

/// Mean rating and row count, computed on read.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub avg_rating: f64,
    pub total_reviews: usize,
}

impl RatingSummary {
    pub fn from_stars<I>(stars: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        // i128 so out-of-range ratings cannot overflow the sum
        let (total, count) = stars
            .into_iter()
            .fold((0i128, 0usize), |(total, count), stars| {
                (total + i128::from(stars), count + 1)
            });

        if count == 0 {
            return Self::default();
        }

        Self {
            avg_rating: round_to_tenth(total as f64 / count as f64),
            total_reviews: count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_reviews == 0
    }

    /// Public headline: the average, or a sentinel when nobody has rated yet.
    pub fn headline(&self) -> String {
        if self.is_empty() {
            "No ratings yet".to_string()
        } else {
            format!("{:.1}", self.avg_rating)
        }
    }

    pub fn average_display(&self) -> String {
        if self.is_empty() {
            "0".to_string()
        } else {
            format!("{:.1}", self.avg_rating)
        }
    }

    pub fn count_label(&self) -> String {
        let plural = if self.total_reviews == 1 { "" } else { "s" };
        format!("Based on {} review{plural}", self.total_reviews)
    }
}

/// One decimal place, rounding the exact binary value (so 1.05, stored just
/// above 1.05, becomes 1.1). Exact halves go to even.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
