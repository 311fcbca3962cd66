use leptos::*;

use crate::models::summary::RatingSummary;

/// The only review data the public page ever shows.
#[component]
pub fn SummaryBanner(summary: RatingSummary) -> impl IntoView {
    view! {
        <div class="rating-summary">
            <div class="rating-average">{summary.headline()}</div>
            <div class="rating-count">{summary.count_label()}</div>
        </div>
    }
}
