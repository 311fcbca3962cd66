use leptos::*;

use crate::components::star_rating::StarRating;
use crate::models::review::Review;

#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    if reviews.is_empty() {
        return view! {
            <p class="empty-reviews">{ "No reviews submitted yet." }</p>
        }
        .into_view();
    }

    view! {
        <div class="reviews">
            {
                reviews.into_iter().map(|review| {
                    view! { <ReviewCard review=review/> }
                }).collect::<Vec<_>>()
            }
        </div>
    }
    .into_view()
}

/// One admin-only entry: name, date, glyphs, body and optional suggestions.
#[component]
pub fn ReviewCard(review: Review) -> impl IntoView {
    let date = review.date_label();
    let improvement = review.improvement_text().map(str::to_string);
    let stars = review.stars;
    let Review { name, review: body, .. } = review;

    view! {
        <article class="review-card">
            <div class="review-meta">
                <strong class="review-name">{name}</strong>
                <span class="review-date">{date}</span>
            </div>
            <StarRating stars=stars/>
            <div class="review-body">
                <strong>{ "Review:" }</strong>
                <br/>
                {body}
            </div>
            {improvement.map(|text| view! {
                <div class="review-improvement">
                    <strong>{ "Suggestions:" }</strong>
                    <br/>
                    {text}
                </div>
            })}
        </article>
    }
}
