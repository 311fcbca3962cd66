use leptos::*;

use crate::components::star_rating::MAX_STARS;

/// Plain HTML form posting to `/submit_review`; no client-side behaviour.
#[component]
pub fn ReviewForm() -> impl IntoView {
    // highest first, so the row reads 5..1 like the hosted page did
    let choices = (1..=MAX_STARS)
        .rev()
        .map(|value| {
            let id = format!("star{value}");
            view! {
                <input type="radio" id=id.clone() name="stars" value=value.to_string() required=true/>
                <label for=id title=format!("{value} stars")>{ "★" }</label>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <form method="POST" action="/submit_review" class="review-form">
            <div class="form-group">
                <label for="name">{ "Your Name:" }</label>
                <input type="text" id="name" name="name" required=true/>
            </div>
            <div class="form-group">
                <label>{ "Overall Rating:" }</label>
                <div class="rating-input">{choices}</div>
            </div>
            <div class="form-group">
                <label for="review">{ "Your Review (Required):" }</label>
                <textarea
                    id="review"
                    name="review"
                    rows="4"
                    placeholder="Share your thoughts..."
                    required=true
                ></textarea>
            </div>
            <div class="form-group">
                <label for="improvement">{ "Areas for Improvement (Optional):" }</label>
                <textarea
                    id="improvement"
                    name="improvement"
                    rows="3"
                    placeholder="Any suggestions for improvement?"
                ></textarea>
            </div>
            <button type="submit" class="submit-btn">{ "Submit Review" }</button>
        </form>
    }
}
