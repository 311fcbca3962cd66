use leptos::*;

pub const MAX_STARS: i64 = 5;
pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';

/// `stars` filled glyphs followed by empty ones up to five. Out-of-range
/// ratings are clamped.
pub fn star_glyphs(stars: i64) -> String {
    let filled = stars.clamp(0, MAX_STARS) as usize;
    let empty = MAX_STARS as usize - filled;
    std::iter::repeat(FILLED_STAR)
        .take(filled)
        .chain(std::iter::repeat(EMPTY_STAR).take(empty))
        .collect()
}

#[component]
pub fn StarRating(stars: i64) -> impl IntoView {
    view! {
        <div class="stars">
            {star_glyphs(stars)}
            <span class="stars-score">{format!(" ({stars}/{MAX_STARS})")}</span>
        </div>
    }
}
