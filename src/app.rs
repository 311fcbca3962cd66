//! Server-rendered pages. Components are rendered to a string once per request;
//! nothing is hydrated on the client.
use leptos::*;

use crate::components::{
    notice_banner::NoticeBanner, review_form::ReviewForm, reviews_list::ReviewsList,
    summary_banner::SummaryBanner,
};
use crate::config::SiteConfig;
use crate::models::summary::RatingSummary;
use crate::workflow::{AdminView, Notice};

pub const STYLESHEET_PATH: &str = "/static/style.css";
pub const HEARTS_SCRIPT_PATH: &str = "/static/hearts.js";
pub const PHOTO_PATH: &str = "/photo";

#[component]
fn PageShell(title: String, children: Children) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
                <link rel="stylesheet" href=STYLESHEET_PATH/>
            </head>
            <body>
                <div class="hearts" aria-hidden="true"></div>
                <main class="container">{children()}</main>
                <script src=HEARTS_SCRIPT_PATH defer=true></script>
            </body>
        </html>
    }
}

/// Aggregate, submission form and an optional one-shot notice. Review text is
/// deliberately absent: this page only ever receives a [`RatingSummary`].
#[component]
pub fn PublicPage(
    title: String,
    summary: RatingSummary,
    notice: Option<Notice>,
    show_photo: bool,
) -> impl IntoView {
    let heading = title.clone();
    let photo_alt = title.clone();

    view! {
        <PageShell title=title>
            <header class="header">
                {show_photo.then(|| view! {
                    <img class="profile-photo" src=PHOTO_PATH alt=photo_alt/>
                })}
                <h1 class="name">{heading}</h1>
            </header>
            {notice.map(|notice| view! { <NoticeBanner notice=notice/> })}
            <SummaryBanner summary=summary/>
            <section class="card">
                <h2>{ "Leave a Review" }</h2>
                <ReviewForm/>
            </section>
            <section class="privacy-note">
                <h3>{ "Thank You for Your Interest!" }</h3>
                <p>{ "Your review means a lot! Reviews are kept private to maintain authenticity." }</p>
                <p><strong>{format!("Total Reviews: {}", summary.total_reviews)}</strong></p>
            </section>
        </PageShell>
    }
}

#[component]
pub fn AdminPage(title: String, admin: AdminView) -> impl IntoView {
    let AdminView { reviews, summary } = admin;
    let count = reviews.len();

    view! {
        <PageShell title=format!("Admin - {title}")>
            <div class="admin-header">
                <h1>{ "Admin Panel - Review Management" }</h1>
                <p>{ "Private view of all submitted reviews" }</p>
            </div>
            <div class="rating-summary">
                <h3>{format!("Total Reviews: {}", summary.total_reviews)}</h3>
                <h3>{format!("Average Rating: {}/5", summary.average_display())}</h3>
            </div>
            <h2>{format!("All Reviews ({count})")}</h2>
            <ReviewsList reviews=reviews/>
            <p class="back-link">
                <a href="/">{ "← Back to Public Page" }</a>
            </p>
        </PageShell>
    }
}

fn render_document<F, N>(page: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    format!("<!DOCTYPE html>{}", leptos::ssr::render_to_string(page))
}

pub fn render_public_page(
    site: &SiteConfig,
    summary: RatingSummary,
    notice: Option<Notice>,
) -> String {
    let title = site.title.clone();
    let show_photo = site.profile_photo.is_some();
    render_document(move || {
        view! {
            <PublicPage title=title summary=summary notice=notice show_photo=show_photo/>
        }
    })
}

pub fn render_admin_page(site: &SiteConfig, admin: AdminView) -> String {
    let title = site.title.clone();
    render_document(move || view! { <AdminPage title=title admin=admin/> })
}
