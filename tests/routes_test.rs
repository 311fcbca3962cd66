use std::sync::Arc;

use actix_web::{
    cookie::Cookie,
    http::{header, StatusCode},
    test, web, App,
};
use serde_json::Value;

use reviewbox::api::{self, AppState, NOTICE_COOKIE};
use reviewbox::config::Config;
use reviewbox::db::{Gateway, SqliteStore};
use reviewbox::models::review::Review;

mod mocks;
use mocks::counting_store::CountingStore;

fn test_state(gateway: Gateway) -> AppState {
    let config = Config::from_lookup(|_| None).unwrap();
    AppState::new(gateway, config)
}

async fn sqlite_gateway() -> Gateway {
    Gateway::with_store(Arc::new(SqliteStore::in_memory().await.unwrap()))
}

macro_rules! review_app {
    ($gateway:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_state($gateway)))
                .configure(api::configure),
        )
        .await
    };
}

fn submit(fields: &[(&str, &str)]) -> test::TestRequest {
    test::TestRequest::post().uri("/submit_review").set_form(fields)
}

fn notice_of(resp: &actix_web::dev::ServiceResponse) -> Option<String> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == NOTICE_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

fn assert_redirects_home(resp: &actix_web::dev::ServiceResponse) {
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
    let body = test::read_body(resp).await;
    String::from_utf8(body.to_vec()).unwrap()
}

fn count(html: &str, glyph: char) -> usize {
    html.chars().filter(|c| *c == glyph).count()
}

#[actix_web::test]
async fn test_incomplete_submissions_never_reach_the_store() {
    let store = Arc::new(CountingStore::default());
    let app = review_app!(Gateway::with_store(store.clone()));

    let cases: [&[(&str, &str)]; 6] = [
        &[("stars", "4"), ("review", "Great!")],
        &[("name", ""), ("stars", "4"), ("review", "Great!")],
        &[("name", "Ana"), ("review", "Great!")],
        &[("name", "Ana"), ("stars", "0"), ("review", "Great!")],
        &[("name", "Ana"), ("stars", "4")],
        &[("name", "Ana"), ("stars", "4"), ("review", "   ")],
    ];

    for fields in cases {
        let resp = test::call_service(&app, submit(fields).to_request()).await;
        assert_redirects_home(&resp);
        assert_eq!(notice_of(&resp).as_deref(), Some("incomplete"));
    }

    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn test_non_integer_rating_is_a_validation_failure() {
    let store = Arc::new(CountingStore::default());
    let app = review_app!(Gateway::with_store(store.clone()));

    let resp = test::call_service(
        &app,
        submit(&[("name", "Ana"), ("stars", "four"), ("review", "Great!")]).to_request(),
    )
    .await;

    assert_redirects_home(&resp);
    assert_eq!(notice_of(&resp).as_deref(), Some("incomplete"));
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn test_non_form_body_is_redirected() {
    let store = Arc::new(CountingStore::default());
    let app = review_app!(Gateway::with_store(store.clone()));

    let req = test::TestRequest::post()
        .uri("/submit_review")
        .set_json(serde_json::json!({ "name": "Ana", "stars": 4, "review": "Great!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_redirects_home(&resp);
    assert_eq!(notice_of(&resp).as_deref(), Some("incomplete"));
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn test_first_review_shows_on_both_pages() {
    let app = review_app!(sqlite_gateway().await);

    let resp = test::call_service(
        &app,
        submit(&[("name", "Ana"), ("stars", "4"), ("review", "Great!")]).to_request(),
    )
    .await;
    assert_redirects_home(&resp);
    assert_eq!(notice_of(&resp).as_deref(), Some("submitted"));

    let public = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(public.status(), StatusCode::OK);
    let html = body_text(public).await;
    assert!(html.contains("4.0"));
    assert!(html.contains("Based on 1 review"));
    assert!(html.contains("Total Reviews: 1"));

    let admin = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/reviews").to_request(),
    )
    .await;
    assert_eq!(admin.status(), StatusCode::OK);
    let html = body_text(admin).await;
    assert!(html.contains("Ana"));
    assert!(html.contains("Great!"));
    assert_eq!(count(&html, '★'), 4);
    assert_eq!(count(&html, '☆'), 1);
}

#[actix_web::test]
async fn test_new_reviews_are_listed_first() {
    let store = Arc::new(CountingStore::default());
    let app = review_app!(Gateway::with_store(store.clone()));

    for (name, stars) in [("Ana", "4"), ("Ben", "2"), ("Cleo", "5")] {
        let resp = test::call_service(
            &app,
            submit(&[("name", name), ("stars", stars), ("review", "Hi")]).to_request(),
        )
        .await;
        assert_eq!(notice_of(&resp).as_deref(), Some("submitted"));
        // distinct timestamps
        actix_web::rt::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    assert_eq!(store.inserts(), 3);

    let reviews: Vec<Review> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/reviews").to_request(),
    )
    .await;

    let names: Vec<&str> = reviews.iter().map(|review| review.name.as_str()).collect();
    assert_eq!(names, ["Cleo", "Ben", "Ana"]);
    assert_eq!(reviews[0].stars, 5);
    assert!(reviews[0].created_at.is_some());

    let html = body_text(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/admin/reviews").to_request(),
        )
        .await,
    )
    .await;
    assert!(html.find("Cleo").unwrap() < html.find("Ben").unwrap());
    assert!(html.find("Ben").unwrap() < html.find("Ana").unwrap());
    assert!(html.contains("Average Rating: 3.7/5"));
}

#[actix_web::test]
async fn test_public_page_never_shows_review_text() {
    let app = review_app!(sqlite_gateway().await);

    test::call_service(
        &app,
        submit(&[
            ("name", "Dana"),
            ("stars", "3"),
            ("review", "A very private remark"),
            ("improvement", "Bring flowers"),
        ])
        .to_request(),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let html = body_text(resp).await;

    assert!(html.contains("3.0"));
    assert!(!html.contains("Dana"));
    assert!(!html.contains("A very private remark"));
    assert!(!html.contains("Bring flowers"));
}

#[actix_web::test]
async fn test_unavailable_store_degrades() {
    let app = review_app!(Gateway::unavailable("not configured"));

    let public = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(public.status(), StatusCode::OK);
    let html = body_text(public).await;
    assert!(html.contains("No ratings yet"));
    assert!(html.contains("Based on 0 reviews"));

    let admin = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/reviews").to_request(),
    )
    .await;
    assert_eq!(admin.status(), StatusCode::OK);
    assert!(body_text(admin).await.contains("No reviews submitted yet."));

    let feed = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/reviews").to_request(),
    )
    .await;
    assert_eq!(feed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(feed).await;
    assert!(body["error"].as_str().unwrap().contains("unavailable"));

    let resp = test::call_service(
        &app,
        submit(&[("name", "Ana"), ("stars", "4"), ("review", "Great!")]).to_request(),
    )
    .await;
    assert_redirects_home(&resp);
    assert_eq!(notice_of(&resp).as_deref(), Some("failed"));
}

#[actix_web::test]
async fn test_failing_store_is_scoped_to_the_request() {
    let store = Arc::new(CountingStore::failing());
    let app = review_app!(Gateway::with_store(store.clone()));

    let public = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(public.status(), StatusCode::OK);
    assert!(body_text(public).await.contains("No ratings yet"));

    let feed = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/reviews").to_request(),
    )
    .await;
    assert_eq!(feed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(feed).await;
    assert!(body["error"].as_str().unwrap().contains("service unavailable"));

    let resp = test::call_service(
        &app,
        submit(&[("name", "Ana"), ("stars", "4"), ("review", "Great!")]).to_request(),
    )
    .await;
    assert_eq!(notice_of(&resp).as_deref(), Some("failed"));
    assert_eq!(store.inserts(), 1);
}

#[actix_web::test]
async fn test_notice_is_shown_once() {
    let app = review_app!(Gateway::unavailable("not configured"));

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(Cookie::new(NOTICE_COOKIE, "submitted"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(notice_of(&resp).as_deref(), Some(""));
    let html = body_text(resp).await;
    assert!(html.contains("Thank you for your review!"));

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(Cookie::new(NOTICE_COOKIE, "bogus"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(notice_of(&resp).is_none());
    assert!(!body_text(resp).await.contains("notice-"));
}

#[actix_web::test]
async fn test_debug_reports_store_state() {
    let app = review_app!(Gateway::unavailable("not configured"));

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/debug").to_request(),
    )
    .await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"]["backend"], "none");
    assert_eq!(body["store"]["available"], false);
    assert_eq!(body["config"]["store_url_set"], false);
    assert_eq!(body["config"]["store_key_set"], false);
    assert_eq!(body["config"]["sqlite_path_set"], false);
    assert_eq!(body["config"]["profile_photo_set"], false);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_photo_is_not_found_when_unconfigured() {
    let app = review_app!(Gateway::unavailable("not configured"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/photo").to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
