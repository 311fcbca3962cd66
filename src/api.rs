use actix_files::NamedFile;
use actix_web::{
    cookie::Cookie,
    error::{self, InternalError},
    http::header::{self, ContentType},
    web, HttpRequest, HttpResponse,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::app::{render_admin_page, render_public_page};
use crate::config::Config;
use crate::db::Gateway;
use crate::workflow::{self, Notice, ReviewSubmission};

/// Cookie carrying a one-shot submission notice back to the public page.
pub const NOTICE_COOKIE: &str = "notice";

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub gateway: Gateway,
    pub config: Config,
}

impl AppState {
    pub fn new(gateway: Gateway, config: Config) -> Self {
        Self { gateway, config }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(review_form_config())
        .route("/", web::get().to(index))
        .route("/submit_review", web::post().to(submit_review))
        .route("/admin/reviews", web::get().to(admin_reviews))
        .route("/api/reviews", web::get().to(api_reviews))
        .route("/debug", web::get().to(debug_info))
        .route("/photo", web::get().to(profile_photo));
}

/// Malformed or non-form bodies are answered like an incomplete form.
fn review_form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "Rejected malformed review form");
        InternalError::from_response(err, redirect_home(Notice::Incomplete)).into()
    })
}

fn notice_cookie(notice: Notice) -> Cookie<'static> {
    Cookie::build(NOTICE_COOKIE, notice.code())
        .path("/")
        .http_only(true)
        .finish()
}

fn cleared_notice_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(NOTICE_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

pub fn redirect_home(notice: Notice) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(notice_cookie(notice))
        .finish()
}

pub async fn index(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let summary = workflow::public_summary(&state.gateway).await;
    let notice = req
        .cookie(NOTICE_COOKIE)
        .and_then(|cookie| Notice::from_code(cookie.value()));

    let html = render_public_page(&state.config.site, summary, notice);

    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if notice.is_some() {
        response.cookie(cleared_notice_cookie());
    }
    response.body(html)
}

pub async fn submit_review(
    state: web::Data<AppState>,
    form: web::Form<ReviewSubmission>,
) -> HttpResponse {
    let notice = workflow::submit_review(&state.gateway, form.into_inner()).await;
    redirect_home(notice)
}

pub async fn admin_reviews(state: web::Data<AppState>) -> HttpResponse {
    let admin = workflow::admin_view(&state.gateway).await;
    debug!(reviews = admin.reviews.len(), "Rendering admin page");

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_admin_page(&state.config.site, admin))
}

pub async fn api_reviews(state: web::Data<AppState>) -> HttpResponse {
    match workflow::review_feed(&state.gateway).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => HttpResponse::InternalServerError().json(json!({ "error": err.to_string() })),
    }
}

#[derive(Serialize)]
struct StoreStatus {
    backend: &'static str,
    available: bool,
}

#[derive(Serialize)]
struct ConfigStatus {
    store_url_set: bool,
    store_key_set: bool,
    sqlite_path_set: bool,
    profile_photo_set: bool,
}

/// Diagnostics; reports which settings are present, never their values.
#[derive(Serialize)]
struct Diagnostics {
    status: &'static str,
    version: &'static str,
    store: StoreStatus,
    config: ConfigStatus,
}

pub async fn debug_info(state: web::Data<AppState>) -> HttpResponse {
    let config = &state.config;
    HttpResponse::Ok().json(Diagnostics {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: StoreStatus {
            backend: state.gateway.backend_name(),
            available: state.gateway.is_available(),
        },
        config: ConfigStatus {
            store_url_set: config.store.url.is_some(),
            store_key_set: config.store.key.is_some(),
            sqlite_path_set: config.store.sqlite_path.is_some(),
            profile_photo_set: config.site.profile_photo.is_some(),
        },
    })
}

pub async fn profile_photo(state: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    let path = state
        .config
        .site
        .profile_photo
        .as_ref()
        .ok_or_else(|| error::ErrorNotFound("no profile photo configured"))?;
    Ok(NamedFile::open(path)?)
}
