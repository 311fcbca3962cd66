use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use reviewbox::api::{self, AppState};
use reviewbox::config::Config;
use reviewbox::db::Gateway;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::load().map_err(std::io::Error::other)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    fmt().with_env_filter(filter).init();

    // A missing store is not fatal; pages fall back to empty data.
    let gateway = Gateway::connect(&config.store).await;
    info!(
        backend = gateway.backend_name(),
        available = gateway.is_available(),
        "Review store ready"
    );

    let addr = (config.host.clone(), config.port);
    let static_dir = config.site.static_dir.clone();
    let state = web::Data::new(AppState::new(gateway, config));

    info!("listening on http://{}:{}", addr.0, addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
            // Serve the stylesheet and hearts script
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind(addr)?
    .run()
    .await
}
