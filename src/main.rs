use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod routes;
mod utils;

use config::Config;
use db::{ensure_default_admin, init_db, run_migrations};

use crate::docs::ApiDoc;
use crate::utils::email_cache;
use crate::utils::email_filter;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "School Attendance System Running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await;

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    ensure_default_admin(&pool, &config.admin_email, &config.admin_password)
        .await
        .expect("Failed to seed default admin");

    let pool_for_filter_warmup = pool.clone();
    let pool_for_cache_warmup = pool.clone();
    // clone what the server closure needs BEFORE moving config
    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    actix_web::rt::spawn(async move {
        if let Err(e) = email_filter::warmup_email_filter(&pool_for_filter_warmup, 100).await {
            eprintln!("Failed to warmup email filter: {:?}", e);
        }
    });

    actix_web::rt::spawn(async move {
        // Warm up emails registered in the last 30 days in batches of 250
        if let Err(e) = email_cache::warmup_email_cache(&pool_for_cache_warmup, 30, 250).await {
            eprintln!("Failed to warmup email cache: {:?}", e);
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .service(index)
            // Auth + protected routes with rate limiting
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
