use std::sync::Arc;

use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{App, HttpServer, http, web};
use dotenvy::dotenv;
use tracing::info;

use etalase::api;
use etalase::config::Config;
use etalase::services::{AnalyticsService, AuthService, CatalogService, ImageStore, JwtService};
use etalase::storage::StorageFactory;
use etalase::system::logging::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::load();
    let _log_guard = init_logging(&config.logging);

    let storage = StorageFactory::create(&config.storage.database_url)
        .await
        .expect("Failed to initialize storage");
    info!("Using storage backend: {}", storage.get_backend_name());

    let images = Arc::new(ImageStore::new(&config.uploads).expect("Failed to create image store"));
    let analytics = Arc::new(AnalyticsService::new(storage.clone()));
    let catalog = Arc::new(CatalogService::new(storage.clone(), images.clone()));
    let auth = Arc::new(AuthService::new(
        storage.clone(),
        JwtService::from_config(&config.auth),
    ));

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let cors_origin = config.server.cors_origin.clone();
    let max_upload_bytes = config.uploads.max_file_bytes;
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::CONTENT_TYPE,
                http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(analytics.clone()))
            .app_data(web::Data::new(catalog.clone()))
            .app_data(web::Data::new(auth.clone()))
            .app_data(web::Data::new(images.clone()))
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(max_upload_bytes * 10)
                    .memory_limit(max_upload_bytes),
            )
            .configure(api::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
