//! HTTP layer: route table, wire types and request authentication

pub mod middleware;
pub mod services;
pub mod types;

use actix_web::web;

/// Mount the full route table onto the app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route(
                "/track-web-visitor",
                web::post().to(services::analytics::track_web_visitor),
            )
            .service(
                web::scope("/analytics")
                    .route(
                        "/web-visitors",
                        web::get().to(services::analytics::web_visitors),
                    )
                    .route(
                        "/product-monthly",
                        web::get().to(services::analytics::product_monthly),
                    )
                    .route(
                        "/product-weekly",
                        web::get().to(services::analytics::product_weekly),
                    )
                    .route(
                        "/total-link-visited",
                        web::get().to(services::analytics::total_link_visited),
                    ),
            )
            .route("/login", web::post().to(services::auth::login))
            .route("/me", web::get().to(services::auth::me))
            .route("/logout", web::delete().to(services::auth::logout))
            .route("/users", web::get().to(services::users::list_users))
            .route("/users", web::post().to(services::users::register))
            .route("/users/{id}", web::get().to(services::users::get_user))
            .service(
                web::scope("/products")
                    .route("/all", web::get().to(services::catalog::all_products))
                    .route("/info", web::get().to(services::catalog::product_info))
                    .route(
                        "/similar-product",
                        web::get().to(services::catalog::similar_products),
                    )
                    .route(
                        "/best-seller",
                        web::get().to(services::catalog::best_sellers),
                    )
                    .route("/hot-deal", web::get().to(services::catalog::hot_deals))
                    .route(
                        "/new-collection",
                        web::get().to(services::catalog::new_collection),
                    )
                    .route(
                        "/most-viewed",
                        web::get().to(services::catalog::most_viewed),
                    )
                    .route(
                        "/edit-hot-deal",
                        web::patch().to(services::catalog::toggle_hot_deal),
                    )
                    .route(
                        "/shopee-link/{productId}",
                        web::post().to(services::catalog::record_shopee_click),
                    )
                    .route(
                        "/tokopedia-link/{productId}",
                        web::post().to(services::catalog::record_tokopedia_click),
                    )
                    .route("", web::get().to(services::catalog::catalog_page))
                    .route("", web::post().to(services::catalog::create_product))
                    .route("", web::patch().to(services::catalog::update_product))
                    .route("", web::delete().to(services::catalog::delete_product)),
            ),
    )
    .route("/images/{filename}", web::get().to(services::images::serve_image));
}
