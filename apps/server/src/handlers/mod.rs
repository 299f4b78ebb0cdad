//! HTTP handlers and route configuration.

mod auth;
mod documents;
mod feeds;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/auth/login", web::post().to(auth::login))
            .service(
                web::scope("/public")
                    .route("/posts", web::get().to(posts::list_public))
                    .route("/posts/{slug}", web::get().to(posts::get_public)),
            )
            // Admin routes (Bearer token)
            .route("/posts", web::get().to(posts::list))
            .route("/posts", web::post().to(posts::create))
            .route("/posts/{id}", web::get().to(posts::get))
            .route("/posts/{id}", web::patch().to(posts::patch))
            .route("/posts/{id}", web::delete().to(posts::delete))
            .route("/documents", web::post().to(documents::import)),
    )
    // Feeds live at the site root, like any blog.
    .route("/rss.xml", web::get().to(feeds::rss))
    .route("/sitemap.xml", web::get().to(feeds::sitemap));
}
