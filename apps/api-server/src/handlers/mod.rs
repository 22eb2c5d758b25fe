//! HTTP handlers and route configuration.

mod health;
mod posts;

use std::sync::Arc;

use actix_web::web;
use postboard_core::ports::RateLimiter;

use crate::middleware::error::{path_config, query_config};
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: Option<Arc<dyn RateLimiter>>) {
    cfg.app_data(query_config()).app_data(path_config());

    cfg.service(
        web::scope("/api")
            .wrap(RateLimitMiddleware::new(limiter))
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    // registered before /{id} so "search" is not taken for an id
                    .route("/search", web::get().to(posts::search_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            ),
    );
}
