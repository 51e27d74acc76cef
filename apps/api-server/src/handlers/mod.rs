//! HTTP handlers and route configuration.

mod health;
mod metrics;
mod posts;
mod users;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/metrics", web::get().to(metrics::metrics))
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            )
            .service(
                web::scope("/users")
                    .route("", web::post().to(users::create_user))
                    .route("/login", web::post().to(users::login_user)),
            ),
    );
}
