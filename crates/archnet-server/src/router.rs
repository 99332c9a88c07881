//! Router construction for the ArchNet server.

use axum::{
    middleware as axum_mw,
    routing::{get, post, put},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use archnet_core::ports::*;
use archnet_core::types::ResourceKind;

use crate::handlers;
use crate::middleware::jwt::{jwt_auth, JwtConfig};

/// Build the full axum router with all routes and middleware.
pub fn build_router(stores: Stores, jwt_config: JwtConfig) -> Router {
    // Routes that require JWT authentication
    let protected = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        // Users
        .route("/api/users", get(handlers::users::search))
        .route("/api/users/me", put(handlers::users::update_me))
        .route("/api/users/:id", get(handlers::users::get))
        .route("/api/users/:id/followers", get(handlers::users::followers))
        .route("/api/users/:id/following", get(handlers::users::following))
        // Feed content
        .route(
            "/api/posts",
            get(handlers::posts::list).post(handlers::posts::create),
        )
        .route(
            "/api/posts/:id",
            get(handlers::posts::get)
                .put(handlers::posts::update)
                .delete(handlers::posts::delete),
        )
        .route(
            "/api/projects",
            get(handlers::projects::list).post(handlers::projects::create),
        )
        .route(
            "/api/projects/:id",
            get(handlers::projects::get)
                .put(handlers::projects::update)
                .delete(handlers::projects::delete),
        )
        .route(
            "/api/research",
            get(handlers::research::list).post(handlers::research::create),
        )
        .route(
            "/api/research/:id",
            get(handlers::research::get)
                .put(handlers::research::update)
                .delete(handlers::research::delete),
        )
        .route(
            "/api/news",
            get(handlers::news::list).post(handlers::news::create),
        )
        .route(
            "/api/news/:id",
            get(handlers::news::get)
                .put(handlers::news::update)
                .delete(handlers::news::delete),
        )
        .route("/api/events", get(handlers::news::list_events))
        .route(
            "/api/jobs",
            get(handlers::jobs::list).post(handlers::jobs::create),
        )
        .route(
            "/api/jobs/:id",
            get(handlers::jobs::get)
                .put(handlers::jobs::update)
                .delete(handlers::jobs::delete),
        )
        .route(
            "/api/jobs/:id/applications",
            get(handlers::jobs::list_applications).post(handlers::jobs::apply),
        )
        .route("/api/applications/mine", get(handlers::jobs::my_applications))
        .route(
            "/api/competitions",
            get(handlers::competitions::list).post(handlers::competitions::create),
        )
        .route(
            "/api/competitions/:id",
            get(handlers::competitions::get)
                .put(handlers::competitions::update)
                .delete(handlers::competitions::delete),
        )
        // Catalogue resources
        .nest("/api/books", handlers::resources::routes(ResourceKind::Book))
        .nest("/api/tools", handlers::resources::routes(ResourceKind::Tool))
        .nest(
            "/api/courses",
            handlers::resources::routes(ResourceKind::Course),
        )
        .nest(
            "/api/plugins",
            handlers::resources::routes(ResourceKind::Plugin),
        )
        // Engagement
        .route("/api/likes", post(handlers::likes::toggle))
        .route("/api/likes/count", get(handlers::likes::count))
        .route(
            "/api/comments",
            get(handlers::comments::list).post(handlers::comments::create),
        )
        .route(
            "/api/comments/:id",
            put(handlers::comments::update).delete(handlers::comments::delete),
        )
        .route(
            "/api/saved",
            get(handlers::saved::list).post(handlers::saved::toggle),
        )
        .route("/api/reports", post(handlers::reports::create))
        // Social graph
        .route("/api/follows/requests", get(handlers::follows::requests))
        .route(
            "/api/follows/requests/:id/accept",
            post(handlers::follows::accept),
        )
        .route(
            "/api/follows/requests/:id/decline",
            post(handlers::follows::decline),
        )
        .route(
            "/api/follows/:user_id",
            post(handlers::follows::follow).delete(handlers::follows::unfollow),
        )
        .route("/api/blocks", get(handlers::blocks::list))
        .route(
            "/api/blocks/:user_id",
            post(handlers::blocks::block).delete(handlers::blocks::unblock),
        )
        .route("/api/mutes", get(handlers::mutes::list))
        .route(
            "/api/mutes/:user_id",
            post(handlers::mutes::mute).delete(handlers::mutes::unmute),
        )
        // Messaging
        .route("/api/messages", post(handlers::messages::send))
        .route(
            "/api/messages/conversations",
            get(handlers::messages::conversations),
        )
        .route(
            "/api/messages/with/:user_id",
            get(handlers::messages::with_user),
        )
        .route(
            "/api/messages/:id",
            put(handlers::messages::edit).delete(handlers::messages::delete),
        )
        .route("/api/messages/:id/read", post(handlers::messages::mark_read))
        .route(
            "/api/messages/:id/like",
            post(handlers::messages::toggle_like),
        )
        // Notifications
        .route("/api/notifications", get(handlers::notifications::list))
        .route(
            "/api/notifications/unread-count",
            get(handlers::notifications::unread_count),
        )
        .route(
            "/api/notifications/read-all",
            post(handlers::notifications::mark_all_read),
        )
        .route(
            "/api/notifications/:id/read",
            post(handlers::notifications::mark_read),
        )
        // University memberships
        .route(
            "/api/university-memberships",
            post(handlers::universities::request),
        )
        .route(
            "/api/university-memberships/mine",
            get(handlers::universities::mine),
        )
        .route(
            "/api/university-memberships/:id",
            put(handlers::universities::review),
        )
        // Unified feed
        .route("/api/feed", get(handlers::feed::feed))
        .layer(axum_mw::from_fn(jwt_auth));

    // Public routes (no auth)
    let public = Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login));

    public.merge(protected).layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(Extension(stores))
            .layer(Extension(jwt_config)),
    )
}
