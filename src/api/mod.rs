//! HTTP API routes

pub mod auth;
pub mod categories;
pub mod health;
pub mod items;
pub mod menu;
pub mod opening_hours;
pub mod upload;
pub mod users;
pub mod visitors;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router. Privileged handlers guard themselves via
/// `auth::authorize`; everything else is public.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/auth",
            post(auth::login).get(auth::me).delete(auth::logout),
        )
        .route("/api/menu", get(menu::get_menu))
        .route(
            "/api/menu/categories",
            post(categories::create_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/api/menu/items", post(items::create_item))
        .route(
            "/api/menu/update",
            put(items::update_item).delete(items::delete_item),
        )
        .route(
            "/api/upload",
            post(upload::upload_image).delete(upload::remove_image),
        )
        .route(
            "/api/opening-hours",
            get(opening_hours::get_schedule).put(opening_hours::update_day),
        )
        .route(
            "/api/visitors",
            post(visitors::record_visit)
                .get(visitors::get_stats)
                .delete(visitors::reset_stats),
        )
        .route(
            "/api/users",
            get(users::list_users)
                .post(users::create_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
