//! Route table

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{self, admin};
use crate::state::AppState;

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/menu", get(handlers::menu::list_menu))
        .route("/api/offers", get(handlers::offers::list_live_offers))
        .route("/api/metrics/visit", post(handlers::metrics::record_visit));

    let customer_routes = Router::new()
        .route(
            "/api/orders",
            get(handlers::orders::list_my_orders).post(handlers::orders::place_order),
        )
        .route(
            "/api/profile",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route(
            "/api/profile/addresses",
            post(handlers::profile::add_address)
                .patch(handlers::profile::update_address)
                .delete(handlers::profile::remove_address),
        );

    let admin_routes = Router::new()
        .route(
            "/api/admin/orders",
            get(admin::orders::list_orders).patch(admin::orders::update_status),
        )
        .route(
            "/api/admin/menu",
            get(admin::menu::list_menu)
                .post(admin::menu::create_menu_item)
                .patch(admin::menu::update_menu_item)
                .delete(admin::menu::delete_menu_item),
        )
        .route(
            "/api/admin/offers",
            get(admin::offers::list_offers)
                .post(admin::offers::create_offer)
                .patch(admin::offers::update_offer)
                .delete(admin::offers::delete_offer),
        )
        .route("/api/admin/metrics", get(admin::metrics::dashboard))
        .route("/api/admin/user-metrics", get(admin::metrics::user_insights))
        .route(
            "/api/admin/cleanup",
            get(admin::cleanup::stats).delete(admin::cleanup::purge),
        );

    Router::new()
        .merge(public_routes)
        .merge(customer_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
