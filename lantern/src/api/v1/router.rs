use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let sos = Router::new()
        .route("/", post(handlers::sos::create_sos).get(handlers::sos::list_sos))
        .route("/{alertId}/status", post(handlers::sos::update_sos_status));

    let circles = Router::new()
        .route(
            "/",
            post(handlers::circles::create_circle).get(handlers::circles::list_circles),
        )
        .route(
            "/{circleId}/members",
            get(handlers::circles::list_circle_members)
                .post(handlers::circles::add_circle_member),
        );

    let friend_requests = Router::new()
        .route("/", post(handlers::friends::create_friend_request))
        .route("/pending", get(handlers::friends::list_pending_requests))
        .route(
            "/{requestId}/accept",
            post(handlers::friends::accept_friend_request),
        )
        .route(
            "/{requestId}/reject",
            post(handlers::friends::reject_friend_request),
        );

    let friends = Router::new()
        .route("/", get(handlers::friends::list_friends))
        .route("/{friendId}", delete(handlers::friends::remove_friend));

    let notifications = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route(
            "/{notificationId}/read",
            post(handlers::notifications::mark_notification_read),
        );

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .route("/map/incidents", get(handlers::feed::map_incidents))
        .route(
            "/incidents/report",
            post(handlers::incidents::create_report),
        )
        .route("/news:ingest", post(handlers::incidents::ingest_news))
        .nest("/sos", sos)
        .nest("/circles", circles)
        .nest("/friend-requests", friend_requests)
        .nest("/friends", friends)
        .nest("/notifications", notifications)
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
