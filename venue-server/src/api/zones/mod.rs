//! Zone API module

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/events/{event_id}/zones", event_routes())
        .nest("/api/zones", zone_routes())
}

fn event_routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list_by_event).post(handler::create))
}

fn zone_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/layout", put(handler::regenerate_layout))
}
