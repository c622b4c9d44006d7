use axum::Router;
use axum::routing::{delete, get};
use axum::middleware;
use crate::middleware::origin;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod schema;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    // Only listing and removal carry the origin gate.
    let listing = get(handler::list_movies).route_layer(middleware::from_fn_with_state(
        state.origins.clone(),
        origin::expose_origin,
    ));

    let removal = delete(handler::delete_movie)
        .options(handler::preflight)
        .route_layer(middleware::from_fn_with_state(
            state.origins,
            origin::expose_origin_and_methods,
        ));

    Router::new()
        .route("/movies", listing.post(handler::create_movie))
        .route(
            "/movies/{id}",
            removal.get(handler::get_movie).patch(handler::update_movie),
        )
}
