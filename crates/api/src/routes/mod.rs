pub mod debug;
pub mod health;
pub mod movies;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /healthcheck                 service and database health
/// /movies                      list, create
/// /movies/{id}                 get, partial update, delete
/// /users                       register
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/movies", movies::router())
        .nest("/users", users::router())
}
