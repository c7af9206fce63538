use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod repo_types;
pub mod seed;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::vehicle_routes())
}
