use axum::{routing::get, Router};

use crate::handlers::football;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(football::proxy))
}
