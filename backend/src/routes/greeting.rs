use axum::Router;
use axum::routing::get;

use crate::app::AppState;
use crate::handlers::greeting::greeting;

pub fn greeting_routes() -> Router<AppState> {
    Router::new().route("/greeting", get(greeting))
}
