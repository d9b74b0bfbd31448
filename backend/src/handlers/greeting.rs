use axum::{Json, extract::State};

use crate::app::AppState;
use crate::models::greeting::GreetingResponse;

pub async fn greeting(State(state): State<AppState>) -> Json<GreetingResponse> {
    Json(state.greeter.greet())
}
