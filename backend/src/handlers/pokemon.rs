use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::app::AppState;
use crate::helpers::{ApiResult, from_repo};
use crate::models::pokemon::Pokemon;

pub async fn list_pokemons(State(state): State<AppState>) -> ApiResult<Json<Vec<Pokemon>>> {
    let pokemons = state
        .pokemons
        .get_all_pokemons()
        .await
        .map_err(from_repo)?;
    Ok(Json(pokemons))
}

pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Pokemon>> {
    let pokemon = state.pokemons.get_pokemon(id).await.map_err(from_repo)?;
    Ok(Json(pokemon))
}

pub async fn create_pokemon(
    State(state): State<AppState>,
    Json(payload): Json<Pokemon>,
) -> ApiResult<(StatusCode, Json<Pokemon>)> {
    let created = state
        .pokemons
        .create_pokemon(payload)
        .await
        .map_err(from_repo)?;
    tracing::info!(id = ?created.id, name = %created.name, "pokemon created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_pokemon(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Pokemon>,
) -> ApiResult<Json<Pokemon>> {
    let saved = state
        .pokemons
        .update_pokemon(id, payload)
        .await
        .map_err(from_repo)?;
    Ok(Json(saved))
}

pub async fn delete_pokemon(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.pokemons.delete_pokemon(id).await.map_err(from_repo)?;
    tracing::info!(id, "pokemon deleted");
    Ok(StatusCode::NO_CONTENT)
}
