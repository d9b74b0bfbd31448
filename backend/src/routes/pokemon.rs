use axum::Router;
use axum::routing::get;

use crate::app::AppState;
use crate::handlers::pokemon::{
    create_pokemon, delete_pokemon, get_pokemon, list_pokemons, update_pokemon,
};

pub fn pokemon_routes() -> Router<AppState> {
    Router::new()
        .route("/pokemons", get(list_pokemons).post(create_pokemon))
        .route(
            "/pokemons/{id}",
            get(get_pokemon).put(update_pokemon).delete(delete_pokemon),
        )
}
