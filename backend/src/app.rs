use std::sync::Arc;

use axum::http::{Method, header};
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::repository::PokemonRepository;
use crate::routes;
use crate::service::{Greeter, PokemonService};

pub const WELCOME: &str = "Bienvenue sur le Pokemon backend";

#[derive(Clone)]
pub struct AppState {
    pub pokemons: PokemonService,
    pub greeter: Arc<Greeter>,
}

impl AppState {
    pub fn new(repo: Arc<dyn PokemonRepository>, greeter: Greeter) -> Self {
        Self {
            pokemons: PokemonService::new(repo),
            greeter: Arc::new(greeter),
        }
    }
}

pub fn build_routes() -> Router<AppState> {
    let api = Router::new()
        .merge(routes::greeting::greeting_routes())
        .merge(routes::pokemon::pokemon_routes());

    Router::new()
        .route("/", get(|| async { WELCOME }))
        .nest("/api", api)
}

/// Any origin may call the API.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    build_routes()
        .with_state(state)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}
