use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use pokemon_backend::app::{AppState, build_app};
use pokemon_backend::repository::{
    InMemoryPokemonRepository, PgPokemonRepository, PokemonRepository,
};
use pokemon_backend::service::Greeter;
use serde_json::{Value, json};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;

/// Fresh pool on `TEST_DATABASE_URL`, or `None` when the variable is unset.
#[allow(dead_code)]
pub async fn test_pool() -> Option<PgPool> {
    let _ = dotenvy::dotenv();

    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("[tests] TEST_DATABASE_URL not set, skipping PostgreSQL tests");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&url)
        .await
        .expect("DB connect failed");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Migration failed");
    Some(pool)
}

#[allow(dead_code)]
pub fn memory_app() -> Router {
    build_app(AppState::new(
        Arc::new(InMemoryPokemonRepository::new()),
        Greeter::seeded(7),
    ))
}

#[allow(dead_code)]
pub async fn pg_repository() -> Option<PgPokemonRepository> {
    test_pool().await.map(PgPokemonRepository::new)
}

/// Serves `repo` on an ephemeral port; returns the base URL.
#[allow(dead_code)]
pub async fn start_server_with(
    repo: Arc<dyn PokemonRepository>,
) -> (String, tokio::task::JoinHandle<()>) {
    let app = build_app(AppState::new(repo, Greeter::new()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("serve error: {e}");
        }
    });

    for _ in 0..30 {
        if let Ok(resp) = reqwest::get(format!("{url}/")).await {
            if resp.status().is_success() {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    (url, handle)
}

#[allow(dead_code)]
pub async fn start_server() -> (String, tokio::task::JoinHandle<()>) {
    start_server_with(Arc::new(InMemoryPokemonRepository::new())).await
}

#[allow(dead_code)]
pub fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

#[allow(dead_code)]
pub fn pokemon_body(name: &str) -> Value {
    json!({
        "name": name,
        "explanation": "Named after a sound",
        "strength": 42,
        "powers": ["Thunder Shock", "Growl"],
        "picture": "https://img.example/pokemon.png",
        "tips": ["Found in forests", "Weak to ground"]
    })
}
