use std::sync::Arc;

use dotenvy::dotenv;
use thiserror::Error;
use tokio::net::TcpListener;

use pokemon_backend::app::{AppState, build_app};
use pokemon_backend::config::{Config, ConfigError};
use pokemon_backend::db::{DbInitError, init_db};
use pokemon_backend::logging::init_logger;
use pokemon_backend::repository::{
    InMemoryPokemonRepository, PgPokemonRepository, PokemonRepository,
};
use pokemon_backend::service::Greeter;

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration : {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Db(#[from] DbInitError),

    #[error("serveur : {0}")]
    Io(#[from] std::io::Error),
}

async fn build_repository(config: &Config) -> Result<Arc<dyn PokemonRepository>, StartupError> {
    match &config.database_url {
        Some(url) => {
            let pool = init_db(url, config.max_connections).await?;
            Ok(Arc::new(PgPokemonRepository::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, Pokemon are kept in memory");
            Ok(Arc::new(InMemoryPokemonRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    let repo = build_repository(&config).await?;
    let app = build_app(AppState::new(repo, Greeter::new()));

    let listener = TcpListener::bind(&config.backend_url).await?;
    tracing::info!("server listening on http://{}", config.backend_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logger();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use pokemon_backend::app::WELCOME;
    use tower::util::ServiceExt;

    fn build_test_app() -> Router {
        // no database needed
        build_app(AppState::new(
            Arc::new(InMemoryPokemonRepository::new()),
            Greeter::seeded(0),
        ))
    }

    #[tokio::test]
    async fn get_racine_retourne_bienvenue() {
        let app = build_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, "text/plain; charset=utf-8");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(std::str::from_utf8(&body).unwrap(), WELCOME);
    }

    async fn send(app: Router, method: &str, uri: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn patch_sur_un_pokemon_retourne_405() {
        let response = send(build_test_app(), "PATCH", "/api/pokemons/1").await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let allow = response
            .headers()
            .get(header::ALLOW)
            .unwrap()
            .to_str()
            .unwrap();
        for method in ["GET", "PUT", "DELETE"] {
            assert!(allow.contains(method), "{allow}");
        }
        assert!(!allow.contains("POST"), "{allow}");
    }

    #[tokio::test]
    async fn greeting_en_lecture_seule() {
        let response = send(build_test_app(), "POST", "/api/greeting").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn routes_hors_api_retournent_404() {
        for uri in ["/pokemons", "/api/pokemons/1/evolutions", "/api"] {
            let response = send(build_test_app(), "GET", uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn depot_memoire_sans_database_url() {
        let config = Config::from_lookup(|_| None).unwrap();
        let repo = build_repository(&config).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
