//! Data access for the `pokemon` entity and its owned collections.
//!
//! The service layer only sees [`PokemonRepository`]; PostgreSQL and an
//! in-process map both implement it with the same error semantics.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::pokemon::Pokemon;

pub use memory::InMemoryPokemonRepository;
pub use postgres::PgPokemonRepository;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Pokémon {0} introuvable.")]
    NotFound(i64),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Invalid(String),

    #[error("Plus aucun identifiant disponible.")]
    IdsExhausted,

    #[error("Erreur de base de données : {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// Every stored Pokemon, ordered by id, collections included.
    async fn find_all(&self) -> RepoResult<Vec<Pokemon>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Pokemon>>;

    /// Inserts when `id` is `None`, otherwise replaces (or creates) the row
    /// with that id. Returns the stored entity with its id set.
    async fn save(&self, pokemon: Pokemon) -> RepoResult<Pokemon>;

    /// Fails with [`RepoError::NotFound`] when nothing was deleted.
    async fn delete_by_id(&self, id: i64) -> RepoResult<()>;
}

pub(crate) fn duplicate_name(name: &str) -> RepoError {
    RepoError::Conflict(format!("Un Pokémon nommé '{name}' existe déjà."))
}
