use std::sync::Arc;

use crate::models::pokemon::{Pokemon, check_client_id};
use crate::repository::{PokemonRepository, RepoError, RepoResult};

/// Pokemon use cases on top of any [`PokemonRepository`].
#[derive(Clone)]
pub struct PokemonService {
    repo: Arc<dyn PokemonRepository>,
}

impl PokemonService {
    pub fn new(repo: Arc<dyn PokemonRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all_pokemons(&self) -> RepoResult<Vec<Pokemon>> {
        self.repo.find_all().await
    }

    pub async fn get_pokemon(&self, id: i64) -> RepoResult<Pokemon> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RepoError::NotFound(id))
    }

    /// Any id sent by the client is dropped; the store assigns one.
    pub async fn create_pokemon(&self, mut pokemon: Pokemon) -> RepoResult<Pokemon> {
        pokemon.id = None;
        pokemon.check_columns().map_err(RepoError::Invalid)?;
        self.repo.save(pokemon).await
    }

    /// Full replace of the Pokemon at `id`, created when absent.
    /// `id` must lie in `1..=MAX_CLIENT_ID`.
    pub async fn update_pokemon(&self, id: i64, mut pokemon: Pokemon) -> RepoResult<Pokemon> {
        check_client_id(id).map_err(RepoError::Invalid)?;
        pokemon.id = Some(id);
        pokemon.check_columns().map_err(RepoError::Invalid)?;
        self.repo.save(pokemon).await
    }

    pub async fn delete_pokemon(&self, id: i64) -> RepoResult<()> {
        self.repo.delete_by_id(id).await
    }
}
