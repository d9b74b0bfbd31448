use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PokemonRepository, RepoError, RepoResult, duplicate_name};
use crate::models::pokemon::Pokemon;

#[derive(Default)]
struct Store {
    rows: BTreeMap<i64, Pokemon>,
    last_id: i64,
}

/// Map-backed repository used when no database is configured and in tests.
#[derive(Default)]
pub struct InMemoryPokemonRepository {
    store: RwLock<Store>,
}

impl InMemoryPokemonRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PokemonRepository for InMemoryPokemonRepository {
    async fn find_all(&self) -> RepoResult<Vec<Pokemon>> {
        let store = self.store.read().await;
        Ok(store.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Pokemon>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn save(&self, mut pokemon: Pokemon) -> RepoResult<Pokemon> {
        let mut store = self.store.write().await;
        let taken = store
            .rows
            .values()
            .any(|p| p.name == pokemon.name && p.id != pokemon.id);
        if taken {
            return Err(duplicate_name(&pokemon.name));
        }

        let id = match pokemon.id {
            Some(id) => id,
            None => store.last_id.checked_add(1).ok_or(RepoError::IdsExhausted)?,
        };
        store.last_id = store.last_id.max(id);
        pokemon.id = Some(id);
        store.rows.insert(id, pokemon.clone());
        Ok(pokemon)
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<()> {
        let mut store = self.store.write().await;
        store
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound(id))
    }
}
