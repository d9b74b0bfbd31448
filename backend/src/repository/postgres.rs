use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{PokemonRepository, RepoError, RepoResult, duplicate_name};
use crate::models::pokemon::{Pokemon, PokemonRow};

const UNIQUE_VIOLATION: &str = "23505";
/// Default name of the `UNIQUE` constraint on `pokemon.name`.
const NAME_UNIQUE: &str = "pokemon_name_key";
const STRING_TOO_LONG: &str = "22001";

/// Owned collection tables: (table, value column).
const POWERS: (&str, &str) = ("pokemon_powers", "power");
const TIPS: (&str, &str) = ("pokemon_tips", "tip");

#[derive(Clone)]
pub struct PgPokemonRepository {
    pool: PgPool,
}

impl PgPokemonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_collection(
        &self,
        (table, column): (&str, &str),
        ids: &[i64],
    ) -> RepoResult<HashMap<i64, Vec<String>>> {
        let sql = format!(
            "SELECT pokemon_id, {column} FROM {table} \
             WHERE pokemon_id = ANY($1) \
             ORDER BY pokemon_id, position"
        );
        let rows = sqlx::query_as::<_, (i64, String)>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
        for (pokemon_id, value) in rows {
            grouped.entry(pokemon_id).or_default().push(value);
        }
        Ok(grouped)
    }

    async fn attach_collections(&self, rows: Vec<PokemonRow>) -> RepoResult<Vec<Pokemon>> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut powers = self.load_collection(POWERS, &ids).await?;
        let mut tips = self.load_collection(TIPS, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_pokemon(
                    powers.remove(&id).unwrap_or_default(),
                    tips.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}

fn store_error(e: sqlx::Error, name: &str) -> RepoError {
    if let sqlx::Error::Database(db) = &e {
        match db.code().as_deref() {
            Some(UNIQUE_VIOLATION) if db.constraint() == Some(NAME_UNIQUE) => {
                return duplicate_name(name);
            }
            Some(STRING_TOO_LONG) => return RepoError::Invalid(db.message().to_string()),
            _ => {}
        }
    }
    RepoError::Database(e)
}

async fn replace_collection(
    tx: &mut Transaction<'_, Postgres>,
    (table, column): (&str, &str),
    pokemon_id: i64,
    values: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query(&format!("DELETE FROM {table} WHERE pokemon_id = $1"))
        .bind(pokemon_id)
        .execute(&mut **tx)
        .await?;

    if values.is_empty() {
        return Ok(());
    }

    sqlx::query(&format!(
        "INSERT INTO {table} (pokemon_id, position, {column}) \
         SELECT $1, (ord - 1)::INTEGER, value \
         FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS t(value, ord)"
    ))
    .bind(pokemon_id)
    .bind(values)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Moves the identity sequence forward to `id`, never backward.
async fn bump_sequence(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        SELECT setval(pg_get_serial_sequence('pokemon', 'id'), $1)
        WHERE $1 > COALESCE(
            pg_sequence_last_value(pg_get_serial_sequence('pokemon', 'id')::regclass),
            0
        )
        "#,
    )
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn write_pokemon(
    tx: &mut Transaction<'_, Postgres>,
    pokemon: &Pokemon,
) -> Result<i64, sqlx::Error> {
    let id = match pokemon.id {
        None => {
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO pokemon (name, explanation, strength, picture)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(&pokemon.name)
            .bind(&pokemon.explanation)
            .bind(pokemon.strength)
            .bind(&pokemon.picture)
            .fetch_one(&mut **tx)
            .await?
        }
        Some(id) => {
            let inserted = sqlx::query_scalar::<_, bool>(
                r#"
                INSERT INTO pokemon (id, name, explanation, strength, picture)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO UPDATE SET
                  name = EXCLUDED.name,
                  explanation = EXCLUDED.explanation,
                  strength = EXCLUDED.strength,
                  picture = EXCLUDED.picture
                RETURNING (xmax = 0)
                "#,
            )
            .bind(id)
            .bind(&pokemon.name)
            .bind(&pokemon.explanation)
            .bind(pokemon.strength)
            .bind(&pokemon.picture)
            .fetch_one(&mut **tx)
            .await?;

            if inserted {
                bump_sequence(tx, id).await?;
            }
            id
        }
    };

    replace_collection(tx, POWERS, id, &pokemon.powers).await?;
    replace_collection(tx, TIPS, id, &pokemon.tips).await?;
    Ok(id)
}

#[async_trait]
impl PokemonRepository for PgPokemonRepository {
    async fn find_all(&self) -> RepoResult<Vec<Pokemon>> {
        let rows = sqlx::query_as::<_, PokemonRow>(
            r#"
            SELECT id, name, explanation, strength, picture
            FROM pokemon
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        self.attach_collections(rows).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Pokemon>> {
        let row = sqlx::query_as::<_, PokemonRow>(
            r#"
            SELECT id, name, explanation, strength, picture
            FROM pokemon
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.attach_collections(vec![row]).await?.pop())
    }

    async fn save(&self, mut pokemon: Pokemon) -> RepoResult<Pokemon> {
        let mut tx = self.pool.begin().await?;
        let id = write_pokemon(&mut tx, &pokemon)
            .await
            .map_err(|e| store_error(e, &pokemon.name))?;
        tx.commit().await?;

        tracing::debug!(id, name = %pokemon.name, "pokemon saved");
        pokemon.id = Some(id);
        Ok(pokemon)
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM pokemon WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}
