use serde::{Deserialize, Serialize};

/// Column limit shared by `explanation` and `picture` (`VARCHAR(500)`).
pub const MAX_TEXT_LEN: usize = 500;

/// Highest id a client may choose on PUT (2^53 - 1, exact in a JSON number).
/// Generated ids continue past the highest id in use.
pub const MAX_CLIENT_ID: i64 = (1 << 53) - 1;

pub fn check_client_id(id: i64) -> Result<(), String> {
    if (1..=MAX_CLIENT_ID).contains(&id) {
        Ok(())
    } else {
        Err(format!("Identifiant {id} hors de la plage 1..={MAX_CLIENT_ID}."))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub explanation: Option<String>,
    pub strength: i32,
    #[serde(default)]
    pub powers: Vec<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Pokemon {
    /// Checks the bounded text columns. Returns the first offending column.
    pub fn check_columns(&self) -> Result<(), String> {
        for (column, value) in [("explanation", &self.explanation), ("picture", &self.picture)] {
            if let Some(v) = value
                && v.chars().count() > MAX_TEXT_LEN
            {
                return Err(format!("{column} dépasse {MAX_TEXT_LEN} caractères."));
            }
        }
        Ok(())
    }
}

/// Scalar columns of the `pokemon` table; collections are loaded separately.
#[derive(Debug, sqlx::FromRow)]
pub struct PokemonRow {
    pub id: i64,
    pub name: String,
    pub explanation: Option<String>,
    pub strength: i32,
    pub picture: Option<String>,
}

impl PokemonRow {
    pub fn into_pokemon(self, powers: Vec<String>, tips: Vec<String>) -> Pokemon {
        Pokemon {
            id: Some(self.id),
            name: self.name,
            explanation: self.explanation,
            strength: self.strength,
            powers,
            picture: self.picture,
            tips,
        }
    }
}
