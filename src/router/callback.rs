//! Inline-button callback payloads
//!
//! Payloads are colon-delimited and carry all context the handler needs:
//! `add-to-favorites:<id>`, `open-recipe:<id>`, `open-favorite:<id>`,
//! `rate:<id>:<1..5>`.

use crate::favorites::Rating;
use std::fmt;

const ADD_TO_FAVORITES: &str = "add-to-favorites";
const OPEN_RECIPE: &str = "open-recipe";
const OPEN_FAVORITE: &str = "open-favorite";
const RATE: &str = "rate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    AddToFavorites(String),
    OpenRecipe(String),
    OpenFavorite(String),
    Rate { recipe_id: String, rating: Rating },
    /// Anything that failed to parse, kept verbatim for logs
    Malformed(String),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Self {
        let malformed = || CallbackAction::Malformed(data.to_string());

        let Some((action, rest)) = data.split_once(':') else {
            return malformed();
        };
        if rest.is_empty() {
            return malformed();
        }

        match action {
            ADD_TO_FAVORITES => CallbackAction::AddToFavorites(rest.to_string()),
            OPEN_RECIPE => CallbackAction::OpenRecipe(rest.to_string()),
            OPEN_FAVORITE => CallbackAction::OpenFavorite(rest.to_string()),
            RATE => {
                let parsed = rest.rsplit_once(':').and_then(|(id, value)| {
                    let rating = value.parse::<u8>().ok().and_then(Rating::new)?;
                    (!id.is_empty()).then(|| CallbackAction::Rate {
                        recipe_id: id.to_string(),
                        rating,
                    })
                });
                parsed.unwrap_or_else(malformed)
            }
            _ => malformed(),
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::AddToFavorites(id) => write!(f, "{ADD_TO_FAVORITES}:{id}"),
            CallbackAction::OpenRecipe(id) => write!(f, "{OPEN_RECIPE}:{id}"),
            CallbackAction::OpenFavorite(id) => write!(f, "{OPEN_FAVORITE}:{id}"),
            CallbackAction::Rate { recipe_id, rating } => write!(f, "{RATE}:{recipe_id}:{rating}"),
            CallbackAction::Malformed(raw) => f.write_str(raw),
        }
    }
}
