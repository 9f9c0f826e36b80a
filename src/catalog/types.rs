//! Recipe snapshots returned by the catalog

use serde::{Deserialize, Serialize};

/// Maximum description length kept in search results
pub const SUMMARY_DESCRIPTION_CHARS: usize = 300;

pub const ELLIPSIS: &str = "...";

/// A search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    /// Empty when the catalog has no image
    pub thumbnail: String,
    /// First `SUMMARY_DESCRIPTION_CHARS` characters followed by `ELLIPSIS`
    pub description: String,
}

/// Full recipe as returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub instructions: String,
}

impl RecipeSummary {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        thumbnail: impl Into<String>,
        full_description: &str,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail: thumbnail.into(),
            description: summary_description(full_description),
        }
    }
}

impl RecipeDetail {
    /// Summary view of this recipe, as a search would have returned it
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary::new(
            self.id.clone(),
            self.title.clone(),
            self.thumbnail.clone(),
            &self.instructions,
        )
    }
}

/// Search snippets always end in `ELLIPSIS`, cut or not
fn summary_description(text: &str) -> String {
    let mut out: String = text.chars().take(SUMMARY_DESCRIPTION_CHARS).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Keep the first `max_chars` characters, appending `ELLIPSIS` when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + ELLIPSIS.len());
            out.extend(text.chars().take(max_chars));
            out.push_str(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}
