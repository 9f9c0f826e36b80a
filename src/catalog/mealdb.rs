//! `TheMealDB` catalog client

use super::{CatalogError, RecipeCatalog, RecipeDetail, RecipeSummary};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// HTTP client for a `TheMealDB`-compatible API (`search.php` / `lookup.php`)
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url)
    }
}

#[async_trait]
impl RecipeCatalog for MealDbClient {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, CatalogError> {
        let response = self
            .client
            .get(self.endpoint("search.php"))
            .query(&[("s", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, query = %query, "Catalog search returned non-success status");
            return Ok(Vec::new());
        }

        let envelope: MealsEnvelope = response.json().await?;
        Ok(envelope
            .meals
            .unwrap_or_default()
            .into_iter()
            .map(Meal::into_summary)
            .collect())
    }

    async fn lookup(&self, id: &str) -> Result<Option<RecipeDetail>, CatalogError> {
        let response = self
            .client
            .get(self.endpoint("lookup.php"))
            .query(&[("i", id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::status(format!(
                "lookup of {id} returned HTTP {status}"
            )));
        }

        let envelope: MealsEnvelope = response.json().await?;
        Ok(envelope
            .meals
            .and_then(|meals| meals.into_iter().next())
            .map(Meal::into_detail))
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    meals: Option<Vec<Meal>>,
}

#[derive(Debug, Deserialize)]
struct Meal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
}

impl Meal {
    fn into_summary(self) -> RecipeSummary {
        RecipeSummary::new(
            self.id,
            self.name,
            self.thumbnail.unwrap_or_default(),
            self.instructions.as_deref().unwrap_or_default(),
        )
    }

    fn into_detail(self) -> RecipeDetail {
        RecipeDetail {
            id: self.id,
            title: self.name,
            thumbnail: self.thumbnail.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
        }
    }
}
