//! Recipe catalog abstraction
//!
//! The catalog is the external recipe database. Lookups of unknown ids are
//! an expected outcome (`Ok(None)`), only transport/parse failures are errors.

mod error;
mod mealdb;
mod types;

pub use error::{CatalogError, CatalogErrorKind};
pub use mealdb::MealDbClient;
pub use types::{truncate_with_ellipsis, RecipeDetail, RecipeSummary, ELLIPSIS};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for recipe catalogs
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Free-text search. No matches is an empty vector, not an error.
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, CatalogError>;

    /// Fetch full detail for one recipe id
    async fn lookup(&self, id: &str) -> Result<Option<RecipeDetail>, CatalogError>;
}

#[async_trait]
impl<T: RecipeCatalog + ?Sized> RecipeCatalog for Arc<T> {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, CatalogError> {
        (**self).search(query).await
    }

    async fn lookup(&self, id: &str) -> Result<Option<RecipeDetail>, CatalogError> {
        (**self).lookup(id).await
    }
}

/// Logging wrapper for catalogs
pub struct LoggingCatalog<C> {
    inner: C,
}

impl<C: RecipeCatalog> LoggingCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: RecipeCatalog> RecipeCatalog for LoggingCatalog<C> {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, CatalogError> {
        let start = std::time::Instant::now();
        let result = self.inner.search(query).await;
        let duration = start.elapsed();

        match &result {
            Ok(recipes) => {
                tracing::info!(
                    query = %query,
                    duration_ms = %duration.as_millis(),
                    results = recipes.len(),
                    "Catalog search completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    query = %query,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Catalog search failed"
                );
            }
        }

        result
    }

    async fn lookup(&self, id: &str) -> Result<Option<RecipeDetail>, CatalogError> {
        let start = std::time::Instant::now();
        let result = self.inner.lookup(id).await;
        let duration = start.elapsed();

        match &result {
            Ok(detail) => {
                tracing::info!(
                    recipe_id = %id,
                    duration_ms = %duration.as_millis(),
                    found = detail.is_some(),
                    "Catalog lookup completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    recipe_id = %id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Catalog lookup failed"
                );
            }
        }

        result
    }
}
