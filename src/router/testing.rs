//! Mock catalog and router scenario tests
//!
//! The mock enables exercising the router without network I/O.

use crate::catalog::{CatalogError, RecipeCatalog, RecipeDetail, RecipeSummary};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

// ============================================================================
// Mock Catalog
// ============================================================================

/// In-memory catalog with a switch to simulate an outage
#[derive(Default)]
pub struct MockCatalog {
    recipes: Vec<RecipeDetail>,
    unavailable: AtomicBool,
    /// Record of all search queries
    pub searches: Mutex<Vec<String>>,
    /// Record of all looked-up ids
    pub lookups: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipe(mut self, id: &str, title: &str, thumbnail: &str, instructions: &str) -> Self {
        self.recipes.push(RecipeDetail {
            id: id.to_string(),
            title: title.to_string(),
            thumbnail: thumbnail.to_string(),
            instructions: instructions.to_string(),
        });
        self
    }

    /// Make every following call fail
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn recorded_searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn recorded_lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(CatalogError::network("mock catalog is down"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecipeCatalog for MockCatalog {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, CatalogError> {
        self.searches.lock().unwrap().push(query.to_string());
        self.check_available()?;

        let needle = query.to_lowercase();
        Ok(self
            .recipes
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&needle))
            .map(RecipeDetail::summary)
            .collect())
    }

    async fn lookup(&self, id: &str) -> Result<Option<RecipeDetail>, CatalogError> {
        self.lookups.lock().unwrap().push(id.to_string());
        self.check_available()?;
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::{FavoriteStore, InMemoryFavorites};
    use crate::router::input::{MENU_FAVORITES, MENU_SEARCH};
    use crate::router::{render, Button, CallbackAck, Markup, Outbound, Router};
    use crate::state_machine::ChatState;
    use std::sync::Arc;

    const USER: i64 = 1001;

    fn test_catalog() -> MockCatalog {
        MockCatalog::new()
            .with_recipe(
                "52772",
                "Teriyaki Chicken",
                "https://img.example/52772.jpg",
                "Preheat oven to 350F.",
            )
            .with_recipe(
                "52771",
                "Spicy Arrabiata",
                "https://img.example/52771.jpg",
                "Bring a large pot of water to a boil.",
            )
    }

    type TestRouter = Router<Arc<MockCatalog>, Arc<InMemoryFavorites>>;

    fn test_router() -> (TestRouter, Arc<MockCatalog>, Arc<InMemoryFavorites>) {
        let catalog = Arc::new(test_catalog());
        let favorites = Arc::new(InMemoryFavorites::new());
        (Router::new(catalog.clone(), favorites.clone()), catalog, favorites)
    }

    fn inline_rows(outbound: &Outbound) -> Vec<Vec<Button>> {
        match outbound.markup() {
            Some(Markup::Inline(rows)) => rows.clone(),
            other => panic!("expected inline markup, got {other:?}"),
        }
    }

    fn ack_text(ack: &CallbackAck) -> &str {
        ack.text.as_deref().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_mock_catalog() {
        let catalog = test_catalog();

        let hits = catalog.search("spicy").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "52771");
        assert!(catalog.lookup("99999").await.unwrap().is_none());

        catalog.set_unavailable(true);
        assert!(catalog.lookup("52772").await.is_err());
        assert_eq!(catalog.recorded_searches(), vec!["spicy"]);
        assert_eq!(catalog.recorded_lookups(), vec!["99999", "52772"]);
    }

    #[tokio::test]
    async fn test_start_shows_menu_and_resets() {
        let (router, _, _) = test_router();
        router.handle_message(USER, MENU_SEARCH).await;
        assert_eq!(router.chat_state(USER), ChatState::AwaitingSearchQuery);

        let replies = router.handle_message(USER, "/start").await;
        assert_eq!(replies, vec![render::welcome()]);
        assert_eq!(router.chat_state(USER), ChatState::Idle);
    }

    #[tokio::test]
    async fn test_search_flow_consumes_query_once() {
        let (router, catalog, _) = test_router();

        let replies = router.handle_message(USER, MENU_SEARCH).await;
        assert_eq!(replies, vec![Outbound::text(render::QUERY_PROMPT)]);

        let replies = router.handle_message(USER, "chicken").await;
        assert_eq!(replies.len(), 1);
        let rows = inline_rows(&replies[0]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].label, "Teriyaki Chicken");
        assert_eq!(rows[0][1].action.to_string(), "add-to-favorites:52772");
        assert_eq!(router.chat_state(USER), ChatState::Idle);

        // Not a query any more
        let replies = router.handle_message(USER, "arrabiata").await;
        assert_eq!(replies, vec![render::idle_hint()]);
        assert_eq!(catalog.recorded_searches(), vec!["chicken"]);
    }

    #[tokio::test]
    async fn test_search_without_results_resets_state() {
        let (router, _, _) = test_router();
        router.handle_message(USER, "/search").await;

        let replies = router.handle_message(USER, "pasta").await;
        assert_eq!(replies, vec![Outbound::text(render::NOTHING_FOUND)]);
        assert_eq!(router.chat_state(USER), ChatState::Idle);
    }

    #[tokio::test]
    async fn test_search_catalog_down_resets_state() {
        let (router, catalog, _) = test_router();
        catalog.set_unavailable(true);
        router.handle_message(USER, MENU_SEARCH).await;

        let replies = router.handle_message(USER, "chicken").await;
        assert_eq!(replies, vec![Outbound::text(render::CATALOG_UNAVAILABLE)]);
        assert_eq!(router.chat_state(USER), ChatState::Idle);
    }

    #[tokio::test]
    async fn test_menu_label_is_never_a_query() {
        let (router, catalog, _) = test_router();
        router.handle_message(USER, MENU_SEARCH).await;

        let replies = router.handle_message(USER, MENU_FAVORITES).await;
        assert_eq!(replies, vec![Outbound::text(render::NO_FAVORITES)]);
        assert_eq!(router.chat_state(USER), ChatState::Idle);
        assert!(catalog.recorded_searches().is_empty());
    }

    #[tokio::test]
    async fn test_add_to_favorites_twice() {
        let (router, _, favorites) = test_router();

        let first = router.handle_callback(USER, "add-to-favorites:52772").await;
        assert_eq!(ack_text(&first.ack), render::ACK_ADDED);
        assert!(first.messages.is_empty());

        let second = router.handle_callback(USER, "add-to-favorites:52772").await;
        assert_eq!(ack_text(&second.ack), render::ACK_ALREADY_PRESENT);
        assert_eq!(favorites.list(USER).len(), 1);
    }

    #[tokio::test]
    async fn test_add_unknown_recipe_is_not_found() {
        let (router, catalog, favorites) = test_router();

        let reply = router.handle_callback(USER, "add-to-favorites:99999").await;
        assert_eq!(ack_text(&reply.ack), render::ACK_NOT_FOUND);
        assert!(reply.messages.is_empty());
        assert!(favorites.list(USER).is_empty());
        assert_eq!(catalog.recorded_lookups(), vec!["99999"]);
    }

    #[tokio::test]
    async fn test_add_while_catalog_down() {
        let (router, catalog, favorites) = test_router();
        catalog.set_unavailable(true);

        let reply = router.handle_callback(USER, "add-to-favorites:52772").await;
        assert_eq!(ack_text(&reply.ack), render::ACK_UNAVAILABLE);
        assert!(favorites.list(USER).is_empty());
    }

    #[tokio::test]
    async fn test_open_recipe_sends_card_and_rating_prompt() {
        let (router, _, favorites) = test_router();

        let reply = router.handle_callback(USER, "open-recipe:52771").await;
        assert_eq!(reply.ack, CallbackAck::silent());
        assert_eq!(reply.messages.len(), 2);

        match &reply.messages[0] {
            Outbound::Photo { url, caption, .. } => {
                assert_eq!(url, "https://img.example/52771.jpg");
                assert!(caption.starts_with("<b>Spicy Arrabiata</b>"));
            }
            other => panic!("expected photo, got {other:?}"),
        }
        assert_eq!(inline_rows(&reply.messages[0])[0][0].action.to_string(), "add-to-favorites:52771");
        assert_eq!(reply.messages[1], render::rating_prompt("52771"));

        // Opening does not bookmark
        assert!(favorites.list(USER).is_empty());
    }

    #[tokio::test]
    async fn test_open_favorite_has_no_add_button() {
        let (router, _, _) = test_router();
        router.handle_callback(USER, "add-to-favorites:52772").await;

        let reply = router.handle_callback(USER, "open-favorite:52772").await;
        assert_eq!(reply.messages.len(), 2);
        assert!(reply.messages[0].markup().is_none());
        assert_eq!(reply.messages[1], render::rating_prompt("52772"));
    }

    #[tokio::test]
    async fn test_open_unknown_recipe() {
        let (router, _, _) = test_router();
        let reply = router.handle_callback(USER, "open-recipe:99999").await;
        assert_eq!(ack_text(&reply.ack), render::ACK_NOT_FOUND);
        assert!(reply.messages.is_empty());
    }

    #[tokio::test]
    async fn test_rate_requires_favorite() {
        let (router, _, favorites) = test_router();

        let reply = router.handle_callback(USER, "rate:52771:3").await;
        assert_eq!(ack_text(&reply.ack), render::ACK_NOT_FAVORITED);
        assert!(favorites.list(USER).is_empty());
    }

    #[tokio::test]
    async fn test_favorites_scenario() {
        let (router, _, _) = test_router();

        router.handle_callback(USER, "add-to-favorites:52772").await;
        router.handle_callback(USER, "add-to-favorites:52771").await;
        let reply = router.handle_callback(USER, "rate:52771:3").await;
        assert_eq!(ack_text(&reply.ack), "You rated it 3 ⭐");

        let replies = router.handle_message(USER, MENU_FAVORITES).await;
        assert_eq!(replies.len(), 1);
        let labels: Vec<String> = inline_rows(&replies[0])
            .into_iter()
            .map(|row| row[0].label.clone())
            .collect();
        assert_eq!(labels, vec!["Spicy Arrabiata ⭐⭐⭐", "Teriyaki Chicken"]);
    }

    #[tokio::test]
    async fn test_malformed_callbacks_are_acknowledged() {
        let (router, catalog, _) = test_router();

        for raw in ["favorite:52772", "favadd:52772", "rate:52771:9", ""] {
            let reply = router.handle_callback(USER, raw).await;
            assert_eq!(ack_text(&reply.ack), render::ACK_UNKNOWN_ACTION);
            assert!(reply.messages.is_empty());
        }
        assert!(catalog.recorded_lookups().is_empty());
    }

    #[tokio::test]
    async fn test_help_and_non_text() {
        let (router, _, _) = test_router();
        router.handle_message(USER, MENU_SEARCH).await;

        assert_eq!(router.handle_message(USER, "/help").await, vec![Outbound::text(render::HELP)]);
        // Help does not disturb a pending search
        assert_eq!(router.chat_state(USER), ChatState::AwaitingSearchQuery);
        assert_eq!(router.handle_non_text(USER), vec![Outbound::text(render::TEXT_ONLY)]);
    }
}
