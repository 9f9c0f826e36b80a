//! Interaction router
//!
//! Turns inbound chat events into outbound payload descriptions. Messages go
//! through the conversation state machine; button callbacks are stateless and
//! always produce exactly one acknowledgment.

mod callback;
pub mod input;
pub mod render;
mod reply;

#[cfg(test)]
pub mod testing;

pub use callback::CallbackAction;
use input::{Command, MenuAction, UserInput};
pub use reply::{Button, CallbackAck, CallbackReply, Markup, Outbound, TextFormat};

use crate::catalog::{CatalogError, RecipeCatalog, RecipeDetail};
use crate::favorites::{AddOutcome, FavoriteStore, RateOutcome, UserId};
use crate::state_machine::{ChatState, ConversationStates, Effect, Event};

/// Where a recipe card was opened from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardSource {
    Search,
    Favorites,
}

/// Generic router that can work with any catalog and favorites store
pub struct Router<C, F>
where
    C: RecipeCatalog,
    F: FavoriteStore,
{
    catalog: C,
    favorites: F,
    states: ConversationStates,
}

impl<C, F> Router<C, F>
where
    C: RecipeCatalog,
    F: FavoriteStore,
{
    pub fn new(catalog: C, favorites: F) -> Self {
        Self {
            catalog,
            favorites,
            states: ConversationStates::new(),
        }
    }

    pub fn chat_state(&self, user: UserId) -> ChatState {
        self.states.get(user)
    }

    /// Handle a text message (command, menu label, or free text)
    pub async fn handle_message(&self, user: UserId, text: &str) -> Vec<Outbound> {
        let event = match UserInput::parse(text) {
            UserInput::Command(Command::Help) => return vec![Outbound::text(render::HELP)],
            UserInput::Command(Command::Start) => Event::Reset,
            UserInput::Menu(MenuAction::Search) => Event::SearchSelected,
            UserInput::Menu(MenuAction::Favorites) => Event::FavoritesSelected,
            UserInput::Text(text) => Event::Text { text },
        };

        // The state lock is released before any catalog call
        let result = self.states.apply(user, event);

        let mut replies = Vec::new();
        for effect in result.effects {
            replies.extend(self.execute_effect(user, effect).await);
        }
        replies
    }

    /// Reply to messages without text (stickers, photos, ...)
    pub fn handle_non_text(&self, user: UserId) -> Vec<Outbound> {
        tracing::debug!(user_id = user, "Ignoring non-text message");
        vec![Outbound::text(render::TEXT_ONLY)]
    }

    /// Handle an inline-button callback payload
    pub async fn handle_callback(&self, user: UserId, data: &str) -> CallbackReply {
        match CallbackAction::parse(data) {
            CallbackAction::AddToFavorites(id) => self.add_to_favorites(user, &id).await,
            CallbackAction::OpenRecipe(id) => self.open_recipe(user, &id, CardSource::Search).await,
            CallbackAction::OpenFavorite(id) => self.open_recipe(user, &id, CardSource::Favorites).await,
            CallbackAction::Rate { recipe_id, rating } => {
                let ack = match self.favorites.rate(user, &recipe_id, rating) {
                    RateOutcome::Rated => render::rated(rating),
                    RateOutcome::NotFavorited => CallbackAck::with_text(render::ACK_NOT_FAVORITED),
                };
                CallbackReply::ack(ack)
            }
            CallbackAction::Malformed(raw) => {
                tracing::warn!(user_id = user, payload = %raw, "Malformed callback payload");
                CallbackReply::ack(CallbackAck::with_text(render::ACK_UNKNOWN_ACTION))
            }
        }
    }

    async fn execute_effect(&self, user: UserId, effect: Effect) -> Vec<Outbound> {
        match effect {
            Effect::PromptForQuery => vec![Outbound::text(render::QUERY_PROMPT)],
            Effect::ShowWelcome => vec![render::welcome()],
            Effect::DefaultReply => vec![render::idle_hint()],
            Effect::ShowFavorites => vec![render::favorites(&self.favorites.list(user))],
            Effect::SearchCatalog { query } => match self.catalog.search(&query).await {
                Ok(recipes) => {
                    tracing::info!(user_id = user, query = %query, results = recipes.len(), "Search answered");
                    vec![render::search_results(&recipes)]
                }
                Err(e) => {
                    log_unavailable(user, &e);
                    vec![Outbound::text(render::CATALOG_UNAVAILABLE)]
                }
            },
        }
    }

    async fn add_to_favorites(&self, user: UserId, recipe_id: &str) -> CallbackReply {
        let recipe = match self.lookup(user, recipe_id).await {
            Ok(recipe) => recipe,
            Err(ack) => return CallbackReply::ack(ack),
        };

        let ack = match self.favorites.add(user, &recipe.summary()) {
            AddOutcome::Added => render::ACK_ADDED,
            AddOutcome::AlreadyPresent => render::ACK_ALREADY_PRESENT,
        };
        CallbackReply::ack(CallbackAck::with_text(ack))
    }

    async fn open_recipe(&self, user: UserId, recipe_id: &str, source: CardSource) -> CallbackReply {
        let recipe = match self.lookup(user, recipe_id).await {
            Ok(recipe) => recipe,
            Err(ack) => return CallbackReply::ack(ack),
        };

        CallbackReply {
            ack: CallbackAck::silent(),
            messages: vec![
                render::recipe_card(&recipe, source == CardSource::Search),
                render::rating_prompt(&recipe.id),
            ],
        }
    }

    /// Lookup that maps every non-success outcome to its acknowledgment
    async fn lookup(&self, user: UserId, recipe_id: &str) -> Result<RecipeDetail, CallbackAck> {
        match self.catalog.lookup(recipe_id).await {
            Ok(Some(recipe)) => Ok(recipe),
            Ok(None) => {
                tracing::debug!(user_id = user, recipe_id = %recipe_id, "Recipe not found in catalog");
                Err(CallbackAck::with_text(render::ACK_NOT_FOUND))
            }
            Err(e) => {
                log_unavailable(user, &e);
                Err(CallbackAck::with_text(render::ACK_UNAVAILABLE))
            }
        }
    }
}

fn log_unavailable(user: UserId, error: &CatalogError) {
    tracing::warn!(user_id = user, kind = ?error.kind, error = %error, "Catalog unavailable");
}
