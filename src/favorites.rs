//! Per-user favorites and their ratings
//!
//! Entries are deduplicated by recipe id per user. Listing always sorts by
//! descending rating, then ascending title, computed fresh on every call.

#[cfg(test)]
mod proptests;

use crate::catalog::RecipeSummary;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Chat-platform user identifier
pub type UserId = i64;

/// A star rating a user can give, 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All valid ratings, lowest first
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookmarked recipe. Identifying fields are captured when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub recipe_id: String,
    pub title: String,
    pub thumbnail: String,
    /// 0 means unrated, otherwise 1..=5
    pub rating: u8,
}

impl FavoriteEntry {
    pub fn from_summary(recipe: &RecipeSummary) -> Self {
        Self {
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            thumbnail: recipe.thumbnail.clone(),
            rating: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOutcome {
    Rated,
    NotFavorited,
}

/// Storage for user favorites
pub trait FavoriteStore: Send + Sync {
    /// Bookmark a recipe. Idempotent per (user, recipe id).
    fn add(&self, user: UserId, recipe: &RecipeSummary) -> AddOutcome;

    /// Overwrite the rating of an already-favorited recipe
    fn rate(&self, user: UserId, recipe_id: &str, rating: Rating) -> RateOutcome;

    /// The user's favorites, best rated first, ties by title
    fn list(&self, user: UserId) -> Vec<FavoriteEntry>;
}

impl<T: FavoriteStore + ?Sized> FavoriteStore for Arc<T> {
    fn add(&self, user: UserId, recipe: &RecipeSummary) -> AddOutcome {
        (**self).add(user, recipe)
    }

    fn rate(&self, user: UserId, recipe_id: &str, rating: Rating) -> RateOutcome {
        (**self).rate(user, recipe_id, rating)
    }

    fn list(&self, user: UserId) -> Vec<FavoriteEntry> {
        (**self).list(user)
    }
}

type UserFavorites = Arc<Mutex<Vec<FavoriteEntry>>>;

/// Process-lifetime favorites. Each user's collection has its own lock;
/// the outer map lock is only held to find or create that collection.
#[derive(Default)]
pub struct InMemoryFavorites {
    users: RwLock<HashMap<UserId, UserFavorites>>,
}

impl InMemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    fn existing(&self, user: UserId) -> Option<UserFavorites> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user)
            .cloned()
    }

    fn get_or_create(&self, user: UserId) -> UserFavorites {
        if let Some(favorites) = self.existing(user) {
            return favorites;
        }
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user)
            .or_default()
            .clone()
    }
}

impl FavoriteStore for InMemoryFavorites {
    fn add(&self, user: UserId, recipe: &RecipeSummary) -> AddOutcome {
        let favorites = self.get_or_create(user);
        let mut entries = favorites.lock().unwrap_or_else(PoisonError::into_inner);

        if entries.iter().any(|e| e.recipe_id == recipe.id) {
            tracing::debug!(user_id = user, recipe_id = %recipe.id, "Recipe already favorited");
            return AddOutcome::AlreadyPresent;
        }

        entries.push(FavoriteEntry::from_summary(recipe));
        tracing::info!(user_id = user, recipe_id = %recipe.id, count = entries.len(), "Favorite added");
        AddOutcome::Added
    }

    fn rate(&self, user: UserId, recipe_id: &str, rating: Rating) -> RateOutcome {
        let Some(favorites) = self.existing(user) else {
            tracing::debug!(user_id = user, recipe_id = %recipe_id, "Rating rejected, user has no favorites");
            return RateOutcome::NotFavorited;
        };
        let mut entries = favorites.lock().unwrap_or_else(PoisonError::into_inner);

        match entries.iter_mut().find(|e| e.recipe_id == recipe_id) {
            Some(entry) => {
                entry.rating = rating.get();
                tracing::info!(user_id = user, recipe_id = %recipe_id, rating = rating.get(), "Favorite rated");
                RateOutcome::Rated
            }
            None => {
                tracing::debug!(user_id = user, recipe_id = %recipe_id, "Rating rejected, recipe not favorited");
                RateOutcome::NotFavorited
            }
        }
    }

    fn list(&self, user: UserId) -> Vec<FavoriteEntry> {
        let Some(favorites) = self.existing(user) else {
            return Vec::new();
        };
        let mut entries = favorites
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        sort_for_display(&mut entries);
        entries
    }
}

/// Descending rating, ties broken by ascending title
pub fn sort_for_display(entries: &mut [FavoriteEntry]) {
    entries.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.title.cmp(&b.title)));
}
