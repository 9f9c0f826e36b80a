//! User-facing texts and button layouts

use super::callback::CallbackAction;
use super::input::{MENU_FAVORITES, MENU_SEARCH};
use super::reply::{Button, CallbackAck, Markup, Outbound, TextFormat};
use crate::catalog::{truncate_with_ellipsis, RecipeDetail, RecipeSummary, ELLIPSIS};
use crate::favorites::{FavoriteEntry, Rating};

/// Longest recipe card text (title + instructions)
pub const CAPTION_LIMIT: usize = 1000;

pub const STAR: &str = "⭐";

pub const WELCOME: &str = "Hi! I can find recipes and keep your favorites. Choose an action:";
pub const HELP: &str = "Commands:\n\
    /start - main menu\n\
    /search - search recipes by dish or ingredient\n\
    /favorites - your favorite recipes\n\
    /help - this message\n\n\
    Open a recipe to rate it. Only favorite recipes can be rated.";
pub const QUERY_PROMPT: &str = "Type a dish name or an ingredient to search for:";
pub const IDLE_HINT: &str = "Use the menu below to search for recipes or open your favorites.";
pub const TEXT_ONLY: &str = "Sorry, I only understand text messages.";
pub const NOTHING_FOUND: &str = "Nothing found. Try another query.";
pub const RESULTS_HEADER: &str = "Recipes found:";
pub const NO_FAVORITES: &str = "You have no favorite recipes yet.";
pub const FAVORITES_HEADER: &str = "Your favorite recipes:";
pub const RATE_PROMPT: &str = "Rate this recipe:";
pub const CATALOG_UNAVAILABLE: &str =
    "The recipe catalog is unavailable right now. Please try again later.";

pub const ADD_BUTTON: &str = "Add to favorites";
pub const ADD_BUTTON_SHORT: &str = "❤️";

pub const ACK_ADDED: &str = "Added to favorites!";
pub const ACK_ALREADY_PRESENT: &str = "Already in favorites!";
pub const ACK_NOT_FOUND: &str = "Recipe not found!";
pub const ACK_NOT_FAVORITED: &str = "Add the recipe to your favorites first!";
pub const ACK_UNKNOWN_ACTION: &str = "Unknown action.";
pub const ACK_UNAVAILABLE: &str = "Catalog unavailable, try again later.";

pub fn main_menu() -> Markup {
    Markup::Menu(vec![
        vec![MENU_SEARCH.to_string()],
        vec![MENU_FAVORITES.to_string()],
    ])
}

pub fn welcome() -> Outbound {
    Outbound::text_with_markup(WELCOME, main_menu())
}

pub fn idle_hint() -> Outbound {
    Outbound::text_with_markup(IDLE_HINT, main_menu())
}

pub fn stars(rating: u8) -> String {
    STAR.repeat(usize::from(rating))
}

/// One row per hit: open the recipe, or bookmark it straight away
pub fn search_results(recipes: &[RecipeSummary]) -> Outbound {
    if recipes.is_empty() {
        return Outbound::text(NOTHING_FOUND);
    }

    let rows = recipes
        .iter()
        .map(|r| {
            vec![
                Button::new(r.title.clone(), CallbackAction::OpenRecipe(r.id.clone())),
                Button::new(ADD_BUTTON_SHORT, CallbackAction::AddToFavorites(r.id.clone())),
            ]
        })
        .collect();
    Outbound::text_with_markup(RESULTS_HEADER, Markup::Inline(rows))
}

/// Favorites are expected in display order already
pub fn favorites(entries: &[FavoriteEntry]) -> Outbound {
    if entries.is_empty() {
        return Outbound::text(NO_FAVORITES);
    }

    let rows = entries
        .iter()
        .map(|e| {
            let label = if e.rating == 0 {
                e.title.clone()
            } else {
                format!("{} {}", e.title, stars(e.rating))
            };
            vec![Button::new(label, CallbackAction::OpenFavorite(e.recipe_id.clone()))]
        })
        .collect();
    Outbound::text_with_markup(FAVORITES_HEADER, Markup::Inline(rows))
}

pub fn rating_prompt(recipe_id: &str) -> Outbound {
    let row = Rating::all()
        .map(|rating| {
            Button::new(
                stars(rating.get()),
                CallbackAction::Rate {
                    recipe_id: recipe_id.to_string(),
                    rating,
                },
            )
        })
        .collect();
    Outbound::text_with_markup(RATE_PROMPT, Markup::Inline(vec![row]))
}

/// Recipe card: photo with caption, or plain text when there is no image
pub fn recipe_card(recipe: &RecipeDetail, with_add_button: bool) -> Outbound {
    let caption = recipe_caption(recipe);
    let markup = with_add_button.then(|| {
        Markup::Inline(vec![vec![Button::new(
            ADD_BUTTON,
            CallbackAction::AddToFavorites(recipe.id.clone()),
        )]])
    });

    if recipe.thumbnail.is_empty() {
        Outbound::Text {
            text: caption,
            format: TextFormat::Html,
            markup,
        }
    } else {
        Outbound::Photo {
            url: recipe.thumbnail.clone(),
            caption,
            format: TextFormat::Html,
            markup,
        }
    }
}

pub fn rated(rating: Rating) -> CallbackAck {
    CallbackAck::with_text(format!("You rated it {rating} {STAR}"))
}

/// Bold title and instructions. The unescaped text is cut to `CAPTION_LIMIT`
/// characters before escaping so entities are never split.
pub fn recipe_caption(recipe: &RecipeDetail) -> String {
    let keep = CAPTION_LIMIT - ELLIPSIS.len();
    let title_len = recipe.title.chars().count();
    let total = title_len + 1 + recipe.instructions.chars().count();

    let (title, body) = if total <= CAPTION_LIMIT {
        (recipe.title.clone(), recipe.instructions.clone())
    } else if title_len + 1 >= keep {
        (truncate_with_ellipsis(&recipe.title, keep), String::new())
    } else {
        (
            recipe.title.clone(),
            truncate_with_ellipsis(&recipe.instructions, keep - title_len - 1),
        )
    };

    if body.is_empty() {
        format!("<b>{}</b>", escape_html(&title))
    } else {
        format!("<b>{}</b>\n{}", escape_html(&title), escape_html(&body))
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
