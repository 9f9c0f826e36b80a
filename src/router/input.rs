//! Classification of inbound chat messages

/// Reply-keyboard label of the search entry
pub const MENU_SEARCH: &str = "🔍 Search recipes";
/// Reply-keyboard label of the favorites entry
pub const MENU_FAVORITES: &str = "⭐ My favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Search,
    Favorites,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Command(Command),
    Menu(MenuAction),
    Text(String),
}

impl UserInput {
    /// Commands and menu labels win over free text, whatever the conversation state
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();

        if let Some(command) = trimmed.strip_prefix('/') {
            // "/start@RecipeBot payload" -> "start"
            let name = command
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .split('@')
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            match name.as_str() {
                "start" => return UserInput::Command(Command::Start),
                "help" => return UserInput::Command(Command::Help),
                "search" => return UserInput::Menu(MenuAction::Search),
                "favorites" => return UserInput::Menu(MenuAction::Favorites),
                _ => {}
            }
        }

        match trimmed {
            MENU_SEARCH => UserInput::Menu(MenuAction::Search),
            MENU_FAVORITES => UserInput::Menu(MenuAction::Favorites),
            _ => UserInput::Text(text.to_string()),
        }
    }
}
