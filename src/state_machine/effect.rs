//! Effects produced by state transitions

/// What the router must do after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the user to type a dish or ingredient
    PromptForQuery,
    /// Search the catalog with an already-trimmed query
    SearchCatalog { query: String },
    /// Render the user's favorites
    ShowFavorites,
    /// Greet the user and show the main menu
    ShowWelcome,
    /// Free text that is not a query; answered with a hint
    DefaultReply,
}

impl Effect {
    pub fn search(query: impl Into<String>) -> Self {
        Effect::SearchCatalog {
            query: query.into(),
        }
    }
}
