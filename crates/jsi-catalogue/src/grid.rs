use jsi_api_types::MovieSummary;

/// Message shown in place of cards when a section has nothing to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// The listing answered with no results.
    Empty,
    /// The listing could not be fetched at all.
    Failed,
}

impl Placeholder {
    pub fn message(self) -> &'static str {
        match self {
            Self::Empty => "No movies available for this selection",
            Self::Failed => "Error while loading movies",
        }
    }
}

/// Rendered container of movie cards.
///
/// Implementations only count and toggle card nodes; a placeholder never
/// counts as a card.
pub trait CardGrid {
    fn card_count(&self) -> usize;

    /// Show the first `visible` cards and hide the rest.
    fn apply_visibility(&self, visible: usize);

    fn append_cards(&self, movies: &[MovieSummary]);

    fn clear(&self);

    fn show_placeholder(&self, placeholder: Placeholder);
}
