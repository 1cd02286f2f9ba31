use crate::model::card::{Card, Category};
use crate::model::domain::CardDomain;
use crate::model::set::CardSet;
use core::fmt;

/// Everything seen during one turn, as reported by the observer.
/// Player identities are names resolved against the roster when the
/// engine processes the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub suggesting_player: String,
    pub suggested_cards: Vec<Card>,
    pub passing_players: Vec<String>,
    pub showing_player: Option<String>,
    pub revealed_card: Option<Card>,
}

/// A validated suggestion triple: exactly one card per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub suspect: Card,
    pub weapon: Card,
    pub room: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    WrongCount(usize),
    OutsideDomain(Card),
    DuplicateCategory(Category),
    MissingCategory(Category),
}

impl fmt::Display for SuggestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionError::WrongCount(count) => {
                write!(f, "expected exactly three suggested cards, got {count}")
            }
            SuggestionError::OutsideDomain(card) => {
                write!(f, "card {card} is not part of this game's deck")
            }
            SuggestionError::DuplicateCategory(category) => {
                write!(f, "suggestion names more than one {category} card")
            }
            SuggestionError::MissingCategory(category) => {
                write!(f, "suggestion is missing a {category} card")
            }
        }
    }
}

impl std::error::Error for SuggestionError {}

impl Suggestion {
    /// Splits an arbitrary card list into the one-per-category triple,
    /// rejecting anything else.
    pub fn classify(domain: &CardDomain, cards: &[Card]) -> Result<Self, SuggestionError> {
        if cards.len() != 3 {
            return Err(SuggestionError::WrongCount(cards.len()));
        }
        let mut slots: [Option<Card>; 3] = [None; 3];
        for &card in cards {
            let category = domain
                .classify(card)
                .ok_or(SuggestionError::OutsideDomain(card))?;
            let slot = &mut slots[category.index()];
            if slot.is_some() {
                return Err(SuggestionError::DuplicateCategory(category));
            }
            *slot = Some(card);
        }
        for category in Category::ALL {
            if slots[category.index()].is_none() {
                return Err(SuggestionError::MissingCategory(category));
            }
        }
        Ok(Self {
            suspect: slots[Category::Suspect.index()].expect("slot filled"),
            weapon: slots[Category::Weapon.index()].expect("slot filled"),
            room: slots[Category::Room.index()].expect("slot filled"),
        })
    }

    pub fn cards(self) -> CardSet {
        [self.suspect, self.weapon, self.room].into_iter().collect()
    }

    pub fn contains(self, card: Card) -> bool {
        self.cards().contains(card)
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with the {} in the {}", self.suspect, self.weapon, self.room)
    }
}
