use crate::model::card::{Card, Category};
use crate::model::set::CardSet;
use core::fmt;

/// The fixed card universe: three disjoint category sets and their union.
///
/// Immutable after construction; the narrowing "remaining candidates"
/// view lives in the engine's solution tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDomain {
    categories: [CardSet; 3],
    all: CardSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    Overlap(Card),
    EmptyCategory(Category),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Overlap(card) => {
                write!(f, "card {card} appears in more than one category")
            }
            DomainError::EmptyCategory(category) => {
                write!(f, "the {category} category has no cards")
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl CardDomain {
    /// The standard deck: 6 suspects, 6 weapons, 9 rooms.
    pub fn standard() -> Self {
        let cards_of = |category: Category| -> CardSet {
            Card::ALL
                .iter()
                .copied()
                .filter(|card| card.category() == category)
                .collect()
        };
        Self::new(
            cards_of(Category::Suspect),
            cards_of(Category::Weapon),
            cards_of(Category::Room),
        )
        .expect("standard categories are disjoint and non-empty")
    }

    pub fn new(suspects: CardSet, weapons: CardSet, rooms: CardSet) -> Result<Self, DomainError> {
        let categories = [suspects, weapons, rooms];
        for (index, category) in Category::ALL.iter().enumerate() {
            if categories[index].is_empty() {
                return Err(DomainError::EmptyCategory(*category));
            }
        }
        let mut all = CardSet::EMPTY;
        for cards in categories {
            let shared = all.intersect(cards);
            if let Some(card) = shared.iter().next() {
                return Err(DomainError::Overlap(card));
            }
            all = all.union(cards);
        }
        Ok(Self { categories, all })
    }

    pub fn cards(&self, category: Category) -> CardSet {
        self.categories[category.index()]
    }

    pub fn all_cards(&self) -> CardSet {
        self.all
    }

    pub fn card_count(&self) -> usize {
        self.all.len()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.all.contains(card)
    }

    /// Resolves a card to the single category holding it, if any.
    pub fn classify(&self, card: Card) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| self.cards(*category).contains(card))
    }
}
