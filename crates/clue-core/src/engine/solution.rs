use crate::model::card::{Card, Category};
use crate::model::domain::CardDomain;
use crate::model::set::CardSet;

/// The narrowing remaining-candidates view of each category. Sets only
/// shrink; reaching a single card means that category is solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionTracker {
    remaining: [CardSet; 3],
    full: [CardSet; 3],
}

impl SolutionTracker {
    pub fn new(domain: &CardDomain) -> Self {
        let full = [
            domain.cards(Category::Suspect),
            domain.cards(Category::Weapon),
            domain.cards(Category::Room),
        ];
        Self {
            remaining: full,
            full,
        }
    }

    pub fn remaining(&self, category: Category) -> CardSet {
        self.remaining[category.index()]
    }

    pub fn full(&self, category: Category) -> CardSet {
        self.full[category.index()]
    }

    pub fn solved(&self, category: Category) -> Option<Card> {
        self.remaining[category.index()].sole_card()
    }

    pub fn is_solved(&self) -> bool {
        Category::ALL
            .iter()
            .all(|category| self.solved(*category).is_some())
    }

    /// Drops a card some player certainly holds. Returns whether the
    /// set shrank; an emptied category means the inputs contradict.
    pub(crate) fn eliminate_held(&mut self, category: Category, card: Card) -> Result<bool, Category> {
        let remaining = &mut self.remaining[category.index()];
        if !remaining.contains(card) {
            return Ok(false);
        }
        let narrowed = remaining.without(card);
        if narrowed.is_empty() {
            return Err(category);
        }
        *remaining = narrowed;
        Ok(true)
    }

    /// Pins a category to its solution card.
    pub(crate) fn collapse(&mut self, category: Category, card: Card) -> bool {
        let remaining = &mut self.remaining[category.index()];
        let singleton = CardSet::EMPTY.with(card);
        if *remaining == singleton {
            return false;
        }
        *remaining = singleton;
        true
    }
}
