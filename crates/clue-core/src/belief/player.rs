use crate::model::card::Card;
use crate::model::roster::PlayerId;
use crate::model::set::CardSet;
use core::fmt;

/// What is known about one player's hand.
///
/// `certain` and `impossible` stay disjoint and only ever grow; each
/// clue set records a suggestion this player showed a card on,
/// restricted to the cards not yet ruled out for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBelief {
    id: PlayerId,
    hand_size: u8,
    certain: CardSet,
    impossible: CardSet,
    clues: Vec<CardSet>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeliefError {
    InconsistentHand { declared: u8, provided: usize },
    HeldAndImpossible(Card),
    HandOverflow { hand_size: u8, card: Card },
    ExhaustedClue,
}

impl fmt::Display for BeliefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeliefError::InconsistentHand { declared, provided } => {
                write!(
                    f,
                    "declared hand size {declared} does not match the {provided} cards provided"
                )
            }
            BeliefError::HeldAndImpossible(card) => {
                write!(f, "card {card} is both certainly held and ruled out")
            }
            BeliefError::HandOverflow { hand_size, card } => {
                write!(
                    f,
                    "holding {card} would exceed the declared hand size of {hand_size}"
                )
            }
            BeliefError::ExhaustedClue => {
                f.write_str("a shown-card constraint has no remaining candidates")
            }
        }
    }
}

impl std::error::Error for BeliefError {}

impl PlayerBelief {
    pub fn new(id: PlayerId, hand_size: u8) -> Self {
        Self {
            id,
            hand_size,
            certain: CardSet::EMPTY,
            impossible: CardSet::EMPTY,
            clues: Vec::new(),
        }
    }

    /// Belief seeded with an explicitly known hand (the observer).
    pub fn with_hand(id: PlayerId, hand_size: u8, hand: CardSet) -> Result<Self, BeliefError> {
        if hand.len() != hand_size as usize {
            return Err(BeliefError::InconsistentHand {
                declared: hand_size,
                provided: hand.len(),
            });
        }
        Ok(Self {
            id,
            hand_size,
            certain: hand,
            impossible: CardSet::EMPTY,
            clues: Vec::new(),
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hand_size(&self) -> u8 {
        self.hand_size
    }

    pub fn certain(&self) -> CardSet {
        self.certain
    }

    pub fn impossible(&self) -> CardSet {
        self.impossible
    }

    pub fn clues(&self) -> &[CardSet] {
        &self.clues
    }

    /// The player answered a suggestion with nothing: every suggested
    /// card is ruled out. Re-applying an already-known pass is a no-op.
    pub fn on_shows_none(&mut self, suggested: CardSet) -> Result<bool, BeliefError> {
        let mut changed = false;
        for card in suggested.iter() {
            changed |= self.rule_out(card)?;
        }
        Ok(changed)
    }

    /// The player showed some card to a third party; which one is
    /// unknown, so record the surviving candidates as a clue set.
    pub fn on_reveals_unknown(&mut self, suggested: CardSet) -> Result<(), BeliefError> {
        let candidates = suggested.difference(self.impossible);
        if candidates.is_empty() {
            return Err(BeliefError::ExhaustedClue);
        }
        self.clues.push(candidates);
        self.closure()?;
        Ok(())
    }

    /// The player showed this exact card to the observer.
    pub fn on_reveals_card(&mut self, card: Card, suggested: CardSet) -> Result<(), BeliefError> {
        self.hold(card)?;
        self.on_reveals_unknown(suggested)
    }

    /// Rules a single card out, purging it from the clue history.
    /// Returns whether anything changed.
    pub fn rule_out(&mut self, card: Card) -> Result<bool, BeliefError> {
        if self.certain.contains(card) {
            return Err(BeliefError::HeldAndImpossible(card));
        }
        if self.impossible.contains(card) {
            return Ok(false);
        }
        self.impossible = self.impossible.with(card);
        for clue in &mut self.clues {
            *clue = clue.without(card);
            if clue.is_empty() {
                return Err(BeliefError::ExhaustedClue);
            }
        }
        self.closure()?;
        Ok(true)
    }

    /// Local fixpoint: promote singleton clue sets into `certain` until
    /// nothing changes. Idempotent.
    pub fn closure(&mut self) -> Result<bool, BeliefError> {
        let mut changed_any = false;
        loop {
            let mut changed = false;
            for index in 0..self.clues.len() {
                if let Some(card) = self.clues[index].sole_card() {
                    changed |= self.hold(card)?;
                }
            }
            if !changed {
                break;
            }
            changed_any = true;
        }
        Ok(changed_any)
    }

    fn hold(&mut self, card: Card) -> Result<bool, BeliefError> {
        if self.impossible.contains(card) {
            return Err(BeliefError::HeldAndImpossible(card));
        }
        if self.certain.contains(card) {
            return Ok(false);
        }
        if self.certain.len() >= self.hand_size as usize {
            return Err(BeliefError::HandOverflow {
                hand_size: self.hand_size,
                card,
            });
        }
        self.certain = self.certain.with(card);
        Ok(true)
    }

    pub fn summary(&self) -> BeliefSummary {
        let might_hold = self
            .clues
            .iter()
            .fold(CardSet::EMPTY, |acc, clue| acc.union(*clue))
            .difference(self.certain);
        BeliefSummary {
            hand_size: self.hand_size,
            certain: self.certain,
            might_hold,
            impossible: self.impossible,
        }
    }
}

/// Read-only projection of a belief for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeliefSummary {
    pub hand_size: u8,
    pub certain: CardSet,
    pub might_hold: CardSet,
    pub impossible: CardSet,
}

impl BeliefSummary {
    /// Hand slots not yet pinned to a certain card; caps how many of
    /// the `might_hold` cards can actually be in the hand.
    pub fn unknown_slots(&self) -> u8 {
        self.hand_size - self.certain.len() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::{BeliefError, PlayerBelief};
    use crate::model::card::Card;
    use crate::model::roster::{Roster, RosterEntry};
    use crate::model::set::CardSet;

    fn player_id() -> crate::model::roster::PlayerId {
        let roster = Roster::new(vec![RosterEntry::new("Helena", 5)], 0).unwrap();
        roster.observer()
    }

    fn triple(a: Card, b: Card, c: Card) -> CardSet {
        [a, b, c].into_iter().collect()
    }

    #[test]
    fn with_hand_rejects_wrong_count() {
        let hand: CardSet = [Card::Hall, Card::Knife].into_iter().collect();
        let result = PlayerBelief::with_hand(player_id(), 4, hand);
        assert_eq!(
            result,
            Err(BeliefError::InconsistentHand {
                declared: 4,
                provided: 2
            })
        );
    }

    #[test]
    fn pass_rules_out_all_three_cards() {
        let mut belief = PlayerBelief::new(player_id(), 5);
        let suggested = triple(Card::White, Card::Study, Card::Rope);
        assert!(belief.on_shows_none(suggested).unwrap());
        assert!(belief.impossible().contains(Card::White));
        assert!(belief.impossible().contains(Card::Study));
        assert!(belief.impossible().contains(Card::Rope));
        // Idempotent on re-application.
        assert!(!belief.on_shows_none(suggested).unwrap());
    }

    #[test]
    fn pass_purges_prior_clue_sets() {
        let mut belief = PlayerBelief::new(player_id(), 5);
        belief
            .on_reveals_unknown(triple(Card::White, Card::Study, Card::Rope))
            .unwrap();
        belief
            .on_shows_none(triple(Card::White, Card::Kitchen, Card::Wrench))
            .unwrap();
        assert_eq!(belief.clues().len(), 1);
        assert!(!belief.clues()[0].contains(Card::White));
        assert_eq!(belief.clues()[0].len(), 2);
    }

    #[test]
    fn narrowed_clue_promotes_sole_candidate() {
        let mut belief = PlayerBelief::new(player_id(), 5);
        belief
            .on_reveals_unknown(triple(Card::White, Card::Study, Card::Rope))
            .unwrap();
        belief
            .on_shows_none(triple(Card::White, Card::Lounge, Card::Rope))
            .unwrap();
        assert!(belief.certain().contains(Card::Study));
    }

    #[test]
    fn reveal_to_observer_records_exact_card() {
        let mut belief = PlayerBelief::new(player_id(), 5);
        belief
            .on_reveals_card(Card::Knife, triple(Card::Plum, Card::Knife, Card::Hall))
            .unwrap();
        assert!(belief.certain().contains(Card::Knife));
        assert_eq!(belief.clues().len(), 1);
    }

    #[test]
    fn reveal_with_no_surviving_candidates_is_contradiction() {
        let mut belief = PlayerBelief::new(player_id(), 5);
        let suggested = triple(Card::White, Card::Study, Card::Rope);
        belief.on_shows_none(suggested).unwrap();
        assert_eq!(
            belief.on_reveals_unknown(suggested),
            Err(BeliefError::ExhaustedClue)
        );
    }

    #[test]
    fn ruling_out_certain_card_is_contradiction() {
        let mut belief = PlayerBelief::new(player_id(), 5);
        belief
            .on_reveals_card(Card::Knife, triple(Card::Plum, Card::Knife, Card::Hall))
            .unwrap();
        assert_eq!(
            belief.rule_out(Card::Knife),
            Err(BeliefError::HeldAndImpossible(Card::Knife))
        );
    }

    #[test]
    fn promotion_beyond_hand_size_is_contradiction() {
        let hand: CardSet = [Card::Hall].into_iter().collect();
        let mut belief = PlayerBelief::with_hand(player_id(), 1, hand).unwrap();
        assert_eq!(
            belief.on_reveals_card(Card::Knife, triple(Card::Plum, Card::Knife, Card::Study)),
            Err(BeliefError::HandOverflow {
                hand_size: 1,
                card: Card::Knife
            })
        );
    }

    #[test]
    fn closure_is_idempotent() {
        let mut belief = PlayerBelief::new(player_id(), 5);
        belief
            .on_reveals_unknown(triple(Card::White, Card::Study, Card::Rope))
            .unwrap();
        belief.rule_out(Card::White).unwrap();
        belief.rule_out(Card::Rope).unwrap();
        assert!(belief.certain().contains(Card::Study));
        let before = belief.clone();
        assert!(!belief.closure().unwrap());
        assert_eq!(belief, before);
    }

    #[test]
    fn certain_and_impossible_stay_disjoint() {
        let mut belief = PlayerBelief::new(player_id(), 5);
        belief
            .on_reveals_unknown(triple(Card::White, Card::Study, Card::Rope))
            .unwrap();
        belief
            .on_shows_none(triple(Card::Green, Card::Kitchen, Card::Revolver))
            .unwrap();
        assert!(belief.certain().is_disjoint(belief.impossible()));
    }

    #[test]
    fn summary_reports_might_hold_without_certain() {
        let mut belief = PlayerBelief::new(player_id(), 5);
        belief
            .on_reveals_card(Card::Knife, triple(Card::Plum, Card::Knife, Card::Hall))
            .unwrap();
        belief
            .on_reveals_unknown(triple(Card::White, Card::Study, Card::Rope))
            .unwrap();
        let summary = belief.summary();
        assert!(summary.certain.contains(Card::Knife));
        assert!(!summary.might_hold.contains(Card::Knife));
        assert!(summary.might_hold.contains(Card::Plum));
        assert!(summary.might_hold.contains(Card::Study));
        assert_eq!(summary.unknown_slots(), 4);
    }
}
