//! Turn orchestration: routes each observation to the affected
//! beliefs, then propagates consequences across every player and into
//! the category solution sets until nothing changes.

mod observation;
mod record;
mod snapshot;
mod solution;

pub use observation::{Observation, Suggestion, SuggestionError};
pub use record::{MemorySink, NullSink, TurnEntry, TurnRecord, TurnSink};
pub use snapshot::{CategoryReport, GameSnapshot, PlayerReport};
pub use solution::SolutionTracker;

use crate::belief::{BeliefError, PlayerBelief};
use crate::model::card::{Card, Category};
use crate::model::domain::CardDomain;
use crate::model::roster::{PlayerId, Roster};
use crate::model::set::CardSet;
use core::fmt;
use std::io;

pub struct DeductionEngine {
    domain: CardDomain,
    roster: Roster,
    beliefs: Vec<PlayerBelief>,
    solution: SolutionTracker,
    sink: Box<dyn TurnSink>,
    turn: u32,
    halted: bool,
}

#[derive(Debug)]
pub enum DeductionError {
    HandArithmetic { dealt: u32, expected: u32 },
    CardOutsideDomain(Card),
    UnknownPlayer(String),
    Suggestion(SuggestionError),
    SuggesterCannotShow(String),
    ShowerAlsoPassed(String),
    RevealWithoutShower,
    RevealOutsideObserverTurn,
    MissingRevealedCard(String),
    RevealedCardNotSuggested(Card),
    Belief {
        turn: u32,
        player: String,
        source: BeliefError,
    },
    SharedCertainCard {
        turn: u32,
        card: Card,
        first: String,
        second: String,
    },
    CategoryExhausted {
        turn: u32,
        category: Category,
    },
    ConflictingSolutions {
        turn: u32,
        category: Category,
        first: Card,
        second: Card,
    },
    Halted,
    Sink(io::Error),
}

impl fmt::Display for DeductionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeductionError::HandArithmetic { dealt, expected } => {
                write!(
                    f,
                    "hand sizes total {dealt} cards but the deck deals {expected}"
                )
            }
            DeductionError::CardOutsideDomain(card) => {
                write!(f, "card {card} is not part of this game's deck")
            }
            DeductionError::UnknownPlayer(name) => {
                write!(f, "player {name:?} is not in the roster")
            }
            DeductionError::Suggestion(source) => write!(f, "malformed suggestion: {source}"),
            DeductionError::SuggesterCannotShow(name) => {
                write!(f, "{name} suggested this turn and cannot also show a card")
            }
            DeductionError::ShowerAlsoPassed(name) => {
                write!(f, "{name} cannot both pass and show a card")
            }
            DeductionError::RevealWithoutShower => {
                f.write_str("a revealed card was reported without a showing player")
            }
            DeductionError::RevealOutsideObserverTurn => {
                f.write_str("a revealed card can only be seen on the observer's own suggestion")
            }
            DeductionError::MissingRevealedCard(name) => {
                write!(f, "{name} showed a card to the observer but no card was named")
            }
            DeductionError::RevealedCardNotSuggested(card) => {
                write!(f, "revealed card {card} was not one of the suggested cards")
            }
            DeductionError::Belief {
                turn,
                player,
                source,
            } => {
                write!(f, "turn {turn}: {player}: {source}")
            }
            DeductionError::SharedCertainCard {
                turn,
                card,
                first,
                second,
            } => {
                write!(
                    f,
                    "turn {turn}: {first} and {second} cannot both be holding {card}"
                )
            }
            DeductionError::CategoryExhausted { turn, category } => {
                write!(
                    f,
                    "turn {turn}: every {category} card is held by a player, none is left for the solution"
                )
            }
            DeductionError::ConflictingSolutions {
                turn,
                category,
                first,
                second,
            } => {
                write!(
                    f,
                    "turn {turn}: both {first} and {second} qualify as the {category} solution"
                )
            }
            DeductionError::Halted => {
                f.write_str("the engine halted on an earlier contradiction")
            }
            DeductionError::Sink(source) => write!(f, "failed to append turn record: {source}"),
        }
    }
}

impl std::error::Error for DeductionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeductionError::Suggestion(source) => Some(source),
            DeductionError::Belief { source, .. } => Some(source),
            DeductionError::Sink(source) => Some(source),
            _ => None,
        }
    }
}

impl DeductionError {
    /// Whether the recorded observations cannot all be true. These
    /// errors halt the engine; anything else leaves it usable.
    pub fn is_contradiction(&self) -> bool {
        matches!(
            self,
            DeductionError::Belief { .. }
                | DeductionError::SharedCertainCard { .. }
                | DeductionError::CategoryExhausted { .. }
                | DeductionError::ConflictingSolutions { .. }
        )
    }
}

impl DeductionEngine {
    /// Engine without persistence; records are discarded.
    pub fn new(
        domain: CardDomain,
        roster: Roster,
        observer_hand: CardSet,
    ) -> Result<Self, DeductionError> {
        Self::with_sink(domain, roster, observer_hand, Box::new(NullSink))
    }

    pub fn with_sink(
        domain: CardDomain,
        roster: Roster,
        observer_hand: CardSet,
        sink: Box<dyn TurnSink>,
    ) -> Result<Self, DeductionError> {
        let dealt = roster.total_cards();
        let expected = domain.card_count() as u32 - 3;
        if dealt != expected {
            return Err(DeductionError::HandArithmetic { dealt, expected });
        }
        if let Some(card) = observer_hand.difference(domain.all_cards()).iter().next() {
            return Err(DeductionError::CardOutsideDomain(card));
        }

        let observer = roster.observer();
        let mut beliefs = Vec::with_capacity(roster.len());
        for id in roster.ids() {
            let entry = roster.entry(id);
            let belief = if id == observer {
                PlayerBelief::with_hand(id, entry.hand_size(), observer_hand).map_err(|source| {
                    DeductionError::Belief {
                        turn: 0,
                        player: entry.name().to_string(),
                        source,
                    }
                })?
            } else {
                PlayerBelief::new(id, entry.hand_size())
            };
            beliefs.push(belief);
        }

        let solution = SolutionTracker::new(&domain);
        let mut engine = Self {
            domain,
            roster,
            beliefs,
            solution,
            sink,
            turn: 0,
            halted: false,
        };
        // Seed the shared state from the observer's own hand.
        engine.propagate(0)?;
        engine.narrow(0)?;
        Ok(engine)
    }

    pub fn domain(&self) -> &CardDomain {
        &self.domain
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn belief(&self, id: PlayerId) -> &PlayerBelief {
        &self.beliefs[id.index()]
    }

    pub fn solution(&self) -> &SolutionTracker {
        &self.solution
    }

    /// Processes one turn: validates the whole observation first (a
    /// rejected observation leaves the state untouched), applies the
    /// pass and reveal evidence, then runs propagation and category
    /// narrowing to a fixpoint. Contradictions halt the engine.
    pub fn apply(&mut self, observation: &Observation) -> Result<GameSnapshot, DeductionError> {
        if self.halted {
            return Err(DeductionError::Halted);
        }
        let turn = self.turn;

        let suggester = self.resolve(&observation.suggesting_player)?;
        let suggestion = Suggestion::classify(&self.domain, &observation.suggested_cards)
            .map_err(DeductionError::Suggestion)?;
        let mut passing: Vec<PlayerId> = Vec::new();
        for name in &observation.passing_players {
            let id = self.resolve(name)?;
            if !passing.contains(&id) {
                passing.push(id);
            }
        }
        let showing = match &observation.showing_player {
            Some(name) => Some(self.resolve(name)?),
            None => None,
        };
        if let Some(shower) = showing {
            if shower == suggester {
                return Err(DeductionError::SuggesterCannotShow(
                    self.roster.name(shower).to_string(),
                ));
            }
            if passing.contains(&shower) {
                return Err(DeductionError::ShowerAlsoPassed(
                    self.roster.name(shower).to_string(),
                ));
            }
        }
        let observer = self.roster.observer();
        match (showing, observation.revealed_card) {
            (None, Some(_)) => return Err(DeductionError::RevealWithoutShower),
            (Some(_), Some(card)) => {
                if suggester != observer {
                    return Err(DeductionError::RevealOutsideObserverTurn);
                }
                if !suggestion.contains(card) {
                    return Err(DeductionError::RevealedCardNotSuggested(card));
                }
            }
            (Some(shower), None) => {
                if suggester == observer {
                    return Err(DeductionError::MissingRevealedCard(
                        self.roster.name(shower).to_string(),
                    ));
                }
            }
            (None, None) => {}
        }

        if let Err(err) = self.process(
            suggestion,
            &passing,
            showing,
            observation.revealed_card,
            turn,
        ) {
            if err.is_contradiction() {
                self.halted = true;
            }
            return Err(err);
        }

        let record = self.build_record(
            suggester,
            suggestion,
            &passing,
            showing,
            observation.revealed_card,
        );
        self.turn += 1;
        self.sink
            .append_turn_record(&record)
            .map_err(DeductionError::Sink)?;
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let players = self
            .roster
            .ids()
            .map(|id| {
                PlayerReport::from_summary(self.roster.name(id), &self.beliefs[id.index()].summary())
            })
            .collect();
        let categories = Category::ALL
            .iter()
            .map(|category| {
                CategoryReport::from_sets(
                    category.plural(),
                    self.solution.remaining(*category),
                    self.solution.full(*category),
                )
            })
            .collect();
        GameSnapshot {
            turn: self.turn,
            players,
            categories,
        }
    }

    fn resolve(&self, name: &str) -> Result<PlayerId, DeductionError> {
        self.roster
            .find(name)
            .ok_or_else(|| DeductionError::UnknownPlayer(name.to_string()))
    }

    fn contradiction(&self, turn: u32, id: PlayerId, source: BeliefError) -> DeductionError {
        DeductionError::Belief {
            turn,
            player: self.roster.name(id).to_string(),
            source,
        }
    }

    fn process(
        &mut self,
        suggestion: Suggestion,
        passing: &[PlayerId],
        showing: Option<PlayerId>,
        revealed: Option<Card>,
        turn: u32,
    ) -> Result<(), DeductionError> {
        let suggested = suggestion.cards();
        for &id in passing {
            if let Err(source) = self.beliefs[id.index()].on_shows_none(suggested) {
                return Err(self.contradiction(turn, id, source));
            }
        }
        if let Some(shower) = showing {
            let result = match revealed {
                Some(card) => self.beliefs[shower.index()].on_reveals_card(card, suggested),
                None => self.beliefs[shower.index()].on_reveals_unknown(suggested),
            };
            if let Err(source) = result {
                return Err(self.contradiction(turn, shower, source));
            }
        }
        self.propagate(turn)?;
        self.narrow(turn)
    }

    /// Cross-player fixpoint: a card certainly held by one player is
    /// impossible for everyone else. Closures can cascade, so the pass
    /// repeats until a full sweep changes nothing. Terminates because
    /// each sweep strictly grows a finite monotone set.
    fn propagate(&mut self, turn: u32) -> Result<(), DeductionError> {
        let ids: Vec<PlayerId> = self.roster.ids().collect();
        loop {
            let certains: Vec<CardSet> =
                self.beliefs.iter().map(|belief| belief.certain()).collect();
            for i in 0..certains.len() {
                for j in (i + 1)..certains.len() {
                    let shared = certains[i].intersect(certains[j]);
                    if let Some(card) = shared.iter().next() {
                        return Err(DeductionError::SharedCertainCard {
                            turn,
                            card,
                            first: self.roster.name(ids[i]).to_string(),
                            second: self.roster.name(ids[j]).to_string(),
                        });
                    }
                }
            }

            let mut changed = false;
            for (index, &id) in ids.iter().enumerate() {
                let held_elsewhere = certains
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .fold(CardSet::EMPTY, |acc, (_, certain)| acc.union(*certain));
                let fresh = held_elsewhere.difference(self.beliefs[index].impossible());
                for card in fresh.iter() {
                    match self.beliefs[index].rule_out(card) {
                        Ok(card_changed) => changed |= card_changed,
                        Err(source) => return Err(self.contradiction(turn, id, source)),
                    }
                }
            }
            if !changed {
                return Ok(());
            }
        }
    }

    /// Category narrowing: certainly-held cards leave their category's
    /// remaining candidates, and a card ruled out for every player is
    /// the category's solution.
    fn narrow(&mut self, turn: u32) -> Result<(), DeductionError> {
        let held = self
            .beliefs
            .iter()
            .fold(CardSet::EMPTY, |acc, belief| acc.union(belief.certain()));
        for category in Category::ALL {
            let category_cards = self.domain.cards(category);
            for card in held.intersect(category_cards).iter() {
                self.solution
                    .eliminate_held(category, card)
                    .map_err(|category| DeductionError::CategoryExhausted { turn, category })?;
            }

            let mut solution = None;
            for card in self.solution.remaining(category).iter() {
                let ruled_out_everywhere = self
                    .beliefs
                    .iter()
                    .all(|belief| belief.impossible().contains(card));
                if ruled_out_everywhere {
                    match solution {
                        None => solution = Some(card),
                        Some(first) => {
                            return Err(DeductionError::ConflictingSolutions {
                                turn,
                                category,
                                first,
                                second: card,
                            });
                        }
                    }
                }
            }
            if let Some(card) = solution {
                self.solution.collapse(category, card);
            }
        }
        Ok(())
    }

    fn build_record(
        &self,
        suggester: PlayerId,
        suggestion: Suggestion,
        passing: &[PlayerId],
        showing: Option<PlayerId>,
        revealed: Option<Card>,
    ) -> TurnRecord {
        let entries = self
            .roster
            .ids()
            .map(|id| {
                let entry = if passing.contains(&id) {
                    TurnEntry::Pass
                } else if Some(id) == showing {
                    match revealed {
                        Some(card) => TurnEntry::Revealed(card),
                        None => TurnEntry::Showed,
                    }
                } else {
                    TurnEntry::Quiet
                };
                (self.roster.name(id).to_string(), entry)
            })
            .collect();
        TurnRecord {
            turn: self.turn,
            suggesting_player: self.roster.name(suggester).to_string(),
            suggestion,
            entries,
        }
    }
}
