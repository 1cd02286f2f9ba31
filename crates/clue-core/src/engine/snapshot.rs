use crate::belief::BeliefSummary;
use crate::model::card::Card;
use crate::model::set::CardSet;
use serde::Serialize;

/// Everything a display or log consumer needs after one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub turn: u32,
    pub players: Vec<PlayerReport>,
    pub categories: Vec<CategoryReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerReport {
    pub name: String,
    pub hand_size: u8,
    pub unknown_slots: u8,
    pub certain: Vec<String>,
    pub might_hold: Vec<String>,
    pub impossible: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: String,
    pub remaining: Vec<String>,
    pub total: usize,
    pub solved: Option<String>,
}

fn names(cards: CardSet) -> Vec<String> {
    cards.iter().map(|card| card.name().to_string()).collect()
}

impl PlayerReport {
    pub(crate) fn from_summary(name: &str, summary: &BeliefSummary) -> Self {
        Self {
            name: name.to_string(),
            hand_size: summary.hand_size,
            unknown_slots: summary.unknown_slots(),
            certain: names(summary.certain),
            might_hold: names(summary.might_hold),
            impossible: names(summary.impossible),
        }
    }
}

impl CategoryReport {
    pub(crate) fn from_sets(label: &str, remaining: CardSet, full: CardSet) -> Self {
        Self {
            category: label.to_string(),
            remaining: names(remaining),
            total: full.len(),
            solved: remaining.sole_card().map(|card: Card| card.name().to_string()),
        }
    }
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryReport, GameSnapshot, PlayerReport};
    use crate::belief::BeliefSummary;
    use crate::model::card::{Card, Category};
    use crate::model::domain::CardDomain;
    use crate::model::set::CardSet;

    #[test]
    fn reports_translate_sets_to_names() {
        let summary = BeliefSummary {
            hand_size: 4,
            certain: CardSet::EMPTY.with(Card::Knife),
            might_hold: CardSet::EMPTY.with(Card::Study),
            impossible: CardSet::EMPTY.with(Card::White),
        };
        let report = PlayerReport::from_summary("Gabe", &summary);
        assert_eq!(report.certain, vec!["Knife"]);
        assert_eq!(report.might_hold, vec!["Study"]);
        assert_eq!(report.unknown_slots, 3);
    }

    #[test]
    fn category_report_flags_solved_singleton() {
        let domain = CardDomain::standard();
        let report = CategoryReport::from_sets(
            Category::Weapon.plural(),
            CardSet::EMPTY.with(Card::Wrench),
            domain.cards(Category::Weapon),
        );
        assert_eq!(report.solved.as_deref(), Some("Wrench"));
        assert_eq!(report.total, 6);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snapshot = GameSnapshot {
            turn: 3,
            players: Vec::new(),
            categories: Vec::new(),
        };
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"turn\":3"));
    }
}
