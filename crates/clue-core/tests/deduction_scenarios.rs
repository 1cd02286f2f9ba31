use clue_core::engine::{DeductionEngine, DeductionError, Observation};
use clue_core::model::card::{Card, Category};
use clue_core::model::domain::CardDomain;
use clue_core::model::roster::{Roster, RosterEntry};
use clue_core::model::set::CardSet;

fn trial_roster() -> Roster {
    Roster::new(
        vec![
            RosterEntry::new("Helena", 5),
            RosterEntry::new("Chloe", 5),
            RosterEntry::new("Rowan", 4),
            RosterEntry::new("Gabe", 4),
        ],
        3,
    )
    .unwrap()
}

fn observer_hand() -> CardSet {
    [Card::DiningRoom, Card::Hall, Card::Library, Card::Knife]
        .into_iter()
        .collect()
}

fn trial_engine() -> DeductionEngine {
    DeductionEngine::new(CardDomain::standard(), trial_roster(), observer_hand()).unwrap()
}

fn observation(
    suggester: &str,
    cards: [Card; 3],
    passing: &[&str],
    showing: Option<&str>,
    revealed: Option<Card>,
) -> Observation {
    Observation {
        suggesting_player: suggester.to_string(),
        suggested_cards: cards.to_vec(),
        passing_players: passing.iter().map(|name| name.to_string()).collect(),
        showing_player: showing.map(|name| name.to_string()),
        revealed_card: revealed,
    }
}

#[test]
fn trial_setup_constructs() {
    let engine = trial_engine();
    let gabe = engine.roster().observer();
    assert_eq!(engine.roster().name(gabe), "Gabe");
    assert_eq!(engine.belief(gabe).certain(), observer_hand());
    // The observer's rooms and weapon already leave the candidate sets.
    assert_eq!(engine.solution().remaining(Category::Room).len(), 6);
    assert_eq!(engine.solution().remaining(Category::Weapon).len(), 5);
    assert_eq!(engine.solution().remaining(Category::Suspect).len(), 6);
}

#[test]
fn pass_rules_out_the_whole_triple() {
    let mut engine = trial_engine();
    engine
        .apply(&observation(
            "Chloe",
            [Card::White, Card::Study, Card::Rope],
            &["Helena"],
            None,
            None,
        ))
        .unwrap();
    let helena = engine.roster().find("Helena").unwrap();
    let impossible = engine.belief(helena).impossible();
    assert!(impossible.contains(Card::White));
    assert!(impossible.contains(Card::Study));
    assert!(impossible.contains(Card::Rope));
}

#[test]
fn overlapping_passes_narrow_a_clue_to_certainty() {
    let mut engine = trial_engine();
    // Helena shows some card on White/Study/Rope...
    engine
        .apply(&observation(
            "Chloe",
            [Card::White, Card::Study, Card::Rope],
            &[],
            Some("Helena"),
            None,
        ))
        .unwrap();
    // ...then denies holding White or Rope, so it must have been Study.
    engine
        .apply(&observation(
            "Rowan",
            [Card::White, Card::Lounge, Card::Rope],
            &["Helena"],
            None,
            None,
        ))
        .unwrap();

    let helena = engine.roster().find("Helena").unwrap();
    assert!(engine.belief(helena).certain().contains(Card::Study));

    // A certain card spreads to everyone else's impossible set and
    // leaves the rooms candidate set.
    for name in ["Chloe", "Rowan", "Gabe"] {
        let id = engine.roster().find(name).unwrap();
        assert!(
            engine.belief(id).impossible().contains(Card::Study),
            "{name} should have Study ruled out"
        );
    }
    assert!(
        !engine
            .solution()
            .remaining(Category::Room)
            .contains(Card::Study)
    );
}

#[test]
fn universal_elimination_collapses_categories() {
    let mut engine = trial_engine();
    // Chloe, Rowan and the observer all deny the full triple...
    engine
        .apply(&observation(
            "Helena",
            [Card::Plum, Card::Wrench, Card::Lounge],
            &["Chloe", "Rowan", "Gabe"],
            None,
            None,
        ))
        .unwrap();
    // ...and so does Helena on the observer's turn.
    let snapshot = engine
        .apply(&observation(
            "Gabe",
            [Card::Plum, Card::Wrench, Card::Lounge],
            &["Helena"],
            None,
            None,
        ))
        .unwrap();

    assert_eq!(
        engine.solution().remaining(Category::Weapon).sole_card(),
        Some(Card::Wrench)
    );
    assert_eq!(engine.solution().solved(Category::Suspect), Some(Card::Plum));
    assert_eq!(engine.solution().solved(Category::Room), Some(Card::Lounge));
    assert!(engine.solution().is_solved());

    let weapons = snapshot
        .categories
        .iter()
        .find(|category| category.category == "weapons")
        .unwrap();
    assert_eq!(weapons.solved.as_deref(), Some("Wrench"));
    assert_eq!(weapons.remaining, vec!["Wrench"]);
}

#[test]
fn shared_certain_card_halts_the_engine() {
    let mut engine = trial_engine();
    engine
        .apply(&observation(
            "Rowan",
            [Card::White, Card::Study, Card::Rope],
            &[],
            Some("Helena"),
            None,
        ))
        .unwrap();
    engine
        .apply(&observation(
            "Helena",
            [Card::White, Card::Study, Card::Rope],
            &[],
            Some("Chloe"),
            None,
        ))
        .unwrap();
    // Both clue sets collapse to Study in the same turn.
    let err = engine
        .apply(&observation(
            "Rowan",
            [Card::White, Card::Kitchen, Card::Rope],
            &["Helena", "Chloe"],
            None,
            None,
        ))
        .unwrap_err();
    assert!(err.is_contradiction(), "unexpected error: {err}");
    assert!(engine.is_halted());

    // Processing stops; later turns are refused outright.
    let err = engine
        .apply(&observation(
            "Chloe",
            [Card::Green, Card::Revolver, Card::Ballroom],
            &[],
            None,
            None,
        ))
        .unwrap_err();
    assert!(matches!(err, DeductionError::Halted));
}

#[test]
fn malformed_suggestion_leaves_state_untouched() {
    let mut engine = trial_engine();
    let before = engine.snapshot();
    let err = engine
        .apply(&observation(
            "Helena",
            [Card::White, Card::Green, Card::Rope],
            &["Chloe"],
            None,
            None,
        ))
        .unwrap_err();
    assert!(matches!(err, DeductionError::Suggestion(_)));
    assert_eq!(engine.snapshot(), before);
    assert!(!engine.is_halted());

    // The engine is still usable afterwards.
    engine
        .apply(&observation(
            "Helena",
            [Card::White, Card::Rope, Card::Study],
            &["Chloe"],
            None,
            None,
        ))
        .unwrap();
    assert_eq!(engine.turn(), 1);
}

#[test]
fn propagation_runs_to_a_cross_player_fixpoint() {
    let mut engine = trial_engine();
    // Chloe shows some card on White/Study/Rope.
    engine
        .apply(&observation(
            "Rowan",
            [Card::White, Card::Study, Card::Rope],
            &[],
            Some("Chloe"),
            None,
        ))
        .unwrap();
    // Helena reveals Rope to the observer; propagation trims Chloe's
    // clue to White/Study.
    engine
        .apply(&observation(
            "Gabe",
            [Card::White, Card::Rope, Card::Kitchen],
            &[],
            Some("Helena"),
            Some(Card::Rope),
        ))
        .unwrap();
    // Rowan reveals White; the cascade must finish within this turn:
    // Chloe's clue collapses to Study, which in turn spreads.
    engine
        .apply(&observation(
            "Gabe",
            [Card::White, Card::Candlestick, Card::Ballroom],
            &[],
            Some("Rowan"),
            Some(Card::White),
        ))
        .unwrap();

    let chloe = engine.roster().find("Chloe").unwrap();
    let helena = engine.roster().find("Helena").unwrap();
    assert!(engine.belief(chloe).certain().contains(Card::Study));
    assert!(engine.belief(helena).impossible().contains(Card::Study));
    assert!(
        !engine
            .solution()
            .remaining(Category::Room)
            .contains(Card::Study)
    );
}

#[test]
fn knowledge_grows_monotonically() {
    let mut engine = trial_engine();
    let turns = [
        observation(
            "Helena",
            [Card::Plum, Card::Wrench, Card::Lounge],
            &["Chloe", "Rowan"],
            None,
            None,
        ),
        observation(
            "Chloe",
            [Card::White, Card::Study, Card::Rope],
            &[],
            Some("Helena"),
            None,
        ),
        observation(
            "Rowan",
            [Card::White, Card::Lounge, Card::Rope],
            &["Helena"],
            None,
            None,
        ),
        observation(
            "Gabe",
            [Card::Green, Card::Revolver, Card::Ballroom],
            &["Helena", "Chloe"],
            Some("Rowan"),
            Some(Card::Revolver),
        ),
    ];

    let ids: Vec<_> = engine.roster().ids().collect();
    let mut previous: Vec<(CardSet, CardSet)> = ids
        .iter()
        .map(|id| (engine.belief(*id).certain(), engine.belief(*id).impossible()))
        .collect();
    let mut previous_remaining: Vec<CardSet> = Category::ALL
        .iter()
        .map(|category| engine.solution().remaining(*category))
        .collect();

    for turn in &turns {
        engine.apply(turn).unwrap();
        for (index, id) in ids.iter().enumerate() {
            let certain = engine.belief(*id).certain();
            let impossible = engine.belief(*id).impossible();
            assert!(previous[index].0.is_subset(certain));
            assert!(previous[index].1.is_subset(impossible));
            assert!(certain.is_disjoint(impossible));
            previous[index] = (certain, impossible);
        }
        for (index, category) in Category::ALL.iter().enumerate() {
            let remaining = engine.solution().remaining(*category);
            assert!(!remaining.is_empty());
            assert!(remaining.is_subset(previous_remaining[index]));
            previous_remaining[index] = remaining;
        }
    }
}

#[test]
fn repeated_pass_is_a_no_op() {
    let mut engine = trial_engine();
    let turn = observation(
        "Chloe",
        [Card::White, Card::Study, Card::Rope],
        &["Helena"],
        None,
        None,
    );
    let first = engine.apply(&turn).unwrap();
    let second = engine.apply(&turn).unwrap();
    assert_eq!(first.players, second.players);
    assert_eq!(first.categories, second.categories);
}
