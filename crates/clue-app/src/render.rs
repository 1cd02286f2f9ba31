use clue_core::engine::{CategoryReport, GameSnapshot, PlayerReport};
use clue_core::model::card::Category;
use clue_core::model::domain::CardDomain;

const BANNER_WIDTH: usize = 90;
const RULE_WIDTH: usize = 30;

/// Opening banner listing the card universe.
pub fn render_intro(domain: &CardDomain) -> String {
    let mut out = String::new();
    out.push_str("There has been a murder in the mansion! It is up to you to figure out whodunit.\n\n");
    for category in Category::ALL {
        let mut names: Vec<&str> = domain
            .cards(category)
            .iter()
            .map(|card| card.name())
            .collect();
        names.sort_unstable();
        out.push_str(&format!(
            "{} ({}): {}\n",
            category.plural().to_uppercase(),
            names.len(),
            names.join(", ")
        ));
    }
    out.push_str("\nWhen entering cards, spell them exactly as listed above.\n");
    out
}

/// The status board printed after every turn.
pub fn render_snapshot(game_id: &str, snapshot: &GameSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&"~".repeat(BANNER_WIDTH));
    out.push('\n');
    out.push_str(&format!("GAME: {game_id} | TURN: {}\n", snapshot.turn));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for player in &snapshot.players {
        render_player(&mut out, player);
    }
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for category in &snapshot.categories {
        render_category(&mut out, category);
    }
    out.push_str(&"~".repeat(BANNER_WIDTH));
    out.push('\n');
    out
}

fn render_player(out: &mut String, player: &PlayerReport) {
    out.push_str(&format!(
        "{} ({}/{} known):\n",
        player.name.to_uppercase(),
        player.certain.len(),
        player.hand_size
    ));
    out.push_str(&format!(
        "  is certainly holding ({}): {}\n",
        player.certain.len(),
        player.certain.join(", ")
    ));
    if player.unknown_slots > 0 && !player.might_hold.is_empty() {
        let caveat = if (player.unknown_slots as usize) < player.might_hold.len() {
            format!(" (at most {})", player.unknown_slots)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "  might have{caveat}: {}\n",
            player.might_hold.join(", ")
        ));
    }
    out.push_str(&format!(
        "  cannot be holding ({}): {}\n",
        player.impossible.len(),
        player.impossible.join(", ")
    ));
}

fn render_category(out: &mut String, category: &CategoryReport) {
    out.push_str(&format!(
        "Possible {} ({}/{}):\n",
        category.category.to_uppercase(),
        category.remaining.len(),
        category.total
    ));
    out.push_str(&format!("  {}\n", category.remaining.join(", ")));
}

/// The final call once every category is down to one card.
pub fn render_accusation(snapshot: &GameSnapshot) -> Option<String> {
    let solved: Vec<&str> = snapshot
        .categories
        .iter()
        .filter_map(|category| category.solved.as_deref())
        .collect();
    if solved.len() != snapshot.categories.len() {
        return None;
    }
    Some(format!(
        "It was {} with the {} in the {}!",
        solved[0], solved[1], solved[2]
    ))
}
