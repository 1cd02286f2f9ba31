use crate::render;
use clue_core::engine::{DeductionEngine, Observation};
use clue_core::model::card::Card;
use clue_core::model::domain::CardDomain;
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};

const MISSPELL_HINT: &str = "Oops! Did you misspell something?";

/// Prompt-driven input over any reader/writer pair, so tests can run
/// a whole game from in-memory buffers. Every prompt returns `None`
/// when the input ends.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks until the answer names a roster player.
    pub fn prompt_player(
        &mut self,
        prompt: &str,
        engine: &DeductionEngine,
    ) -> io::Result<Option<String>> {
        loop {
            let Some(answer) = self.read_line(prompt)? else {
                return Ok(None);
            };
            if !answer.is_empty() && engine.roster().find(&answer).is_some() {
                return Ok(Some(answer));
            }
            self.write_line(MISSPELL_HINT)?;
        }
    }

    /// Asks for a roster player, allowing an empty answer for "no one".
    pub fn prompt_optional_player(
        &mut self,
        prompt: &str,
        engine: &DeductionEngine,
    ) -> io::Result<Option<Option<String>>> {
        loop {
            let Some(answer) = self.read_line(prompt)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(None));
            }
            if engine.roster().find(&answer).is_some() {
                return Ok(Some(Some(answer)));
            }
            self.write_line(MISSPELL_HINT)?;
        }
    }

    /// Asks for a comma-separated list of roster players; empty means
    /// no one.
    pub fn prompt_players(
        &mut self,
        prompt: &str,
        engine: &DeductionEngine,
    ) -> io::Result<Option<Vec<String>>> {
        loop {
            let Some(answer) = self.read_line(prompt)? else {
                return Ok(None);
            };
            let names = split_list(&answer);
            if names
                .iter()
                .all(|name| engine.roster().find(name).is_some())
            {
                return Ok(Some(names));
            }
            self.write_line(MISSPELL_HINT)?;
        }
    }

    /// Asks for a comma-separated suggestion triple.
    pub fn prompt_cards(
        &mut self,
        prompt: &str,
        domain: &CardDomain,
    ) -> io::Result<Option<Vec<Card>>> {
        loop {
            let Some(answer) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse_cards(domain, &answer) {
                Some(cards) if cards.len() == 3 => return Ok(Some(cards)),
                Some(_) => self.write_line("A suggestion names exactly three cards.")?,
                None => self.write_line(MISSPELL_HINT)?,
            }
        }
    }

    /// Asks for a single card.
    pub fn prompt_card(&mut self, prompt: &str, domain: &CardDomain) -> io::Result<Option<Card>> {
        loop {
            let Some(answer) = self.read_line(prompt)? else {
                return Ok(None);
            };
            if let Some(card) = Card::from_name(&answer) {
                if domain.contains(card) {
                    return Ok(Some(card));
                }
            }
            self.write_line(MISSPELL_HINT)?;
        }
    }
}

fn split_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn parse_cards(domain: &CardDomain, line: &str) -> Option<Vec<Card>> {
    split_list(line)
        .iter()
        .map(|name| Card::from_name(name).filter(|card| domain.contains(*card)))
        .collect()
}

/// The interactive loop: one observation per iteration until the input
/// ends, the solution is found, or a contradiction stops the game.
pub fn run_game<R: BufRead, W: Write>(
    engine: &mut DeductionEngine,
    game_id: &str,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    console.write_line(&render::render_intro(engine.domain()))?;
    console.write_line(&render::render_snapshot(game_id, &engine.snapshot()))?;

    loop {
        let Some(suggester) = console.prompt_player("Whose turn is it? ", engine)? else {
            break;
        };
        let Some(suggested_cards) =
            console.prompt_cards("What did they suggest? (separate with commas) ", engine.domain())?
        else {
            break;
        };
        let Some(passing_players) =
            console.prompt_players("Who had nothing? (press enter if no one) ", engine)?
        else {
            break;
        };
        let Some(showing_player) = console
            .prompt_optional_player("Who finally showed something? (press enter if no one) ", engine)?
        else {
            break;
        };

        let observer = engine.roster().observer();
        let observer_suggested = engine.roster().find(&suggester) == Some(observer);
        let revealed_card = if observer_suggested && showing_player.is_some() {
            let Some(card) = console.prompt_card("What did they show you? ", engine.domain())?
            else {
                break;
            };
            Some(card)
        } else {
            None
        };

        let observation = Observation {
            suggesting_player: suggester.clone(),
            suggested_cards,
            passing_players,
            showing_player,
            revealed_card,
        };

        match engine.apply(&observation) {
            Ok(snapshot) => {
                info!(turn = snapshot.turn, suggester = %suggester, "turn processed");
                console.write_line(&render::render_snapshot(game_id, &snapshot))?;
                if let Some(accusation) = render::render_accusation(&snapshot) {
                    console.write_line(&accusation)?;
                    break;
                }
            }
            Err(err) if err.is_contradiction() => {
                error!(%err, "observations are inconsistent, stopping");
                console.write_line(&format!("Contradiction: {err}"))?;
                return Err(err.into());
            }
            Err(err) => {
                warn!(%err, "observation rejected");
                console.write_line(&format!("That turn was rejected: {err}"))?;
            }
        }
    }
    Ok(())
}
