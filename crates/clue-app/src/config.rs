use clue_core::model::card::Card;
use clue_core::model::roster::{Roster, RosterError, RosterEntry};
use clue_core::model::set::CardSet;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const GAME_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root game configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    pub game_id: String,
    pub observer: ObserverConfig,
    /// Other players in seating order; the observer is listed last in
    /// the roster and in turn-log columns.
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The player running the assistant, with their dealt hand.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ObserverConfig {
    pub name: String,
    pub cards: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerConfig {
    pub name: String,
    pub hand_size: u8,
}

/// Output path templates; `{game_id}` is substituted on resolution.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    #[serde(default = "default_turn_log")]
    pub turn_log: String,
    #[serde(default = "default_session_log")]
    pub session_log: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            turn_log: default_turn_log(),
            session_log: default_session_log(),
        }
    }
}

fn default_turn_log() -> String {
    "games/{game_id}/{game_id}_turns.csv".to_string()
}

fn default_session_log() -> String {
    "games/{game_id}/session.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_structured")]
    pub enable_structured: bool,
    #[serde(default)]
    pub level: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: true,
            level: None,
        }
    }
}

fn default_structured() -> bool {
    true
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        self.level.as_deref().and_then(|value| value.parse().ok())
    }
}

/// Concrete output paths after template resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub turn_log: PathBuf,
    pub session_log: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: message.into(),
    }
}

impl GameConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let cfg: GameConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// The built-in trial game: three opponents and a known hand.
    pub fn trial() -> Self {
        Self {
            game_id: "trialGame".to_string(),
            observer: ObserverConfig {
                name: "Gabe".to_string(),
                cards: vec![
                    "Dining-Room".to_string(),
                    "Hall".to_string(),
                    "Library".to_string(),
                    "Knife".to_string(),
                ],
            },
            players: vec![
                PlayerConfig {
                    name: "Helena".to_string(),
                    hand_size: 5,
                },
                PlayerConfig {
                    name: "Chloe".to_string(),
                    hand_size: 5,
                },
                PlayerConfig {
                    name: "Rowan".to_string(),
                    hand_size: 4,
                },
            ],
            outputs: OutputsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.game_id.is_empty() {
            return Err(invalid("game_id", "must not be empty"));
        }
        if let Some(bad) = self
            .game_id
            .chars()
            .find(|symbol| !GAME_ID_ALLOWED.contains(*symbol))
        {
            return Err(invalid(
                "game_id",
                format!("character {bad:?} is not allowed"),
            ));
        }

        if self.players.is_empty() {
            return Err(invalid("players", "at least one other player is required"));
        }
        for player in &self.players {
            if player.hand_size == 0 {
                return Err(invalid(
                    "players",
                    format!("{} must hold at least one card", player.name),
                ));
            }
        }

        let mut names: Vec<&str> = self
            .players
            .iter()
            .map(|player| player.name.as_str())
            .collect();
        names.push(self.observer.name.as_str());
        for (index, name) in names.iter().enumerate() {
            if names[..index]
                .iter()
                .any(|earlier| earlier.eq_ignore_ascii_case(name))
            {
                return Err(invalid(
                    "players",
                    format!("player name {name:?} appears more than once"),
                ));
            }
        }

        if self.observer.cards.is_empty() {
            return Err(invalid("observer.cards", "the observer's hand is required"));
        }
        let hand = self.observer_hand()?;
        if hand.len() != self.observer.cards.len() {
            return Err(invalid("observer.cards", "hand lists a card twice"));
        }

        let dealt: u32 = self
            .players
            .iter()
            .map(|player| player.hand_size as u32)
            .sum::<u32>()
            + self.observer.cards.len() as u32;
        let expected = Card::COUNT as u32 - 3;
        if dealt != expected {
            return Err(invalid(
                "players",
                format!("hand sizes total {dealt} cards but the deck deals {expected}"),
            ));
        }

        Ok(())
    }

    /// Resolve output templates (`{game_id}` placeholders) into paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            turn_log: resolve_template(&self.game_id, &self.outputs.turn_log),
            session_log: resolve_template(&self.game_id, &self.outputs.session_log),
        }
    }

    /// The engine roster: other players in order, observer last.
    pub fn roster(&self) -> Result<Roster, RosterError> {
        let mut entries: Vec<RosterEntry> = self
            .players
            .iter()
            .map(|player| RosterEntry::new(player.name.clone(), player.hand_size))
            .collect();
        entries.push(RosterEntry::new(
            self.observer.name.clone(),
            self.observer.cards.len() as u8,
        ));
        Roster::new(entries, self.players.len())
    }

    pub fn observer_hand(&self) -> Result<CardSet, ValidationError> {
        self.observer
            .cards
            .iter()
            .map(|name| {
                Card::from_name(name)
                    .ok_or_else(|| invalid("observer.cards", format!("unknown card {name:?}")))
            })
            .collect()
    }
}

fn resolve_template(game_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{game_id}", game_id))
}
