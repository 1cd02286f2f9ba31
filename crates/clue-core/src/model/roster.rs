use core::fmt;

/// Index of a player within the roster, fixed for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(usize);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    name: String,
    hand_size: u8,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, hand_size: u8) -> Self {
        Self {
            name: name.into(),
            hand_size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand_size(&self) -> u8 {
        self.hand_size
    }
}

/// The fixed player roster established at game start. Entry order is
/// the column order of turn records; one entry is the observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    observer: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    Empty,
    DuplicateName(String),
    ZeroHand(String),
    ObserverMissing(usize),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Empty => f.write_str("the roster has no players"),
            RosterError::DuplicateName(name) => {
                write!(f, "player name {name:?} appears more than once")
            }
            RosterError::ZeroHand(name) => {
                write!(f, "player {name:?} is declared with an empty hand")
            }
            RosterError::ObserverMissing(index) => {
                write!(f, "observer index {index} is outside the roster")
            }
        }
    }
}

impl std::error::Error for RosterError {}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>, observer: usize) -> Result<Self, RosterError> {
        if entries.is_empty() {
            return Err(RosterError::Empty);
        }
        if observer >= entries.len() {
            return Err(RosterError::ObserverMissing(observer));
        }
        for (index, entry) in entries.iter().enumerate() {
            if entry.hand_size == 0 {
                return Err(RosterError::ZeroHand(entry.name.clone()));
            }
            let duplicated = entries[..index]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_ascii_case(&entry.name));
            if duplicated {
                return Err(RosterError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Self {
            entries,
            observer: PlayerId(observer),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn observer(&self) -> PlayerId {
        self.observer
    }

    pub fn entry(&self, id: PlayerId) -> &RosterEntry {
        &self.entries[id.index()]
    }

    pub fn name(&self, id: PlayerId) -> &str {
        self.entries[id.index()].name()
    }

    pub fn find(&self, name: &str) -> Option<PlayerId> {
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(PlayerId)
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.entries.len()).map(PlayerId)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name())
    }

    /// Total number of cards dealt across all hands.
    pub fn total_cards(&self) -> u32 {
        self.entries
            .iter()
            .map(|entry| entry.hand_size as u32)
            .sum()
    }
}
