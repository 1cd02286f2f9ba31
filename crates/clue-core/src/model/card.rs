use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    Suspect = 0,
    Weapon = 1,
    Room = 2,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Suspect, Category::Weapon, Category::Room];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Category::Suspect),
            1 => Some(Category::Weapon),
            2 => Some(Category::Room),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Plural label used in status reports ("suspects", "weapons", "rooms").
    pub const fn plural(self) -> &'static str {
        match self {
            Category::Suspect => "suspects",
            Category::Weapon => "weapons",
            Category::Room => "rooms",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Suspect => "suspect",
            Category::Weapon => "weapon",
            Category::Room => "room",
        };
        f.write_str(label)
    }
}

/// One of the 21 cards in the standard deck, ids 0..21 in category order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Card {
    White = 0,
    Green = 1,
    Plum = 2,
    Scarlet = 3,
    Peacock = 4,
    Mustard = 5,
    Candlestick = 6,
    Knife = 7,
    Rope = 8,
    Revolver = 9,
    LeadPipe = 10,
    Wrench = 11,
    Hall = 12,
    Ballroom = 13,
    Conservatory = 14,
    Library = 15,
    BilliardRoom = 16,
    Lounge = 17,
    Kitchen = 18,
    Study = 19,
    DiningRoom = 20,
}

impl Card {
    pub const COUNT: usize = 21;

    pub const ALL: [Card; Card::COUNT] = [
        Card::White,
        Card::Green,
        Card::Plum,
        Card::Scarlet,
        Card::Peacock,
        Card::Mustard,
        Card::Candlestick,
        Card::Knife,
        Card::Rope,
        Card::Revolver,
        Card::LeadPipe,
        Card::Wrench,
        Card::Hall,
        Card::Ballroom,
        Card::Conservatory,
        Card::Library,
        Card::BilliardRoom,
        Card::Lounge,
        Card::Kitchen,
        Card::Study,
        Card::DiningRoom,
    ];

    pub const fn to_id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Card> {
        Card::ALL.get(id as usize).copied()
    }

    pub const fn category(self) -> Category {
        match self {
            Card::White
            | Card::Green
            | Card::Plum
            | Card::Scarlet
            | Card::Peacock
            | Card::Mustard => Category::Suspect,
            Card::Candlestick
            | Card::Knife
            | Card::Rope
            | Card::Revolver
            | Card::LeadPipe
            | Card::Wrench => Category::Weapon,
            _ => Category::Room,
        }
    }

    /// Canonical spelling used in prompts and turn logs.
    pub const fn name(self) -> &'static str {
        match self {
            Card::White => "White",
            Card::Green => "Green",
            Card::Plum => "Plum",
            Card::Scarlet => "Scarlet",
            Card::Peacock => "Peacock",
            Card::Mustard => "Mustard",
            Card::Candlestick => "Candlestick",
            Card::Knife => "Knife",
            Card::Rope => "Rope",
            Card::Revolver => "Revolver",
            Card::LeadPipe => "Lead-Pipe",
            Card::Wrench => "Wrench",
            Card::Hall => "Hall",
            Card::Ballroom => "Ballroom",
            Card::Conservatory => "Conservatory",
            Card::Library => "Library",
            Card::BilliardRoom => "Billiard-Room",
            Card::Lounge => "Lounge",
            Card::Kitchen => "Kitchen",
            Card::Study => "Study",
            Card::DiningRoom => "Dining-Room",
        }
    }

    pub fn from_name(name: &str) -> Option<Card> {
        Card::ALL
            .iter()
            .copied()
            .find(|card| card.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
