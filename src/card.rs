//! The fixed 51-card catalog and the pure cost tables that hang off it.
//!
//! Cards carry no state of their own: a card is fully identified by its
//! `(kind, value)` pair, and the catalog contains exactly one card per legal
//! pair. Everything else (zone membership, flags) lives in `GameState`.

use std::fmt;

/// The six card kinds in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum CardKind {
    Stag,
    Hunt,
    Healing,
    Magi,
    Tithe,
    KingsCommand,
}

impl CardKind {
    pub const ALL: [CardKind; 6] = [
        CardKind::Stag,
        CardKind::Hunt,
        CardKind::Healing,
        CardKind::Magi,
        CardKind::Tithe,
        CardKind::KingsCommand,
    ];

    /// Highest printed value for this kind (values start at 1).
    pub fn max_value(self) -> u8 {
        match self {
            CardKind::Stag | CardKind::Hunt | CardKind::Healing => 12,
            CardKind::Magi | CardKind::Tithe => 6,
            CardKind::KingsCommand => 3,
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            CardKind::Stag => "Stag",
            CardKind::Hunt => "Hunt",
            CardKind::Healing => "Healing",
            CardKind::Magi => "Magi",
            CardKind::Tithe => "Tithe",
            CardKind::KingsCommand => "King's Command",
        }
    }
}

/// Card identity: a kind plus a printed value.
///
/// There are no duplicate cards, so this pair is also the card's unique id
/// and is compared/hashed directly. The derived ordering (kind, then value)
/// is for display only and is never consulted by game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct CardId {
    pub kind: CardKind,
    pub value: u8,
}

impl CardId {
    pub fn new(kind: CardKind, value: u8) -> Self {
        Self { kind, value }
    }

    pub fn is_stag(self) -> bool {
        self.kind == CardKind::Stag
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.label(), self.value)
    }
}

/// Number of cards in the full catalog.
pub const CATALOG_SIZE: usize = 51;

/// The full catalog: every `(kind, value)` pair, exactly once.
pub fn catalog() -> Vec<CardId> {
    let mut cards = Vec::with_capacity(CATALOG_SIZE);
    for kind in CardKind::ALL {
        for value in 1..=kind.max_value() {
            cards.push(CardId::new(kind, value));
        }
    }
    cards
}

/// Cards that must be discarded from hand to place a Stag of the given value
/// as a kingdom action.
pub fn stag_discard_cost(value: u8) -> usize {
    match value {
        0..=3 => 1,
        4..=6 => 2,
        7..=9 => 4,
        _ => 8,
    }
}

/// Contribution tokens owed when a Stag of the given value leaves a hand by
/// discard, unless the owner's territory healing covers it.
pub fn stag_atonement_cost(value: u8) -> u32 {
    match value {
        0..=4 => 1,
        5..=8 => 2,
        _ => 3,
    }
}
