//! Per-player state: hand, territory, flags, and the healing/hand-limit
//! arithmetic derived from the territory.

use crate::card::{CardId, CardKind};
use crate::ids::PlayerId;

/// Hand limit before territory Magi bonuses.
pub const BASE_HAND_LIMIT: usize = 7;

/// Effective defensive value of a Magi, whether revealed against a Hunt or
/// counted as healing in a territory.
pub const MAGI_HEALING_VALUE: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Private hand, insertion order preserved.
    pub hand: Vec<CardId>,
    /// Public territory, in order of placement.
    pub territory: Vec<CardId>,
    /// Territory Magi repurposed as healing by a Hunt reveal. These count
    /// +6 healing each and do NOT raise the hand limit.
    pub magi_as_healing: Vec<CardId>,
    /// Unspent contribution tokens. Tokens only ever move from here to
    /// `contributions_made` (or to `ante` at game start).
    pub contributions_remaining: u32,
    /// Tokens paid as tithe contributions and atonements.
    pub contributions_made: u32,
    /// Tokens paid as the game-start ante.
    pub ante: u32,
    pub eliminated: bool,
}

/// Tokens each player holds before the ante is taken.
pub const STARTING_TOKENS: u32 = 12;

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            territory: Vec::new(),
            magi_as_healing: Vec::new(),
            contributions_remaining: STARTING_TOKENS,
            contributions_made: 0,
            ante: 0,
            eliminated: false,
        }
    }

    /// Moves `amount` tokens from remaining to made. Returns false (and
    /// moves nothing) if the player cannot cover the full amount.
    pub fn pay_tokens(&mut self, amount: u32) -> bool {
        if self.contributions_remaining < amount {
            return false;
        }
        self.contributions_remaining -= amount;
        self.contributions_made += amount;
        true
    }

    pub fn has_card(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Removes a specific card from the hand. Returns false if absent.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        if let Some(pos) = self.hand.iter().position(|c| *c == card) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn territory_count(&self, kind: CardKind) -> usize {
        self.territory.iter().filter(|c| c.kind == kind).count()
    }

    /// Sum of territory Healing values, plus 6 per Magi flagged as healing.
    pub fn territory_healing_value(&self) -> u32 {
        let healing: u32 = self
            .territory
            .iter()
            .filter(|c| c.kind == CardKind::Healing)
            .map(|c| c.value as u32)
            .sum();
        healing + self.magi_as_healing.len() as u32 * MAGI_HEALING_VALUE as u32
    }

    /// 7, plus one per territory Magi that is not flagged as healing.
    pub fn hand_limit(&self) -> usize {
        let bonus = self
            .territory
            .iter()
            .filter(|c| c.kind == CardKind::Magi && !self.magi_as_healing.contains(c))
            .count();
        BASE_HAND_LIMIT + bonus
    }

    /// Sum of territory Stag values, the primary win track.
    pub fn stag_total(&self) -> u32 {
        self.territory
            .iter()
            .filter(|c| c.is_stag())
            .map(|c| c.value as u32)
            .sum()
    }

    pub fn hand_stags(&self) -> impl Iterator<Item = &CardId> {
        self.hand.iter().filter(|c| c.is_stag())
    }
}
