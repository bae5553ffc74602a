//! The complete game state: players, shared zones, turn bookkeeping, the
//! pending-action slot, and the event log.
//!
//! `GameState` is a plain value. All mutation goes through the action
//! reducer in `actions`, so cloning a state gives an independent game that
//! can be advanced separately (and compared, which the tests lean on).

use crate::card::{self, CardId};
use crate::ids::PlayerId;
use crate::pending::PendingAction;
use crate::turn;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Cards dealt to each hand at game start.
pub const STARTING_HAND: usize = 5;
/// Tokens each player antes from their starting pool of 12.
pub const STARTING_ANTE: u32 = 1;
/// The kingdom row is refilled to this many cards.
pub const KINGDOM_SIZE: usize = 3;
/// Territory Stag total that wins on the spot.
pub const STAG_WIN_TOTAL: u32 = 18;
/// Log entries exposed through player views.
pub const LOG_TAIL: usize = 50;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Structural phases of a turn. Input is only accepted in the two action
/// phases; the other two are transit states the engine advances through on
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum TurnPhase {
    RefreshKingdom,
    KingdomAction,
    TerritoryAction,
    EndOfTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum WinReason {
    Stag18,
    LastStanding,
    DeckOut,
}

/// One line of the public game log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch at the time of the event.
    pub at_ms: i64,
    pub turn: u32,
    /// Acting seat, if the event is attributable to one.
    pub seat: Option<PlayerId>,
    pub message: String,
}

#[derive(Debug)]
pub enum NewGameError {
    PlayerCount(usize),
}

impl std::fmt::Display for NewGameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewGameError::PlayerCount(n) => {
                write!(f, "need {MIN_PLAYERS}-{MAX_PLAYERS} players, got {n}")
            }
        }
    }
}

impl std::error::Error for NewGameError {}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub players: Vec<crate::player::Player>,
    /// Living seats in turn order. Shrinks on elimination; `current_index`
    /// points into this.
    pub player_order: Vec<PlayerId>,
    pub current_index: usize,
    /// Set when an elimination already moved `current_index` onto the next
    /// player, so the next rotation must not skip them.
    pub skip_next_rotation: bool,
    pub turn_number: u32,
    pub turn_phase: TurnPhase,
    /// Face-down draw pile. The last element is the top of the deck.
    pub deck: Vec<CardId>,
    /// Face-up shared discard pile.
    pub discard: Vec<CardId>,
    /// Cards removed from the game. Never reshuffled.
    pub burned: Vec<CardId>,
    /// The face-up kingdom row.
    pub kingdom: Vec<CardId>,
    pub pending: Option<PendingAction>,
    pub winner: Option<PlayerId>,
    pub win_reason: Option<WinReason>,
    pub log: Vec<LogEntry>,
    /// Seed for deterministic shuffles.
    pub rng_seed: u64,
    /// Shuffles performed so far. Mixing this into the seed keeps each
    /// shuffle distinct while replays stay reproducible.
    pub shuffle_count: u64,
}

impl GameState {
    /// Sets up a fresh game: shuffled deck, five-card hands, one token
    /// anted per player, three kingdom cards, and the first player ready to
    /// take a kingdom action.
    pub fn new(player_names: &[&str], seed: u64) -> Result<Self, NewGameError> {
        if player_names.len() < MIN_PLAYERS || player_names.len() > MAX_PLAYERS {
            return Err(NewGameError::PlayerCount(player_names.len()));
        }

        let mut players = Vec::with_capacity(player_names.len());
        let mut player_order = Vec::with_capacity(player_names.len());
        for (i, name) in player_names.iter().enumerate() {
            let id = PlayerId(i as u8);
            players.push(crate::player::Player::new(id, *name));
            player_order.push(id);
        }

        let mut game = Self {
            players,
            player_order,
            current_index: 0,
            skip_next_rotation: false,
            turn_number: 1,
            turn_phase: TurnPhase::RefreshKingdom,
            deck: card::catalog(),
            discard: Vec::new(),
            burned: Vec::new(),
            kingdom: Vec::new(),
            pending: None,
            winner: None,
            win_reason: None,
            log: Vec::new(),
            rng_seed: seed,
            shuffle_count: 0,
        };

        game.shuffle_deck();

        for _ in 0..STARTING_HAND {
            for i in 0..game.players.len() {
                if let Some(c) = game.deck.pop() {
                    game.players[i].hand.push(c);
                }
            }
        }

        for i in 0..game.players.len() {
            game.players[i].contributions_remaining -= STARTING_ANTE;
            game.players[i].ante = STARTING_ANTE;
            let seat = game.players[i].id;
            game.push_log(Some(seat), format!("anted {STARTING_ANTE} token"));
        }

        for _ in 0..KINGDOM_SIZE {
            if let Some(c) = game.deck.pop() {
                game.kingdom.push(c);
            }
        }

        let first = game.current_player();
        game.push_log(None, format!("game started with {} players", game.players.len()));
        game.push_log(None, format!("{} takes the first turn", game.player(first).name));

        turn::auto_advance(&mut game);
        Ok(game)
    }

    pub fn current_player(&self) -> PlayerId {
        self.player_order[self.current_index]
    }

    pub fn player(&self, id: PlayerId) -> &crate::player::Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut crate::player::Player {
        &mut self.players[id.index()]
    }

    /// Living seats in clockwise order starting after `from`, excluding
    /// `from` itself.
    pub fn opponents_clockwise(&self, from: PlayerId) -> Vec<PlayerId> {
        let Some(pos) = self.player_order.iter().position(|p| *p == from) else {
            return self.player_order.clone();
        };
        let n = self.player_order.len();
        (1..n)
            .map(|offset| self.player_order[(pos + offset) % n])
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.player_order.len()
    }

    /// Deterministic shuffle of the draw pile.
    pub fn shuffle_deck(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.rng_seed.wrapping_add(self.shuffle_count));
        self.shuffle_count += 1;
        self.deck.shuffle(&mut rng);
    }

    pub fn push_log(&mut self, seat: Option<PlayerId>, message: String) {
        self.log.push(LogEntry {
            at_ms: chrono::Utc::now().timestamp_millis(),
            turn: self.turn_number,
            seat,
            message,
        });
    }

    /// Records the win exactly once and clears any open resolution. Every
    /// later action is rejected, so a mid-resolution win freezes the game
    /// where it stands.
    pub fn declare_winner(&mut self, seat: PlayerId, reason: WinReason) {
        if self.winner.is_some() {
            return;
        }
        self.winner = Some(seat);
        self.win_reason = Some(reason);
        self.pending = None;
        let name = self.player(seat).name.clone();
        let why = match reason {
            WinReason::Stag18 => "a stag total of 18",
            WinReason::LastStanding => "being the last player standing",
            WinReason::DeckOut => "the deck running out",
        };
        self.push_log(Some(seat), format!("{name} wins by {why}"));
    }

    /// Total cards across every zone. The catalog size, always.
    #[cfg(debug_assertions)]
    pub fn total_cards(&self) -> usize {
        let per_player: usize = self
            .players
            .iter()
            .map(|p| p.hand.len() + p.territory.len())
            .sum();
        per_player + self.deck.len() + self.discard.len() + self.burned.len() + self.kingdom.len()
    }
}
