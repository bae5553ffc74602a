//! Per-seat projection of the game state.
//!
//! The engine holds perfect information. This module computes what one
//! seat may see (own hand, public zones, opponents' hand counts) plus the
//! action kinds that seat could legally submit right now. It is the whole
//! contract the UI and transport layers depend on.

use crate::actions::ActionKind;
use crate::card::CardId;
use crate::game_state::{GameState, LOG_TAIL, LogEntry, TurnPhase, WinReason};
use crate::ids::PlayerId;
use crate::pending::PendingAction;

/// What any seat may know about a player: everything except hand contents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct PlayerPublic {
    pub seat: PlayerId,
    pub name: String,
    pub hand_count: usize,
    pub territory: Vec<CardId>,
    /// Territory Magi currently counted as Healing.
    pub magi_as_healing: Vec<CardId>,
    pub contributions_remaining: u32,
    pub contributions_made: u32,
    pub ante: u32,
    pub eliminated: bool,
}

/// One seat's filtered picture of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct PlayerView {
    pub seat: PlayerId,
    pub hand: Vec<CardId>,
    pub players: Vec<PlayerPublic>,
    pub kingdom: Vec<CardId>,
    pub deck_size: usize,
    pub discard_size: usize,
    pub burned_size: usize,
    pub turn_number: u32,
    pub turn_phase: TurnPhase,
    pub current_player: PlayerId,
    /// The open resolution, if any. Pending payloads only carry cards that
    /// have already been revealed, so no filtering is needed.
    pub pending: Option<PendingAction>,
    /// Action kinds this seat could submit right now. Empty for everyone
    /// but the one seat the engine is waiting on.
    pub available_actions: Vec<ActionKind>,
    pub winner: Option<PlayerId>,
    pub win_reason: Option<WinReason>,
    /// The most recent log entries, oldest first.
    pub log: Vec<LogEntry>,
}

/// Projects the state as seen from `seat`. Pure; the state is untouched.
pub fn player_view(game: &GameState, seat: PlayerId) -> PlayerView {
    let players = game
        .players
        .iter()
        .map(|p| PlayerPublic {
            seat: p.id,
            name: p.name.clone(),
            hand_count: p.hand.len(),
            territory: p.territory.clone(),
            magi_as_healing: p.magi_as_healing.clone(),
            contributions_remaining: p.contributions_remaining,
            contributions_made: p.contributions_made,
            ante: p.ante,
            eliminated: p.eliminated,
        })
        .collect();

    let tail_start = game.log.len().saturating_sub(LOG_TAIL);
    PlayerView {
        seat,
        hand: game.player(seat).hand.clone(),
        players,
        kingdom: game.kingdom.clone(),
        deck_size: game.deck.len(),
        discard_size: game.discard.len(),
        burned_size: game.burned.len(),
        turn_number: game.turn_number,
        turn_phase: game.turn_phase,
        current_player: game.current_player(),
        pending: game.pending.clone(),
        available_actions: available_actions(game, seat),
        winner: game.winner,
        win_reason: game.win_reason,
        log: game.log[tail_start..].to_vec(),
    }
}

/// Action kinds `seat` could legally submit. Coarse legality only: the
/// kinds surfaced here can still be rejected over their payload.
pub fn available_actions(game: &GameState, seat: PlayerId) -> Vec<ActionKind> {
    if game.winner.is_some() {
        return Vec::new();
    }
    if let Some(pending) = &game.pending {
        return if pending.responder() == seat {
            vec![response_kind(pending)]
        } else {
            Vec::new()
        };
    }
    if game.current_player() != seat {
        return Vec::new();
    }
    let player = game.player(seat);
    match game.turn_phase {
        TurnPhase::KingdomAction => {
            let mut kinds = vec![ActionKind::DrawCard];
            if !game.kingdom.is_empty() {
                kinds.push(ActionKind::DraftKingdom);
            }
            if player.hand.iter().any(|c| c.is_stag()) {
                kinds.push(ActionKind::PlayStag);
            }
            kinds
        }
        TurnPhase::TerritoryAction => {
            let mut kinds = Vec::new();
            if player.hand.iter().any(|c| !c.is_stag()) {
                kinds.push(ActionKind::PlayTerritory);
            }
            kinds.push(ActionKind::NoTerritory);
            kinds
        }
        TurnPhase::RefreshKingdom | TurnPhase::EndOfTurn => Vec::new(),
    }
}

fn response_kind(pending: &PendingAction) -> ActionKind {
    match pending {
        PendingAction::DraftKingdom { .. }
        | PendingAction::StagKingdomDraft { .. }
        | PendingAction::StagKingdomPickSelf { .. } => ActionKind::DraftKingdomPick,
        PendingAction::HuntResponse { .. } => ActionKind::HuntResponse,
        PendingAction::HuntDiscard { .. } => ActionKind::HuntDiscard,
        PendingAction::MagiChoice { .. } => ActionKind::MagiChoice,
        PendingAction::MagiPlaceCards { .. } => ActionKind::MagiPlaceCards,
        PendingAction::TitheDiscard { .. } => ActionKind::TitheDiscard,
        PendingAction::TitheContribute { .. } => ActionKind::TitheContribute,
        PendingAction::KingCommandResponse { .. } => ActionKind::KingCommandResponse,
        PendingAction::KingCommandCollect { .. } => ActionKind::KingCommandCollect,
        PendingAction::DiscardToHandLimit { .. } => ActionKind::DiscardToHandLimit,
        PendingAction::DiscardForCost { .. } => ActionKind::DiscardForCost,
    }
}
