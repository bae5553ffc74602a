//! The per-card resolution sub-engines.
//!
//! Each interactive card effect runs as a chained state machine over the
//! pending-action slot. A handler receives the open pending variant (by
//! value) and the responder's submitted action; it either rejects with no
//! state change, or executes and leaves behind the next pending action, or
//! `None` with the turn ready to close.

pub mod draft;
pub mod hunt;
pub mod kings_command;
pub mod magi;
pub mod stag;
pub mod tithe;

mod discard;

use crate::actions::{Action, ActionError};
use crate::card::CardId;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::pending::PendingAction;
use crate::win;
use crate::zones;

/// Routes a response to the sub-engine owning the open pending action.
/// The caller has already checked that `seat` is the expected responder.
pub fn apply_response(
    game: &mut GameState,
    seat: PlayerId,
    pending: PendingAction,
    action: Action,
) -> Result<(), ActionError> {
    match (pending, action) {
        (
            PendingAction::DraftKingdom { remaining, .. },
            Action::DraftKingdomPick { card_id },
        ) => draft::draft_pick(game, seat, remaining, card_id),
        (
            PendingAction::StagKingdomDraft {
                stag_player,
                remaining,
                ..
            },
            Action::DraftKingdomPick { card_id },
        ) => stag::stag_draft_pick(game, seat, stag_player, remaining, card_id),
        (
            PendingAction::StagKingdomPickSelf { .. },
            Action::DraftKingdomPick { card_id },
        ) => stag::stag_pick_self(game, seat, card_id),
        (
            pending @ PendingAction::HuntResponse { .. },
            Action::HuntResponse {
                healing_id,
                magi_id,
            },
        ) => hunt::hunt_response(game, seat, pending, healing_id, magi_id),
        (
            pending @ PendingAction::HuntDiscard { .. },
            Action::HuntDiscard { card_ids },
        ) => hunt::hunt_discard(game, seat, pending, card_ids),
        (
            PendingAction::MagiChoice { magi_card, .. },
            Action::MagiChoice {
                draw_top,
                draw_bottom,
                place_bottom,
            },
        ) => magi::magi_choice(game, seat, magi_card, draw_top, draw_bottom, place_bottom),
        (
            PendingAction::MagiPlaceCards {
                magi_card, count, ..
            },
            Action::MagiPlaceCards { card_ids },
        ) => magi::magi_place_cards(game, seat, magi_card, count, card_ids),
        (
            pending @ PendingAction::TitheDiscard { .. },
            Action::TitheDiscard { card_ids },
        ) => tithe::tithe_discard(game, seat, pending, card_ids),
        (
            PendingAction::TitheContribute {
                owner,
                tithe_card,
                contributions_paid,
            },
            Action::TitheContribute { contribute },
        ) => tithe::tithe_contribute(game, owner, tithe_card, contributions_paid, contribute),
        (
            pending @ PendingAction::KingCommandResponse { .. },
            Action::KingCommandResponse { stag_id },
        ) => kings_command::command_response(game, seat, pending, stag_id),
        (
            PendingAction::KingCommandCollect { collected, .. },
            Action::KingCommandCollect { stag_ids },
        ) => kings_command::command_collect(game, seat, collected, stag_ids),
        (
            PendingAction::DiscardToHandLimit { count, .. },
            Action::DiscardToHandLimit { card_ids },
        ) => discard::discard_to_hand_limit(game, seat, count, card_ids),
        (
            PendingAction::DiscardForCost {
                stag_card, count, ..
            },
            Action::DiscardForCost { card_ids },
        ) => discard::discard_for_cost(game, seat, stag_card, count, card_ids),
        (_, other) => Err(ActionError::PhaseMismatch {
            action: other.kind(),
        }),
    }
}

/// Checks that `cards` is exactly `expected` distinct cards, all currently
/// in `seat`'s hand. Pure validation, no mutation.
pub(crate) fn expect_distinct_from_hand(
    game: &GameState,
    seat: PlayerId,
    cards: &[CardId],
    expected: usize,
) -> Result<(), ActionError> {
    if cards.len() != expected {
        return Err(ActionError::MalformedPayload(format!(
            "expected {expected} cards, got {}",
            cards.len()
        )));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[..i].contains(card) {
            return Err(ActionError::MalformedPayload(format!("{card} listed twice")));
        }
        if !game.player(seat).has_card(*card) {
            return Err(ActionError::CardNotOwned(*card));
        }
    }
    Ok(())
}

/// Discards each card in order, settling atonement for any Stag. Stops as
/// soon as the discarding player is eliminated (their hand is already gone)
/// or the game has ended.
pub(crate) fn discard_with_atonement(game: &mut GameState, seat: PlayerId, cards: &[CardId]) {
    for &card in cards {
        if game.winner.is_some() || game.player(seat).eliminated {
            break;
        }
        if zones::discard_from_hand(game, seat, card) {
            let name = game.player(seat).name.clone();
            game.push_log(Some(seat), format!("{name} discards {card}"));
            if card.is_stag() {
                win::apply_atonement(game, seat, card);
            }
        }
    }
}

/// Pops the next living seat off a responder queue.
pub(crate) fn next_living(game: &GameState, queue: &mut Vec<PlayerId>) -> Option<PlayerId> {
    while !queue.is_empty() {
        let seat = queue.remove(0);
        if !game.player(seat).eliminated {
            return Some(seat);
        }
    }
    None
}

/// Pops the next living seat that still holds cards, skipping the rest.
pub(crate) fn next_with_cards(game: &GameState, queue: &mut Vec<PlayerId>) -> Option<PlayerId> {
    while !queue.is_empty() {
        let seat = queue.remove(0);
        if !game.player(seat).eliminated && !game.player(seat).hand.is_empty() {
            return Some(seat);
        }
    }
    None
}

/// Moves a named kingdom card into `seat`'s hand.
pub(crate) fn take_from_kingdom(
    game: &mut GameState,
    seat: PlayerId,
    card: CardId,
) -> Result<(), ActionError> {
    let Some(pos) = game.kingdom.iter().position(|c| *c == card) else {
        return Err(ActionError::IllegalChoice(format!(
            "{card} is not in the kingdom"
        )));
    };
    game.kingdom.remove(pos);
    game.player_mut(seat).hand.push(card);
    let name = game.player(seat).name.clone();
    game.push_log(Some(seat), format!("{name} takes {card} from the kingdom"));
    Ok(())
}
