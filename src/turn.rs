//! Turn phase sequencing and the bounded auto-advance loop.
//!
//! The cycle is `RefreshKingdom -> KingdomAction -> TerritoryAction ->
//! EndOfTurn -> (next seat) -> RefreshKingdom`. The two action phases end
//! only on player input; the other two are driven here. `auto_advance` runs
//! after game creation and after every accepted action, and stops as soon
//! as the game needs input, raises a pending action, or ends.

use crate::game_state::{GameState, KINGDOM_SIZE, TurnPhase};
use crate::pending::PendingAction;
use crate::win;
use crate::zones;

/// Drives the automatic phases until input is required or the game is over.
///
/// The loop is bounded by an explicit guard so a logic slip can never spin
/// it forever, and it bails out if no living players remain.
pub fn auto_advance(game: &mut GameState) {
    let mut guard = game.player_order.len().max(1) * 4 + 4;
    while game.winner.is_none() && game.pending.is_none() && guard > 0 {
        guard -= 1;
        if game.player_order.is_empty() {
            return;
        }
        match game.turn_phase {
            TurnPhase::RefreshKingdom => {
                if !refresh_kingdom(game) {
                    return;
                }
                game.turn_phase = TurnPhase::KingdomAction;
            }
            TurnPhase::KingdomAction | TurnPhase::TerritoryAction => return,
            TurnPhase::EndOfTurn => {
                let seat = game.current_player();
                let hand = game.player(seat).hand.len();
                let limit = game.player(seat).hand_limit();
                if hand > limit {
                    game.pending = Some(PendingAction::DiscardToHandLimit {
                        responder: seat,
                        count: (hand - limit) as u8,
                    });
                    return;
                }
                advance_seat(game);
                game.turn_phase = TurnPhase::RefreshKingdom;
            }
        }
    }
}

/// Refills the kingdom row to three cards: no-op if it already holds three,
/// otherwise sweep the leftovers to the discard, burn one, deal three.
/// Returns false when the deck ran out, with the deck-out winner already
/// declared.
fn refresh_kingdom(game: &mut GameState) -> bool {
    if game.kingdom.len() >= KINGDOM_SIZE {
        return true;
    }
    zones::discard_kingdom(game);
    match zones::burn_from_top(game) {
        Ok(burnt) => {
            game.push_log(None, format!("{burnt} burned while refreshing the kingdom"));
        }
        Err(_) => {
            win::deck_out(game);
            return false;
        }
    }
    for _ in 0..KINGDOM_SIZE {
        if zones::deal_to_kingdom(game).is_err() {
            win::deck_out(game);
            return false;
        }
    }
    let row = game
        .kingdom
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    game.push_log(None, format!("kingdom refreshed: {row}"));
    true
}

/// Passes the turn to the next living seat, unless an elimination already
/// moved `current_index` onto it.
fn advance_seat(game: &mut GameState) {
    if game.skip_next_rotation {
        game.skip_next_rotation = false;
    } else {
        game.current_index = (game.current_index + 1) % game.player_order.len();
    }
    game.turn_number += 1;
    let seat = game.current_player();
    let name = game.player(seat).name.clone();
    game.push_log(Some(seat), format!("{name} begins turn {}", game.turn_number));
}
