//! Forced discards that ride on a pending prompt: trimming down to the
//! hand limit at end of turn, and paying a Stag's placement cost after
//! the play was announced without payment attached.

use crate::actions::ActionError;
use crate::card::CardId;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::resolutions::{self, stag};

/// End-of-turn trim. The turn loop raised the prompt, so once the cards
/// hit the discard pile the turn simply continues.
pub fn discard_to_hand_limit(
    game: &mut GameState,
    seat: PlayerId,
    count: u8,
    card_ids: Vec<CardId>,
) -> Result<(), ActionError> {
    resolutions::expect_distinct_from_hand(game, seat, &card_ids, count as usize)?;
    resolutions::discard_with_atonement(game, seat, &card_ids);
    game.pending = None;
    Ok(())
}

/// Deferred Stag cost. Validation mirrors the inline payment path, then
/// hands off to the stag engine to pay and place.
pub fn discard_for_cost(
    game: &mut GameState,
    seat: PlayerId,
    stag_card: CardId,
    count: u8,
    card_ids: Vec<CardId>,
) -> Result<(), ActionError> {
    resolutions::expect_distinct_from_hand(game, seat, &card_ids, count as usize)?;
    if card_ids.contains(&stag_card) {
        return Err(ActionError::IllegalChoice(
            "the placed Stag cannot pay its own cost".to_string(),
        ));
    }
    stag::pay_and_place(game, seat, stag_card, &card_ids);
    Ok(())
}
