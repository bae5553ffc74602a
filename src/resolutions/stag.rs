//! Placing a Stag: pay the discard cost, enter the territory, check for
//! the 18-point win, then run the stag kingdom draft in which every
//! opponent picks before the placer takes the last card.

use crate::actions::ActionError;
use crate::card::{self, CardId, CardKind};
use crate::game_state::{GameState, TurnPhase};
use crate::ids::PlayerId;
use crate::pending::PendingAction;
use crate::resolutions;
use crate::win;
use crate::zones;

/// Kingdom action: place `card` from hand, paying its discard cost.
///
/// An empty `discard_ids` defers the cost choice to a `DiscardForCost`
/// pending action; otherwise the whole play is validated and settled in
/// one step.
pub fn play_stag(
    game: &mut GameState,
    seat: PlayerId,
    card: CardId,
    discard_ids: Vec<CardId>,
) -> Result<(), ActionError> {
    let player = game.player(seat);
    if !player.has_card(card) {
        return Err(ActionError::CardNotOwned(card));
    }
    if card.kind != CardKind::Stag {
        return Err(ActionError::IllegalChoice(format!("{card} is not a Stag")));
    }
    let cost = card::stag_discard_cost(card.value);
    if player.hand.len() < cost + 1 {
        return Err(ActionError::IllegalChoice(format!(
            "placing {card} costs {cost} discards and the hand cannot cover it"
        )));
    }

    if discard_ids.is_empty() {
        let name = game.player(seat).name.clone();
        game.push_log(
            Some(seat),
            format!("{name} begins placing {card}, owing {cost} discards"),
        );
        game.pending = Some(PendingAction::DiscardForCost {
            responder: seat,
            stag_card: card,
            count: cost as u8,
        });
        return Ok(());
    }

    resolutions::expect_distinct_from_hand(game, seat, &discard_ids, cost)?;
    if discard_ids.contains(&card) {
        return Err(ActionError::IllegalChoice(
            "the placed Stag cannot pay its own cost".to_string(),
        ));
    }
    pay_and_place(game, seat, card, &discard_ids);
    Ok(())
}

/// Settles a validated cost payment and, if the payer survives it, puts
/// the stag into play. Called from both the one-step path and the
/// `DiscardForCost` response.
pub(crate) fn pay_and_place(game: &mut GameState, seat: PlayerId, stag: CardId, paid: &[CardId]) {
    resolutions::discard_with_atonement(game, seat, paid);
    if game.winner.is_some() {
        return;
    }
    if game.player(seat).eliminated {
        // The stag never reached the territory; it went down with the hand.
        game.pending = None;
        game.turn_phase = TurnPhase::EndOfTurn;
        return;
    }
    finish_placement(game, seat, stag);
}

fn finish_placement(game: &mut GameState, seat: PlayerId, stag: CardId) {
    zones::play_to_territory(game, seat, stag);
    let name = game.player(seat).name.clone();
    let total = game.player(seat).stag_total();
    game.push_log(
        Some(seat),
        format!("{name} places {stag} in their territory (stag total {total})"),
    );
    win::check_stag_win(game, seat);
    if game.winner.is_some() {
        return;
    }

    game.turn_phase = TurnPhase::TerritoryAction;
    if game.kingdom.is_empty() {
        game.pending = None;
        return;
    }
    let mut queue = game.opponents_clockwise(seat);
    match resolutions::next_living(game, &mut queue) {
        Some(first) => {
            game.pending = Some(PendingAction::StagKingdomDraft {
                stag_player: seat,
                responder: first,
                remaining: queue,
            });
        }
        None => {
            game.pending = Some(PendingAction::StagKingdomPickSelf { responder: seat });
        }
    }
}

/// One opponent's pick from the stag kingdom draft.
pub fn stag_draft_pick(
    game: &mut GameState,
    seat: PlayerId,
    stag_player: PlayerId,
    mut remaining: Vec<PlayerId>,
    card: CardId,
) -> Result<(), ActionError> {
    resolutions::take_from_kingdom(game, seat, card)?;

    if game.kingdom.is_empty() {
        game.pending = None;
        return Ok(());
    }
    match resolutions::next_living(game, &mut remaining) {
        Some(next) => {
            game.pending = Some(PendingAction::StagKingdomDraft {
                stag_player,
                responder: next,
                remaining,
            });
        }
        None if !game.player(stag_player).eliminated => {
            game.pending = Some(PendingAction::StagKingdomPickSelf {
                responder: stag_player,
            });
        }
        None => game.pending = None,
    }
    Ok(())
}

/// The placer's own closing pick.
pub fn stag_pick_self(game: &mut GameState, seat: PlayerId, card: CardId) -> Result<(), ActionError> {
    resolutions::take_from_kingdom(game, seat, card)?;
    game.pending = None;
    Ok(())
}
