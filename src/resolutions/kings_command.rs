//! The King's Command: the card claims its place in the territory at once,
//! then each opponent must surrender a Stag from hand (atonement included)
//! or show they hold none. The owner finally picks over the spoils.

use crate::actions::ActionError;
use crate::card::{CardId, CardKind};
use crate::game_state::{GameState, TurnPhase};
use crate::ids::PlayerId;
use crate::pending::PendingAction;
use crate::resolutions;

/// Territory action: play a King's Command from hand. Ownership and kind
/// are already checked by the dispatcher.
pub fn play_kings_command(
    game: &mut GameState,
    seat: PlayerId,
    card: CardId,
) -> Result<(), ActionError> {
    game.turn_phase = TurnPhase::EndOfTurn;
    crate::zones::play_to_territory(game, seat, card);
    let name = game.player(seat).name.clone();
    game.push_log(
        Some(seat),
        format!("{name} plays {card} into their territory"),
    );

    let mut queue = game.opponents_clockwise(seat);
    match resolutions::next_with_cards(game, &mut queue) {
        Some(first) => {
            game.pending = Some(PendingAction::KingCommandResponse {
                owner: seat,
                responder: first,
                remaining: queue,
                collected: Vec::new(),
            });
        }
        None => game.pending = None,
    }
    Ok(())
}

/// One opponent's answer: a surrendered Stag, or proof of an empty claim.
pub fn command_response(
    game: &mut GameState,
    seat: PlayerId,
    pending: PendingAction,
    stag_id: Option<CardId>,
) -> Result<(), ActionError> {
    let PendingAction::KingCommandResponse {
        owner,
        mut remaining,
        mut collected,
        ..
    } = pending
    else {
        return Err(ActionError::PhaseMismatch {
            action: crate::actions::ActionKind::KingCommandResponse,
        });
    };

    match stag_id {
        Some(stag) => {
            if !game.player(seat).has_card(stag) {
                return Err(ActionError::CardNotOwned(stag));
            }
            if stag.kind != CardKind::Stag {
                return Err(ActionError::IllegalChoice(format!("{stag} is not a Stag")));
            }
            resolutions::discard_with_atonement(game, seat, &[stag]);
            if game.winner.is_some() {
                return Ok(());
            }
            // Even if the atonement eliminated the seat, the stag is in
            // the discard pile and stays claimable.
            collected.push(stag);
        }
        None => {
            if game.player(seat).hand_stags().next().is_some() {
                return Err(ActionError::IllegalChoice(
                    "the hand holds a Stag that must be surrendered".to_string(),
                ));
            }
            let name = game.player(seat).name.clone();
            game.push_log(Some(seat), format!("{name} shows a hand with no Stag"));
        }
    }

    match resolutions::next_with_cards(game, &mut remaining) {
        Some(next) => {
            game.pending = Some(PendingAction::KingCommandResponse {
                owner,
                responder: next,
                remaining,
                collected,
            });
        }
        None if collected.is_empty() => game.pending = None,
        None => {
            game.pending = Some(PendingAction::KingCommandCollect {
                responder: owner,
                collected,
            });
        }
    }
    Ok(())
}

/// The owner takes any subset of the surrendered Stags out of the discard
/// pile, including none at all.
pub fn command_collect(
    game: &mut GameState,
    seat: PlayerId,
    collected: Vec<CardId>,
    stag_ids: Vec<CardId>,
) -> Result<(), ActionError> {
    for (i, stag) in stag_ids.iter().enumerate() {
        if stag_ids[..i].contains(stag) {
            return Err(ActionError::MalformedPayload(format!("{stag} listed twice")));
        }
        if !collected.contains(stag) {
            return Err(ActionError::IllegalChoice(format!(
                "{stag} was not surrendered to the command"
            )));
        }
        if !game.discard.contains(stag) {
            return Err(ActionError::MalformedPayload(format!(
                "{stag} is not in the discard pile"
            )));
        }
    }

    for stag in &stag_ids {
        if let Some(pos) = game.discard.iter().position(|c| c == stag) {
            game.discard.remove(pos);
            game.player_mut(seat).hand.push(*stag);
        }
    }
    let name = game.player(seat).name.clone();
    if stag_ids.is_empty() {
        game.push_log(Some(seat), format!("{name} claims none of the surrendered stags"));
    } else {
        let list = stag_ids
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        game.push_log(Some(seat), format!("{name} claims {list} from the discard pile"));
    }
    game.pending = None;
    Ok(())
}
