//! The communal kingdom draft: the active player takes one kingdom card,
//! then every living opponent in clockwise order takes one of the rest.

use crate::actions::ActionError;
use crate::card::CardId;
use crate::game_state::{GameState, TurnPhase};
use crate::ids::PlayerId;
use crate::pending::PendingAction;
use crate::resolutions;

/// Kingdom action: the active player drafts `card` and opens the communal
/// pick round. The turn resumes at the territory action once the round is
/// over.
pub fn begin_draft(game: &mut GameState, seat: PlayerId, card: CardId) -> Result<(), ActionError> {
    resolutions::take_from_kingdom(game, seat, card)?;
    game.turn_phase = TurnPhase::TerritoryAction;

    let mut queue = game.opponents_clockwise(seat);
    if game.kingdom.is_empty() {
        return Ok(());
    }
    if let Some(first) = resolutions::next_living(game, &mut queue) {
        game.pending = Some(PendingAction::DraftKingdom {
            responder: first,
            remaining: queue,
        });
    }
    Ok(())
}

/// One opponent's pick. The round ends when the queue or the kingdom row
/// runs out.
pub fn draft_pick(
    game: &mut GameState,
    seat: PlayerId,
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
            game.pending = Some(PendingAction::DraftKingdom {
                responder: next,
                remaining,
            });
        }
        None => game.pending = None,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, apply_action};

    #[test]
    fn draft_gives_everyone_one_pick_in_seat_order() {
        let mut game = GameState::new(&["a", "b", "c"], 17).unwrap();
        let row = game.kingdom.clone();

        apply_action(&mut game, PlayerId(0), Action::DraftKingdom { card_id: row[0] }).unwrap();
        assert!(game.player(PlayerId(0)).hand.contains(&row[0]));
        assert_eq!(
            game.pending,
            Some(PendingAction::DraftKingdom {
                responder: PlayerId(1),
                remaining: vec![PlayerId(2)],
            })
        );
        assert_eq!(game.turn_phase, TurnPhase::TerritoryAction);

        apply_action(
            &mut game,
            PlayerId(1),
            Action::DraftKingdomPick { card_id: row[2] },
        )
        .unwrap();
        assert_eq!(
            game.pending,
            Some(PendingAction::DraftKingdom {
                responder: PlayerId(2),
                remaining: vec![],
            })
        );

        apply_action(
            &mut game,
            PlayerId(2),
            Action::DraftKingdomPick { card_id: row[1] },
        )
        .unwrap();
        assert!(game.pending.is_none());
        assert!(game.kingdom.is_empty());
        assert_eq!(game.turn_phase, TurnPhase::TerritoryAction);
        assert_eq!(game.current_player(), PlayerId(0));
    }

    #[test]
    fn draft_round_stops_when_kingdom_empties() {
        let mut game = GameState::new(&["a", "b", "c", "d"], 17).unwrap();
        // Shrink the row to two cards so the round cannot serve everyone.
        let extra = game.kingdom.pop().unwrap();
        game.discard.push(extra);
        let row = game.kingdom.clone();

        apply_action(&mut game, PlayerId(0), Action::DraftKingdom { card_id: row[0] }).unwrap();
        apply_action(
            &mut game,
            PlayerId(1),
            Action::DraftKingdomPick { card_id: row[1] },
        )
        .unwrap();

        // Seats 2 and 3 never get a pick.
        assert!(game.pending.is_none());
        assert!(game.kingdom.is_empty());
        assert_eq!(game.player(PlayerId(2)).hand.len(), 5);
        assert_eq!(game.player(PlayerId(3)).hand.len(), 5);
    }

    #[test]
    fn pick_outside_kingdom_is_rejected_cleanly() {
        let mut game = GameState::new(&["a", "b"], 17).unwrap();
        let row = game.kingdom.clone();
        apply_action(&mut game, PlayerId(0), Action::DraftKingdom { card_id: row[1] }).unwrap();

        let before = game.clone();
        let bogus = game.deck[0];
        let err = apply_action(
            &mut game,
            PlayerId(1),
            Action::DraftKingdomPick { card_id: bogus },
        );
        assert!(matches!(err, Err(ActionError::IllegalChoice(_))));
        assert_eq!(game, before);

        let err = apply_action(
            &mut game,
            PlayerId(0),
            Action::DraftKingdomPick { card_id: row[0] },
        );
        assert_eq!(err, Err(ActionError::NotYourResponse));
    }
}
