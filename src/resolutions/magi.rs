//! The Magi's played effect: split exactly six points across drawing from
//! the deck top, drawing from the bottom, and sliding hand cards under the
//! deck, executed in that order. The card then joins the territory and
//! raises the hand limit by one.
//!
//! The Magi's other use, backing a Healing reveal during a Hunt, lives in
//! the hunt engine and flags the card as healing instead.

use crate::actions::ActionError;
use crate::card::CardId;
use crate::game_state::{GameState, TurnPhase};
use crate::ids::PlayerId;
use crate::pending::PendingAction;
use crate::resolutions;
use crate::win;
use crate::zones;

/// Points to split across the three effects.
const MAGI_POINTS: u32 = 6;

/// Territory action: play a Magi from hand. Ownership and kind are already
/// checked by the dispatcher.
pub fn play_magi(game: &mut GameState, seat: PlayerId, card: CardId) -> Result<(), ActionError> {
    game.turn_phase = TurnPhase::EndOfTurn;
    let name = game.player(seat).name.clone();
    game.push_log(Some(seat), format!("{name} plays {card}"));
    game.pending = Some(PendingAction::MagiChoice {
        responder: seat,
        magi_card: card,
    });
    Ok(())
}

/// The split decision. Draws happen immediately; a non-zero placement
/// count chains into a `MagiPlaceCards` prompt.
pub fn magi_choice(
    game: &mut GameState,
    seat: PlayerId,
    magi_card: CardId,
    draw_top: u8,
    draw_bottom: u8,
    place_bottom: u8,
) -> Result<(), ActionError> {
    if draw_top as u32 + draw_bottom as u32 + place_bottom as u32 != MAGI_POINTS {
        return Err(ActionError::MalformedPayload(format!(
            "the three counts must sum to {MAGI_POINTS}"
        )));
    }
    // The magi itself can never be placed, so the placeable pool is the
    // rest of the hand plus everything about to be drawn.
    let placeable = game.player(seat).hand.len() - 1 + draw_top as usize + draw_bottom as usize;
    if place_bottom as usize > placeable {
        return Err(ActionError::IllegalChoice(format!(
            "cannot place {place_bottom} cards from a pool of {placeable}"
        )));
    }

    let name = game.player(seat).name.clone();
    game.push_log(
        Some(seat),
        format!(
            "{name} splits {magi_card}: {draw_top} from the top, {draw_bottom} from the bottom, {place_bottom} under the deck"
        ),
    );

    for _ in 0..draw_top {
        match zones::draw_from_top(game) {
            Ok(c) => game.player_mut(seat).hand.push(c),
            Err(_) => {
                win::deck_out(game);
                return Ok(());
            }
        }
    }
    for _ in 0..draw_bottom {
        match zones::draw_from_bottom(game) {
            Ok(c) => game.player_mut(seat).hand.push(c),
            Err(_) => {
                win::deck_out(game);
                return Ok(());
            }
        }
    }

    if place_bottom == 0 {
        complete(game, seat, magi_card);
        return Ok(());
    }
    game.pending = Some(PendingAction::MagiPlaceCards {
        responder: seat,
        magi_card,
        count: place_bottom,
    });
    Ok(())
}

/// The named cards go under the deck and the Magi enters the territory.
pub fn magi_place_cards(
    game: &mut GameState,
    seat: PlayerId,
    magi_card: CardId,
    count: u8,
    card_ids: Vec<CardId>,
) -> Result<(), ActionError> {
    resolutions::expect_distinct_from_hand(game, seat, &card_ids, count as usize)?;
    if card_ids.contains(&magi_card) {
        return Err(ActionError::IllegalChoice(
            "the Magi in play cannot go under the deck".to_string(),
        ));
    }

    for &card in &card_ids {
        game.player_mut(seat).remove_from_hand(card);
        zones::place_on_deck_bottom(game, card);
    }
    let name = game.player(seat).name.clone();
    game.push_log(Some(seat), format!("{name} places {count} cards under the deck"));
    complete(game, seat, magi_card);
    Ok(())
}

fn complete(game: &mut GameState, seat: PlayerId, magi_card: CardId) {
    zones::play_to_territory(game, seat, magi_card);
    let name = game.player(seat).name.clone();
    let limit = game.player(seat).hand_limit();
    game.push_log(
        Some(seat),
        format!("{magi_card} enters {name}'s territory (hand limit {limit})"),
    );
    game.pending = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, apply_action};
    use crate::card::CardKind;
    use crate::tests::support;

    fn magi(value: u8) -> CardId {
        CardId::new(CardKind::Magi, value)
    }

    fn start_magi(game: &mut GameState, seat: PlayerId, card: CardId) {
        assert_eq!(game.current_player(), seat);
        apply_action(game, seat, Action::DrawCard).unwrap();
        apply_action(game, seat, Action::PlayTerritory { card_id: card }).unwrap();
        assert!(matches!(
            game.pending,
            Some(PendingAction::MagiChoice { .. })
        ));
    }

    #[test]
    fn draw_only_split_resolves_in_one_step() {
        let mut game = GameState::new(&["a", "b"], 83).unwrap();
        let seat = PlayerId(0);
        support::set_hand(&mut game, seat, &[magi(3)]);
        start_magi(&mut game, seat, magi(3));

        let deck_before = game.deck.len();
        let bottom = game.deck[0];
        apply_action(
            &mut game,
            seat,
            Action::MagiChoice {
                draw_top: 4,
                draw_bottom: 2,
                place_bottom: 0,
            },
        )
        .unwrap();

        let p = game.player(seat);
        // One magi out, six cards in.
        assert_eq!(p.hand.len(), 1 + 1 - 1 + 6);
        assert!(p.hand.contains(&bottom));
        assert!(p.territory.contains(&magi(3)));
        assert!(p.magi_as_healing.is_empty());
        assert_eq!(p.hand_limit(), 8);
        assert_eq!(game.deck.len(), deck_before - 6);
        assert!(game.pending.is_none());
        assert_eq!(game.current_player(), PlayerId(1));
    }

    #[test]
    fn placement_split_chains_into_a_second_prompt() {
        let mut game = GameState::new(&["a", "b"], 83).unwrap();
        let seat = PlayerId(0);
        let keep = [
            CardId::new(CardKind::Healing, 1),
            CardId::new(CardKind::Healing, 2),
            CardId::new(CardKind::Healing, 3),
        ];
        support::set_hand(&mut game, seat, &[magi(5), keep[0], keep[1], keep[2]]);
        start_magi(&mut game, seat, magi(5));

        let deck_before = game.deck.len();
        apply_action(
            &mut game,
            seat,
            Action::MagiChoice {
                draw_top: 1,
                draw_bottom: 1,
                place_bottom: 4,
            },
        )
        .unwrap();
        assert_eq!(
            game.pending,
            Some(PendingAction::MagiPlaceCards {
                responder: seat,
                magi_card: magi(5),
                count: 4,
            })
        );

        let placed: Vec<CardId> = game
            .player(seat)
            .hand
            .iter()
            .filter(|c| **c != magi(5))
            .take(4)
            .copied()
            .collect();
        apply_action(
            &mut game,
            seat,
            Action::MagiPlaceCards {
                card_ids: placed.clone(),
            },
        )
        .unwrap();

        // Two out for draws, four back underneath.
        assert_eq!(game.deck.len(), deck_before - 2 + 4);
        for card in &placed {
            assert!(game.deck[..4].contains(card));
        }
        assert!(game.player(seat).territory.contains(&magi(5)));
        assert!(game.pending.is_none());
    }

    #[test]
    fn split_must_sum_to_six() {
        let mut game = GameState::new(&["a", "b"], 83).unwrap();
        let seat = PlayerId(0);
        support::set_hand(&mut game, seat, &[magi(1)]);
        start_magi(&mut game, seat, magi(1));

        let before = game.clone();
        let err = apply_action(
            &mut game,
            seat,
            Action::MagiChoice {
                draw_top: 2,
                draw_bottom: 2,
                place_bottom: 1,
            },
        );
        assert!(matches!(err, Err(ActionError::MalformedPayload(_))));
        assert_eq!(game, before);
    }

    #[test]
    fn cannot_promise_more_placements_than_the_pool() {
        let mut game = GameState::new(&["a", "b"], 83).unwrap();
        let seat = PlayerId(0);
        support::set_hand(&mut game, seat, &[magi(2)]);
        start_magi(&mut game, seat, magi(2));

        // Hand holds one other card after the draw; a pool of 1 cannot cover 6.
        let err = apply_action(
            &mut game,
            seat,
            Action::MagiChoice {
                draw_top: 0,
                draw_bottom: 0,
                place_bottom: 6,
            },
        );
        assert!(matches!(err, Err(ActionError::IllegalChoice(_))));
    }

    #[test]
    fn the_magi_in_play_cannot_be_placed_under_the_deck() {
        let mut game = GameState::new(&["a", "b"], 83).unwrap();
        let seat = PlayerId(0);
        support::set_hand(&mut game, seat, &[magi(4)]);
        start_magi(&mut game, seat, magi(4));

        apply_action(
            &mut game,
            seat,
            Action::MagiChoice {
                draw_top: 4,
                draw_bottom: 0,
                place_bottom: 2,
            },
        )
        .unwrap();

        let filler = game
            .player(seat)
            .hand
            .iter()
            .find(|c| **c != magi(4))
            .copied()
            .unwrap();
        let err = apply_action(
            &mut game,
            seat,
            Action::MagiPlaceCards {
                card_ids: vec![magi(4), filler],
            },
        );
        assert!(matches!(err, Err(ActionError::IllegalChoice(_))));
    }
}
