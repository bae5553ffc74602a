//! The Tithe: a table-wide discard-and-draw cycle the owner may renew by
//! paying contributions, at most twice.
//!
//! The Tithe card itself stays in the owner's hand until the resolution
//! settles: it enters the territory if at least one contribution was paid,
//! and is discarded otherwise.

use crate::actions::ActionError;
use crate::card::CardId;
use crate::game_state::{GameState, TurnPhase};
use crate::ids::PlayerId;
use crate::pending::PendingAction;
use crate::resolutions;
use crate::win;
use crate::zones;

/// Renewals the owner may buy after the opening table cycle.
const MAX_CONTRIBUTIONS: u8 = 2;

/// Each seat in a cycle discards up to this many and draws this many.
const CYCLE_CARDS: usize = 2;

/// Territory action: play a Tithe from hand. Ownership and kind are
/// already checked by the dispatcher.
pub fn play_tithe(game: &mut GameState, seat: PlayerId, card: CardId) -> Result<(), ActionError> {
    game.turn_phase = TurnPhase::EndOfTurn;
    let name = game.player(seat).name.clone();
    game.push_log(Some(seat), format!("{name} plays {card}"));

    let mut queue = vec![seat];
    queue.extend(game.opponents_clockwise(seat));
    advance(game, seat, card, queue, 0);
    Ok(())
}

/// How many cards this seat must pick for its cycle. The owner never
/// counts the Tithe itself.
fn required_discards(game: &GameState, owner: PlayerId, responder: PlayerId) -> usize {
    let hand = game.player(responder).hand.len();
    if responder == owner {
        CYCLE_CARDS.min(hand.saturating_sub(1))
    } else {
        CYCLE_CARDS.min(hand)
    }
}

/// Walks the cycle queue: seats with nothing to discard draw on the spot,
/// the first seat with a real choice gets a pending prompt, and an empty
/// queue moves on to the contribution question or the finish.
fn advance(
    game: &mut GameState,
    owner: PlayerId,
    tithe_card: CardId,
    mut queue: Vec<PlayerId>,
    contributions_paid: u8,
) {
    loop {
        match resolutions::next_living(game, &mut queue) {
            Some(responder) => {
                if required_discards(game, owner, responder) == 0 {
                    if !draw_cycle_cards(game, responder) {
                        return;
                    }
                    continue;
                }
                game.pending = Some(PendingAction::TitheDiscard {
                    owner,
                    tithe_card,
                    responder,
                    remaining: queue,
                    contributions_paid,
                });
                return;
            }
            None => {
                if contributions_paid < MAX_CONTRIBUTIONS {
                    game.pending = Some(PendingAction::TitheContribute {
                        owner,
                        tithe_card,
                        contributions_paid,
                    });
                } else {
                    finish(game, owner, tithe_card, contributions_paid);
                }
                return;
            }
        }
    }
}

/// The draw half of a cycle. Returns false on deck-out (already declared).
fn draw_cycle_cards(game: &mut GameState, seat: PlayerId) -> bool {
    for _ in 0..CYCLE_CARDS {
        match zones::draw_from_top(game) {
            Ok(c) => game.player_mut(seat).hand.push(c),
            Err(_) => {
                win::deck_out(game);
                return false;
            }
        }
    }
    let name = game.player(seat).name.clone();
    game.push_log(Some(seat), format!("{name} draws {CYCLE_CARDS} for the tithe"));
    true
}

/// One seat's discard half of a cycle.
pub fn tithe_discard(
    game: &mut GameState,
    seat: PlayerId,
    pending: PendingAction,
    card_ids: Vec<CardId>,
) -> Result<(), ActionError> {
    let PendingAction::TitheDiscard {
        owner,
        tithe_card,
        remaining,
        contributions_paid,
        ..
    } = pending
    else {
        return Err(ActionError::PhaseMismatch {
            action: crate::actions::ActionKind::TitheDiscard,
        });
    };

    let required = required_discards(game, owner, seat);
    resolutions::expect_distinct_from_hand(game, seat, &card_ids, required)?;
    if seat == owner && card_ids.contains(&tithe_card) {
        return Err(ActionError::IllegalChoice(
            "the Tithe cannot be discarded to its own cycle".to_string(),
        ));
    }

    resolutions::discard_with_atonement(game, seat, &card_ids);
    if game.winner.is_some() {
        return Ok(());
    }
    if game.player(seat).eliminated {
        if seat == owner {
            // The tithe went to the discard pile with the rest of the
            // owner's hand; nothing left to resolve.
            game.pending = None;
            return Ok(());
        }
        advance(game, owner, tithe_card, remaining, contributions_paid);
        return Ok(());
    }

    if !draw_cycle_cards(game, seat) {
        return Ok(());
    }
    advance(game, owner, tithe_card, remaining, contributions_paid);
    Ok(())
}

/// The owner's renew-or-settle decision.
pub fn tithe_contribute(
    game: &mut GameState,
    owner: PlayerId,
    tithe_card: CardId,
    contributions_paid: u8,
    contribute: bool,
) -> Result<(), ActionError> {
    if !contribute {
        finish(game, owner, tithe_card, contributions_paid);
        return Ok(());
    }
    if game.player(owner).contributions_remaining < 1 {
        return Err(ActionError::InsufficientContributions);
    }
    game.player_mut(owner).pay_tokens(1);
    let paid = contributions_paid + 1;
    let name = game.player(owner).name.clone();
    game.push_log(
        Some(owner),
        format!("{name} pays a contribution to renew the tithe ({paid} paid)"),
    );
    advance(game, owner, tithe_card, vec![owner], paid);
    Ok(())
}

fn finish(game: &mut GameState, owner: PlayerId, tithe_card: CardId, contributions_paid: u8) {
    if game.winner.is_some() {
        return;
    }
    let name = game.player(owner).name.clone();
    if contributions_paid > 0 {
        zones::play_to_territory(game, owner, tithe_card);
        game.push_log(
            Some(owner),
            format!("{tithe_card} enters {name}'s territory"),
        );
    } else {
        zones::discard_from_hand(game, owner, tithe_card);
        game.push_log(
            Some(owner),
            format!("{tithe_card} is discarded, no contribution paid"),
        );
    }
    game.pending = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, apply_action};
    use crate::card::CardKind;
    use crate::tests::support;

    fn tithe(value: u8) -> CardId {
        CardId::new(CardKind::Tithe, value)
    }

    fn healing(value: u8) -> CardId {
        CardId::new(CardKind::Healing, value)
    }

    fn start_tithe(game: &mut GameState, owner: PlayerId, card: CardId) {
        assert_eq!(game.current_player(), owner);
        apply_action(game, owner, Action::DrawCard).unwrap();
        apply_action(game, owner, Action::PlayTerritory { card_id: card }).unwrap();
    }

    #[test]
    fn unrenewed_tithe_cycles_the_table_then_is_discarded() {
        let mut game = GameState::new(&["a", "b", "c"], 67).unwrap();
        let owner = PlayerId(0);
        support::set_hand(&mut game, owner, &[tithe(3), healing(1), healing(2)]);
        start_tithe(&mut game, owner, tithe(3));

        // Owner first: min(2, hand - 1) with the tithe excluded.
        match &game.pending {
            Some(PendingAction::TitheDiscard { responder, .. }) => {
                assert_eq!(*responder, owner)
            }
            other => panic!("expected a tithe discard, got {other:?}"),
        }
        apply_action(
            &mut game,
            owner,
            Action::TitheDiscard {
                card_ids: vec![healing(1), healing(2)],
            },
        )
        .unwrap();

        for seat in [PlayerId(1), PlayerId(2)] {
            let picks: Vec<CardId> = game.player(seat).hand[..2].to_vec();
            apply_action(&mut game, seat, Action::TitheDiscard { card_ids: picks }).unwrap();
        }

        assert_eq!(
            game.pending,
            Some(PendingAction::TitheContribute {
                owner,
                tithe_card: tithe(3),
                contributions_paid: 0,
            })
        );
        apply_action(&mut game, owner, Action::TitheContribute { contribute: false }).unwrap();

        assert!(game.discard.contains(&tithe(3)));
        assert!(!game.player(owner).territory.contains(&tithe(3)));
        assert_eq!(game.player(owner).contributions_made, 0);
        assert!(game.pending.is_none());
        assert_eq!(game.current_player(), PlayerId(1));
    }

    #[test]
    fn paid_tithe_lands_in_the_territory() {
        let mut game = GameState::new(&["a", "b"], 67).unwrap();
        let owner = PlayerId(0);
        support::set_hand(&mut game, owner, &[tithe(5), healing(1), healing(2)]);
        start_tithe(&mut game, owner, tithe(5));

        apply_action(
            &mut game,
            owner,
            Action::TitheDiscard {
                card_ids: vec![healing(1), healing(2)],
            },
        )
        .unwrap();
        let picks: Vec<CardId> = game.player(PlayerId(1)).hand[..2].to_vec();
        apply_action(&mut game, PlayerId(1), Action::TitheDiscard { card_ids: picks }).unwrap();

        apply_action(&mut game, owner, Action::TitheContribute { contribute: true }).unwrap();
        // One renewal: the owner cycles again, alone.
        match &game.pending {
            Some(PendingAction::TitheDiscard {
                responder,
                contributions_paid,
                ..
            }) => {
                assert_eq!(*responder, owner);
                assert_eq!(*contributions_paid, 1);
            }
            other => panic!("expected the owner's renewed cycle, got {other:?}"),
        }
        let picks: Vec<CardId> = game
            .player(owner)
            .hand
            .iter()
            .filter(|c| **c != tithe(5))
            .take(2)
            .copied()
            .collect();
        apply_action(&mut game, owner, Action::TitheDiscard { card_ids: picks }).unwrap();

        apply_action(&mut game, owner, Action::TitheContribute { contribute: false }).unwrap();
        assert!(game.player(owner).territory.contains(&tithe(5)));
        assert_eq!(game.player(owner).contributions_made, 1);
        assert_eq!(game.player(owner).contributions_remaining, 10);
        assert!(game.pending.is_none());
    }

    #[test]
    fn renewals_stop_at_two_without_a_third_prompt() {
        let mut game = GameState::new(&["a", "b"], 67).unwrap();
        let owner = PlayerId(0);
        support::set_hand(&mut game, owner, &[tithe(1), healing(1), healing(2)]);
        start_tithe(&mut game, owner, tithe(1));

        apply_action(
            &mut game,
            owner,
            Action::TitheDiscard {
                card_ids: vec![healing(1), healing(2)],
            },
        )
        .unwrap();
        let picks: Vec<CardId> = game.player(PlayerId(1)).hand[..2].to_vec();
        apply_action(&mut game, PlayerId(1), Action::TitheDiscard { card_ids: picks }).unwrap();

        for _ in 0..2 {
            apply_action(&mut game, owner, Action::TitheContribute { contribute: true }).unwrap();
            let picks: Vec<CardId> = game
                .player(owner)
                .hand
                .iter()
                .filter(|c| **c != tithe(1))
                .take(2)
                .copied()
                .collect();
            apply_action(&mut game, owner, Action::TitheDiscard { card_ids: picks }).unwrap();
        }

        // The cap settles the tithe without asking again.
        assert!(game.pending.is_none());
        assert!(game.player(owner).territory.contains(&tithe(1)));
        assert_eq!(game.player(owner).contributions_made, 2);
    }

    #[test]
    fn broke_owner_cannot_offer_a_contribution() {
        let mut game = GameState::new(&["a", "b"], 67).unwrap();
        let owner = PlayerId(0);
        apply_action(&mut game, owner, Action::DrawCard).unwrap();
        support::set_hand(&mut game, owner, &[tithe(2)]);
        game.player_mut(owner).contributions_remaining = 0;
        apply_action(&mut game, owner, Action::PlayTerritory { card_id: tithe(2) }).unwrap();

        // Holding only the tithe, the owner owes nothing and auto-draws, so
        // the cycle runs straight through to the opponent.
        let picks: Vec<CardId> = game.player(PlayerId(1)).hand[..2].to_vec();
        apply_action(&mut game, PlayerId(1), Action::TitheDiscard { card_ids: picks }).unwrap();
        assert!(matches!(
            game.pending,
            Some(PendingAction::TitheContribute { .. })
        ));

        let before = game.clone();
        let err = apply_action(&mut game, owner, Action::TitheContribute { contribute: true });
        assert_eq!(err, Err(ActionError::InsufficientContributions));
        assert_eq!(game, before);

        apply_action(&mut game, owner, Action::TitheContribute { contribute: false }).unwrap();
        assert!(game.discard.contains(&tithe(2)));
    }

    #[test]
    fn the_tithe_itself_cannot_pay_its_cycle() {
        let mut game = GameState::new(&["a", "b"], 67).unwrap();
        let owner = PlayerId(0);
        support::set_hand(&mut game, owner, &[tithe(4), healing(1), healing(2)]);
        start_tithe(&mut game, owner, tithe(4));

        let err = apply_action(
            &mut game,
            owner,
            Action::TitheDiscard {
                card_ids: vec![tithe(4), healing(1)],
            },
        );
        assert!(matches!(err, Err(ActionError::IllegalChoice(_))));
    }

    #[test]
    fn empty_handed_opponent_still_draws() {
        let mut game = GameState::new(&["a", "b", "c"], 67).unwrap();
        let owner = PlayerId(0);
        support::set_hand(&mut game, owner, &[tithe(6), healing(1), healing(2)]);
        support::set_hand(&mut game, PlayerId(1), &[]);
        start_tithe(&mut game, owner, tithe(6));

        apply_action(
            &mut game,
            owner,
            Action::TitheDiscard {
                card_ids: vec![healing(1), healing(2)],
            },
        )
        .unwrap();

        // Seat 1 had no cards: it drew 2 with no prompt and the cycle moved
        // on to seat 2.
        assert_eq!(game.player(PlayerId(1)).hand.len(), 2);
        match &game.pending {
            Some(PendingAction::TitheDiscard { responder, .. }) => {
                assert_eq!(*responder, PlayerId(2))
            }
            other => panic!("expected seat 2's cycle, got {other:?}"),
        }
    }
}
