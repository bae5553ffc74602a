//! The Hunt: burn three, challenge every opponent in turn, collect the
//! penalty discards, then the hunter draws and the card finally lands in
//! the territory.
//!
//! The hunt value and penalty are frozen when the card is played, so
//! nothing that happens during the resolution (reveals, discards,
//! eliminations) changes what later responders face.

use crate::actions::ActionError;
use crate::card::{CardId, CardKind};
use crate::game_state::{GameState, TurnPhase};
use crate::ids::PlayerId;
use crate::pending::PendingAction;
use crate::player::MAGI_HEALING_VALUE;
use crate::resolutions;
use crate::win;
use crate::zones;

/// Territory action: play a Hunt from hand. Ownership and kind are already
/// checked by the dispatcher.
pub fn play_hunt(game: &mut GameState, seat: PlayerId, card: CardId) -> Result<(), ActionError> {
    game.turn_phase = TurnPhase::EndOfTurn;

    let mut burnt = Vec::with_capacity(3);
    for _ in 0..3 {
        match zones::burn_from_top(game) {
            Ok(c) => burnt.push(c),
            Err(_) => {
                win::deck_out(game);
                return Ok(());
            }
        }
    }

    let hunt_value = card.value + game.player(seat).territory_count(CardKind::Hunt) as u8;
    let penalty = 2 + game.player(seat).territory_count(CardKind::KingsCommand) as u8;

    let name = game.player(seat).name.clone();
    let burnt_list = burnt
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    game.push_log(
        Some(seat),
        format!("{name} plays {card} at hunt value {hunt_value}, burning {burnt_list}"),
    );

    let mut queue = game.opponents_clockwise(seat);
    match resolutions::next_with_cards(game, &mut queue) {
        Some(first) => {
            game.pending = Some(PendingAction::HuntResponse {
                hunter: seat,
                hunt_card: card,
                hunt_value,
                penalty,
                responder: first,
                remaining: queue,
                averters: 0,
                failed: Vec::new(),
            });
        }
        None => finish_hunt(game, seat, card, penalty, 0),
    }
    Ok(())
}

/// One opponent's defense: reveal a Healing card (optionally backed by a
/// Magi) or concede.
pub fn hunt_response(
    game: &mut GameState,
    seat: PlayerId,
    pending: PendingAction,
    healing_id: Option<CardId>,
    magi_id: Option<CardId>,
) -> Result<(), ActionError> {
    let PendingAction::HuntResponse {
        hunter,
        hunt_card,
        hunt_value,
        penalty,
        mut remaining,
        mut averters,
        mut failed,
        ..
    } = pending
    else {
        return Err(ActionError::PhaseMismatch {
            action: crate::actions::ActionKind::HuntResponse,
        });
    };

    if healing_id.is_none() && magi_id.is_some() {
        return Err(ActionError::MalformedPayload(
            "a Magi may only be revealed alongside a Healing card".to_string(),
        ));
    }
    if let Some(h) = healing_id {
        if !game.player(seat).has_card(h) {
            return Err(ActionError::CardNotOwned(h));
        }
        if h.kind != CardKind::Healing {
            return Err(ActionError::IllegalChoice(format!("{h} is not a Healing card")));
        }
    }
    if let Some(m) = magi_id {
        if !game.player(seat).has_card(m) {
            return Err(ActionError::CardNotOwned(m));
        }
        if m.kind != CardKind::Magi {
            return Err(ActionError::IllegalChoice(format!("{m} is not a Magi")));
        }
    }

    let name = game.player(seat).name.clone();
    match healing_id {
        None => {
            game.push_log(Some(seat), format!("{name} concedes to {hunt_card}"));
            failed.push(seat);
        }
        Some(h) => {
            let mut defense = h.value as u32 + game.player(seat).territory_healing_value();
            if let Some(m) = magi_id {
                // The revealed Magi is spent either way: it joins the
                // territory as healing, not as a hand-limit Magi.
                game.player_mut(seat).remove_from_hand(m);
                game.player_mut(seat).territory.push(m);
                game.player_mut(seat).magi_as_healing.push(m);
                defense += MAGI_HEALING_VALUE as u32;
                game.push_log(
                    Some(seat),
                    format!("{name} reveals {m}, placing it in their territory as healing"),
                );
            }
            if defense >= hunt_value as u32 {
                averters += 1;
                game.push_log(
                    Some(seat),
                    format!("{name} reveals {h}: defense {defense} averts the hunt ({hunt_value})"),
                );
            } else {
                failed.push(seat);
                game.push_log(
                    Some(seat),
                    format!("{name} reveals {h}: defense {defense} falls short of {hunt_value}"),
                );
            }
        }
    }

    match resolutions::next_with_cards(game, &mut remaining) {
        Some(next) => {
            game.pending = Some(PendingAction::HuntResponse {
                hunter,
                hunt_card,
                hunt_value,
                penalty,
                responder: next,
                remaining,
                averters,
                failed,
            });
        }
        None => begin_discards(game, hunter, hunt_card, penalty, averters, failed),
    }
    Ok(())
}

/// Walks the failed-seat queue, prompting each for its penalty discards.
fn begin_discards(
    game: &mut GameState,
    hunter: PlayerId,
    hunt_card: CardId,
    penalty: u8,
    averters: u8,
    mut failed: Vec<PlayerId>,
) {
    loop {
        let Some(first) = resolutions::next_living(game, &mut failed) else {
            finish_hunt(game, hunter, hunt_card, penalty, averters);
            return;
        };
        let count = penalty.min(game.player(first).hand.len() as u8);
        if count == 0 {
            continue;
        }
        game.pending = Some(PendingAction::HuntDiscard {
            hunter,
            hunt_card,
            penalty,
            averters,
            responder: first,
            count,
            remaining: failed,
        });
        return;
    }
}

/// One failed seat's penalty payment.
pub fn hunt_discard(
    game: &mut GameState,
    seat: PlayerId,
    pending: PendingAction,
    card_ids: Vec<CardId>,
) -> Result<(), ActionError> {
    let PendingAction::HuntDiscard {
        hunter,
        hunt_card,
        penalty,
        averters,
        count,
        remaining,
        ..
    } = pending
    else {
        return Err(ActionError::PhaseMismatch {
            action: crate::actions::ActionKind::HuntDiscard,
        });
    };

    resolutions::expect_distinct_from_hand(game, seat, &card_ids, count as usize)?;
    resolutions::discard_with_atonement(game, seat, &card_ids);
    if game.winner.is_some() {
        return Ok(());
    }
    begin_discards(game, hunter, hunt_card, penalty, averters, remaining);
    Ok(())
}

/// Hunter draws the spoils and the Hunt card enters the territory.
fn finish_hunt(
    game: &mut GameState,
    hunter: PlayerId,
    hunt_card: CardId,
    penalty: u8,
    averters: u8,
) {
    if game.winner.is_some() {
        return;
    }
    let draws = penalty.saturating_sub(averters);
    for _ in 0..draws {
        match zones::draw_from_top(game) {
            Ok(c) => game.player_mut(hunter).hand.push(c),
            Err(_) => {
                win::deck_out(game);
                return;
            }
        }
    }
    let name = game.player(hunter).name.clone();
    if draws > 0 {
        game.push_log(Some(hunter), format!("{name} draws {draws} cards for the hunt"));
    }
    zones::play_to_territory(game, hunter, hunt_card);
    game.push_log(
        Some(hunter),
        format!("{hunt_card} enters {name}'s territory"),
    );
    game.pending = None;
}
