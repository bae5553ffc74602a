//! Helpers for arranging exact cards in tests.
//!
//! Scripted games can only steer card positions through shuffles, so these
//! helpers teleport a named card between zones instead. They always move
//! (never copy) a card, keeping the 51-card conservation invariant intact
//! for the reducer's debug assertions.

use crate::card::CardId;
use crate::game_state::GameState;
use crate::ids::PlayerId;

/// Removes `card` from whatever zone currently holds it. Panics if the
/// card is nowhere, which means the test itself is broken.
pub fn extract(game: &mut GameState, card: CardId) {
    for zone in [&mut game.deck, &mut game.discard, &mut game.burned, &mut game.kingdom] {
        if let Some(pos) = zone.iter().position(|c| *c == card) {
            zone.remove(pos);
            return;
        }
    }
    for player in &mut game.players {
        if let Some(pos) = player.hand.iter().position(|c| *c == card) {
            player.hand.remove(pos);
            return;
        }
        if let Some(pos) = player.territory.iter().position(|c| *c == card) {
            player.territory.remove(pos);
            player.magi_as_healing.retain(|c| *c != card);
            return;
        }
    }
    panic!("{card} is not in any zone");
}

/// Teleports `card` into `seat`'s hand.
pub fn give(game: &mut GameState, seat: PlayerId, card: CardId) {
    if game.player(seat).has_card(card) {
        return;
    }
    extract(game, card);
    game.player_mut(seat).hand.push(card);
}

/// Teleports `card` into `seat`'s territory.
pub fn put_in_territory(game: &mut GameState, seat: PlayerId, card: CardId) {
    extract(game, card);
    game.player_mut(seat).territory.push(card);
}

/// Teleports `card` to the top of the deck.
pub fn put_on_deck_top(game: &mut GameState, card: CardId) {
    extract(game, card);
    game.deck.push(card);
}

/// Empties `seat`'s hand onto the bottom of the deck, leaving only the
/// named cards (teleported in if needed).
pub fn set_hand(game: &mut GameState, seat: PlayerId, cards: &[CardId]) {
    let old = std::mem::take(&mut game.player_mut(seat).hand);
    for card in old {
        game.deck.insert(0, card);
    }
    for &card in cards {
        give(game, seat, card);
    }
}
