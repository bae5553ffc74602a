//! Shared-zone card movement: draws, burns, kingdom dealing, reshuffles.
//!
//! Every deck-touching primitive shares one replenish rule: an empty deck
//! pulls the discard pile back in, shuffles, and burns one card before the
//! original request is served. If the discard pile is empty too the request
//! fails with `DeckExhausted`, which callers turn into end-game scoring
//! rather than an action error.

use crate::card::CardId;
use crate::game_state::GameState;
use crate::ids::PlayerId;

/// A card had to come off the deck and both the deck and discard were empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckExhausted;

fn replenish(game: &mut GameState) -> Result<(), DeckExhausted> {
    if !game.deck.is_empty() {
        return Ok(());
    }
    if game.discard.is_empty() {
        return Err(DeckExhausted);
    }
    game.deck.append(&mut game.discard);
    game.shuffle_deck();
    game.push_log(
        None,
        format!("discard pile reshuffled into the deck ({} cards)", game.deck.len()),
    );
    if let Some(burnt) = game.deck.pop() {
        game.push_log(None, format!("{burnt} burned after the reshuffle"));
        game.burned.push(burnt);
    }
    Ok(())
}

/// Pops the top card of the deck, replenishing first if needed.
pub fn draw_from_top(game: &mut GameState) -> Result<CardId, DeckExhausted> {
    replenish(game)?;
    game.deck.pop().ok_or(DeckExhausted)
}

/// Removes the bottom card of the deck, replenishing first if needed.
pub fn draw_from_bottom(game: &mut GameState) -> Result<CardId, DeckExhausted> {
    replenish(game)?;
    if game.deck.is_empty() {
        return Err(DeckExhausted);
    }
    Ok(game.deck.remove(0))
}

/// Moves the top card of the deck to the burned pile. Callers log the burn.
pub fn burn_from_top(game: &mut GameState) -> Result<CardId, DeckExhausted> {
    let card = draw_from_top(game)?;
    game.burned.push(card);
    Ok(card)
}

/// Deals the top card of the deck face-up into the kingdom row.
pub fn deal_to_kingdom(game: &mut GameState) -> Result<CardId, DeckExhausted> {
    let card = draw_from_top(game)?;
    game.kingdom.push(card);
    Ok(card)
}

/// Sweeps the whole kingdom row into the discard pile.
pub fn discard_kingdom(game: &mut GameState) {
    let swept = std::mem::take(&mut game.kingdom);
    game.discard.extend(swept);
}

/// Slides a card under the deck.
pub fn place_on_deck_bottom(game: &mut GameState, card: CardId) {
    game.deck.insert(0, card);
}

/// Moves a named card from a hand to the discard pile. Returns false and
/// touches nothing if the card is not in that hand.
pub fn discard_from_hand(game: &mut GameState, seat: PlayerId, card: CardId) -> bool {
    if !game.player_mut(seat).remove_from_hand(card) {
        return false;
    }
    game.discard.push(card);
    true
}

/// Moves a named card from a hand to that player's territory. Returns false
/// and touches nothing if the card is not in that hand.
pub fn play_to_territory(game: &mut GameState, seat: PlayerId, card: CardId) -> bool {
    if !game.player_mut(seat).remove_from_hand(card) {
        return false;
    }
    game.player_mut(seat).territory.push(card);
    true
}
