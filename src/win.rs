//! Atonement, elimination, and the three ways the game ends.
//!
//! All checks are idempotent and do nothing once a winner exists, so the
//! sub-engines can call them freely after every atonement-bearing step.

use crate::card::{self, CardId, CardKind};
use crate::game_state::{GameState, STAG_WIN_TOTAL, WinReason};
use crate::ids::PlayerId;
use crate::player::Player;

/// Settles the atonement owed when a Stag leaves `seat`'s hand by discard.
///
/// Free when the territory healing value covers the stag's value. Otherwise
/// the table cost moves remaining to made; a player who cannot pay in full
/// is eliminated instead, with nothing deducted. Elimination here is a
/// legal outcome of the discard, not an error.
pub fn apply_atonement(game: &mut GameState, seat: PlayerId, stag: CardId) {
    if game.winner.is_some() || game.player(seat).eliminated {
        return;
    }
    if game.player(seat).territory_healing_value() >= stag.value as u32 {
        game.push_log(Some(seat), format!("healing covers the atonement for {stag}"));
        return;
    }
    let cost = card::stag_atonement_cost(stag.value);
    if game.player_mut(seat).pay_tokens(cost) {
        game.push_log(
            Some(seat),
            format!("paid {cost} atonement for discarding {stag}"),
        );
    } else {
        game.push_log(
            Some(seat),
            format!("cannot pay the {cost} atonement for {stag}"),
        );
        eliminate(game, seat);
    }
}

/// Removes a seat from play: sets the flag, drops the seat from the turn
/// order (adjusting `current_index` so the rotation stays on the right
/// player), dumps the hand to the discard pile with no further atonement,
/// and re-checks last-standing.
pub fn eliminate(game: &mut GameState, seat: PlayerId) {
    if game.player(seat).eliminated {
        return;
    }
    game.player_mut(seat).eliminated = true;

    if let Some(pos) = game.player_order.iter().position(|p| *p == seat) {
        game.player_order.remove(pos);
        if pos < game.current_index {
            game.current_index -= 1;
        } else if pos == game.current_index {
            if game.current_index >= game.player_order.len() {
                game.current_index = 0;
            }
            // The index already points at the next living seat, so the
            // coming end-of-turn rotation must not move past them.
            game.skip_next_rotation = true;
        }
    }

    let dumped = std::mem::take(&mut game.player_mut(seat).hand);
    let count = dumped.len();
    game.discard.extend(dumped);
    let name = game.player(seat).name.clone();
    game.push_log(
        Some(seat),
        format!("{name} is eliminated and discards {count} cards"),
    );

    check_last_standing(game);
}

/// Immediate win the moment a territory reaches 18 points of Stags.
pub fn check_stag_win(game: &mut GameState, seat: PlayerId) {
    if game.winner.is_some() {
        return;
    }
    if game.player(seat).stag_total() >= STAG_WIN_TOTAL {
        game.declare_winner(seat, WinReason::Stag18);
    }
}

pub fn check_last_standing(game: &mut GameState) {
    if game.winner.is_some() {
        return;
    }
    if game.player_order.len() == 1 {
        game.declare_winner(game.player_order[0], WinReason::LastStanding);
    }
}

/// Ends the game by scoring when the deck cannot serve a draw or burn.
///
/// Ties fall to more territory Magi, then Healing, then Hunt, then King's
/// Command; anything still tied goes to the earlier seat.
pub fn deck_out(game: &mut GameState) {
    if game.winner.is_some() {
        return;
    }

    let mut ranked: Vec<(PlayerId, [u32; 5])> = Vec::new();
    for p in &game.players {
        if p.eliminated {
            continue;
        }
        ranked.push((p.id, score_key(p)));
    }
    for (seat, key) in &ranked {
        let name = game.player(*seat).name.clone();
        game.push_log(Some(*seat), format!("{name} scores {} at deck-out", key[0]));
    }

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some((best, _)) = ranked.first() {
        game.declare_winner(*best, WinReason::DeckOut);
    }
}

/// Stags + 3 per Tithe + contributions made + ante + King's Commands.
pub fn deck_out_score(p: &Player) -> u32 {
    p.territory_count(CardKind::Stag) as u32
        + 3 * p.territory_count(CardKind::Tithe) as u32
        + p.contributions_made
        + p.ante
        + p.territory_count(CardKind::KingsCommand) as u32
}

fn score_key(p: &Player) -> [u32; 5] {
    [
        deck_out_score(p),
        p.territory_count(CardKind::Magi) as u32,
        p.territory_count(CardKind::Healing) as u32,
        p.territory_count(CardKind::Hunt) as u32,
        p.territory_count(CardKind::KingsCommand) as u32,
    ]
}
