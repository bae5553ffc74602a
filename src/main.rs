//! Hartcourt - kingdom draft card game engine
//!
//! Self-playing CLI driver: sets up a seeded game, lets a simple bot act
//! for every seat until someone wins, and prints the public log as it
//! happens.
//!
//! ## Usage
//!
//! ```
//! hartcourt [OPTIONS]
//!
//! Options:
//!   --players N   Seats at the table, 2-4 (default 3)
//!   --seed N      Shuffle seed (default: random)
//!   --json        Also dump the winner's final view as JSON
//!   --quiet       Only print the outcome
//! ```

use hartcourt::card::CardKind;
use hartcourt::view::player_view;
use hartcourt::win::deck_out_score;
use hartcourt::{
    Action, ActionKind, CardId, GameState, MAGI_HEALING_VALUE, PendingAction, PlayerView,
    apply_action, stag_discard_cost,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;

struct DriverArgs {
    players: usize,
    seed: Option<u64>,
    json: bool,
    quiet: bool,
}

fn parse_args() -> DriverArgs {
    let args: Vec<String> = env::args().collect();
    let mut players = 3;
    let mut seed = None;
    let mut json = false;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--players" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<usize>() {
                        Ok(n) => players = n,
                        Err(_) => eprintln!("Error: --players requires a number"),
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --players requires a value");
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<u64>() {
                        Ok(n) => seed = Some(n),
                        Err(_) => eprintln!("Error: --seed requires a number"),
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --seed requires a value");
                    i += 1;
                }
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "--quiet" => {
                quiet = true;
                i += 1;
            }
            "--help" | "-h" => {
                println!("Hartcourt - kingdom draft card game engine");
                println!();
                println!("Usage: hartcourt [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --players N   Seats at the table, 2-4 (default 3)");
                println!("  --seed N      Shuffle seed (default: random)");
                println!("  --json        Also dump the winner's final view as JSON");
                println!("  --quiet       Only print the outcome");
                println!("  --help, -h    Show this help message");
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    DriverArgs {
        players,
        seed,
        json,
        quiet,
    }
}

/// Up to `n` distinct hand cards, skipping `exclude`.
fn pick_cards(hand: &[CardId], n: usize, exclude: Option<CardId>) -> Vec<CardId> {
    hand.iter()
        .copied()
        .filter(|c| Some(*c) != exclude)
        .take(n)
        .collect()
}

/// Reveals a defense that averts when one exists, backing it with a Magi
/// only when the Healing alone falls short. Concedes otherwise.
fn hunt_defense(view: &PlayerView, hunt_value: u8) -> Action {
    let me = &view.players[view.seat.index()];
    let healing_sum: u32 = me
        .territory
        .iter()
        .filter(|c| c.kind == CardKind::Healing)
        .map(|c| c.value as u32)
        .sum();
    let base = healing_sum + me.magi_as_healing.len() as u32 * MAGI_HEALING_VALUE as u32;

    let mut healings: Vec<CardId> = view
        .hand
        .iter()
        .copied()
        .filter(|c| c.kind == CardKind::Healing)
        .collect();
    healings.sort_by_key(|c| c.value);

    for h in &healings {
        if base + h.value as u32 >= hunt_value as u32 {
            return Action::HuntResponse {
                healing_id: Some(*h),
                magi_id: None,
            };
        }
    }
    let magi = view.hand.iter().copied().find(|c| c.kind == CardKind::Magi);
    if let (Some(h), Some(m)) = (healings.last(), magi)
        && base + h.value as u32 + MAGI_HEALING_VALUE as u32 >= hunt_value as u32
    {
        return Action::HuntResponse {
            healing_id: Some(*h),
            magi_id: Some(m),
        };
    }
    Action::HuntResponse {
        healing_id: None,
        magi_id: None,
    }
}

/// Fills in a concrete response for the open resolution.
fn choose_response(view: &PlayerView, pending: &PendingAction, rng: &mut StdRng) -> Action {
    match pending {
        PendingAction::DraftKingdom { .. }
        | PendingAction::StagKingdomDraft { .. }
        | PendingAction::StagKingdomPickSelf { .. } => {
            let i = rng.random_range(0..view.kingdom.len());
            Action::DraftKingdomPick {
                card_id: view.kingdom[i],
            }
        }
        PendingAction::HuntResponse { hunt_value, .. } => hunt_defense(view, *hunt_value),
        PendingAction::HuntDiscard { count, .. } => Action::HuntDiscard {
            card_ids: pick_cards(&view.hand, *count as usize, None),
        },
        PendingAction::MagiChoice { .. } => {
            let (draw_top, draw_bottom, place_bottom) = match rng.random_range(0..3) {
                0 => (6, 0, 0),
                1 => (3, 3, 0),
                _ => (2, 1, 3),
            };
            Action::MagiChoice {
                draw_top,
                draw_bottom,
                place_bottom,
            }
        }
        PendingAction::MagiPlaceCards {
            magi_card, count, ..
        } => Action::MagiPlaceCards {
            card_ids: pick_cards(&view.hand, *count as usize, Some(*magi_card)),
        },
        PendingAction::TitheDiscard {
            owner, tithe_card, ..
        } => {
            let own = *owner == view.seat;
            let cap = if own {
                view.hand.len().saturating_sub(1)
            } else {
                view.hand.len()
            };
            Action::TitheDiscard {
                card_ids: pick_cards(&view.hand, cap.min(2), own.then_some(*tithe_card)),
            }
        }
        PendingAction::TitheContribute { .. } => {
            let me = &view.players[view.seat.index()];
            Action::TitheContribute {
                contribute: me.contributions_remaining > 0 && rng.random_bool(0.5),
            }
        }
        PendingAction::KingCommandResponse { .. } => Action::KingCommandResponse {
            stag_id: view
                .hand
                .iter()
                .copied()
                .filter(|c| c.is_stag())
                .min_by_key(|c| c.value),
        },
        PendingAction::KingCommandCollect { collected, .. } => Action::KingCommandCollect {
            stag_ids: collected.clone(),
        },
        PendingAction::DiscardToHandLimit { count, .. } => Action::DiscardToHandLimit {
            card_ids: pick_cards(&view.hand, *count as usize, None),
        },
        PendingAction::DiscardForCost {
            stag_card, count, ..
        } => Action::DiscardForCost {
            card_ids: pick_cards(&view.hand, *count as usize, Some(*stag_card)),
        },
    }
}

/// Turn-phase policy: place the biggest affordable Stag, otherwise draft
/// or draw, then usually play a territory card.
fn choose_turn_action(view: &PlayerView, rng: &mut StdRng) -> Action {
    if view.available_actions.contains(&ActionKind::PlayStag) {
        let mut stags: Vec<CardId> = view.hand.iter().copied().filter(|c| c.is_stag()).collect();
        stags.sort_by_key(|c| std::cmp::Reverse(c.value));
        for s in stags {
            let cost = stag_discard_cost(s.value);
            if view.hand.len() > cost {
                return Action::PlayStag {
                    card_id: s,
                    discard_ids: pick_cards(&view.hand, cost, Some(s)),
                };
            }
        }
    }
    if view.available_actions.contains(&ActionKind::DraftKingdom) && rng.random_bool(0.5) {
        let i = rng.random_range(0..view.kingdom.len());
        return Action::DraftKingdom {
            card_id: view.kingdom[i],
        };
    }
    if view.available_actions.contains(&ActionKind::DrawCard) {
        return Action::DrawCard;
    }
    if view.available_actions.contains(&ActionKind::PlayTerritory) && rng.random_bool(0.7) {
        let candidates: Vec<CardId> =
            view.hand.iter().copied().filter(|c| !c.is_stag()).collect();
        let i = rng.random_range(0..candidates.len());
        return Action::PlayTerritory {
            card_id: candidates[i],
        };
    }
    Action::NoTerritory
}

fn main() {
    let args = parse_args();
    let seed = args.seed.unwrap_or_else(|| rand::rng().random::<u64>());
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    let roster = ["Alba", "Bren", "Cora", "Dunn"];
    if args.players < 2 || args.players > roster.len() {
        eprintln!("Error: --players must be 2-4");
        std::process::exit(1);
    }
    let names = &roster[..args.players];

    println!("========================================");
    println!("   Hartcourt - kingdom draft engine");
    println!("========================================");
    println!();
    println!("{} players, seed {seed}", args.players);
    println!();

    let mut game = match GameState::new(names, seed) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("Failed to set up the game: {err}");
            std::process::exit(1);
        }
    };

    let mut printed = 0;
    let mut steps = 0;
    while game.winner.is_none() {
        steps += 1;
        if steps > 10_000 {
            eprintln!("Driver gave up after {steps} steps without a winner");
            std::process::exit(1);
        }

        let seat = match &game.pending {
            Some(pending) => pending.responder(),
            None => game.current_player(),
        };
        let view = player_view(&game, seat);
        let action = match &game.pending {
            Some(pending) => choose_response(&view, pending, &mut rng),
            None => choose_turn_action(&view, &mut rng),
        };

        if let Err(err) = apply_action(&mut game, seat, action.clone()) {
            eprintln!("Driver submitted a rejected action for seat {seat}: {err}");
            eprintln!("  {action:?}");
            std::process::exit(1);
        }

        if !args.quiet {
            for entry in &game.log[printed..] {
                println!("[turn {:>3}] {}", entry.turn, entry.message);
            }
        }
        printed = game.log.len();
    }

    println!();
    println!("=== final standings ===");
    for p in &game.players {
        let status = if p.eliminated { " (eliminated)" } else { "" };
        println!(
            "  {}: stags {}, score {}, territory {} cards{status}",
            p.name,
            p.stag_total(),
            deck_out_score(p),
            p.territory.len(),
        );
    }
    if let (Some(winner), Some(reason)) = (game.winner, game.win_reason) {
        println!();
        println!("{} wins ({reason:?})", game.player(winner).name);
    }

    if args.json {
        if let Some(winner) = game.winner {
            match serde_json::to_string_pretty(&player_view(&game, winner)) {
                Ok(text) => println!("{text}"),
                Err(err) => eprintln!("Failed to serialize the final view: {err}"),
            }
        }
    }
}
