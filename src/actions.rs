//! The action boundary: every externally-submitted move enters the engine
//! through [`apply_action`].
//!
//! Validation is fully resolved before any zone is touched, so a rejected
//! action leaves the state exactly as it was. Accepted actions finish by
//! running the turn controller's auto-advance, which carries the game to
//! the next point where input is required.

use std::fmt;

use crate::card::CardId;
use crate::card::CardKind;
use crate::game_state::{GameState, TurnPhase};
use crate::ids::PlayerId;
use crate::resolutions;
use crate::turn;
use crate::win;
use crate::zones;

/// Every move a player can submit, with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Action {
    DrawCard,
    DraftKingdom {
        card_id: CardId,
    },
    PlayStag {
        card_id: CardId,
        /// Cost payment. Empty means "ask me separately" and raises a
        /// `DiscardForCost` pending action.
        discard_ids: Vec<CardId>,
    },
    PlayTerritory {
        card_id: CardId,
    },
    NoTerritory,
    DraftKingdomPick {
        card_id: CardId,
    },
    HuntResponse {
        healing_id: Option<CardId>,
        magi_id: Option<CardId>,
    },
    HuntDiscard {
        card_ids: Vec<CardId>,
    },
    MagiChoice {
        draw_top: u8,
        draw_bottom: u8,
        place_bottom: u8,
    },
    MagiPlaceCards {
        card_ids: Vec<CardId>,
    },
    TitheDiscard {
        card_ids: Vec<CardId>,
    },
    TitheContribute {
        contribute: bool,
    },
    KingCommandResponse {
        stag_id: Option<CardId>,
    },
    KingCommandCollect {
        stag_ids: Vec<CardId>,
    },
    DiscardToHandLimit {
        card_ids: Vec<CardId>,
    },
    DiscardForCost {
        card_ids: Vec<CardId>,
    },
}

/// Payload-free action names, used for legality lists and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum ActionKind {
    DrawCard,
    DraftKingdom,
    PlayStag,
    PlayTerritory,
    NoTerritory,
    DraftKingdomPick,
    HuntResponse,
    HuntDiscard,
    MagiChoice,
    MagiPlaceCards,
    TitheDiscard,
    TitheContribute,
    KingCommandResponse,
    KingCommandCollect,
    DiscardToHandLimit,
    DiscardForCost,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::DrawCard => ActionKind::DrawCard,
            Action::DraftKingdom { .. } => ActionKind::DraftKingdom,
            Action::PlayStag { .. } => ActionKind::PlayStag,
            Action::PlayTerritory { .. } => ActionKind::PlayTerritory,
            Action::NoTerritory => ActionKind::NoTerritory,
            Action::DraftKingdomPick { .. } => ActionKind::DraftKingdomPick,
            Action::HuntResponse { .. } => ActionKind::HuntResponse,
            Action::HuntDiscard { .. } => ActionKind::HuntDiscard,
            Action::MagiChoice { .. } => ActionKind::MagiChoice,
            Action::MagiPlaceCards { .. } => ActionKind::MagiPlaceCards,
            Action::TitheDiscard { .. } => ActionKind::TitheDiscard,
            Action::TitheContribute { .. } => ActionKind::TitheContribute,
            Action::KingCommandResponse { .. } => ActionKind::KingCommandResponse,
            Action::KingCommandCollect { .. } => ActionKind::KingCommandCollect,
            Action::DiscardToHandLimit { .. } => ActionKind::DiscardToHandLimit,
            Action::DiscardForCost { .. } => ActionKind::DiscardForCost,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::DrawCard => "drawCard",
            ActionKind::DraftKingdom => "draftKingdom",
            ActionKind::PlayStag => "playStag",
            ActionKind::PlayTerritory => "playTerritory",
            ActionKind::NoTerritory => "noTerritory",
            ActionKind::DraftKingdomPick => "draftKingdomPick",
            ActionKind::HuntResponse => "huntResponse",
            ActionKind::HuntDiscard => "huntDiscard",
            ActionKind::MagiChoice => "magiChoice",
            ActionKind::MagiPlaceCards => "magiPlaceCards",
            ActionKind::TitheDiscard => "titheDiscard",
            ActionKind::TitheContribute => "titheContribute",
            ActionKind::KingCommandResponse => "kingCommandResponse",
            ActionKind::KingCommandCollect => "kingCommandCollect",
            ActionKind::DiscardToHandLimit => "discardToHandLimit",
            ActionKind::DiscardForCost => "discardForCost",
        };
        write!(f, "{name}")
    }
}

/// Why an action was rejected. Rejections never mutate the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The game already has a winner.
    GameOver,
    /// The action is not legal in the current phase or pending resolution.
    PhaseMismatch { action: ActionKind },
    /// It is another seat's turn.
    NotYourTurn,
    /// An open resolution is waiting on a different seat.
    NotYourResponse,
    /// The acting seat has been eliminated.
    Eliminated,
    /// Structurally invalid payload (wrong count, duplicates, unknown ids).
    MalformedPayload(String),
    /// The referenced card is not where the action requires it to be.
    CardNotOwned(CardId),
    /// Well-formed payload naming a choice the rules forbid.
    IllegalChoice(String),
    /// A tithe contribution was offered with no tokens left to pay it.
    InsufficientContributions,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::GameOver => write!(f, "the game is over"),
            ActionError::PhaseMismatch { action } => {
                write!(f, "{action} is not legal right now")
            }
            ActionError::NotYourTurn => write!(f, "it is not your turn"),
            ActionError::NotYourResponse => {
                write!(f, "another player must respond first")
            }
            ActionError::Eliminated => write!(f, "you have been eliminated"),
            ActionError::MalformedPayload(msg) => write!(f, "malformed payload: {msg}"),
            ActionError::CardNotOwned(card) => write!(f, "{card} is not available to you"),
            ActionError::IllegalChoice(msg) => write!(f, "illegal choice: {msg}"),
            ActionError::InsufficientContributions => {
                write!(f, "no contribution tokens remaining")
            }
        }
    }
}

impl std::error::Error for ActionError {}

/// Validates and applies one action for one seat.
///
/// On `Ok` the state has advanced (including any automatic phases); on
/// `Err` the state is untouched.
pub fn apply_action(
    game: &mut GameState,
    seat: PlayerId,
    action: Action,
) -> Result<(), ActionError> {
    if game.winner.is_some() {
        return Err(ActionError::GameOver);
    }
    if seat.index() >= game.players.len() {
        return Err(ActionError::MalformedPayload(format!(
            "unknown seat {}",
            seat.0
        )));
    }
    if game.player(seat).eliminated {
        return Err(ActionError::Eliminated);
    }

    if let Some(pending) = game.pending.clone() {
        if pending.responder() != seat {
            return Err(ActionError::NotYourResponse);
        }
        resolutions::apply_response(game, seat, pending, action)?;
    } else {
        if game.current_player() != seat {
            return Err(ActionError::NotYourTurn);
        }
        match game.turn_phase {
            TurnPhase::KingdomAction => kingdom_action(game, seat, action)?,
            TurnPhase::TerritoryAction => territory_action(game, seat, action)?,
            _ => {
                return Err(ActionError::PhaseMismatch {
                    action: action.kind(),
                });
            }
        }
    }

    turn::auto_advance(game);
    #[cfg(debug_assertions)]
    debug_assert_eq!(game.total_cards(), crate::card::CATALOG_SIZE);
    Ok(())
}

fn kingdom_action(game: &mut GameState, seat: PlayerId, action: Action) -> Result<(), ActionError> {
    match action {
        Action::DrawCard => {
            match zones::draw_from_top(game) {
                Ok(card) => {
                    game.player_mut(seat).hand.push(card);
                    let name = game.player(seat).name.clone();
                    game.push_log(Some(seat), format!("{name} draws a card"));
                    game.turn_phase = TurnPhase::TerritoryAction;
                }
                Err(_) => win::deck_out(game),
            }
            Ok(())
        }
        Action::DraftKingdom { card_id } => resolutions::draft::begin_draft(game, seat, card_id),
        Action::PlayStag {
            card_id,
            discard_ids,
        } => resolutions::stag::play_stag(game, seat, card_id, discard_ids),
        other => Err(ActionError::PhaseMismatch {
            action: other.kind(),
        }),
    }
}

fn territory_action(
    game: &mut GameState,
    seat: PlayerId,
    action: Action,
) -> Result<(), ActionError> {
    match action {
        Action::PlayTerritory { card_id } => play_territory(game, seat, card_id),
        Action::NoTerritory => {
            let name = game.player(seat).name.clone();
            game.push_log(Some(seat), format!("{name} plays no territory card"));
            game.turn_phase = TurnPhase::EndOfTurn;
            Ok(())
        }
        other => Err(ActionError::PhaseMismatch {
            action: other.kind(),
        }),
    }
}

fn play_territory(game: &mut GameState, seat: PlayerId, card: CardId) -> Result<(), ActionError> {
    if !game.player(seat).has_card(card) {
        return Err(ActionError::CardNotOwned(card));
    }
    match card.kind {
        CardKind::Stag => Err(ActionError::IllegalChoice(
            "a Stag is placed with the playStag kingdom action".to_string(),
        )),
        CardKind::Healing => {
            zones::play_to_territory(game, seat, card);
            let name = game.player(seat).name.clone();
            game.push_log(Some(seat), format!("{name} places {card} in their territory"));
            game.turn_phase = TurnPhase::EndOfTurn;
            Ok(())
        }
        CardKind::Hunt => resolutions::hunt::play_hunt(game, seat, card),
        CardKind::Tithe => resolutions::tithe::play_tithe(game, seat, card),
        CardKind::Magi => resolutions::magi::play_magi(game, seat, card),
        CardKind::KingsCommand => resolutions::kings_command::play_kings_command(game, seat, card),
    }
}
