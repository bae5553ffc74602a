//! The pending-action state machine.
//!
//! Whenever a play requires input from one or more players before the turn
//! can continue, the engine parks a `PendingAction` on the game state. Only
//! the named responder may act, and only with the matching response action.
//! `remaining` queues are ordered clockwise from the seat that triggered the
//! resolution; advancing a queue pops the front into `responder`.

use crate::card::CardId;
use crate::ids::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "camelCase")
)]
pub enum PendingAction {
    /// Opponents each take one kingdom card after the active player drafted.
    DraftKingdom {
        responder: PlayerId,
        remaining: Vec<PlayerId>,
    },
    /// Opponents each take one kingdom card after a Stag was placed.
    StagKingdomDraft {
        stag_player: PlayerId,
        responder: PlayerId,
        remaining: Vec<PlayerId>,
    },
    /// The Stag player takes the last pick once opponents have drafted.
    StagKingdomPickSelf { responder: PlayerId },
    /// Each queued opponent declares a defense against a Hunt, or concedes.
    HuntResponse {
        hunter: PlayerId,
        hunt_card: CardId,
        hunt_value: u8,
        penalty: u8,
        responder: PlayerId,
        remaining: Vec<PlayerId>,
        averters: u8,
        failed: Vec<PlayerId>,
    },
    /// A seat that failed to avert the Hunt chooses its penalty discards.
    HuntDiscard {
        hunter: PlayerId,
        hunt_card: CardId,
        penalty: u8,
        averters: u8,
        responder: PlayerId,
        count: u8,
        remaining: Vec<PlayerId>,
    },
    /// The Magi player splits six cards between top draw, bottom draw, and
    /// cards to place on the deck bottom.
    MagiChoice {
        responder: PlayerId,
        magi_card: CardId,
    },
    /// The Magi player names the cards going to the deck bottom.
    MagiPlaceCards {
        responder: PlayerId,
        magi_card: CardId,
        count: u8,
    },
    /// A queued seat chooses its Tithe discards (the owner first, then each
    /// living opponent).
    TitheDiscard {
        owner: PlayerId,
        tithe_card: CardId,
        responder: PlayerId,
        remaining: Vec<PlayerId>,
        contributions_paid: u8,
    },
    /// The Tithe owner decides whether to pay another contribution and run
    /// the discard cycle again.
    TitheContribute {
        owner: PlayerId,
        tithe_card: CardId,
        contributions_paid: u8,
    },
    /// Each queued opponent surrenders a Stag to the King's Command, or
    /// proves they hold none.
    KingCommandResponse {
        owner: PlayerId,
        responder: PlayerId,
        remaining: Vec<PlayerId>,
        collected: Vec<CardId>,
    },
    /// The King's Command owner picks which surrendered Stags to take.
    KingCommandCollect {
        responder: PlayerId,
        collected: Vec<CardId>,
    },
    /// End-of-turn discard down to the hand limit.
    DiscardToHandLimit { responder: PlayerId, count: u8 },
    /// Deferred cost payment for a Stag played without naming discards.
    DiscardForCost {
        responder: PlayerId,
        stag_card: CardId,
        count: u8,
    },
}

impl PendingAction {
    /// The only seat allowed to act while this pending action is open.
    pub fn responder(&self) -> PlayerId {
        match self {
            PendingAction::DraftKingdom { responder, .. }
            | PendingAction::StagKingdomDraft { responder, .. }
            | PendingAction::StagKingdomPickSelf { responder }
            | PendingAction::HuntResponse { responder, .. }
            | PendingAction::HuntDiscard { responder, .. }
            | PendingAction::MagiChoice { responder, .. }
            | PendingAction::MagiPlaceCards { responder, .. }
            | PendingAction::TitheDiscard { responder, .. }
            | PendingAction::TitheContribute {
                owner: responder, ..
            }
            | PendingAction::KingCommandResponse { responder, .. }
            | PendingAction::KingCommandCollect { responder, .. }
            | PendingAction::DiscardToHandLimit { responder, .. }
            | PendingAction::DiscardForCost { responder, .. } => *responder,
        }
    }
}
