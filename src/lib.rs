pub mod actions;
pub mod card;
pub mod game_state;
pub mod ids;
pub mod pending;
pub mod player;
pub mod resolutions;
pub mod turn;
pub mod view;
pub mod win;
pub mod zones;

#[cfg(test)]
mod tests;

pub use actions::{Action, ActionError, ActionKind, apply_action};
pub use card::{CATALOG_SIZE, CardId, CardKind, catalog, stag_atonement_cost, stag_discard_cost};
pub use game_state::{
    GameState, KINGDOM_SIZE, LOG_TAIL, LogEntry, MAX_PLAYERS, MIN_PLAYERS, NewGameError,
    STAG_WIN_TOTAL, STARTING_ANTE, STARTING_HAND, TurnPhase, WinReason,
};
pub use ids::PlayerId;
pub use pending::PendingAction;
pub use player::{BASE_HAND_LIMIT, MAGI_HEALING_VALUE, Player, STARTING_TOKENS};
pub use view::{PlayerPublic, PlayerView, available_actions, player_view};
pub use win::deck_out_score;
