//! Maze state and transition rules.

pub mod rules;
pub mod state;

pub use rules::{
    RuleEngine, RuleError, RuleResolution, FRIGHT_TICKS, HUNTER_SCORE, LOSE_PENALTY, PELLET_SCORE,
    TIME_PENALTY, WIN_BONUS,
};
pub use state::{Action, AgentIndex, GameEvent, GameState, GameStatus, Hunter, Position};
