//! gridhunt: a turn-based maze-pursuit game core with adversarial search
//! agents.
//!
//! One controlled player races a pack of hunters through a walled grid,
//! eating pellets for points. The [`ai`] module chooses the player's moves
//! with bounded-depth minimax, alpha-beta, or expectimax lookahead (or a
//! one-step reflex policy); the [`game`] module owns the maze state and
//! transition rules. [`GameSession`] ties the two together for hosts that
//! drive a game loop over JSON state snapshots.

pub mod ai;
pub mod game;
pub mod utils;

use serde::Serialize;

pub use ai::{
    score_evaluation, tactical_evaluation, AgentConfig, AgentDecision, ConfigError, EvalKind,
    ReflexAgent, SearchAgent, SearchStats, SearchStrategy, Searcher, Turn,
};
pub use game::{
    Action, AgentIndex, GameEvent, GameState, GameStatus, Hunter, Position, RuleEngine, RuleError,
    RuleResolution,
};

/// A search agent's decision together with the resolution of applying it.
/// `applied` is absent when the game was already decided.
#[derive(Debug, Clone, Serialize)]
pub struct AgentMoveOutcome {
    pub decision: AgentDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<RuleResolution>,
}

/// Owns a running game and exposes the operations a host loop needs: JSON
/// state I/O, raw action application, and agent-driven player moves.
pub struct GameSession {
    state: GameState,
}

impl GameSession {
    /// Starts from the given JSON snapshot, or from the sample maze.
    pub fn new(initial_state_json: Option<&str>) -> Result<Self, serde_json::Error> {
        let state = match initial_state_json {
            Some(json) => serde_json::from_str(json)?,
            None => GameState::sample(),
        };
        Ok(Self { state })
    }

    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    pub fn set_state_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.state = serde_json::from_str(json)?;
        Ok(())
    }

    /// Applies one agent's action and reports what happened.
    pub fn apply_action(
        &mut self,
        agent: AgentIndex,
        action: Action,
    ) -> Result<RuleResolution, RuleError> {
        let engine = RuleEngine::new();
        let events = engine.apply_action(&mut self.state, agent, action)?;
        for event in &events {
            log::debug!("agent {agent} {action:?}: {event:?}");
        }
        Ok(RuleResolution::new(self.state.clone(), events))
    }

    /// Runs a search agent for the player and applies its chosen action.
    pub fn apply_agent_move(&mut self, config: AgentConfig) -> Result<AgentMoveOutcome, RuleError> {
        let agent = SearchAgent::new(config);
        let decision = agent.decide(&self.state);
        let applied = if self.state.is_finished() {
            None
        } else {
            Some(self.apply_action(0, decision.action)?)
        };
        Ok(AgentMoveOutcome { decision, applied })
    }

    /// Runs the caller's reflex agent for the player and applies its action.
    pub fn apply_reflex_move(
        &mut self,
        agent: &mut ReflexAgent,
    ) -> Result<Option<RuleResolution>, RuleError> {
        if self.state.is_finished() {
            return Ok(None);
        }
        let action = agent.choose_action(&self.state);
        self.apply_action(0, action).map(Some)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::from_state(GameState::sample())
    }
}
