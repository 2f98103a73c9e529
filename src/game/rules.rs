use serde::{Deserialize, Serialize};

use super::state::{Action, AgentIndex, GameEvent, GameState, GameStatus};

/// Points for eating a pellet.
pub const PELLET_SCORE: i32 = 10;
/// Points for eating a frightened hunter.
pub const HUNTER_SCORE: i32 = 200;
/// Bonus applied when the last pellet is cleared.
pub const WIN_BONUS: i32 = 500;
/// Penalty applied when the player is caught.
pub const LOSE_PENALTY: i32 = 500;
/// Cost of every player move, including standing still.
pub const TIME_PENALTY: i32 = 1;
/// Number of moves a hunter stays frightened after a power pellet is eaten.
pub const FRIGHT_TICKS: u32 = 40;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum RuleError {
    GameFinished,
    AgentOutOfRange { agent: AgentIndex },
    IllegalAction { agent: AgentIndex, action: Action },
}

/// State plus the events produced by one applied action, handed back to
/// session callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResolution {
    pub state: GameState,
    pub events: Vec<GameEvent>,
    pub status: GameStatus,
}

impl RuleResolution {
    pub fn new(state: GameState, events: Vec<GameEvent>) -> Self {
        let status = state.status;
        Self {
            state,
            events,
            status,
        }
    }
}

/// Legality and transition rules. Successor generation is pure: the input
/// state is cloned, never mutated.
#[derive(Debug, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Legal actions for the given agent, in fixed enumeration order.
    ///
    /// A decided game has no legal actions for anyone. The player may move in
    /// any open direction or stand still; hunters must keep moving and may
    /// end up with an empty action set when fully enclosed.
    pub fn legal_actions(state: &GameState, agent: AgentIndex) -> Vec<Action> {
        if state.is_finished() {
            return Vec::new();
        }
        let origin = match state.agent_position(agent) {
            Some(position) => position,
            None => return Vec::new(),
        };
        let mut actions: Vec<Action> = Action::DIRECTIONS
            .iter()
            .copied()
            .filter(|action| {
                let (dx, dy) = action.delta();
                !state.has_wall(origin.offset(dx, dy))
            })
            .collect();
        if agent == 0 {
            actions.push(Action::Stop);
        }
        actions
    }

    /// Applies one agent's action in place, returning the events it produced.
    pub fn apply_action(
        &self,
        state: &mut GameState,
        agent: AgentIndex,
        action: Action,
    ) -> Result<Vec<GameEvent>, RuleError> {
        if state.is_finished() {
            return Err(RuleError::GameFinished);
        }
        if agent >= state.num_agents() {
            return Err(RuleError::AgentOutOfRange { agent });
        }
        if !Self::legal_actions(state, agent).contains(&action) {
            return Err(RuleError::IllegalAction { agent, action });
        }

        let mut events = Vec::new();
        if agent == 0 {
            self.move_player(state, action, &mut events);
        } else {
            self.move_hunter(state, agent, action, &mut events);
        }
        Ok(events)
    }

    /// Pure transition: the successor state reached when `agent` takes
    /// `action` from `state`.
    pub fn generate_successor(
        &self,
        state: &GameState,
        agent: AgentIndex,
        action: Action,
    ) -> Result<GameState, RuleError> {
        let mut next = state.clone();
        self.apply_action(&mut next, agent, action)?;
        Ok(next)
    }

    fn move_player(&self, state: &mut GameState, action: Action, events: &mut Vec<GameEvent>) {
        let (dx, dy) = action.delta();
        state.player = state.player.offset(dx, dy);
        state.score -= TIME_PENALTY;

        if let Some(index) = state.pellets.iter().position(|p| *p == state.player) {
            let at = state.pellets.remove(index);
            state.score += PELLET_SCORE;
            events.push(GameEvent::PelletEaten { at });
        }
        if let Some(index) = state.power_pellets.iter().position(|p| *p == state.player) {
            let at = state.power_pellets.remove(index);
            for hunter in &mut state.hunters {
                hunter.frightened = FRIGHT_TICKS;
            }
            events.push(GameEvent::PowerPelletEaten { at });
        }

        for index in 0..state.hunters.len() {
            self.resolve_collision(state, index, events);
            if state.is_finished() {
                return;
            }
        }

        if state.pellets.is_empty() {
            state.score += WIN_BONUS;
            state.status = GameStatus::Won;
            events.push(GameEvent::GameWon { score: state.score });
        }
    }

    fn move_hunter(
        &self,
        state: &mut GameState,
        agent: AgentIndex,
        action: Action,
        events: &mut Vec<GameEvent>,
    ) {
        let index = agent - 1;
        let (dx, dy) = action.delta();
        let hunter = &mut state.hunters[index];
        hunter.position = hunter.position.offset(dx, dy);
        self.resolve_collision(state, index, events);
        // The frightened countdown ticks once per hunter move.
        state.hunters[index].frightened = state.hunters[index].frightened.saturating_sub(1);
    }

    fn resolve_collision(
        &self,
        state: &mut GameState,
        hunter_index: usize,
        events: &mut Vec<GameEvent>,
    ) {
        if state.hunters[hunter_index].position != state.player {
            return;
        }
        let agent = hunter_index + 1;
        if state.hunters[hunter_index].is_frightened() {
            state.score += HUNTER_SCORE;
            let hunter = &mut state.hunters[hunter_index];
            hunter.position = hunter.spawn;
            hunter.frightened = 0;
            events.push(GameEvent::HunterEaten { hunter: agent });
        } else {
            state.score -= LOSE_PENALTY;
            state.status = GameStatus::Lost;
            events.push(GameEvent::PlayerCaught { hunter: agent });
            events.push(GameEvent::GameLost { score: state.score });
        }
    }
}
