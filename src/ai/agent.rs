use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::evaluate::{tactical_evaluation, EvalKind};
use super::search::{SearchStats, SearchStrategy, Searcher};
use crate::game::{Action, GameState, RuleEngine};

/// Construction-time configuration failures. Unknown names are fatal here,
/// never during search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ConfigError {
    UnknownEvaluation { name: String },
    UnknownStrategy { name: String },
}

/// Which algorithm to run, which heuristic scores the leaves, and how many
/// full plies to look ahead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    #[serde(default)]
    pub strategy: SearchStrategy,
    #[serde(default)]
    pub evaluation: EvalKind,
    #[serde(default = "default_depth")]
    pub depth: u32,
}

fn default_depth() -> u32 {
    2
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::Minimax,
            evaluation: EvalKind::Score,
            depth: default_depth(),
        }
    }
}

impl AgentConfig {
    pub fn new(strategy: SearchStrategy, evaluation: EvalKind, depth: u32) -> Self {
        Self {
            strategy,
            evaluation,
            depth,
        }
    }

    /// Resolves strategy and evaluation by name, failing fast on unknown
    /// identifiers.
    pub fn from_names(strategy: &str, evaluation: &str, depth: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            strategy: strategy.parse()?,
            evaluation: evaluation.parse()?,
            depth,
        })
    }
}

/// One root decision with its instrumentation, for callers that want more
/// than the bare action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentDecision {
    pub action: Action,
    pub value: f64,
    pub nodes: u64,
    pub eval_calls: u64,
    pub strategy: SearchStrategy,
}

/// The per-turn decision point: runs the configured lookahead over the
/// current state and returns the best immediate action.
#[derive(Debug, Clone)]
pub struct SearchAgent {
    config: AgentConfig,
}

impl SearchAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    pub fn from_names(strategy: &str, evaluation: &str, depth: u32) -> Result<Self, ConfigError> {
        Ok(Self::new(AgentConfig::from_names(strategy, evaluation, depth)?))
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn decide(&self, state: &GameState) -> AgentDecision {
        let mut searcher = Searcher::new(self.config.evaluation, self.config.depth);
        let (action, value) = searcher.choose(self.config.strategy, state);
        let SearchStats { nodes, eval_calls } = searcher.stats;
        log::debug!(
            "{:?} depth {} picked {:?} (value {:.2}, {} nodes, {} evals)",
            self.config.strategy,
            self.config.depth,
            action,
            value,
            nodes,
            eval_calls,
        );
        AgentDecision {
            action,
            value,
            nodes,
            eval_calls,
            strategy: self.config.strategy,
        }
    }

    pub fn choose_action(&self, state: &GameState) -> Action {
        self.decide(state).action
    }
}

/// One-step lookahead with no adversary modeling: each legal action's
/// immediate successor is scored with the tactical heuristic and ties for
/// the maximum are broken uniformly at random.
pub struct ReflexAgent {
    rng: SmallRng,
}

impl ReflexAgent {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn choose_action(&mut self, state: &GameState) -> Action {
        let engine = RuleEngine::new();
        let legal = RuleEngine::legal_actions(state, 0);
        if legal.is_empty() {
            return Action::Stop;
        }

        let scored: Vec<(Action, f64)> = legal
            .iter()
            .filter_map(|&action| {
                engine
                    .generate_successor(state, 0, action)
                    .ok()
                    .map(|successor| (action, tactical_evaluation(&successor)))
            })
            .collect();
        let best = scored
            .iter()
            .map(|(_, value)| *value)
            .fold(f64::MIN, f64::max);
        let tied: Vec<Action> = scored
            .iter()
            .filter(|(_, value)| *value == best)
            .map(|(action, _)| *action)
            .collect();
        tied.choose(&mut self.rng).copied().unwrap_or(Action::Stop)
    }
}

impl Default for ReflexAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameStatus, Hunter, Position};
    use std::collections::HashSet;

    #[test]
    fn default_config_is_minimax_score_depth_two() {
        let config = AgentConfig::default();
        assert_eq!(config.strategy, SearchStrategy::Minimax);
        assert_eq!(config.evaluation, EvalKind::Score);
        assert_eq!(config.depth, 2);
    }

    #[test]
    fn unknown_names_fail_at_construction() {
        let err = AgentConfig::from_names("minimax", "bogus", 2)
            .expect_err("unknown evaluation should fail");
        assert_eq!(
            err,
            ConfigError::UnknownEvaluation {
                name: "bogus".into()
            }
        );

        let err = AgentConfig::from_names("bogus", "score", 2)
            .expect_err("unknown strategy should fail");
        assert_eq!(
            err,
            ConfigError::UnknownStrategy {
                name: "bogus".into()
            }
        );
    }

    #[test]
    fn from_names_accepts_the_documented_spellings() {
        for (strategy, expected) in [
            ("minimax", SearchStrategy::Minimax),
            ("alphabeta", SearchStrategy::AlphaBeta),
            ("alpha-beta", SearchStrategy::AlphaBeta),
            ("expectimax", SearchStrategy::Expectimax),
        ] {
            let config = AgentConfig::from_names(strategy, "tactical", 3)
                .expect("spelling should be accepted");
            assert_eq!(config.strategy, expected);
            assert_eq!(config.evaluation, EvalKind::Tactical);
            assert_eq!(config.depth, 3);
        }
    }

    #[test]
    fn search_agent_returns_a_legal_action_on_the_sample_maze() {
        let state = GameState::sample();
        let legal = RuleEngine::legal_actions(&state, 0);
        for strategy in ["minimax", "alphabeta", "expectimax"] {
            let agent =
                SearchAgent::from_names(strategy, "tactical", 2).expect("config should parse");
            let decision = agent.decide(&state);
            assert!(
                legal.contains(&decision.action),
                "{strategy} picked illegal {:?}",
                decision.action
            );
            assert!(decision.nodes > 0);
            assert!(decision.eval_calls > 0);
        }
    }

    #[test]
    fn search_agent_stands_still_once_the_game_is_decided() {
        let mut state = GameState::sample();
        state.status = GameStatus::Lost;
        let agent = SearchAgent::new(AgentConfig::default());
        assert_eq!(agent.choose_action(&state), Action::Stop);
    }

    #[test]
    fn reflex_agent_samples_uniformly_among_tied_actions() {
        // Pellets one step east and west, none reachable by standing still:
        // East and West tie for the maximum and Stop scores below them.
        let mut state = GameState::new(7, 3);
        state.player = Position::new(3, 1);
        state.pellets = vec![Position::new(1, 1), Position::new(5, 1)];

        let mut seen = HashSet::new();
        for seed in 0..40 {
            let mut agent = ReflexAgent::with_seed(seed);
            let action = agent.choose_action(&state);
            assert!(
                action == Action::East || action == Action::West,
                "stop is dominated, got {action:?}"
            );
            seen.insert(action);
        }
        assert_eq!(seen.len(), 2, "both tied actions should be sampled");
    }

    #[test]
    fn reflex_agent_avoids_walking_into_a_hunter() {
        let mut state = GameState::new(7, 3);
        state.player = Position::new(3, 1);
        state.pellets = vec![Position::new(5, 1)];
        state.hunters = vec![Hunter::new(Position::new(2, 1))];

        let mut agent = ReflexAgent::with_seed(7);
        let action = agent.choose_action(&state);
        assert_eq!(action, Action::East, "east leads to food, west to a hunter");
    }

    #[test]
    fn reflex_agent_with_no_legal_actions_stands_still() {
        let mut state = GameState::sample();
        state.status = GameStatus::Won;
        let mut agent = ReflexAgent::with_seed(1);
        assert_eq!(agent.choose_action(&state), Action::Stop);
    }
}
