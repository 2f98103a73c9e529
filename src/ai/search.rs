use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::agent::ConfigError;
use super::evaluate::EvalKind;
use crate::game::{Action, AgentIndex, GameState, RuleEngine};

/// The three interchangeable game-tree search algorithms.
///
/// Minimax and AlphaBeta model hunters as optimal minimizers and always agree
/// on values; AlphaBeta just visits less of the tree. Expectimax models each
/// hunter as choosing uniformly at random among its legal moves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl Default for SearchStrategy {
    fn default() -> Self {
        SearchStrategy::Minimax
    }
}

impl FromStr for SearchStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(SearchStrategy::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(SearchStrategy::AlphaBeta),
            "expectimax" => Ok(SearchStrategy::Expectimax),
            _ => Err(ConfigError::UnknownStrategy { name: s.into() }),
        }
    }
}

/// The (agent, depth) pair threaded through the recursion as one value.
///
/// Depth counts completed plies: it increments exactly when the agent index
/// wraps back to the player, and every algorithm advances turns only through
/// [`Turn::advance`], so depth accounting cannot drift between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub agent: AgentIndex,
    pub depth: u32,
}

impl Turn {
    /// The player's turn at the top of the tree.
    pub fn root() -> Self {
        Self { agent: 0, depth: 0 }
    }

    /// Hands the turn to the next agent, starting a new ply when the order
    /// wraps around.
    pub fn advance(self, num_agents: usize) -> Self {
        let agent = (self.agent + 1) % num_agents;
        let depth = if agent == 0 { self.depth + 1 } else { self.depth };
        Self { agent, depth }
    }
}

/// Work counters for one root decision. `eval_calls` counts heuristic
/// invocations, which is what pruning is supposed to reduce.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub eval_calls: u64,
}

/// One bounded-depth lookahead over hypothetical futures.
///
/// Purely synchronous depth-first recursion; each frame holds the turn
/// cursor, the pruning bounds, and a borrowed state. Nothing is shared
/// between sibling branches.
pub struct Searcher {
    evaluation: EvalKind,
    depth_limit: u32,
    pub stats: SearchStats,
}

impl Searcher {
    pub fn new(evaluation: EvalKind, depth_limit: u32) -> Self {
        Self {
            evaluation,
            depth_limit,
            stats: SearchStats::default(),
        }
    }

    /// Root orchestration shared by all three strategies: score every legal
    /// player action one adversary-turn deep and keep the first action that
    /// attains the running maximum. With no legal actions the player stands
    /// still and the state is scored as-is.
    pub fn choose(&mut self, strategy: SearchStrategy, state: &GameState) -> (Action, f64) {
        let engine = RuleEngine::new();
        let legal = RuleEngine::legal_actions(state, 0);
        if legal.is_empty() {
            return (Action::Stop, self.evaluate(state));
        }

        let child = Turn::root().advance(state.num_agents());
        let mut best_action = legal[0];
        let mut best_value = f64::MIN;
        let mut alpha = f64::MIN;
        let beta = f64::MAX;

        for action in legal {
            let successor = match engine.generate_successor(state, 0, action) {
                Ok(successor) => successor,
                Err(_) => continue,
            };
            let value = match strategy {
                SearchStrategy::Minimax => self.minimax(child, &successor),
                SearchStrategy::AlphaBeta => self.alpha_beta(child, &successor, alpha, beta),
                SearchStrategy::Expectimax => self.expectimax(child, &successor),
            };
            if value > best_value {
                best_value = value;
                best_action = action;
            }
            if strategy == SearchStrategy::AlphaBeta {
                alpha = alpha.max(best_value);
            }
        }
        (best_action, best_value)
    }

    fn evaluate(&mut self, state: &GameState) -> f64 {
        self.stats.eval_calls += 1;
        self.evaluation.evaluate(state)
    }

    /// Leaf test shared by the recursive rules: decided games and exhausted
    /// depth budgets are scored on the spot.
    fn is_cutoff(&self, turn: Turn, state: &GameState) -> bool {
        state.is_win() || state.is_lose() || turn.depth == self.depth_limit
    }

    fn minimax(&mut self, turn: Turn, state: &GameState) -> f64 {
        self.stats.nodes += 1;
        if self.is_cutoff(turn, state) {
            return self.evaluate(state);
        }
        let legal = RuleEngine::legal_actions(state, turn.agent);
        if legal.is_empty() {
            return self.evaluate(state);
        }

        let engine = RuleEngine::new();
        let next = turn.advance(state.num_agents());
        if turn.agent == 0 {
            let mut value = f64::MIN;
            for action in legal {
                let Ok(successor) = engine.generate_successor(state, turn.agent, action) else {
                    continue;
                };
                value = value.max(self.minimax(next, &successor));
            }
            value
        } else {
            let mut value = f64::MAX;
            for action in legal {
                let Ok(successor) = engine.generate_successor(state, turn.agent, action) else {
                    continue;
                };
                value = value.min(self.minimax(next, &successor));
            }
            value
        }
    }

    /// Minimax with pruning bounds passed by value down each call. A branch
    /// is abandoned as soon as its running value strictly crosses the bound
    /// the parent already holds, before any further child is evaluated.
    fn alpha_beta(&mut self, turn: Turn, state: &GameState, mut alpha: f64, mut beta: f64) -> f64 {
        self.stats.nodes += 1;
        if self.is_cutoff(turn, state) {
            return self.evaluate(state);
        }
        let legal = RuleEngine::legal_actions(state, turn.agent);
        if legal.is_empty() {
            return self.evaluate(state);
        }

        let engine = RuleEngine::new();
        let next = turn.advance(state.num_agents());
        if turn.agent == 0 {
            let mut value = f64::MIN;
            for action in legal {
                let Ok(successor) = engine.generate_successor(state, turn.agent, action) else {
                    continue;
                };
                value = value.max(self.alpha_beta(next, &successor, alpha, beta));
                if value > beta {
                    return value;
                }
                alpha = alpha.max(value);
            }
            value
        } else {
            let mut value = f64::MAX;
            for action in legal {
                let Ok(successor) = engine.generate_successor(state, turn.agent, action) else {
                    continue;
                };
                value = value.min(self.alpha_beta(next, &successor, alpha, beta));
                if value < alpha {
                    return value;
                }
                beta = beta.min(value);
            }
            value
        }
    }

    fn expectimax(&mut self, turn: Turn, state: &GameState) -> f64 {
        self.stats.nodes += 1;
        if self.is_cutoff(turn, state) {
            return self.evaluate(state);
        }
        let legal = RuleEngine::legal_actions(state, turn.agent);
        if legal.is_empty() {
            return self.evaluate(state);
        }

        let engine = RuleEngine::new();
        let next = turn.advance(state.num_agents());
        if turn.agent == 0 {
            let mut value = f64::MIN;
            for action in legal {
                let Ok(successor) = engine.generate_successor(state, turn.agent, action) else {
                    continue;
                };
                value = value.max(self.expectimax(next, &successor));
            }
            value
        } else {
            // Hunters pick uniformly at random among their legal moves, so
            // the weights come from the branches actually expanded.
            let mut total = 0.0;
            let mut branches = 0u32;
            for action in legal {
                let Ok(successor) = engine.generate_successor(state, turn.agent, action) else {
                    continue;
                };
                total += self.expectimax(next, &successor);
                branches += 1;
            }
            if branches == 0 {
                return self.evaluate(state);
            }
            total / f64::from(branches)
        }
    }
}
