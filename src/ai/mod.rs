//! Decision-making agents: bounded-depth adversarial search and the
//! one-step reflex variant.

pub mod agent;
pub mod evaluate;
pub mod search;

pub use agent::{AgentConfig, AgentDecision, ConfigError, ReflexAgent, SearchAgent};
pub use evaluate::{score_evaluation, tactical_evaluation, EvalKind};
pub use search::{SearchStats, SearchStrategy, Searcher, Turn};
