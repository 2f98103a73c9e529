use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::agent::ConfigError;
use crate::game::GameState;
use crate::utils::manhattan_distance;

/// Hunters at or inside this taxicab radius count as dangerously close.
const DANGER_RADIUS: i32 = 1;
/// Flat shift applied while hunters are safe to approach.
const REGIME_BONUS: f64 = 100.0;

/// Evaluation heuristics selectable by name at agent construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EvalKind {
    /// The state's intrinsic score, nothing else.
    Score,
    /// Score plus pellet/hunter proximity terms.
    Tactical,
}

impl Default for EvalKind {
    fn default() -> Self {
        EvalKind::Score
    }
}

impl EvalKind {
    pub fn evaluate(&self, state: &GameState) -> f64 {
        match self {
            EvalKind::Score => score_evaluation(state),
            EvalKind::Tactical => tactical_evaluation(state),
        }
    }
}

impl FromStr for EvalKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" => Ok(EvalKind::Score),
            "tactical" => Ok(EvalKind::Tactical),
            _ => Err(ConfigError::UnknownEvaluation { name: s.into() }),
        }
    }
}

/// The intrinsic score as-is.
pub fn score_evaluation(state: &GameState) -> f64 {
    state.score as f64
}

/// Score shaped by proximity terms: a bonus for standing near the next
/// pellet, a smooth penalty for being near the pack of hunters, a sharp
/// penalty per adjacent hunter, and a flat bonus while hunters are frightened
/// or a power pellet is in reach. Distances are taxicab; divisors are floored
/// at 1 when nothing remains to measure against.
pub fn tactical_evaluation(state: &GameState) -> f64 {
    let nearest_pellet = state
        .pellets
        .iter()
        .map(|pellet| manhattan_distance(state.player, *pellet))
        .min()
        .unwrap_or(1)
        .max(1);

    let hunter_distances: Vec<i32> = state
        .hunters
        .iter()
        .map(|hunter| manhattan_distance(state.player, hunter.position))
        .collect();
    let pack_distance =
        (hunter_distances.iter().sum::<i32>() + hunter_distances.len() as i32).max(1);
    let adjacent = hunter_distances
        .iter()
        .filter(|distance| **distance <= DANGER_RADIUS)
        .count() as f64;

    let nearest_power_pellet = state
        .power_pellets
        .iter()
        .map(|pellet| manhattan_distance(state.player, *pellet))
        .min()
        .unwrap_or(1);
    let safe_to_approach = state.hunters.iter().any(|hunter| hunter.is_frightened())
        || nearest_power_pellet <= DANGER_RADIUS;

    state.score as f64 + 1.0 / nearest_pellet as f64 - 1.0 / pack_distance as f64 - adjacent
        + if safe_to_approach { REGIME_BONUS } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Hunter, Position};

    fn arena() -> GameState {
        let mut state = GameState::new(11, 11);
        // A distant power pellet keeps the regime bonus out of the picture
        // unless a test frightens a hunter.
        state.power_pellets = vec![Position::new(9, 9)];
        state
    }

    #[test]
    fn score_evaluation_is_the_raw_score() {
        let mut state = arena();
        state.score = -37;
        assert_eq!(score_evaluation(&state), -37.0);
    }

    #[test]
    fn closer_pellets_score_higher() {
        let mut near = arena();
        near.pellets = vec![Position::new(2, 1)];
        let mut far = arena();
        far.pellets = vec![Position::new(8, 1)];

        assert!(
            tactical_evaluation(&near) > tactical_evaluation(&far),
            "a pellet one step away should beat one across the maze"
        );
    }

    #[test]
    fn empty_pellet_and_hunter_lists_stay_finite() {
        let state = arena();
        let value = tactical_evaluation(&state);
        assert!(value.is_finite());
    }

    #[test]
    fn adjacent_hunters_are_penalized_sharply() {
        let mut adjacent = arena();
        adjacent.pellets = vec![Position::new(5, 5)];
        adjacent.hunters = vec![Hunter::new(Position::new(2, 1))];

        let mut distant = arena();
        distant.pellets = vec![Position::new(5, 5)];
        distant.hunters = vec![Hunter::new(Position::new(8, 8))];

        assert!(tactical_evaluation(&adjacent) < tactical_evaluation(&distant));
    }

    #[test]
    fn frightened_hunters_flip_the_regime_bonus() {
        let mut threatened = arena();
        threatened.pellets = vec![Position::new(5, 5)];
        threatened.hunters = vec![Hunter::new(Position::new(4, 1))];

        let mut safe = threatened.clone();
        safe.hunters[0].frightened = 10;

        let difference = tactical_evaluation(&safe) - tactical_evaluation(&threatened);
        assert_eq!(difference, REGIME_BONUS);
    }

    #[test]
    fn power_pellet_in_reach_also_flips_the_bonus() {
        let mut out_of_reach = arena();
        out_of_reach.pellets = vec![Position::new(5, 5)];

        let mut in_reach = out_of_reach.clone();
        in_reach.power_pellets = vec![Position::new(1, 2)];

        let difference = tactical_evaluation(&in_reach) - tactical_evaluation(&out_of_reach);
        assert_eq!(difference, REGIME_BONUS);
    }

    #[test]
    fn eval_kind_parses_known_names_only() {
        assert_eq!("score".parse::<EvalKind>(), Ok(EvalKind::Score));
        assert_eq!("Tactical".parse::<EvalKind>(), Ok(EvalKind::Tactical));
        assert_eq!(
            "bogus".parse::<EvalKind>(),
            Err(ConfigError::UnknownEvaluation {
                name: "bogus".into()
            })
        );
    }
}
