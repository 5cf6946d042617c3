mod policy_iteration;
mod qlearning;
mod value_iteration;

use indexmap::IndexMap;
use thiserror::Error;

use crate::env::{Action, GridWorld, State};

pub use policy_iteration::{PolicyIteration, PolicyIterationResults};
pub use qlearning::{QLearning, QLearningResults, QTable};
pub use value_iteration::{ValueIteration, ValueIterationResults};

/// Default convergence threshold for the sweep-based solvers.
pub const DEFAULT_THETA: f64 = 1e-6;

/// State values in row-major insertion order.
pub type ValueFunction = IndexMap<State, f64>;

/// Chosen action per state, `None` marking the terminal states.
pub type Policy = IndexMap<State, Option<Action>>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("discount factor must lie in (0, 1), got {0}")]
    InvalidDiscount(f64),
    #[error("convergence threshold must be positive, got {0}")]
    InvalidTheta(f64),
    #[error("learning rate must lie in (0, 1], got {0}")]
    InvalidLearningRate(f64),
    #[error("exploration ratio must lie in [0, 1], got {0}")]
    InvalidExploration(f64),
    #[error("episode count must be positive")]
    NoEpisodes,
    #[error("step limit must be positive")]
    NoSteps,
}

pub(crate) fn check_discount(gamma: f64) -> Result<(), SolverError> {
    if gamma > 0.0 && gamma < 1.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidDiscount(gamma))
    }
}

pub(crate) fn check_theta(theta: f64) -> Result<(), SolverError> {
    if theta > 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidTheta(theta))
    }
}

/// One-step lookahead `reward(s') + gamma * v[s']` for every action, in the
/// fixed action order. Shared by policy improvement and the Bellman backup.
pub(crate) fn action_values(
    env: &GridWorld,
    state: State,
    v: &ValueFunction,
    gamma: f64,
) -> [f64; Action::COUNT] {
    let mut values = [0.0; Action::COUNT];
    for (i, &action) in Action::ALL.iter().enumerate() {
        let next = env.transition(state, action);
        values[i] = env.reward(next) + gamma * v[&next];
    }
    values
}
