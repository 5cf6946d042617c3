use crate::env::{Action, GridWorld};
use crate::solvers::{
    action_values, check_discount, check_theta, Policy, SolverError, ValueFunction, DEFAULT_THETA,
};
use crate::utils::{argmax, max};

/// Converged values and the greedy policy extracted from them.
pub type ValueIterationResults = (ValueFunction, Policy);

/// Value iteration: repeated synchronous Bellman optimality backups until
/// the largest per-state change drops below theta, then greedy extraction.
pub struct ValueIteration {
    pub theta: f64,
}

impl ValueIteration {
    pub fn new() -> Self {
        Self {
            theta: DEFAULT_THETA,
        }
    }

    pub fn solve(&self, env: &GridWorld, gamma: f64) -> Result<ValueIterationResults, SolverError> {
        check_discount(gamma)?;
        check_theta(self.theta)?;

        let mut v: ValueFunction = env.states().iter().map(|&state| (state, 0.0)).collect();
        loop {
            let (new_v, delta) = sweep(env, &v, gamma);
            v = new_v;
            if delta < self.theta {
                break;
            }
        }
        let policy = greedy_policy(env, &v, gamma);
        Ok((v, policy))
    }
}

impl Default for ValueIteration {
    fn default() -> Self {
        Self::new()
    }
}

/// One synchronous backup over all states. Returns the new values and the
/// largest absolute change, the contraction residual the stop rule watches.
fn sweep(env: &GridWorld, v: &ValueFunction, gamma: f64) -> (ValueFunction, f64) {
    let mut new_v = v.clone();
    let mut delta: f64 = 0.0;
    for &state in env.states() {
        let value = if env.is_terminal(state) {
            env.reward(state)
        } else {
            max(&action_values(env, state, v, gamma))
        };
        delta = delta.max((value - v[&state]).abs());
        new_v.insert(state, value);
    }
    (new_v, delta)
}

fn greedy_policy(env: &GridWorld, v: &ValueFunction, gamma: f64) -> Policy {
    env.states()
        .iter()
        .map(|&state| {
            let action = if env.is_terminal(state) {
                None
            } else {
                Some(Action::ALL[argmax(&action_values(env, state, v, gamma))])
            };
            (state, action)
        })
        .collect()
}
