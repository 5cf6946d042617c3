use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Action, GridWorld};
use crate::solvers::{
    action_values, check_discount, check_theta, Policy, SolverError, ValueFunction, DEFAULT_THETA,
};
use crate::utils::argmax;

/// Converged values, converged policy, number of improvement cycles.
pub type PolicyIterationResults = (ValueFunction, Policy, u32);

/// Policy iteration: evaluate the current policy to a fixed point, then
/// greedily improve it, until one full improvement pass changes nothing.
/// The initial policy is random, drawn from the seeded generator.
pub struct PolicyIteration {
    pub theta: f64,
    rng: StdRng,
}

impl PolicyIteration {
    pub fn new(seed: u64) -> Self {
        Self {
            theta: DEFAULT_THETA,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn solve(
        &mut self,
        env: &GridWorld,
        gamma: f64,
    ) -> Result<PolicyIterationResults, SolverError> {
        check_discount(gamma)?;
        check_theta(self.theta)?;

        let mut policy: Policy = env
            .states()
            .iter()
            .map(|&state| {
                let action = if env.is_terminal(state) {
                    None
                } else {
                    Some(Action::ALL[self.rng.gen_range(0..Action::COUNT)])
                };
                (state, action)
            })
            .collect();

        let mut iterations: u32 = 0;
        loop {
            iterations += 1;
            let v = evaluate_policy(env, &policy, gamma, self.theta);

            let mut policy_stable: bool = true;
            for &state in env.states() {
                if env.is_terminal(state) {
                    continue;
                }
                let best = Action::ALL[argmax(&action_values(env, state, &v, gamma))];
                if policy[&state] != Some(best) {
                    policy_stable = false;
                }
                policy.insert(state, Some(best));
            }
            if policy_stable {
                return Ok((v, policy, iterations));
            }
        }
    }
}

/// Synchronous (Jacobi) evaluation of a fixed policy, starting from zero
/// values and sweeping until the largest per-state change drops below theta.
fn evaluate_policy(env: &GridWorld, policy: &Policy, gamma: f64, theta: f64) -> ValueFunction {
    let mut v: ValueFunction = env.states().iter().map(|&state| (state, 0.0)).collect();
    loop {
        let mut delta: f64 = 0.0;
        let mut new_v = v.clone();
        for &state in env.states() {
            let value = match policy[&state] {
                None => env.reward(state),
                Some(action) => {
                    let next = env.transition(state, action);
                    env.reward(next) + gamma * v[&next]
                }
            };
            delta = delta.max((value - v[&state]).abs());
            new_v.insert(state, value);
        }
        v = new_v;
        if delta < theta {
            return v;
        }
    }
}
