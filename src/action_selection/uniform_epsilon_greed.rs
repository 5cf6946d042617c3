use rand::distributions::Uniform;
use rand::prelude::Distribution;
use rand::Rng;

use crate::env::Action;
use crate::utils::argmax;

/// Epsilon-greedy selection over a row of action values: with probability
/// epsilon a uniformly random action, otherwise the greedy one. All draws
/// come from the caller's generator so the solver's seed stays in charge.
#[derive(Debug, Clone)]
pub struct UniformEpsilonGreed {
    pub epsilon: f64,
    exploration_decider: Uniform<f64>,
    rand_action_selecter: Uniform<usize>,
}

impl UniformEpsilonGreed {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            exploration_decider: Uniform::from(0.0..1.0),
            rand_action_selecter: Uniform::from(0..Action::COUNT),
        }
    }

    fn should_explore(&self, rng: &mut impl Rng) -> bool {
        self.epsilon != 0.0 && self.exploration_decider.sample(rng) < self.epsilon
    }

    pub fn get_action(&self, values: &[f64; Action::COUNT], rng: &mut impl Rng) -> Action {
        if self.should_explore(rng) {
            Action::ALL[self.rand_action_selecter.sample(rng)]
        } else {
            Action::ALL[argmax(values)]
        }
    }
}
