use fxhash::FxHashMap;
use kdam::tqdm;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action_selection::UniformEpsilonGreed;
use crate::env::{Action, GridWorld, State};
use crate::solvers::{check_discount, Policy, SolverError};
use crate::utils::{argmax, max};

/// Action-value table with a zero default row per state.
#[derive(Debug, Clone)]
pub struct QTable {
    default: [f64; Action::COUNT],
    values: FxHashMap<State, [f64; Action::COUNT]>,
}

impl QTable {
    pub fn new() -> Self {
        Self {
            default: [0.0; Action::COUNT],
            values: FxHashMap::default(),
        }
    }

    pub fn action_values(&self, state: State) -> [f64; Action::COUNT] {
        *self.values.get(&state).unwrap_or(&self.default)
    }

    pub fn greedy_action(&self, state: State) -> Action {
        Action::ALL[argmax(&self.action_values(state))]
    }

    fn update(&mut self, state: State, action: Action, amount: f64) {
        self.values.entry(state).or_insert(self.default)[action as usize] += amount;
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Learned Q-table, greedy policy, and per-episode accumulated rewards.
pub type QLearningResults = (QTable, Policy, Vec<f64>);

/// Tabular Q-learning over the grid: episodes start in a uniformly random
/// non-terminal state, actions are epsilon-greedy, and each step applies the
/// one-step temporal-difference update. Model-free: the solver only observes
/// transitions and rewards, it never reads the value recurrence directly.
pub struct QLearning {
    pub alpha: f64,
    pub epsilon: f64,
    pub episodes: u32,
    pub max_steps: u32,
    seed: u64,
}

impl QLearning {
    pub fn new(seed: u64) -> Self {
        Self {
            alpha: 0.1,
            epsilon: 0.1,
            episodes: 5000,
            max_steps: 50,
            seed,
        }
    }

    pub fn solve(&self, env: &GridWorld, gamma: f64) -> Result<QLearningResults, SolverError> {
        check_discount(gamma)?;
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(SolverError::InvalidLearningRate(self.alpha));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(SolverError::InvalidExploration(self.epsilon));
        }
        if self.episodes == 0 {
            return Err(SolverError::NoEpisodes);
        }
        if self.max_steps == 0 {
            return Err(SolverError::NoSteps);
        }

        let action_selection = UniformEpsilonGreed::new(self.epsilon);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let starts: Vec<State> = env.non_terminal_states();
        let mut q = QTable::new();
        let mut reward_history: Vec<f64> = Vec::with_capacity(self.episodes as usize);

        for _ in tqdm!(0..self.episodes) {
            let mut state: State = starts[rng.gen_range(0..starts.len())];
            let mut episode_reward: f64 = 0.0;
            for _ in 0..self.max_steps {
                if env.is_terminal(state) {
                    break;
                }
                let action = action_selection.get_action(&q.action_values(state), &mut rng);
                let next_state = env.transition(state, action);
                let reward = env.reward(next_state);
                let future_q_value: f64 = if env.is_terminal(next_state) {
                    0.0
                } else {
                    max(&q.action_values(next_state))
                };
                let temporal_difference =
                    reward + gamma * future_q_value - q.action_values(state)[action as usize];
                q.update(state, action, self.alpha * temporal_difference);
                episode_reward += reward;
                state = next_state;
            }
            reward_history.push(episode_reward);
        }

        let policy: Policy = env
            .states()
            .iter()
            .map(|&state| {
                let action = if env.is_terminal(state) {
                    None
                } else {
                    Some(q.greedy_action(state))
                };
                (state, action)
            })
            .collect();
        Ok((q, policy, reward_history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn rejects_misuse() {
        let env = GridWorld::new();
        let solver = QLearning::new(0);
        assert_eq!(
            solver.solve(&env, 1.0).unwrap_err(),
            SolverError::InvalidDiscount(1.0)
        );

        let mut solver = QLearning::new(0);
        solver.alpha = 0.0;
        assert_eq!(
            solver.solve(&env, 0.9).unwrap_err(),
            SolverError::InvalidLearningRate(0.0)
        );

        let mut solver = QLearning::new(0);
        solver.epsilon = 1.5;
        assert_eq!(
            solver.solve(&env, 0.9).unwrap_err(),
            SolverError::InvalidExploration(1.5)
        );

        let mut solver = QLearning::new(0);
        solver.episodes = 0;
        assert_eq!(solver.solve(&env, 0.9).unwrap_err(), SolverError::NoEpisodes);

        let mut solver = QLearning::new(0);
        solver.max_steps = 0;
        assert_eq!(solver.solve(&env, 0.9).unwrap_err(), SolverError::NoSteps);
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let env = GridWorld::new();
        let (q_a, policy_a, rewards_a) = QLearning::new(5).solve(&env, 0.9).unwrap();
        let (q_b, policy_b, rewards_b) = QLearning::new(5).solve(&env, 0.9).unwrap();
        assert_eq!(policy_a, policy_b);
        assert_eq!(rewards_a, rewards_b);
        for &state in env.states() {
            assert_eq!(q_a.action_values(state), q_b.action_values(state));
        }
    }

    #[test]
    fn one_reward_entry_per_episode() {
        let env = GridWorld::new();
        let mut solver = QLearning::new(1);
        solver.episodes = 250;
        let (_, _, rewards) = solver.solve(&env, 0.9).unwrap();
        assert_eq!(rewards.len(), 250);
    }

    #[test]
    fn terminal_states_get_no_action() {
        let env = GridWorld::new();
        let mut solver = QLearning::new(2);
        solver.episodes = 100;
        let (_, policy, _) = solver.solve(&env, 0.9).unwrap();
        for &state in env.states() {
            if env.is_terminal(state) {
                assert_eq!(policy[&state], None);
            } else {
                assert!(policy[&state].is_some());
            }
        }
    }

    #[test]
    fn learns_the_moves_next_to_the_big_terminals() {
        let env = GridWorld::new();
        let (q, policy, _) = QLearning::new(7).solve(&env, 0.9).unwrap();
        // (1, 3) sits left of the +20 terminal, (2, 2) right above it
        assert_eq!(policy[&State::new(1, 3)], Some(Action::Right));
        assert_eq!(policy[&State::new(2, 2)], Some(Action::Down));
        // the terminal target is zero, so the entry converges to the reward
        assert_float_eq!(
            q.action_values(State::new(1, 3))[Action::Right as usize],
            20.0,
            abs <= 1.0
        );
    }
}
