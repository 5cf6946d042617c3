use float_eq::assert_float_eq;

use gridworld_mdp::{Action, GridWorld, PolicyIteration, QLearning, State, ValueIteration};

const GAMMAS: [f64; 3] = [0.9, 0.5, 0.1];

#[test]
fn value_and_policy_iteration_agree_for_every_discount() {
    let env = GridWorld::new();
    for (i, &gamma) in GAMMAS.iter().enumerate() {
        let (vi_values, vi_policy) = ValueIteration::new().solve(&env, gamma).unwrap();
        let (pi_values, pi_policy, iterations) =
            PolicyIteration::new(100 + i as u64).solve(&env, gamma).unwrap();

        assert!(iterations >= 1);
        for (state, value) in &vi_values {
            assert_float_eq!(pi_values[state], *value, abs <= 1e-4);
        }
        assert_eq!(vi_policy, pi_policy);
    }
}

#[test]
fn reference_scenario_at_gamma_09() {
    let env = GridWorld::new();
    let (values, policy) = ValueIteration::new().solve(&env, 0.9).unwrap();

    assert_float_eq!(values[&State::new(0, 0)], 24.9318, abs <= 1e-3);
    assert_float_eq!(values[&State::new(1, 0)], 22.4386, abs <= 1e-3);
    assert_float_eq!(values[&State::new(2, 0)], 20.1948, abs <= 1e-3);
    assert_float_eq!(values[&State::new(0, 1)], 27.702, abs <= 1e-3);
    assert_float_eq!(values[&State::new(0, 2)], 30.78, abs <= 1e-3);
    assert_float_eq!(values[&State::new(0, 3)], 34.2, abs <= 1e-3);
    assert_float_eq!(values[&State::new(1, 3)], 38.0, abs <= 1e-3);
    assert_float_eq!(values[&State::new(2, 2)], 38.0, abs <= 1e-3);

    // the walk heads for the +10/+20 terminals and never enters (2, 1)
    assert_eq!(policy[&State::new(0, 3)], Some(Action::Right));
    assert_eq!(policy[&State::new(1, 3)], Some(Action::Right));
    assert_eq!(policy[&State::new(2, 2)], Some(Action::Down));
    assert_eq!(policy[&State::new(0, 0)], Some(Action::Down));
    assert_eq!(policy[&State::new(1, 0)], Some(Action::Left));
    assert_eq!(policy[&State::new(2, 0)], Some(Action::Left));
}

#[test]
fn terminal_values_equal_rewards_in_both_solvers() {
    let env = GridWorld::new();
    for &gamma in &GAMMAS {
        let (vi_values, _) = ValueIteration::new().solve(&env, gamma).unwrap();
        let (pi_values, _, _) = PolicyIteration::new(9).solve(&env, gamma).unwrap();
        for &state in env.states() {
            if env.is_terminal(state) {
                assert_eq!(vi_values[&state], env.reward(state));
                assert_eq!(pi_values[&state], env.reward(state));
            }
        }
    }
}

#[test]
fn q_learning_matches_the_optimal_policy_on_high_signal_states() {
    let env = GridWorld::new();
    let (_, vi_policy) = ValueIteration::new().solve(&env, 0.9).unwrap();

    // Q-learning is stochastic, so ask for a majority over seeded runs on
    // the states adjacent to the +20 terminal rather than an exact match.
    let high_signal = [State::new(1, 3), State::new(2, 2)];
    let mut matching_runs: u32 = 0;
    for seed in [1, 3, 5, 7, 11] {
        let (_, policy, _) = QLearning::new(seed).solve(&env, 0.9).unwrap();
        if high_signal.iter().all(|state| policy[state] == vi_policy[state]) {
            matching_runs += 1;
        }
    }
    assert!(
        matching_runs >= 3,
        "greedy policy matched the optimal one on only {} of 5 seeded runs",
        matching_runs
    );
}
