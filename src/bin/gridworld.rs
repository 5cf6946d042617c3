use std::time::Instant;

use plotters::style::{RGBColor, BLUE, CYAN, GREEN, MAGENTA, RED, YELLOW};

use gridworld_mdp::utils::{moving_average, plot_moving_average};
use gridworld_mdp::{
    Action, GridWorld, Policy, PolicyIteration, QLearning, SolverError, State, ValueFunction,
    ValueIteration,
};

extern crate structopt;

use structopt::StructOpt;

/// Solve the grid world MDP with policy iteration, value iteration and Q-learning
#[derive(StructOpt, Debug)]
#[structopt(name = "Grid World MDP")]
struct Cli {
    /// Discount factors to solve for
    #[structopt(long = "gammas", default_value = "0.9,0.5,0.1", use_delimiter = true)]
    gammas: Vec<f64>,

    /// Convergence threshold for policy iteration and value iteration
    #[structopt(long = "theta", default_value = "1e-6")]
    theta: f64,

    /// Learning rate of the Q-learning solver
    #[structopt(long = "learning_rate", default_value = "0.1")]
    learning_rate: f64,

    /// Exploration ratio of the Q-learning solver
    #[structopt(long = "epsilon", default_value = "0.1")]
    epsilon: f64,

    /// Number of episodes for the Q-learning training
    #[structopt(long = "n_episodes", short = "n", default_value = "5000")]
    n_episodes: u32,

    /// Maximum number of steps per episode
    #[structopt(long = "max_steps", default_value = "50")]
    max_steps: u32,

    /// Seed for the pseudo random number generators
    #[structopt(long = "seed", default_value = "42")]
    seed: u64,

    /// Moving average window to be used on the visualization of results
    #[structopt(long = "moving_average_window", default_value = "50")]
    moving_average_window: usize,
}

fn print_values(values: &ValueFunction) {
    for (state, value) in values {
        println!("{}: {:.2}", state, value);
    }
}

fn print_policy(policy: &Policy) {
    for (state, action) in policy {
        match action {
            Some(action) => println!("{}: {}", state, action),
            None => println!("{}: terminal", state),
        }
    }
}

fn render_policy(policy: &Policy) -> String {
    let mut map = String::new();
    for y in 0..GridWorld::HEIGHT {
        for x in 0..GridWorld::WIDTH {
            let glyph: char = match policy.get(&State::new(x, y)) {
                Some(Some(Action::Up)) => '^',
                Some(Some(Action::Down)) => 'v',
                Some(Some(Action::Left)) => '<',
                Some(Some(Action::Right)) => '>',
                _ => '#',
            };
            map.push(glyph);
        }
        map.push('\n');
    }
    map
}

fn run(cli: &Cli) -> Result<(), SolverError> {
    let env = GridWorld::new();

    for &gamma in &cli.gammas {
        let mut solver = PolicyIteration::new(cli.seed);
        solver.theta = cli.theta;
        let now: Instant = Instant::now();
        let (v, policy, iterations) = solver.solve(&env, gamma)?;
        println!("\n=== POLICY ITERATION, gamma = {} ===", gamma);
        println!("Time elapsed: {:.2?}", now.elapsed());
        println!("Iterations until convergence: {}", iterations);
        println!("Values:");
        print_values(&v);
        println!("\nPolicy:");
        print_policy(&policy);
        println!("{}", render_policy(&policy));
    }

    for &gamma in &cli.gammas {
        let solver = ValueIteration { theta: cli.theta };
        let now: Instant = Instant::now();
        let (v, policy) = solver.solve(&env, gamma)?;
        println!("\n=== VALUE ITERATION, gamma = {} ===", gamma);
        println!("Time elapsed: {:.2?}", now.elapsed());
        println!("Values:");
        print_values(&v);
        println!("\nPolicy:");
        print_policy(&policy);
        println!("{}", render_policy(&policy));
    }

    let colors: Vec<&'static RGBColor> = vec![&BLUE, &GREEN, &RED, &MAGENTA, &CYAN, &YELLOW];
    let mut reward_curves: Vec<Vec<f64>> = vec![];
    let mut legends: Vec<String> = vec![];

    for &gamma in &cli.gammas {
        let mut solver = QLearning::new(cli.seed);
        solver.alpha = cli.learning_rate;
        solver.epsilon = cli.epsilon;
        solver.episodes = cli.n_episodes;
        solver.max_steps = cli.max_steps;
        let now: Instant = Instant::now();
        let (q, policy, reward_history) = solver.solve(&env, gamma)?;
        println!("\n=== Q LEARNING, gamma = {} ===", gamma);
        println!("Time elapsed: {:.2?}", now.elapsed());
        println!("Policy:");
        print_policy(&policy);
        println!("{}", render_policy(&policy));
        println!("Final Q values:");
        for &state in env.states() {
            if env.is_terminal(state) {
                continue;
            }
            println!("State {}:", state);
            let values = q.action_values(state);
            for (i, action) in Action::ALL.iter().enumerate() {
                println!("  {}: {:.2}", action, values[i]);
            }
        }

        let window: usize = (cli.n_episodes as usize / cli.moving_average_window).max(1);
        reward_curves.push(moving_average(window, &reward_history));
        legends.push(format!("gamma = {}", gamma));
    }

    plot_moving_average(&reward_curves, &colors, &legends, "Q-Learning Rewards");
    Ok(())
}

fn main() {
    let cli: Cli = Cli::from_args();
    if let Err(e) = run(&cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
