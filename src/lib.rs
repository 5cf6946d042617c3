pub mod action_selection;
pub mod env;
pub mod solvers;
pub mod utils;

pub use env::{Action, GridWorld, State};
pub use solvers::{
    Policy, PolicyIteration, QLearning, QTable, SolverError, ValueFunction, ValueIteration,
};
