use fxhash::{FxHashMap, FxHashSet};

use crate::env::{Action, State};

/// The fixed 3x4 deterministic MDP: 12 states, 4 absorbing terminals with
/// the only non-zero rewards, unit moves that stop at the grid border.
#[derive(Debug, Clone)]
pub struct GridWorld {
    states: Vec<State>,
    terminal_states: FxHashSet<State>,
    rewards: FxHashMap<State, f64>,
}

impl GridWorld {
    pub const WIDTH: i32 = 3;
    pub const HEIGHT: i32 = 4;

    const TERMINAL_REWARDS: [(State, f64); 4] = [
        (State::new(1, 1), -10.0),
        (State::new(2, 1), -20.0),
        (State::new(1, 2), 10.0),
        (State::new(2, 3), 20.0),
    ];

    pub fn new() -> Self {
        let mut states: Vec<State> = Vec::with_capacity((Self::WIDTH * Self::HEIGHT) as usize);
        for y in 0..Self::HEIGHT {
            for x in 0..Self::WIDTH {
                states.push(State::new(x, y));
            }
        }
        let terminal_states: FxHashSet<State> = Self::TERMINAL_REWARDS
            .iter()
            .map(|&(state, _)| state)
            .collect();
        let rewards: FxHashMap<State, f64> = Self::TERMINAL_REWARDS.iter().copied().collect();
        Self {
            states,
            terminal_states,
            rewards,
        }
    }

    /// All states in row-major order, the order every table is built in.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn non_terminal_states(&self) -> Vec<State> {
        self.states
            .iter()
            .copied()
            .filter(|&state| !self.is_terminal(state))
            .collect()
    }

    pub fn is_terminal(&self, state: State) -> bool {
        self.terminal_states.contains(&state)
    }

    /// The canonical validity test: membership in the coordinate range.
    pub fn contains(&self, state: State) -> bool {
        state.x >= 0 && state.x < Self::WIDTH && state.y >= 0 && state.y < Self::HEIGHT
    }

    /// Deterministic next state. Terminal states absorb every action, and a
    /// move that would leave the grid leaves the state unchanged.
    pub fn transition(&self, state: State, action: Action) -> State {
        if self.is_terminal(state) {
            return state;
        }
        let (dx, dy) = action.delta();
        let next = State::new(state.x + dx, state.y + dy);
        if self.contains(next) {
            next
        } else {
            state
        }
    }

    pub fn reward(&self, state: State) -> f64 {
        self.rewards.get(&state).copied().unwrap_or(0.0)
    }
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new()
    }
}
