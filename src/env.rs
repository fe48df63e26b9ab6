use std::{
    collections::{hash_map::Entry, HashMap},
    ops::Index,
};

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Update the environment in response to an action taken by an agent, producing a new state and associated reward
    ///
    /// **Returns** `(next_state, reward)`, where `next_state` is `None` once the episode is over
    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32);

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;

    /// Sample a random action
    fn random_action(&mut self) -> Self::Action;

    /// Determine if the state is active or terminal
    fn is_active(&self) -> bool {
        true
    }
}

/// An environment with a finite set of actions
pub trait DiscreteActionSpace: Environment {
    /// Get the available actions for the current state
    ///
    /// The returned vec should never be empty, instead specify an action that represents doing nothing if necessary.
    fn actions(&self) -> Vec<Self::Action>;
}

/// Named per-episode counters an environment accumulates while stepping
#[derive(Debug, Clone, Default)]
pub struct Report {
    keys: Vec<&'static str>,
    values: HashMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        let values = keys.iter().map(|k| (*k, 0.0)).collect();
        Self { keys, values }
    }

    /// Counter names in insertion order
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    pub fn entry(&mut self, key: &'static str) -> Entry<'_, &'static str, f64> {
        self.values.entry(key)
    }

    /// Values in the order of [`Report::keys`]
    pub fn values(&self) -> Vec<f64> {
        self.keys.iter().map(|k| self.values[k]).collect()
    }

    /// Take the current values, zeroing every counter
    pub fn take(&mut self) -> HashMap<&'static str, f64> {
        let fresh = self.keys.iter().map(|k| (*k, 0.0)).collect();
        std::mem::replace(&mut self.values, fresh)
    }
}

impl Index<&str> for Report {
    type Output = f64;

    fn index(&self, index: &str) -> &Self::Output {
        &self.values[index]
    }
}
