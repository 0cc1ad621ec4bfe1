use std::cmp::Ordering;

use log::{debug, info};

use crate::{agent::ValueEstimationAgent, ds::Counter, ensure_interval, env::Mdp, error::Result};

/// Configuration for [`ValueIteration`]
#[derive(Debug, Clone, Copy)]
pub struct ValueIterationConfig {
    /// The discount factor - must be between 0 and 1
    pub gamma: f32,
    /// Number of Bellman sweeps after the initial one
    pub iters: u32,
}

impl Default for ValueIterationConfig {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            iters: 100,
        }
    }
}

/// The solved value function of an [`Mdp`], computed by synchronous value iteration
///
/// All of the work happens in [`ValueIteration::solve`]; the returned object is immutable and
/// answers queries by one-step lookahead on the stored state values. Requires a full model of the
/// environment's dynamics.
pub struct ValueIteration<M: Mdp> {
    mdp: M,
    gamma: f32,
    values: Counter<M::State>,
    residual: f32,
}

impl<M: Mdp> ValueIteration<M> {
    /// Run `iters + 1` synchronous Bellman sweeps over every state of `mdp`
    ///
    /// Each sweep first commits the values computed by the previous sweep, then computes
    /// V(s) = max<sub>a</sub> Q(s, a) for every state from the committed table only, so the result does
    /// not depend on the order in which states are enumerated. The last sweep is not committed; its
    /// distance from the committed table is kept as [`residual`](Self::residual).
    ///
    /// **Errors** if `gamma` is not in the interval `[0,1]`
    pub fn solve(mdp: M, config: ValueIterationConfig) -> Result<Self> {
        let ValueIterationConfig { gamma, iters } = config;
        ensure_interval!(gamma, 0.0, 1.0);

        let states = mdp.states();
        let mut agent = Self {
            mdp,
            gamma,
            values: Counter::new(),
            residual: 0.0,
        };
        let mut next_values = Counter::new();

        for sweep in 0..=iters {
            // Every state is rewritten below, so after the swap `next_values` holds nothing stale.
            std::mem::swap(&mut agent.values, &mut next_values);

            for state in &states {
                let value = agent.best(state).map_or(0.0, |(value, _)| value);
                next_values.insert(state.clone(), value);
            }

            agent.residual = next_values.max_abs_diff(&agent.values);
            debug!("value iteration sweep {sweep}: max change {}", agent.residual);
        }

        info!(
            "value iteration finished {} sweeps over {} states (residual {})",
            iters as u64 + 1,
            states.len(),
            agent.residual
        );

        Ok(agent)
    }

    /// The expected return of taking `action` in `state` and following the values thereafter
    ///
    /// Σ<sub>s'</sub> P(s'|s,a) (R(s,a,s') + γV(s'))
    fn lookahead(&self, state: &M::State, action: &M::Action) -> f32 {
        self.mdp
            .transitions(state, action)
            .iter()
            .map(|(next_state, prob)| {
                let reward = self.mdp.reward(state, action, next_state);
                prob * (reward + self.gamma * self.values.get(next_state))
            })
            .sum()
    }

    /// The highest valued action and its value, ties going to the greatest action
    fn best(&self, state: &M::State) -> Option<(f32, M::Action)> {
        self.mdp
            .possible_actions(state)
            .into_iter()
            .map(|action| (self.lookahead(state, &action), action))
            .max_by(|(v1, a1), (v2, a2)| {
                v1.partial_cmp(v2)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a1.cmp(a2))
            })
    }

    /// The greedy action in `state`, `None` if `state` is terminal
    pub fn best_action(&self, state: &M::State) -> Option<M::Action> {
        self.best(state).map(|(_, action)| action)
    }

    /// Get the stored value of `state`
    pub fn state_value(&self, state: &M::State) -> f32 {
        self.values.get(state)
    }

    /// Get the agent's state value function
    pub fn values(&self) -> &Counter<M::State> {
        &self.values
    }

    /// The largest change in any state value that one more sweep would make
    pub fn residual(&self) -> f32 {
        self.residual
    }

    pub fn mdp(&self) -> &M {
        &self.mdp
    }
}

impl<M: Mdp> ValueEstimationAgent<M::State, M::Action> for ValueIteration<M> {
    fn q_value(&self, state: &M::State, action: Option<&M::Action>) -> f32 {
        action.map_or(0.0, |action| self.lookahead(state, action))
    }

    fn value(&self, state: &M::State) -> f32 {
        self.state_value(state)
    }

    fn policy(&mut self, state: &M::State) -> Option<M::Action> {
        self.best_action(state)
    }
}
