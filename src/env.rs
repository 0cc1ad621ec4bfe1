use std::hash::Hash;

/// A trait for state, action, and feature types that can be used as keys in a [`HashMap`](std::collections::HashMap)
pub trait Hashable: Clone + Eq + Hash {}

impl<T> Hashable for T where T: Clone + Eq + Hash {}

/// A full model of a discrete Markov decision process, as required by planning agents
///
/// The state space must be finite. A state with no possible actions is terminal.
pub trait Mdp {
    /// An opaque state identity
    type State: Hashable;

    /// An opaque action identity
    ///
    /// Actions must be totally ordered so that planners can break ties deterministically.
    type Action: Hashable + Ord;

    /// Every state of the process
    fn states(&self) -> Vec<Self::State>;

    /// The actions available in `state`, empty if `state` is terminal
    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The successor distribution of taking `action` in `state`
    ///
    /// **Returns** `(next_state, probability)` pairs whose probabilities sum to 1
    fn transitions(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Vec<(Self::State, f32)>;

    /// The reward for the transition `state --action--> next_state`
    fn reward(&self, state: &Self::State, action: &Self::Action, next_state: &Self::State) -> f32;

    /// Determine if `state` is terminal
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.possible_actions(state).is_empty()
    }
}

impl<M: Mdp + ?Sized> Mdp for &M {
    type State = M::State;
    type Action = M::Action;

    fn states(&self) -> Vec<Self::State> {
        (**self).states()
    }

    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        (**self).possible_actions(state)
    }

    fn transitions(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Vec<(Self::State, f32)> {
        (**self).transitions(state, action)
    }

    fn reward(&self, state: &Self::State, action: &Self::Action, next_state: &Self::State) -> f32 {
        (**self).reward(state, action, next_state)
    }
}

/// The source of legal actions consulted by online learners
///
/// Online learners never enumerate states or need transition probabilities; the environment only
/// has to say which actions are legal in a given state. An empty result marks a terminal state.
///
/// Implemented for any `Fn(&S) -> Vec<A>`.
pub trait LegalActions<S, A> {
    fn legal_actions(&self, state: &S) -> Vec<A>;
}

impl<S, A, F> LegalActions<S, A> for F
where
    F: Fn(&S) -> Vec<A>,
{
    fn legal_actions(&self, state: &S) -> Vec<A> {
        self(state)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use rand::Rng;
    use rand_distr::{Distribution, WeightedIndex};

    use super::*;

    pub(crate) type S = &'static str;
    pub(crate) type A = &'static str;

    /// A table driven MDP for tests
    ///
    /// Each `(state, action)` maps to a list of `(next_state, probability, reward)` outcomes.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct TableMdp {
        states: Vec<S>,
        outcomes: HashMap<(S, A), Vec<(S, f32, f32)>>,
    }

    impl TableMdp {
        pub(crate) fn new(states: &[S]) -> Self {
            Self {
                states: states.to_vec(),
                outcomes: HashMap::new(),
            }
        }

        pub(crate) fn with(mut self, state: S, action: A, outcomes: &[(S, f32, f32)]) -> Self {
            self.outcomes.insert((state, action), outcomes.to_vec());
            self
        }

        /// Closure form of [`Mdp::possible_actions`] for online learners
        pub(crate) fn action_fn(&self) -> impl Fn(&S) -> Vec<A> {
            let mdp = self.clone();
            move |state| mdp.possible_actions(state)
        }

        /// Sample a successor and reward as an environment would
        pub(crate) fn sample<R: Rng>(&self, state: S, action: A, rng: &mut R) -> (S, f32) {
            let outcomes = &self.outcomes[&(state, action)];
            let dist = WeightedIndex::new(outcomes.iter().map(|o| o.1)).unwrap();
            let (next, _, reward) = outcomes[dist.sample(rng)];
            (next, reward)
        }
    }

    impl Mdp for TableMdp {
        type State = S;
        type Action = A;

        fn states(&self) -> Vec<S> {
            self.states.clone()
        }

        fn possible_actions(&self, state: &S) -> Vec<A> {
            let mut actions = self
                .outcomes
                .keys()
                .filter(|(s, _)| s == state)
                .map(|&(_, a)| a)
                .collect::<Vec<_>>();
            actions.sort();
            actions
        }

        fn transitions(&self, state: &S, action: &A) -> Vec<(S, f32)> {
            self.outcomes[&(*state, *action)]
                .iter()
                .map(|&(next, p, _)| (next, p))
                .collect()
        }

        fn reward(&self, state: &S, action: &A, next_state: &S) -> f32 {
            self.outcomes[&(*state, *action)]
                .iter()
                .find(|(next, _, _)| next == next_state)
                .map(|o| o.2)
                .unwrap()
        }
    }

    /// `a --right--> b` with reward 1, `a --stay--> a` with reward 0, `b` terminal
    pub(crate) fn two_state() -> TableMdp {
        TableMdp::new(&["a", "b"])
            .with("a", "right", &[("b", 1.0, 1.0)])
            .with("a", "stay", &[("a", 1.0, 0.0)])
    }

    /// A slippery corridor `s0 - s1 - s2 - s3` ending in terminal `goal` (reward 10) and `pit` (reward -10)
    ///
    /// Moving succeeds with probability 0.8 and slips to the opposite side otherwise.
    pub(crate) fn corridor() -> TableMdp {
        let cells = ["pit", "s0", "s1", "s2", "s3", "goal"];
        let reward = |s: S| match s {
            "goal" => 10.0,
            "pit" => -10.0,
            _ => -0.1,
        };
        let mut mdp = TableMdp::new(&cells);
        for i in 1..cells.len() - 1 {
            let (left, right) = (cells[i - 1], cells[i + 1]);
            mdp = mdp
                .with(
                    cells[i],
                    "left",
                    &[(left, 0.8, reward(left)), (right, 0.2, reward(right))],
                )
                .with(
                    cells[i],
                    "right",
                    &[(right, 0.8, reward(right)), (left, 0.2, reward(left))],
                );
        }
        mdp
    }

    /// One state with two equally valued actions leading to terminal `end`
    pub(crate) fn tie() -> TableMdp {
        TableMdp::new(&["s", "end"])
            .with("s", "a", &[("end", 1.0, 0.0)])
            .with("s", "b", &[("end", 1.0, 0.0)])
    }

    #[test]
    fn table_mdp_queries() {
        let mdp = two_state();
        assert_eq!(mdp.possible_actions(&"a"), ["right", "stay"]);
        assert!(mdp.is_terminal(&"b"), "state without actions is terminal");
        assert_eq!(mdp.transitions(&"a", &"right"), [("b", 1.0)]);
        assert_eq!(mdp.reward(&"a", &"right", &"b"), 1.0);

        let by_ref = &mdp;
        assert_eq!(by_ref.states(), ["a", "b"], "references forward to the model");
    }

    #[test]
    fn corridor_probabilities_sum_to_one() {
        let mdp = corridor();
        for state in mdp.states() {
            for action in mdp.possible_actions(&state) {
                let total: f32 = mdp.transitions(&state, &action).iter().map(|t| t.1).sum();
                assert!((total - 1.0).abs() < 1e-6, "{state}/{action} sums to {total}");
            }
        }
    }
}
