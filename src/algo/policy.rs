use rand::{seq::SliceRandom, Rng};

use crate::{env::Hashable, exploration::Choice};

/// Which estimate of the next state's value a learner bootstraps its target from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Bootstrap {
    /// The learner's own greedy value of the next state
    #[default]
    Own,
    /// Always zero, as if bootstrapping from an untrained learner
    ///
    /// The target degenerates to the immediate reward.
    Zero,
}

/// An action-value estimator that can be moved toward a target
///
/// The table-backed and feature-backed learners differ only in this capability; action selection
/// is shared through the free functions in this module.
pub trait QFunction {
    type State: Hashable;
    type Action: Hashable;

    /// Current estimate of Q(state, action)
    fn q_value(&self, state: &Self::State, action: &Self::Action) -> f32;

    /// Move Q(state, action) toward `target` with learning rate `alpha`
    fn learn(&mut self, state: &Self::State, action: &Self::Action, target: f32, alpha: f32);

    /// Number of learned parameters
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bootstrap(&self) -> Bootstrap {
        Bootstrap::Own
    }
}

/// max<sub>a</sub> Q(state, a) over `actions`, or `0.0` if there are none
pub fn value<Q: QFunction>(q: &Q, state: &Q::State, actions: &[Q::Action]) -> f32 {
    actions
        .iter()
        .map(|action| q.q_value(state, action))
        .reduce(f32::max)
        .unwrap_or(0.0)
}

/// Every action in `actions` attaining the maximum Q value
pub fn best_actions<'a, Q: QFunction>(
    q: &Q,
    state: &Q::State,
    actions: &'a [Q::Action],
) -> Vec<&'a Q::Action> {
    let scored = actions
        .iter()
        .map(|action| (q.q_value(state, action), action))
        .collect::<Vec<_>>();
    let Some(best) = scored.iter().map(|(value, _)| *value).reduce(f32::max) else {
        return Vec::new();
    };
    scored
        .into_iter()
        .filter(|(value, _)| *value == best)
        .map(|(_, action)| action)
        .collect()
}

/// The greedy action, chosen uniformly at random among ties, or `None` if there are no actions
pub fn greedy<Q: QFunction, R: Rng + ?Sized>(
    q: &Q,
    state: &Q::State,
    actions: &[Q::Action],
    rng: &mut R,
) -> Option<Q::Action> {
    best_actions(q, state, actions)
        .choose(rng)
        .map(|&action| action.clone())
}

/// A uniformly random legal action on [`Choice::Explore`], the [greedy] action otherwise
pub fn epsilon_greedy<Q: QFunction, R: Rng + ?Sized>(
    q: &Q,
    state: &Q::State,
    actions: &[Q::Action],
    choice: Choice,
    rng: &mut R,
) -> Option<Q::Action> {
    match choice {
        Choice::Explore => actions.choose(rng).cloned(),
        Choice::Exploit => greedy(q, state, actions, rng),
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::algo::q_table::QTable;

    fn table() -> QTable<u8, char> {
        let mut q = QTable::new();
        q.set(0, 'a', 1.0);
        q.set(0, 'b', 3.0);
        q.set(0, 'c', 3.0);
        q.set(0, 'd', -2.0);
        q
    }

    #[test]
    fn value_is_max_or_zero() {
        let q = table();
        assert_eq!(value(&q, &0, &['a', 'b', 'd']), 3.0);
        assert_eq!(value(&q, &0, &['d']), -2.0, "negative maxima are kept");
        assert_eq!(value(&q, &0, &[]), 0.0, "terminal value");
    }

    #[test]
    fn best_actions_collects_ties() {
        let q = table();
        assert_eq!(best_actions(&q, &0, &['a', 'b', 'c', 'd']), [&'b', &'c']);
        assert_eq!(best_actions(&q, &1, &['x', 'y']), [&'x', &'y'], "unseen pairs tie at zero");
        assert!(best_actions(&q, &0, &[]).is_empty());
    }

    #[test]
    fn epsilon_greedy_respects_choice() {
        let q = table();
        let mut rng = StdRng::seed_from_u64(3);
        let actions = ['a', 'd'];
        for _ in 0..100 {
            assert_eq!(
                epsilon_greedy(&q, &0, &actions, Choice::Exploit, &mut rng),
                Some('a')
            );
            assert!(epsilon_greedy(&q, &0, &actions, Choice::Explore, &mut rng).is_some());
        }
        assert_eq!(epsilon_greedy(&q, &0, &[], Choice::Explore, &mut rng), None);
        assert_eq!(greedy(&q, &0, &[], &mut rng), None);
    }
}
