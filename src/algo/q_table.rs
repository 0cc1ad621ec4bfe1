use crate::{ds::Counter, env::Hashable};

use super::policy::QFunction;

/// A table of Q values, one entry per visited `(state, action)` pair
///
/// Unvisited pairs read `0.0`. The table only grows; entries are never pruned, though the owner
/// may [`clear`](Self::clear) it.
///
/// ### Generics
/// - `S`, `A` - The state and action types must be `Clone`, `Eq`, and `Hash` to be used as keys in a
///   [`HashMap`](std::collections::HashMap)
#[derive(Debug, Clone)]
pub struct QTable<S: Hashable, A: Hashable> {
    table: Counter<(S, A)>,
}

impl<S: Hashable, A: Hashable> Default for QTable<S, A> {
    fn default() -> Self {
        Self {
            table: Counter::new(),
        }
    }
}

impl<S: Hashable, A: Hashable> QTable<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &S, action: &A) -> f32 {
        self.table.get(&(state.clone(), action.clone()))
    }

    pub fn set(&mut self, state: S, action: A, value: f32) {
        self.table.insert((state, action), value);
    }

    pub fn table(&self) -> &Counter<(S, A)> {
        &self.table
    }

    /// Forget every learned value
    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<S: Hashable, A: Hashable> QFunction for QTable<S, A> {
    type State = S;
    type Action = A;

    fn q_value(&self, state: &S, action: &A) -> f32 {
        self.get(state, action)
    }

    /// Q(s,a) ← Q(s,a) + α(target - Q(s,a)), i.e. (1 - α)Q(s,a) + α·target
    ///
    /// Written in incremental form so that a target equal to the current value leaves it unchanged.
    fn learn(&mut self, state: &S, action: &A, target: f32, alpha: f32) {
        let q = self.table.entry((state.clone(), action.clone()));
        *q += alpha * (target - *q);
    }

    fn len(&self) -> usize {
        self.table.len()
    }
}
