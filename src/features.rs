use std::{collections::HashMap, marker::PhantomData};

use crate::env::Hashable;

/// A sparse feature vector, computed fresh for every query
pub type FeatureVector<F> = HashMap<F, f32>;

/// Maps a `(state, action)` pair to a sparse set of numeric features
///
/// The set of feature names need not be fixed; names never seen before start with zero weight.
pub trait FeatureExtractor {
    type State;
    type Action;
    type Feature: Hashable;

    fn features(&self, state: &Self::State, action: &Self::Action) -> FeatureVector<Self::Feature>;
}

/// One indicator feature per `(state, action)` pair
///
/// With this extractor a linear learner reduces to a tabular one.
pub struct IdentityExtractor<S, A> {
    _marker: PhantomData<fn(&S, &A)>,
}

impl<S, A> IdentityExtractor<S, A> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, A> Default for IdentityExtractor<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Hashable, A: Hashable> FeatureExtractor for IdentityExtractor<S, A> {
    type State = S;
    type Action = A;
    type Feature = (S, A);

    fn features(&self, state: &S, action: &A) -> FeatureVector<(S, A)> {
        HashMap::from([((state.clone(), action.clone()), 1.0)])
    }
}
