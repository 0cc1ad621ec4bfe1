use crate::{ds::Counter, features::FeatureExtractor};

use super::policy::{Bootstrap, QFunction};

/// A linear action-value estimator over extracted features
///
/// Q(s,a) = Σ<sub>f</sub> w<sub>f</sub> · f(s,a), where the features come fresh from the extractor
/// on every query and unseen feature names have weight `0.0`.
pub struct LinearQ<X: FeatureExtractor> {
    extractor: X,
    weights: Counter<X::Feature>,
    bootstrap: Bootstrap,
}

impl<X: FeatureExtractor> LinearQ<X> {
    pub fn new(extractor: X) -> Self {
        Self {
            extractor,
            weights: Counter::new(),
            bootstrap: Bootstrap::Own,
        }
    }

    /// Choose how update targets estimate the next state's value
    pub fn with_bootstrap(mut self, bootstrap: Bootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn weights(&self) -> &Counter<X::Feature> {
        &self.weights
    }

    pub fn extractor(&self) -> &X {
        &self.extractor
    }
}

impl<X> QFunction for LinearQ<X>
where
    X: FeatureExtractor,
    X::State: crate::env::Hashable,
    X::Action: crate::env::Hashable,
{
    type State = X::State;
    type Action = X::Action;

    fn q_value(&self, state: &X::State, action: &X::Action) -> f32 {
        self.weights.dot(&self.extractor.features(state, action))
    }

    /// Semi-gradient step on the squared error between the estimate and `target`
    ///
    /// w<sub>f</sub> ← w<sub>f</sub> + α · (target - Q(s,a)) · f(s,a)
    fn learn(&mut self, state: &X::State, action: &X::Action, target: f32, alpha: f32) {
        let features = self.extractor.features(state, action);
        let correction = target - self.weights.dot(&features);
        for (feature, value) in features {
            self.weights.add(feature, alpha * correction * value);
        }
    }

    fn len(&self) -> usize {
        self.weights.len()
    }

    fn bootstrap(&self) -> Bootstrap {
        self.bootstrap
    }
}
