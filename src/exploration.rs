use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

use crate::{decay::Decay, ensure_interval, error::Result};

/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

/// Epsilon greedy exploration policy with a time-decaying epsilon threshold
///
/// Epsilon is evaluated from the decay strategy at the number of completed episodes.
/// [`validate`](Self::validate) checks that the schedule stays within `[0,1]`.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// **Errors** if the schedule can leave the interval `[0,1]`
    pub fn validate(&self) -> Result<()> {
        let (low, high) = self.epsilon.bounds();
        for epsilon in [low, high] {
            ensure_interval!(epsilon, 0.0, 1.0);
        }
        Ok(())
    }

    /// Exploration probability after `episode` completed episodes
    pub fn epsilon(&self, episode: u32) -> f32 {
        self.epsilon.evaluate(episode)
    }

    /// Invoke epsilon greedy policy for the current episode
    ///
    /// An epsilon outside `[0,1]` never explores.
    pub fn choose<R: Rng + ?Sized>(&self, episode: u32, rng: &mut R) -> Choice {
        let explore = Bernoulli::new(self.epsilon(episode) as f64)
            .map(|coin| coin.sample(rng))
            .unwrap_or(false);
        if explore {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}
