use log::{info, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    agent::ValueEstimationAgent,
    decay::{self, Decay},
    ensure_interval,
    env::LegalActions,
    error::Result,
    exp::Exp,
    exploration::{Choice, EpsilonGreedy},
    features::FeatureExtractor,
};

use super::{
    linear::LinearQ,
    policy::{self, Bootstrap, QFunction},
    q_table::QTable,
};

/// Configuration for the [`QLearningAgent`]
#[derive(Debug, Clone)]
pub struct QLearningConfig<D: Decay> {
    /// Exploration policy, evaluated at the number of completed episodes
    ///
    /// **Default**: a [`Constant`](decay::Constant) epsilon of `0.05`
    pub exploration: EpsilonGreedy<D>,
    /// The learning rate - must be between 0 and 1
    ///
    /// **Default**: `0.2`
    pub alpha: f32,
    /// The discount factor - must be between 0 and 1
    ///
    /// **Default**: `0.8`
    pub gamma: f32,
    /// Number of training episodes; learning and exploration stop once this many episodes have ended
    ///
    /// **Default**: `0`
    pub num_training: u32,
    /// Log average rewards every this many episodes, `0` to disable
    ///
    /// **Default**: `100`
    pub report_every: u32,
    /// Seed for exploration and tie-breaking, random if `None`
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for QLearningConfig<decay::Constant> {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(decay::Constant::new(0.05)),
            alpha: 0.2,
            gamma: 0.8,
            num_training: 0,
            report_every: 100,
            seed: None,
        }
    }
}

/// Where the agent stands after an episode ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    /// More training episodes remain
    Training,
    /// The configured number of training episodes has just elapsed
    TrainingComplete,
    /// Training ended earlier; the agent only exploits
    Testing,
}

/// Running reward totals across episodes
#[derive(Debug, Clone, Default)]
struct Rewards {
    episode: f32,
    train: f32,
    test: f32,
    window: f32,
}

/// An online Q-learning agent
///
/// The agent selects actions epsilon-greedily over the estimates of its [`QFunction`] and moves
/// Q(s,a) toward the bootstrapped target r + γ max<sub>a'</sub> Q(s',a') once per observed
/// transition. The estimator decides how values are stored: see [`QTableAgent`] and
/// [`ApproximateQAgent`].
///
/// ### Generics
/// - `Q` - The action-value estimator
/// - `L` - The environment's source of legal actions; an empty list marks a terminal state
/// - `D` - The decay strategy of the exploration rate
pub struct QLearningAgent<Q, L, D = decay::Constant>
where
    Q: QFunction,
    L: LegalActions<Q::State, Q::Action>,
    D: Decay,
{
    q: Q,
    legal_actions: L,
    exploration: EpsilonGreedy<D>,
    alpha: f32,
    gamma: f32,
    num_training: u32,
    report_every: u32,
    episodes_so_far: u32,
    learning: bool,
    rewards: Rewards,
    rng: StdRng,
}

/// A Q-learning agent that records a Q value for each visited state action pair
pub type QTableAgent<S, A, L, D = decay::Constant> = QLearningAgent<QTable<S, A>, L, D>;

/// A Q-learning agent that estimates Q values as a linear function of extracted features
pub type ApproximateQAgent<X, L, D = decay::Constant> = QLearningAgent<LinearQ<X>, L, D>;

impl<Q, L, D> QLearningAgent<Q, L, D>
where
    Q: QFunction,
    L: LegalActions<Q::State, Q::Action>,
    D: Decay,
{
    /// Initialize a new `QLearningAgent` around an estimator and a source of legal actions
    ///
    /// **Errors** if `alpha`, `gamma` or any epsilon the exploration schedule can take is not in
    /// the interval `[0,1]`
    pub fn new(q: Q, legal_actions: L, config: QLearningConfig<D>) -> Result<Self> {
        let QLearningConfig {
            exploration,
            alpha,
            gamma,
            num_training,
            report_every,
            seed,
        } = config;
        ensure_interval!(alpha, 0.0, 1.0);
        ensure_interval!(gamma, 0.0, 1.0);
        exploration.validate()?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            q,
            legal_actions,
            exploration,
            alpha,
            gamma,
            num_training,
            report_every,
            episodes_so_far: 0,
            learning: true,
            rewards: Rewards::default(),
            rng,
        })
    }

    pub fn q_function(&self) -> &Q {
        &self.q
    }

    /// The learning rate in effect, `0.0` once training has ended
    pub fn alpha(&self) -> f32 {
        if self.learning {
            self.alpha
        } else {
            0.0
        }
    }

    /// The exploration rate in effect, `0.0` once training has ended
    pub fn epsilon(&self) -> f32 {
        if self.learning {
            self.exploration.epsilon(self.episodes_so_far)
        } else {
            0.0
        }
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Learn from one observed transition
    ///
    /// Q(s,a) moves toward r + γV(s'), where V(s') is read before Q(s,a) is written. A terminal
    /// next state has value `0.0`. Nothing is written while the learning rate is zero.
    pub fn update(&mut self, exp: &Exp<Q::State, Q::Action>) {
        let alpha = self.alpha();
        if alpha == 0.0 {
            return;
        }

        let next_value = match self.q.bootstrap() {
            Bootstrap::Own => {
                let next_actions = self.legal_actions.legal_actions(&exp.next_state);
                policy::value(&self.q, &exp.next_state, &next_actions)
            }
            Bootstrap::Zero => 0.0,
        };
        let target = exp.reward + self.gamma * next_value;
        trace!("q-learning target {target} (next state value {next_value})");
        self.q.learn(&exp.state, &exp.action, target, alpha);
    }

    /// Reset the running reward of the current episode
    pub fn start_episode(&mut self) {
        self.rewards.episode = 0.0;
    }

    /// Record the reward of a transition in the current episode and learn from it
    pub fn observe_transition(&mut self, exp: Exp<Q::State, Q::Action>) {
        self.rewards.episode += exp.reward;
        self.update(&exp);
    }

    /// End-of-episode bookkeeping
    ///
    /// Counts the episode, and once `num_training` episodes have ended switches the agent to pure
    /// exploitation with a learning rate of zero. No learning happens here.
    ///
    /// **Returns** [`EpisodeStatus::TrainingComplete`] on exactly the episode that completes training
    pub fn end_episode(&mut self) -> EpisodeStatus {
        let episode_reward = std::mem::take(&mut self.rewards.episode);
        if self.is_in_training() {
            self.rewards.train += episode_reward;
        } else {
            self.rewards.test += episode_reward;
        }
        self.rewards.window += episode_reward;

        self.episodes_so_far += 1;
        if self.episodes_so_far >= self.num_training {
            self.learning = false;
        }

        if self.report_every > 0 && self.episodes_so_far % self.report_every == 0 {
            let average = std::mem::take(&mut self.rewards.window) / self.report_every as f32;
            let phase = if self.is_in_training() {
                "training"
            } else {
                "testing"
            };
            info!(
                "episode {} ({phase}): average reward over last {} episodes {average}",
                self.episodes_so_far, self.report_every
            );
        }

        if self.episodes_so_far == self.num_training {
            info!(
                "training complete after {} episodes ({} learned parameters)",
                self.episodes_so_far,
                self.q.len()
            );
            EpisodeStatus::TrainingComplete
        } else if self.is_in_training() {
            EpisodeStatus::Training
        } else {
            EpisodeStatus::Testing
        }
    }

    pub fn episodes_so_far(&self) -> u32 {
        self.episodes_so_far
    }

    pub fn is_in_training(&self) -> bool {
        self.episodes_so_far < self.num_training
    }

    pub fn is_in_testing(&self) -> bool {
        !self.is_in_training()
    }

    /// Mean reward of the training episodes so far, `0.0` if there were none
    pub fn average_train_reward(&self) -> f32 {
        let episodes = self.episodes_so_far.min(self.num_training);
        if episodes == 0 {
            0.0
        } else {
            self.rewards.train / episodes as f32
        }
    }

    /// Mean reward of the testing episodes so far, `0.0` if there were none
    pub fn average_test_reward(&self) -> f32 {
        let episodes = self.episodes_so_far.saturating_sub(self.num_training);
        if episodes == 0 {
            0.0
        } else {
            self.rewards.test / episodes as f32
        }
    }
}

impl<S, A, L, D> QTableAgent<S, A, L, D>
where
    S: crate::env::Hashable,
    A: crate::env::Hashable,
    L: LegalActions<S, A>,
    D: Decay,
{
    /// Initialize a `QTableAgent` with an empty table
    pub fn tabular(legal_actions: L, config: QLearningConfig<D>) -> Result<Self> {
        Self::new(QTable::new(), legal_actions, config)
    }

    /// Forget every learned value
    pub fn clear(&mut self) {
        self.q.clear();
    }
}

impl<X, L, D> ApproximateQAgent<X, L, D>
where
    X: FeatureExtractor,
    X::State: crate::env::Hashable,
    X::Action: crate::env::Hashable,
    L: LegalActions<X::State, X::Action>,
    D: Decay,
{
    /// Initialize an `ApproximateQAgent` with all weights zero
    pub fn approximate(extractor: X, legal_actions: L, config: QLearningConfig<D>) -> Result<Self> {
        Self::new(LinearQ::new(extractor), legal_actions, config)
    }

    pub fn weights(&self) -> &crate::ds::Counter<X::Feature> {
        self.q.weights()
    }
}

impl<Q, L, D> ValueEstimationAgent<Q::State, Q::Action> for QLearningAgent<Q, L, D>
where
    Q: QFunction,
    L: LegalActions<Q::State, Q::Action>,
    D: Decay,
{
    fn q_value(&self, state: &Q::State, action: Option<&Q::Action>) -> f32 {
        action.map_or(0.0, |action| self.q.q_value(state, action))
    }

    fn value(&self, state: &Q::State) -> f32 {
        let actions = self.legal_actions.legal_actions(state);
        policy::value(&self.q, state, &actions)
    }

    fn policy(&mut self, state: &Q::State) -> Option<Q::Action> {
        let actions = self.legal_actions.legal_actions(state);
        policy::greedy(&self.q, state, &actions, &mut self.rng)
    }

    fn action(&mut self, state: &Q::State) -> Option<Q::Action> {
        let actions = self.legal_actions.legal_actions(state);
        if actions.is_empty() {
            return None;
        }
        let choice = if self.learning {
            self.exploration.choose(self.episodes_so_far, &mut self.rng)
        } else {
            Choice::Exploit
        };
        policy::epsilon_greedy(&self.q, state, &actions, choice, &mut self.rng)
    }
}
