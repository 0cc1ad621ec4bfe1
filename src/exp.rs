/// Represents a single observed transition in the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Exp<S, A> {
    /// The state of the environment before taking the action
    pub state: S,
    /// The action taken in the given state
    pub action: A,
    /// The state of the environment after the action is taken; terminal if it has no legal actions
    pub next_state: S,
    /// The reward received after taking the action
    pub reward: f32,
}

impl<S, A> Exp<S, A> {
    pub fn new(state: S, action: A, next_state: S, reward: f32) -> Self {
        Self {
            state,
            action,
            next_state,
            reward,
        }
    }
}
