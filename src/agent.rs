/// The query surface shared by planning and learning agents
///
/// `None` stands for "no action": it is what terminal states produce, and querying its value
/// always yields `0.0`.
pub trait ValueEstimationAgent<S, A> {
    /// Q(state, action); `0.0` when `action` is `None`
    fn q_value(&self, state: &S, action: Option<&A>) -> f32;

    /// max<sub>a</sub> Q(state, a) over legal actions, `0.0` if `state` is terminal
    fn value(&self, state: &S) -> f32;

    /// The best action in `state`, `None` if `state` is terminal
    fn policy(&mut self, state: &S) -> Option<A>;

    /// The action to take in `state`, possibly exploratory, `None` if `state` is terminal
    fn action(&mut self, state: &S) -> Option<A> {
        self.policy(state)
    }
}
