pub mod linear;
pub mod policy;
pub mod q_learning;
pub mod q_table;
pub mod value_iteration;

pub use linear::LinearQ;
pub use policy::{Bootstrap, QFunction};
pub use q_learning::{
    ApproximateQAgent, EpisodeStatus, QLearningAgent, QLearningConfig, QTableAgent,
};
pub use q_table::QTable;
pub use value_iteration::{ValueIteration, ValueIterationConfig};
