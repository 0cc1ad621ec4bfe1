/// Common query interface of all agents
pub mod agent;

/// Implemented planning and learning algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Data structures
pub mod ds;

/// Models of the environment
pub mod env;

/// Error types
pub mod error;

/// Observed transitions
pub mod exp;

/// Exploration policies
pub mod exploration;

/// Feature extraction for approximate learners
pub mod features;

mod util;

pub use agent::ValueEstimationAgent;
pub use error::{Error, Result};
