use thiserror::Error;

/// Errors raised while configuring an agent
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid value for `{name}`: {value} is not in the interval [{low}, {high}]")]
    OutOfInterval {
        name: &'static str,
        value: f32,
        low: f32,
        high: f32,
    },

    #[error("decay schedule must fall from `start` to `end` at a non-negative rate: got rate {rate}, start {start}, end {end}")]
    InvalidDecay { rate: f32, start: f32, end: f32 },
}

pub type Result<T> = std::result::Result<T, Error>;
