use crate::error::{Error, Result};

/// A hyperparameter schedule over completed training episodes
pub trait Decay {
    /// Value of the schedule after `episode` completed episodes
    fn evaluate(&self, episode: u32) -> f32;

    /// The smallest and largest values the schedule ever takes
    fn bounds(&self) -> (f32, f32);
}

/// A value falling from `start` toward `end` at `rate`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Span {
    rate: f32,
    start: f32,
    end: f32,
}

impl Span {
    fn new(rate: f32, start: f32, end: f32) -> Result<Self> {
        if rate >= 0.0 && start > end {
            Ok(Self { rate, start, end })
        } else {
            Err(Error::InvalidDecay { rate, start, end })
        }
    }

    /// `end` plus the fraction `remaining` of the distance left to fall
    fn lerp(&self, remaining: f32) -> f32 {
        self.end + (self.start - self.end) * remaining
    }

    fn bounds(&self) -> (f32, f32) {
        (self.end, self.start)
    }
}

/// A value that never changes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constant(f32);

impl Constant {
    pub fn new(value: f32) -> Self {
        Self(value)
    }
}

impl Decay for Constant {
    fn evaluate(&self, _episode: u32) -> f32 {
        self.0
    }

    fn bounds(&self) -> (f32, f32) {
        (self.0, self.0)
    }
}

/// v(t) = end + (start - end) e<sup>-rate·t</sup>
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Exponential(Span);

impl Exponential {
    /// **Errors** unless `rate >= 0` and `start > end`
    pub fn new(rate: f32, start: f32, end: f32) -> Result<Self> {
        Span::new(rate, start, end).map(Self)
    }
}

impl Decay for Exponential {
    fn evaluate(&self, episode: u32) -> f32 {
        let span = &self.0;
        span.lerp((-span.rate * episode as f32).exp())
    }

    fn bounds(&self) -> (f32, f32) {
        self.0.bounds()
    }
}

/// v(t) = end + (start - end) / (1 + rate·t)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InverseTime(Span);

impl InverseTime {
    /// **Errors** unless `rate >= 0` and `start > end`
    pub fn new(rate: f32, start: f32, end: f32) -> Result<Self> {
        Span::new(rate, start, end).map(Self)
    }
}

impl Decay for InverseTime {
    fn evaluate(&self, episode: u32) -> f32 {
        let span = &self.0;
        span.lerp((1.0 + span.rate * episode as f32).recip())
    }

    fn bounds(&self) -> (f32, f32) {
        self.0.bounds()
    }
}

/// v(t) = max(start - rate·t, end)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Linear(Span);

impl Linear {
    /// **Errors** unless `rate >= 0` and `start > end`
    pub fn new(rate: f32, start: f32, end: f32) -> Result<Self> {
        Span::new(rate, start, end).map(Self)
    }
}

impl Decay for Linear {
    fn evaluate(&self, episode: u32) -> f32 {
        let Span { rate, start, end } = self.0;
        (start - rate * episode as f32).max(end)
    }

    fn bounds(&self) -> (f32, f32) {
        self.0.bounds()
    }
}
