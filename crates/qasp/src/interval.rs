//! One-dimensional intervals with independently open or closed bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A range of reals between `lower` and `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower endpoint.
    pub lower: f64,
    /// Upper endpoint.
    pub upper: f64,
    /// Whether `lower` belongs to the interval.
    pub lower_closed: bool,
    /// Whether `upper` belongs to the interval.
    pub upper_closed: bool,
}

impl Interval {
    /// Create an interval with explicit bound kinds.
    pub fn new(lower: f64, upper: f64, lower_closed: bool, upper_closed: bool) -> Self {
        Self {
            lower,
            upper,
            lower_closed,
            upper_closed,
        }
    }

    /// `[lower, upper]`
    pub fn closed(lower: f64, upper: f64) -> Self {
        Self::new(lower, upper, true, true)
    }

    /// `(lower, upper)`
    pub fn open(lower: f64, upper: f64) -> Self {
        Self::new(lower, upper, false, false)
    }

    /// `[lower, upper)`
    pub fn closed_open(lower: f64, upper: f64) -> Self {
        Self::new(lower, upper, true, false)
    }

    /// `(lower, upper]`
    pub fn open_closed(lower: f64, upper: f64) -> Self {
        Self::new(lower, upper, false, true)
    }

    /// Whether `x` lies in the interval.
    pub fn contains(&self, x: f64) -> bool {
        let above = if self.lower_closed {
            x >= self.lower
        } else {
            x > self.lower
        };
        let below = if self.upper_closed {
            x <= self.upper
        } else {
            x < self.upper
        };
        above && below
    }

    /// `upper - lower`
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the endpoints.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Whether no real number lies in the interval.
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
            || (self.lower == self.upper && !(self.lower_closed && self.upper_closed))
    }

    /// Apply `f` to both endpoints, keeping the bound kinds.
    ///
    /// Meaningful for functions that are non-decreasing on the interval.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.lower), f(self.upper), self.lower_closed, self.upper_closed)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lower_closed { '[' } else { '(' };
        let close = if self.upper_closed { ']' } else { ')' };
        match f.precision() {
            Some(p) => write!(f, "{open}{:.p$}, {:.p$}{close}", self.lower, self.upper),
            None => write!(f, "{open}{}, {}{close}", self.lower, self.upper),
        }
    }
}
