//! Fixed-capacity sliding window
//!
//! A `RollingWindow` holds the most recent `capacity` values of a series.
//! Pushing into a full window evicts the oldest value, so once filled the
//! window never grows or shrinks.

use crate::{MathError, Result};
use std::collections::vec_deque::{self, VecDeque};

/// Push-and-evict window over the most recent values of a series
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    capacity: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    /// Create an empty window with the specified capacity
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MathError::InvalidInput(
                "Window capacity must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        })
    }

    /// Create a full window from exactly `capacity` values, oldest first
    pub fn filled(capacity: usize, values: &[f64]) -> Result<Self> {
        let mut window = Self::new(capacity)?;
        if values.len() != capacity {
            return Err(MathError::InsufficientData(format!(
                "Window needs exactly {} values, got {}",
                capacity,
                values.len()
            )));
        }

        window.values.extend(values.iter().copied());
        Ok(window)
    }

    /// Append a value, returning the evicted oldest value if the window was full
    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.values.push_back(value);

        if self.values.len() > self.capacity {
            self.values.pop_front()
        } else {
            None
        }
    }

    /// The `n`-th most recent value, where `lag(1)` is the newest
    pub fn lag(&self, n: usize) -> Result<f64> {
        if n == 0 || n > self.values.len() {
            return Err(MathError::InsufficientData(format!(
                "Lag {} is unavailable in a window of {} values",
                n,
                self.values.len()
            )));
        }

        Ok(self.values[self.values.len() - n])
    }

    /// The newest value
    pub fn last(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Iterate the values oldest first
    pub fn iter(&self) -> vec_deque::Iter<'_, f64> {
        self.values.iter()
    }

    /// Copy the values out, oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }
}
