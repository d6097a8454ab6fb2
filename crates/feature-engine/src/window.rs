//! Sliding Windows

use crate::config::WindowConfig;
use crate::error::ConfigError;

/// Lazy iterator over full-size, possibly overlapping windows.
///
/// Yields `(start, slice)` for starts `0, step, 2·step, …` while
/// `start + window_size <= len`. A trailing partial window is never yielded.
/// Cloning the iterator, or building a new one over the same slice, replays
/// the identical sequence.
#[derive(Debug, Clone)]
pub struct Windows<'a, T> {
    data: &'a [T],
    size: usize,
    step: usize,
    next_start: usize,
}

impl<'a, T> Windows<'a, T> {
    /// Create a window iterator, rejecting invalid configurations
    pub fn new(data: &'a [T], config: &WindowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(data, config))
    }

    /// Caller guarantees `config.validate()` succeeded
    pub(crate) fn from_validated(data: &'a [T], config: &WindowConfig) -> Self {
        Self {
            data,
            size: config.window_size,
            step: config.step(),
            next_start: 0,
        }
    }

    fn remaining(&self) -> usize {
        let end = self.next_start.saturating_add(self.size);
        if end > self.data.len() {
            0
        } else {
            (self.data.len() - end) / self.step + 1
        }
    }
}

impl<'a, T> Iterator for Windows<'a, T> {
    type Item = (usize, &'a [T]);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start;
        let end = start.checked_add(self.size)?;
        if end > self.data.len() {
            return None;
        }
        self.next_start = start + self.step;
        Some((start, &self.data[start..end]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for Windows<'_, T> {}

impl<T> std::iter::FusedIterator for Windows<'_, T> {}
