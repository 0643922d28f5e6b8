//! Injectable random choice, used for word draws and hints.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Picks an index in `0..len`.
///
/// Callers never pass `len == 0`.
pub trait Chooser: Send + Sync {
    /// Returns an index strictly below `len`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngChooser;

impl Chooser for ThreadRngChooser {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Replays a fixed sequence of picks, wrapping each into range.
///
/// Once the sequence is exhausted it starts over.
#[derive(Debug, Default)]
pub struct SequenceChooser {
    picks: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceChooser {
    /// Creates a chooser replaying `picks`.
    pub fn new(picks: Vec<usize>) -> Self {
        Self {
            picks,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl Chooser for SequenceChooser {
    fn pick(&self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let at = self.cursor.fetch_add(1, Ordering::Relaxed) % self.picks.len();
        self.picks[at] % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_into_range() {
        let chooser = SequenceChooser::new(vec![1, 5]);
        assert_eq!(chooser.pick(3), 1);
        assert_eq!(chooser.pick(3), 2);
        assert_eq!(chooser.pick(3), 1);
    }

    #[test]
    fn thread_rng_stays_in_range() {
        for _ in 0..100 {
            assert!(ThreadRngChooser.pick(4) < 4);
        }
    }
}
