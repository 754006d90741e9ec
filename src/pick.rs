//! Pick numbering
//!
//! Each analysed slip gets a sequential pick number. The sequence is
//! injected so the host decides where it lives; this crate only ships an
//! in-memory counter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of pick numbers
pub trait PickSequence: Send + Sync {
    /// Next number in the sequence. Numbers are never reused.
    fn next_pick(&self) -> u64;

    /// Last number handed out, 0 if none yet.
    fn current(&self) -> u64;
}

/// Process-local counter
#[derive(Debug, Default)]
pub struct InMemoryPickSequence {
    last: AtomicU64,
}

impl InMemoryPickSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume after a previously issued pick number.
    pub fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }
}

impl PickSequence for InMemoryPickSequence {
    fn next_pick(&self) -> u64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn current(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequential() {
        let seq = InMemoryPickSequence::new();
        assert_eq!(seq.current(), 0);
        assert_eq!(seq.next_pick(), 1);
        assert_eq!(seq.next_pick(), 2);
        assert_eq!(seq.current(), 2);
    }

    #[test]
    fn test_resume() {
        let seq = InMemoryPickSequence::starting_after(41);
        assert_eq!(seq.next_pick(), 42);
    }

    #[test]
    fn test_unique_across_threads() {
        let seq = Arc::new(InMemoryPickSequence::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let seq = Arc::clone(&seq);
                thread::spawn(move || (0..100).map(|_| seq.next_pick()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for pick in handle.join().unwrap() {
                assert!(seen.insert(pick), "pick {pick} issued twice");
            }
        }
        assert_eq!(seen.len(), 400);
        assert_eq!(seq.current(), 400);
    }
}
