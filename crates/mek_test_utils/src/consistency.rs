//! Pipeline consistency harness.
//!
//! Handlers are pure, so processing the same document any number of times,
//! on any thread, must produce byte-identical output. The harness fingerprints
//! the JSON form of each [`ProcessedUnit`] and compares the fingerprints.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::thread;

use mek_core::document::UnitDocument;
use mek_core::registry::{HandlerRegistry, ProcessedUnit};

/// Result of a consistency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyResult {
    /// Whether every run produced identical output.
    pub is_consistent: bool,
    /// Fingerprint of each run.
    pub fingerprints: Vec<u64>,
}

impl ConsistencyResult {
    fn from_fingerprints(fingerprints: Vec<u64>) -> Self {
        Self {
            is_consistent: fingerprints.windows(2).all(|w| w[0] == w[1]),
            fingerprints,
        }
    }

    /// Assert every run matched.
    ///
    /// # Panics
    ///
    /// Panics if runs produced different output.
    pub fn assert_consistent(&self) {
        if !self.is_consistent {
            let mut unique = self.fingerprints.clone();
            unique.sort_unstable();
            unique.dedup();
            panic!(
                "Processing is not repeatable!\n\
                 Runs: {}\n\
                 Unique fingerprints: {} (expected 1)\n\
                 All fingerprints: {:?}",
                self.fingerprints.len(),
                unique.len(),
                self.fingerprints
            );
        }
    }
}

/// Fingerprint of a processed unit.
///
/// # Panics
///
/// Panics if the unit cannot be rendered as JSON, which only happens for
/// non-finite floats.
#[must_use]
pub fn fingerprint(processed: &ProcessedUnit) -> u64 {
    let json = serde_json::to_string(processed)
        .unwrap_or_else(|e| panic!("processed unit is not serializable: {e}"));
    let mut hasher = DefaultHasher::new();
    json.hash(&mut hasher);
    hasher.finish()
}

/// Process `doc` `runs` times on the current thread.
#[must_use]
pub fn verify_repeatable(registry: &HandlerRegistry, doc: &UnitDocument, runs: usize) -> ConsistencyResult {
    let fingerprints = (0..runs).map(|_| fingerprint(&registry.process(doc))).collect();
    ConsistencyResult::from_fingerprints(fingerprints)
}

/// Process `doc` once on each of `threads` threads sharing one registry.
///
/// # Panics
///
/// Panics if a worker thread panics.
#[must_use]
pub fn verify_parallel(
    registry: &Arc<HandlerRegistry>,
    doc: &UnitDocument,
    threads: usize,
) -> ConsistencyResult {
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let registry = Arc::clone(registry);
            let doc = doc.clone();
            thread::spawn(move || fingerprint(&registry.process(&doc)))
        })
        .collect();

    let fingerprints = handles
        .into_iter()
        .map(|h| h.join().unwrap_or_else(|_| panic!("worker thread panicked")))
        .collect();
    ConsistencyResult::from_fingerprints(fingerprints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::all_fixtures;

    #[test]
    fn test_fixtures_are_repeatable() {
        let registry = HandlerRegistry::standard();
        for doc in all_fixtures() {
            verify_repeatable(&registry, &doc, 3).assert_consistent();
        }
    }

    #[test]
    fn test_shared_registry_across_threads() {
        let registry = Arc::new(HandlerRegistry::standard());
        for doc in all_fixtures() {
            verify_parallel(&registry, &doc, 4).assert_consistent();
        }
    }

    #[test]
    #[should_panic(expected = "not repeatable")]
    fn test_mismatch_panics() {
        ConsistencyResult::from_fingerprints(vec![1, 2]).assert_consistent();
    }
}
