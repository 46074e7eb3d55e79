//! Cached coherence state of a rule set.
//!
//! The cache only ever moves towards [`Coherence::Incoherent`]. Once a scan
//! has found a contradiction the rule set reports itself incoherent for the
//! rest of its life, without scanning again. Edges are never removed, so a
//! contradiction cannot disappear anyway.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Result of the most recent coherence scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coherence {
    /// No scan has run yet.
    Unknown,
    /// The last scan found no contradiction. Re-checked on the next query.
    Coherent,
    /// Some option both requires and excludes another. Terminal.
    Incoherent,
}

impl Coherence {
    fn to_bits(self) -> u8 {
        match self {
            Coherence::Unknown => 0,
            Coherence::Coherent => 1,
            Coherence::Incoherent => 2,
        }
    }

    fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Coherence::Unknown,
            1 => Coherence::Coherent,
            _ => Coherence::Incoherent,
        }
    }
}

impl fmt::Display for Coherence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coherence::Unknown => write!(f, "unknown"),
            Coherence::Coherent => write!(f, "coherent"),
            Coherence::Incoherent => write!(f, "incoherent"),
        }
    }
}

/// Interior-mutable holder so that `RuleSet::is_coherent` can update the
/// cache through a shared reference while the rule set stays `Sync`.
#[derive(Debug)]
pub(crate) struct CoherenceCache(AtomicU8);

impl CoherenceCache {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(Coherence::Unknown.to_bits()))
    }

    pub(crate) fn get(&self) -> Coherence {
        Coherence::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Store a scan result. `Incoherent` always wins; a `Coherent` result
    /// never overwrites an `Incoherent` one.
    pub(crate) fn record(&self, result: Coherence) {
        match result {
            Coherence::Incoherent => self.0.store(result.to_bits(), Ordering::Release),
            _ => {
                let _ = self.0.fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                    (Coherence::from_bits(bits) != Coherence::Incoherent)
                        .then_some(result.to_bits())
                });
            }
        }
    }
}

impl Clone for CoherenceCache {
    fn clone(&self) -> Self {
        Self(AtomicU8::new(self.0.load(Ordering::Acquire)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown() {
        assert_eq!(CoherenceCache::new().get(), Coherence::Unknown);
    }

    #[test]
    fn incoherent_is_sticky() {
        let cache = CoherenceCache::new();
        cache.record(Coherence::Coherent);
        assert_eq!(cache.get(), Coherence::Coherent);

        cache.record(Coherence::Incoherent);
        cache.record(Coherence::Coherent);
        cache.record(Coherence::Unknown);
        assert_eq!(cache.get(), Coherence::Incoherent);
    }

    #[test]
    fn clone_copies_state() {
        let cache = CoherenceCache::new();
        cache.record(Coherence::Incoherent);
        assert_eq!(cache.clone().get(), Coherence::Incoherent);
    }

    #[test]
    fn display() {
        assert_eq!(Coherence::Incoherent.to_string(), "incoherent");
        assert_eq!(Coherence::Unknown.to_string(), "unknown");
    }
}
