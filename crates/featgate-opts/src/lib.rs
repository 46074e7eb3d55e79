//! Per-session option state for featgate.
//!
//! An [`Opts`] view borrows a finished [`RuleSet`](featgate_rules::RuleSet)
//! and tracks which options are on. [`Opts::toggle`] is the only mutation:
//! it flips one option and propagates the change through the rule graph so
//! that no declared requirement or exclusion is left violated.

pub mod error;
pub mod opts;
pub mod snapshot;

pub use error::OptsError;
pub use opts::Opts;
pub use snapshot::OptsSnapshot;
