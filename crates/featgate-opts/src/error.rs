//! Error types for option toggling.
//!
//! None of these reach callers of [`Opts::toggle`](crate::Opts::toggle);
//! they are logged and the toggle becomes a no-op.

use featgate_rules::RulesError;

/// Reasons a toggle was ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptsError {
    #[error("rule set is incoherent")]
    Incoherent,

    #[error("could not find option '{0}'")]
    UnknownOption(String),

    #[error(transparent)]
    Rules(#[from] RulesError),
}
