//! Error types for rule set lookups.

/// Errors from the rule graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("could not find node '{0}'")]
    UnknownNode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RulesError::UnknownNode("tls".into());
        assert_eq!(err.to_string(), "could not find node 'tls'");
    }
}
