//! Errors reported by the carousel engine.
use thiserror::Error;

/// Errors raised while materializing carousel cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagerError {
    /// A cell was requested for an identifier with no registered factory and
    /// no idle instance.
    #[error("no cell factory registered for reuse identifier `{identifier}`")]
    UnregisteredIdentifier {
        /// The reuse identifier that was requested.
        identifier: String,
    },
}
