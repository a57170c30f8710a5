//! Fatal conditions: the error limit and internal invariant violations.

use std::fmt;

/// A condition that stops compilation of the unit.
///
/// Library code never exits the process. It returns this value and lets it
/// propagate with `?` to the driver, which cleans up and exits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum FatalError {
    /// The accumulated error count reached the configured limit.
    #[error("too many errors")]
    TooManyErrors {
        /// Number of errors recorded when the limit was hit.
        count: usize,
    },
}

/// Report an internal compiler error and abort.
///
/// Used for broken invariants inside the front end (a malformed type graph,
/// a kind-specific accessor called on the wrong kind, ...). These are never
/// properties of the user's program and are not recoverable.
#[cold]
#[track_caller]
pub fn ice(message: impl fmt::Display) -> ! {
    tracing::error!(%message, "internal compiler error");
    panic!("internal compiler error: {message}");
}

#[cfg(test)]
mod tests;
