//! Errors raised while building the recognition structures.

use thiserror::Error;

/// Recoverable build-time rejections.
///
/// Single-token insertion returns these so a caller can skip or report one
/// bad entry. The batch path and registry validation escalate failures to
/// panics instead: a bad entry there is a defect in the reserved-token
/// catalog itself, not user input.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RegistryError {
    /// Candidate token has a zero-length lexeme.
    #[error("empty token")]
    EmptyToken,
    /// Candidate token failed the shallow validity check.
    #[error("bad token {0:?}")]
    BadToken(String),
    /// A seed set or insertion batch was empty.
    #[error("empty token slice")]
    EmptyTokenSlice,
    /// Two seeds share an identical full lexeme.
    #[error("duplicate seed token {0:?}")]
    DuplicateSeed(String),
    /// Candidate is not strictly longer than the branch root, or does not
    /// share its full prefix.
    #[error("token {candidate:?} does not descend from {root:?}")]
    NotADescendant {
        /// Lexeme of the rejected candidate.
        candidate: String,
        /// Lexeme of the branch root it failed against.
        root: String,
    },
}
