//! Immutable descriptor of one reserved lexeme.
//!
//! A token stores its lexeme as ordered code points with both lengths
//! computed eagerly at construction. The rendered string form is produced
//! lazily, exactly once, behind an execute-once guard; see [`Token::text`].
//!
//! # Validity
//!
//! Validity comes in two depths. The shallow check ([`Token::is_valid`])
//! is cheap shape inspection and is what insertion paths use to reject bad
//! input. The deep check ([`Token::is_valid_deep`]) is a diagnostic run
//! over the whole descriptor, including the predecessor chain, and
//! treats an internal length mismatch as corruption: it aborts instead of
//! returning `false`, because that state is unreachable through correct
//! construction.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::Mode;

/// Immutable descriptor of one reserved lexeme.
///
/// Built via [`Token::from_literal`] plus the consuming builders
/// [`Token::with_mode`] and [`Token::with_requires`], then wrapped in
/// `Arc` for publication. The builders consume `self`, so a published
/// token cannot be reconfigured.
pub struct Token {
    /// Lexeme as ordered Unicode code points.
    code_points: Box<[char]>,
    /// Stored code-point count. Kept separately from the lexeme so the
    /// deep validity check can cross-verify the two.
    cp_len: usize,
    /// UTF-8 byte length of the lexeme.
    byte_len: usize,
    /// Grammatical category.
    mode: Mode,
    /// Predecessor token this one is only legal directly after, if any.
    requires: Option<Arc<Token>>,
    /// Rendered string form, populated at most once.
    text: OnceLock<String>,
}

impl Token {
    /// Build a token from its literal lexeme.
    ///
    /// Code-point count and byte length are computed eagerly; rendering
    /// the string form is deferred until the first [`Token::text`] call.
    pub fn from_literal(lexeme: &str) -> Self {
        Self {
            code_points: lexeme.chars().collect(),
            cp_len: lexeme.chars().count(),
            byte_len: lexeme.len(),
            mode: Mode::None,
            requires: None,
            text: OnceLock::new(),
        }
    }

    /// The designated invalid token.
    ///
    /// Lookups return it when no reserved lexeme matches. Both lengths are
    /// zero, so it fails even the shallow validity check; it renders as
    /// `"BAD"`.
    pub fn sentinel() -> Self {
        Self {
            code_points: Box::from(['B', 'A', 'D']),
            cp_len: 0,
            byte_len: 0,
            mode: Mode::None,
            requires: None,
            text: OnceLock::new(),
        }
    }

    /// Set the grammatical category. Build-time only: consumes `self`.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Declare the predecessor this token is only legal directly after.
    /// Build-time only: consumes `self`.
    #[must_use]
    pub fn with_requires(mut self, predecessor: Arc<Token>) -> Self {
        self.requires = Some(predecessor);
        self
    }

    /// Rendered string form of the lexeme.
    ///
    /// Populated on first call under an execute-once guard: concurrent
    /// first readers either observe the fully rendered string or block
    /// until rendering completes, never a partial write. Degenerate
    /// tokens with an empty lexeme render as `"BAD"`.
    pub fn text(&self) -> &str {
        if self.code_points.is_empty() {
            return "BAD";
        }
        self.text.get_or_init(|| self.code_points.iter().collect())
    }

    /// Lexeme as ordered code points.
    pub fn code_points(&self) -> &[char] {
        &self.code_points
    }

    /// Stored code-point count.
    pub fn cp_len(&self) -> usize {
        self.cp_len
    }

    /// UTF-8 byte length of the lexeme.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Grammatical category.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Predecessor token this one is only legal directly after.
    pub fn requires(&self) -> Option<&Arc<Token>> {
        self.requires.as_ref()
    }

    /// Whether this token is the designated invalid sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.cp_len == 0 && self.byte_len == 0
    }

    /// Shallow validity: positive lengths and a non-empty lexeme.
    ///
    /// The sentinel fails this check. Insertion paths use it to reject
    /// bad candidates recoverably.
    pub fn is_valid(&self) -> bool {
        self.cp_len >= 1 && self.byte_len >= 1 && !self.code_points.is_empty()
    }

    /// Deep validity: the full diagnostic check.
    ///
    /// On top of the shallow check, recomputes the code-point count from
    /// the rendered lexeme, rejects tokens rendering as `"BAD"` or empty,
    /// and walks the predecessor chain (see below).
    ///
    /// # Panics
    ///
    /// Panics if the recomputed code-point count disagrees with the
    /// stored one. That mismatch means the descriptor was corrupted after
    /// construction; it is not a recoverable input error.
    pub fn is_valid_deep(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        let text = self.text();
        let recomputed = text.chars().count();
        assert!(
            recomputed == self.cp_len,
            "code-point count mismatch for {text:?}: stored {}, recomputed {recomputed}",
            self.cp_len,
        );
        if text == "BAD" || text.is_empty() {
            return false;
        }
        self.requires_chain_valid()
    }

    /// Walk the predecessor chain, requiring every link to be shallow-valid
    /// and not render as `"BAD"`.
    ///
    /// Chains in the shipped catalog are at most two links deep, but the
    /// walk carries an explicit cycle guard: a future catalog wired into a
    /// cycle is reported as invalid instead of looping forever. The guard
    /// compares `Arc` pointer identity, not lexemes.
    fn requires_chain_valid(&self) -> bool {
        let mut visited: Vec<*const Token> = Vec::new();
        let mut link = self.requires.as_ref();
        while let Some(predecessor) = link {
            let ptr = Arc::as_ptr(predecessor);
            if visited.contains(&ptr) {
                return false;
            }
            if !predecessor.is_valid() || predecessor.text() == "BAD" {
                return false;
            }
            visited.push(ptr);
            link = predecessor.requires.as_ref();
        }
        true
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("text", &self.text())
            .field("cp_len", &self.cp_len)
            .field("byte_len", &self.byte_len)
            .field("mode", &self.mode)
            .field("requires", &self.requires.as_ref().map(|t| t.text()))
            .finish()
    }
}
