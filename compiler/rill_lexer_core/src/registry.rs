//! Static catalog of the reserved tokens of the language.
//!
//! The registry is the source of truth: it validates every token once at
//! construction, then publishes the exact-match table, the
//! single-code-point and first-code-point indexes, and the recognition
//! [`Tree`]. It is an explicit value, built once and passed by reference,
//! so tests can construct alternate catalogs instead of sharing
//! process-wide globals.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use rill_token::{Mode, Token};

use crate::error::RegistryError;
use crate::tree::Tree;

/// Validated catalog of every reserved token.
///
/// All lookups are misses-are-expected queries: unknown lexemes map to
/// the sentinel and unknown code points to `None`, never to errors.
#[derive(Debug)]
pub struct Registry {
    tokens: Vec<Arc<Token>>,
    /// Exact lexeme -> token.
    by_text: FxHashMap<String, Arc<Token>>,
    /// Single-code-point lexeme -> token, for O(1) classification.
    single_cp: FxHashMap<char, Arc<Token>>,
    /// First code point -> every token starting with it.
    first_cp: FxHashMap<char, Vec<Arc<Token>>>,
    tree: Tree,
    sentinel: Arc<Token>,
}

impl Registry {
    /// Build and validate a registry from its seed tokens.
    ///
    /// Returns a distinct error for an empty seed set and for seeds
    /// sharing an identical full lexeme.
    ///
    /// # Panics
    ///
    /// Panics if any seed fails the deep validity check. A deep-invalid
    /// seed is a defect in the catalog itself (corruption or a broken
    /// predecessor chain), not recoverable input.
    pub fn new(seeds: Vec<Arc<Token>>) -> Result<Self, RegistryError> {
        if seeds.is_empty() {
            return Err(RegistryError::EmptyTokenSlice);
        }
        for token in &seeds {
            assert!(token.is_valid_deep(), "invalid reserved token {token:?}");
        }

        let tree = Tree::new(&seeds)?;

        let mut by_text = FxHashMap::default();
        let mut single_cp = FxHashMap::default();
        let mut first_cp: FxHashMap<char, Vec<Arc<Token>>> = FxHashMap::default();
        for token in &seeds {
            by_text.insert(token.text().to_owned(), Arc::clone(token));
            // Deep validity guarantees a non-empty lexeme.
            let first = token.code_points()[0];
            if token.cp_len() == 1 {
                single_cp.insert(first, Arc::clone(token));
            }
            first_cp.entry(first).or_default().push(Arc::clone(token));
        }

        tracing::debug!(tokens = seeds.len(), "reserved-token registry published");
        Ok(Self {
            tokens: seeds,
            by_text,
            single_cp,
            first_cp,
            tree,
            sentinel: Arc::new(Token::sentinel()),
        })
    }

    /// The built-in reserved catalog of the Rill language.
    pub fn reserved() -> Self {
        fn reserved_token(lexeme: &str, mode: Mode) -> Arc<Token> {
            Arc::new(Token::from_literal(lexeme).with_mode(mode))
        }

        // `then` is only legal directly after `if`, and `else` only
        // directly after `then`: the one dependency chain in the grammar.
        let tok_if = reserved_token("if", Mode::Control);
        let tok_then = Arc::new(
            Token::from_literal("then")
                .with_mode(Mode::Control)
                .with_requires(Arc::clone(&tok_if)),
        );
        let tok_else = Arc::new(
            Token::from_literal("else")
                .with_mode(Mode::Control)
                .with_requires(Arc::clone(&tok_then)),
        );

        let seeds = vec![
            // one code point
            reserved_token("=", Mode::Control),
            reserved_token("+", Mode::Modifier),
            reserved_token("-", Mode::Modifier),
            reserved_token(",", Mode::Control),
            reserved_token(";", Mode::Control),
            reserved_token("(", Mode::Control),
            reserved_token(")", Mode::Control),
            reserved_token("{", Mode::Control),
            reserved_token("}", Mode::Control),
            reserved_token("|", Mode::Control),
            // two code points
            tok_if,
            reserved_token("bg", Mode::Command),
            // three code points
            reserved_token("str", Mode::Type),
            reserved_token("int", Mode::Type),
            reserved_token("var", Mode::Assign),
            reserved_token("for", Mode::Control),
            reserved_token("EOF", Mode::None),
            // four code points
            reserved_token("bool", Mode::Type),
            reserved_token("func", Mode::Assign),
            tok_then,
            tok_else,
            reserved_token("exec", Mode::Command),
            reserved_token("exit", Mode::Command),
            // five code points
            reserved_token("while", Mode::Control),
            // six code points
            reserved_token("return", Mode::Control),
        ];

        match Self::new(seeds) {
            Ok(registry) => registry,
            // The built-in catalog is non-empty and duplicate-free.
            Err(err) => panic!("built-in reserved catalog rejected: {err}"),
        }
    }

    /// Exact-match lookup of a reserved lexeme.
    ///
    /// Returns the sentinel when `exact` is not a reserved lexeme; the
    /// caller treats that as "not reserved", never as an error.
    pub fn token_from_str(&self, exact: &str) -> Arc<Token> {
        self.by_text
            .get(exact)
            .map_or_else(|| Arc::clone(&self.sentinel), Arc::clone)
    }

    /// O(1) classification of a single code point.
    ///
    /// `Some` only for code points that are themselves complete reserved
    /// tokens (`=`, `|`, ...), not for ones that merely start a longer
    /// token.
    pub fn single_code_point_token(&self, cp: char) -> Option<&Arc<Token>> {
        self.single_cp.get(&cp)
    }

    /// Every reserved token whose lexeme starts with `cp`.
    pub fn starting_with(&self, cp: char) -> &[Arc<Token>] {
        self.first_cp.get(&cp).map_or(&[], Vec::as_slice)
    }

    /// The recognition tree over the whole catalog.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The designated invalid token returned by lookup misses.
    pub fn sentinel(&self) -> &Arc<Token> {
        &self.sentinel
    }

    /// Every token in the catalog, in seed order.
    pub fn tokens(&self) -> &[Arc<Token>] {
        &self.tokens
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
