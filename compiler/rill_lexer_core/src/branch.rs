//! Recognition node rooted at one reserved token.
//!
//! A branch indexes every reserved token that is strictly longer than its
//! root and shares the root's full prefix. The index is keyed jointly by
//! the diverging code point (the one right after the shared prefix) and
//! the distance in code points from the root to each candidate. Distance
//! lists are kept sorted ascending, so the first entry is always the
//! nearest completable token.
//!
//! # Invariant
//!
//! Every indexed candidate satisfies `candidate.cp_len() > root.cp_len()`
//! and `candidate.code_points()` starts with `root.code_points()`, so
//! `distance = candidate.cp_len() - root.cp_len()` is at least 1.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use rill_token::Token;

use crate::error::RegistryError;

/// Sorted distances recorded for one diverging code point.
///
/// Two inline slots: no code point in the reserved catalog leads to more
/// than two longer tokens, so these lists stay off the heap.
type DistanceList = SmallVec<[usize; 2]>;

/// Recognition node rooted at one reserved token.
///
/// Built during registry construction and read-only afterwards; the query
/// operations [`Branch::has_matches`] and [`Branch::is_leaf`] never
/// mutate and never error.
#[derive(Debug)]
pub struct Branch {
    root: Arc<Token>,
    /// Diverging code point -> sorted distances to the tokens reachable
    /// through it.
    next_cp_distances: FxHashMap<char, DistanceList>,
    /// Distance -> child branches rooted at the tokens that far away.
    children_by_distance: FxHashMap<usize, Vec<Branch>>,
}

impl Branch {
    /// Create an empty index over a single root token.
    pub fn new(root: Arc<Token>) -> Self {
        Self {
            root,
            next_cp_distances: FxHashMap::default(),
            children_by_distance: FxHashMap::default(),
        }
    }

    /// The token this branch is rooted at.
    pub fn root(&self) -> &Arc<Token> {
        &self.root
    }

    /// True when this branch indexes no further extensions.
    pub fn is_leaf(&self) -> bool {
        self.children_by_distance.is_empty()
    }

    /// Look up the diverging code point and return the distance to the
    /// nearest completable token.
    ///
    /// `None` means no reserved token reachable from this branch
    /// continues with `next_cp`. That is an expected outcome, not an
    /// error.
    pub fn has_matches(&self, next_cp: char) -> Option<usize> {
        self.next_cp_distances
            .get(&next_cp)
            .and_then(|distances| distances.first().copied())
    }

    /// Index `candidate` as a longer token reachable from this root.
    ///
    /// Rejections are recoverable: the caller can skip or report a single
    /// bad entry and keep inserting others.
    pub fn add_token(&mut self, candidate: Arc<Token>) -> Result<(), RegistryError> {
        self.check_token(&candidate)?;
        self.insert(candidate);
        Ok(())
    }

    /// Index a whole batch of candidates.
    ///
    /// # Panics
    ///
    /// Panics on an empty batch, and on any candidate that fails
    /// validation, naming the offending lexeme. The whole batch is
    /// validated before anything is inserted, so a failed batch leaves
    /// the branch untouched.
    pub fn add_tokens(&mut self, candidates: &[Arc<Token>]) {
        assert!(!candidates.is_empty(), "{}", RegistryError::EmptyTokenSlice);
        for candidate in candidates {
            if let Err(err) = self.check_token(candidate) {
                panic!("invalid token {:?} in batch: {err}", candidate.text());
            }
        }
        for candidate in candidates {
            self.insert(Arc::clone(candidate));
        }
    }

    /// Validate a candidate against this root without mutating anything.
    fn check_token(&self, candidate: &Token) -> Result<(), RegistryError> {
        if candidate.code_points().is_empty() {
            return Err(RegistryError::EmptyToken);
        }
        if !candidate.is_valid() {
            return Err(RegistryError::BadToken(candidate.text().to_owned()));
        }
        if candidate.cp_len() <= self.root.cp_len() {
            return Err(self.not_a_descendant(candidate));
        }
        // Full shared-prefix check. Comparing only the code point at
        // root_len - 1 would admit candidates that diverge earlier
        // whenever the caller has not pre-filtered by first code point.
        if !candidate.code_points().starts_with(self.root.code_points()) {
            return Err(self.not_a_descendant(candidate));
        }
        Ok(())
    }

    fn not_a_descendant(&self, candidate: &Token) -> RegistryError {
        RegistryError::NotADescendant {
            candidate: candidate.text().to_owned(),
            root: self.root.text().to_owned(),
        }
    }

    /// Record a checked candidate under its diverging code point.
    fn insert(&mut self, candidate: Arc<Token>) {
        let root_len = self.root.cp_len();
        let distance = candidate.cp_len() - root_len;
        // The length check makes a non-positive distance impossible;
        // reaching this means a caller broke the check/insert pairing.
        assert!(
            distance >= 1,
            "non-positive distance for {:?} under root {:?}",
            candidate.text(),
            self.root.text(),
        );

        let diverging = candidate.code_points()[root_len];
        let distances = self.next_cp_distances.entry(diverging).or_default();
        let at = distances.partition_point(|&d| d <= distance);
        distances.insert(at, distance);

        self.children_by_distance
            .entry(distance)
            .or_default()
            .push(Branch::new(candidate));
    }
}
