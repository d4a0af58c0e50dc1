//! First-code-point dispatch over the reserved tokens.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use rill_token::Token;

use crate::branch::Branch;
use crate::error::RegistryError;

/// Mapping from a token's first code point to its recognition branch.
///
/// Constructed once from a non-empty, duplicate-free seed set during
/// registry construction; read-only afterwards.
#[derive(Debug)]
pub struct Tree {
    branches: FxHashMap<char, Branch>,
}

impl Tree {
    /// Group seed tokens by first code point into branches.
    ///
    /// The first seed observed for a given code point roots that branch.
    /// A later seed sharing the code point is indexed under the branch
    /// when it extends the root, and skipped when it does not (it stays
    /// reachable through the registry's exact-match table). Empty seed
    /// sets and seeds sharing an identical full lexeme (compared by
    /// rendered string, not by reference) are build-time defects.
    pub fn new(seeds: &[Arc<Token>]) -> Result<Self, RegistryError> {
        if seeds.is_empty() {
            return Err(RegistryError::EmptyTokenSlice);
        }

        let mut seen = FxHashSet::default();
        let mut branches: FxHashMap<char, Branch> = FxHashMap::default();
        for seed in seeds {
            if !seen.insert(seed.text().to_owned()) {
                return Err(RegistryError::DuplicateSeed(seed.text().to_owned()));
            }
            let Some(first) = seed.code_points().first().copied() else {
                return Err(RegistryError::EmptyToken);
            };
            match branches.entry(first) {
                Entry::Vacant(slot) => {
                    slot.insert(Branch::new(Arc::clone(seed)));
                }
                Entry::Occupied(mut slot) => {
                    match slot.get_mut().add_token(Arc::clone(seed)) {
                        Ok(()) => {}
                        Err(RegistryError::NotADescendant { candidate, root }) => {
                            // Same first code point, but not an extension of
                            // the branch root (e.g. "exit" after "else").
                            tracing::trace!(
                                seed = %candidate,
                                root = %root,
                                "seed does not extend its branch root",
                            );
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }
        Ok(Self { branches })
    }

    /// The branch for tokens starting with `first_cp`, if any reserved
    /// token does.
    pub fn branch_for(&self, first_cp: char) -> Option<&Branch> {
        self.branches.get(&first_cp)
    }
}
