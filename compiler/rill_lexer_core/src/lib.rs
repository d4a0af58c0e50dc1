//! Reserved-token recognition core for the Rill lexer.
//!
//! Given the reserved lexemes of the language, this crate answers, one
//! code point at a time, whether the input consumed so far can still
//! extend into a longer reserved token, and by how many code points,
//! without rescanning from the start.
//!
//! The structures build once and are read-only afterwards:
//!
//! - [`Registry`]: the validated catalog of every reserved token, with
//!   exact-match and first-code-point indexes.
//! - [`Tree`]: dispatch from a token's first code point to its branch.
//! - [`Branch`]: a recognition node rooted at one token, indexing the
//!   longer tokens that share its prefix by diverging code point and
//!   distance.
//!
//! The lexer driver asks [`Tree::branch_for`] for the branch matching the
//! first code point, then probes [`Branch::has_matches`] per code point.
//! A miss is an expected outcome, never an error.
//!
//! ```
//! use rill_lexer_core::Registry;
//!
//! let registry = Registry::reserved();
//! assert!(registry.tree().branch_for('i').is_some());
//! assert_eq!(registry.token_from_str("while").text(), "while");
//! assert!(registry.token_from_str("nope").is_sentinel());
//! ```

mod branch;
mod error;
mod registry;
mod tree;

pub use branch::Branch;
pub use error::RegistryError;
pub use registry::Registry;
pub use tree::Tree;
