use std::sync::Arc;

use pretty_assertions::assert_eq;

use rill_token::{Mode, Token};

use super::Registry;
use crate::RegistryError;

fn tok(lexeme: &str) -> Arc<Token> {
    Arc::new(Token::from_literal(lexeme))
}

// === Built-in catalog ===

#[test]
fn every_reserved_token_is_deep_valid() {
    let registry = Registry::reserved();
    assert_eq!(registry.tokens().len(), 25);
    for token in registry.tokens() {
        assert!(token.is_valid_deep(), "catalog token {token:?} is invalid");
    }
}

#[test]
fn token_from_str_round_trips_every_lexeme() {
    let registry = Registry::reserved();
    for token in registry.tokens() {
        let found = registry.token_from_str(token.text());
        assert!(Arc::ptr_eq(&found, token), "lost {:?}", token.text());
        assert_eq!(found.text(), token.text());
    }
}

#[test]
fn unknown_lexemes_map_to_the_sentinel() {
    let registry = Registry::reserved();
    for unknown in ["", "nope", "iff", "BAD", "retur", "returns"] {
        let found = registry.token_from_str(unknown);
        assert!(found.is_sentinel(), "{unknown:?} should miss");
        assert!(!found.is_valid());
    }
}

#[test]
fn modes_follow_the_grammar() {
    let registry = Registry::reserved();
    let cases = [
        ("=", Mode::Control),
        ("+", Mode::Modifier),
        ("|", Mode::Control),
        ("bg", Mode::Command),
        ("int", Mode::Type),
        ("var", Mode::Assign),
        ("EOF", Mode::None),
        ("func", Mode::Assign),
        ("exec", Mode::Command),
        ("while", Mode::Control),
    ];
    for (lexeme, mode) in cases {
        assert_eq!(registry.token_from_str(lexeme).mode(), mode, "{lexeme}");
    }
}

#[test]
fn dependency_chain_has_depth_two() {
    let registry = Registry::reserved();

    let tok_then = registry.token_from_str("then");
    let tok_if = tok_then.requires().unwrap();
    assert_eq!(tok_if.text(), "if");
    assert!(tok_if.requires().is_none());

    let tok_else = registry.token_from_str("else");
    let required = tok_else.requires().unwrap();
    assert_eq!(required.text(), "then");
    assert!(Arc::ptr_eq(required, &tok_then));
}

#[test]
fn single_code_point_classification() {
    let registry = Registry::reserved();
    for cp in ['=', '+', '-', ',', ';', '(', ')', '{', '}', '|'] {
        let token = registry.single_code_point_token(cp).unwrap();
        assert_eq!(token.cp_len(), 1);
        assert_eq!(token.text(), cp.to_string());
    }
    // 'i' starts "if" and "int" but is not itself a token.
    assert!(registry.single_code_point_token('i').is_none());
    assert!(registry.single_code_point_token('x').is_none());
}

#[test]
fn first_code_point_index_lists_all_starters() {
    let registry = Registry::reserved();

    let starters: Vec<&str> = registry
        .starting_with('e')
        .iter()
        .map(|t| t.text())
        .collect();
    assert_eq!(starters, ["else", "exec", "exit"]);

    // "EOF" is capitalized: distinct first code point.
    let upper: Vec<&str> = registry
        .starting_with('E')
        .iter()
        .map(|t| t.text())
        .collect();
    assert_eq!(upper, ["EOF"]);

    assert!(registry.starting_with('z').is_empty());
}

#[test]
fn tree_dispatches_on_first_code_point() {
    let registry = Registry::reserved();

    let branch = registry.tree().branch_for('i').unwrap();
    assert_eq!(branch.root().text(), "if");

    let branch = registry.tree().branch_for('w').unwrap();
    assert_eq!(branch.root().text(), "while");
    assert!(branch.is_leaf());

    assert!(registry.tree().branch_for('q').is_none());
}

#[test]
fn sentinel_accessor_is_never_valid() {
    let registry = Registry::reserved();
    assert!(registry.sentinel().is_sentinel());
    assert!(!registry.sentinel().is_valid());
}

// === Construction ===

#[test]
fn empty_seed_set_is_rejected() {
    assert_eq!(
        Registry::new(Vec::new()).unwrap_err(),
        RegistryError::EmptyTokenSlice,
    );
}

#[test]
fn duplicate_seeds_are_rejected() {
    let err = Registry::new(vec![tok("int"), tok("int")]).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateSeed("int".to_owned()));
}

#[test]
#[should_panic(expected = "invalid reserved token")]
fn deep_invalid_seed_aborts_construction() {
    // "BAD" is shallow-valid but collides with the sentinel's rendering,
    // so deep validation refuses to publish it.
    let _ = Registry::new(vec![tok("BAD")]);
}

#[test]
fn alternate_registries_can_be_built_for_tests() {
    let registry = Registry::new(vec![tok("in"), tok("int"), tok("integer")]).unwrap();

    assert_eq!(registry.token_from_str("int").text(), "int");
    let branch = registry.tree().branch_for('i').unwrap();
    assert_eq!(branch.root().text(), "in");
    assert_eq!(branch.has_matches('t'), Some(1));
}

// === Sharing ===

#[test]
fn published_structures_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
    assert_send_sync::<crate::Tree>();
    assert_send_sync::<crate::Branch>();
    assert_send_sync::<Token>();
}
