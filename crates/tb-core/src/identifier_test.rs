use super::*;
use std::collections::HashSet;

#[test]
fn test_generate_keeps_prefix() {
    let id = Identifier::generate("test_");
    assert!(id.starts_with("test_"));
    assert_eq!(id.len(), "test_".len() + SUFFIX_LEN);
}

#[test]
fn test_generate_empty_prefix_never_starts_with_digit() {
    for _ in 0..1_000 {
        let id = Identifier::generate("");
        assert_eq!(id.len(), SUFFIX_LEN);
        assert!(id.starts_with(|c: char| c.is_ascii_lowercase()), "got {id}");
        assert!(is_safe(&id), "unsafe identifier: {id}");
    }
}

#[test]
fn test_generate_empty_prefix_stays_distinct() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(Identifier::generate("").into_inner()));
    }
}

#[test]
fn test_generate_replaces_unsafe_prefix_characters() {
    let id = Identifier::generate("x; drop schema main cascade; --");
    assert!(id.starts_with("x__drop_schema_main_cascade____"), "got {id}");
    assert!(is_safe(&id));
}

#[test]
fn test_generate_guards_leading_digit_prefix() {
    let id = Identifier::generate("9lives_");
    assert!(id.starts_with("_9lives_"), "got {id}");
    assert!(is_safe(&id));
}

#[test]
fn test_leading_letter_is_injective() {
    let mapped: HashSet<char> = "0123456789abcdef".chars().map(leading_letter).collect();
    assert_eq!(mapped.len(), 16);
    assert!(mapped.iter().all(|c| c.is_ascii_lowercase()));
}

#[test]
fn test_generate_lowercases_prefix() {
    let id = Identifier::generate("Run_");
    assert!(id.starts_with("run_"));
    assert!(is_safe(&id));
}

#[test]
fn test_test_schema_prefix() {
    let id = Identifier::test_schema();
    assert!(id.as_str().starts_with(TEST_SCHEMA_PREFIX));
}

#[test]
fn test_generated_identifiers_are_distinct() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let id = Identifier::generate("test_");
        assert!(seen.insert(id.into_inner()), "identifier collision");
    }
    assert_eq!(seen.len(), 10_000);
}

#[test]
fn test_generated_identifier_is_ddl_safe() {
    for _ in 0..100 {
        let id = Identifier::test_schema();
        assert!(is_safe(id.as_str()), "unsafe identifier: {id}");
    }
}

#[test]
fn test_validate_prefix_accepts_safe_values() {
    assert!(Identifier::validate_prefix("").is_ok());
    assert!(Identifier::validate_prefix("test_").is_ok());
    assert!(Identifier::validate_prefix("_ci_run_").is_ok());
}

#[test]
fn test_validate_prefix_rejects_quotes() {
    let err = Identifier::validate_prefix("x\"; drop").unwrap_err();
    assert!(matches!(err, CoreError::InvalidPrefix { .. }));
    assert!(err.to_string().contains("[C004]"));
}

#[test]
fn test_validate_prefix_rejects_leading_digit() {
    let err = Identifier::validate_prefix("1abc").unwrap_err();
    assert!(err.to_string().contains("must not start with a digit"));
}

#[test]
fn test_display_and_str_eq() {
    let id = Identifier::generate("t_");
    assert_eq!(id.to_string(), id.as_str());
    assert!(id == id.as_str());
}
