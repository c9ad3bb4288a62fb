use super::{is_valid_id, BlockIdGenerator, ALPHABET, ID_LENGTH};
use std::collections::HashSet;

#[test]
fn test_alphabet_has_no_ambiguous_letters() {
    assert_eq!(ALPHABET.len(), 34);
    assert!(!ALPHABET.contains(&b'l'));
    assert!(!ALPHABET.contains(&b'o'));
    assert!(ALPHABET.contains(&b'0'));
}

#[test]
fn test_generated_ids_conform() {
    let mut ids = BlockIdGenerator::seeded(7);
    for _ in 0..200 {
        let id = ids.generate();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(is_valid_id(&id), "unexpected id {id}");
    }
}

#[test]
fn test_seeded_generators_agree() {
    let mut a = BlockIdGenerator::seeded(42);
    let mut b = BlockIdGenerator::seeded(42);
    assert_eq!(a.generate(), b.generate());
}

#[test]
fn test_unique_skips_taken_ids() {
    let first = BlockIdGenerator::seeded(3).generate();
    let mut ids = BlockIdGenerator::seeded(3);
    let mut allocated = HashSet::new();
    let id = ids.generate_unique(|candidate| candidate == first, &mut allocated);
    assert_ne!(id, first);
    assert!(allocated.contains(&id));
}

#[test]
fn test_unique_never_repeats_within_a_batch() {
    let mut ids = BlockIdGenerator::seeded(11);
    let mut allocated = HashSet::new();
    for _ in 0..500 {
        ids.generate_unique(|_| false, &mut allocated);
    }
    assert_eq!(allocated.len(), 500);
}

#[test]
fn test_rejects_malformed_ids() {
    assert!(!is_valid_id("abc12"));
    assert!(!is_valid_id("abcl23"));
    assert!(!is_valid_id("ABC123"));
    assert!(is_valid_id("abc123"));
}
