//! Property tests for append-file assembly.

use proptest::prelude::*;

use scaffold_sync::domain::services::assemble_append;

fn fragment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z =;$<>?\n]{0,24}").unwrap()
}

proptest! {
    /// PROPERTY: Assembled content ends with a newline unless it is empty.
    #[test]
    fn property_assembled_ends_with_newline(parts in proptest::collection::vec(fragment(), 0..6)) {
        let out = assemble_append(parts.iter().map(|p| p.as_bytes()));
        prop_assert!(out.is_empty() || out.ends_with(b"\n"));
        prop_assert_eq!(out.is_empty(), parts.iter().all(|p| p.is_empty()));
    }

    /// PROPERTY: Every fragment appears in order, unmodified.
    #[test]
    fn property_fragments_keep_order(parts in proptest::collection::vec(fragment(), 1..6)) {
        let out = String::from_utf8(assemble_append(parts.iter().map(|p| p.as_bytes()))).unwrap();
        let mut cursor = 0;
        for part in parts.iter().filter(|p| !p.is_empty()) {
            let found = out[cursor..].find(part.as_str());
            prop_assert!(found.is_some(), "fragment {:?} missing from {:?}", part, out);
            cursor += found.unwrap() + part.len();
        }
    }

    /// PROPERTY: Assembly is deterministic.
    #[test]
    fn property_assembly_is_deterministic(parts in proptest::collection::vec(fragment(), 0..6)) {
        let a = assemble_append(parts.iter().map(|p| p.as_bytes()));
        let b = assemble_append(parts.iter().map(|p| p.as_bytes()));
        prop_assert_eq!(a, b);
    }
}
