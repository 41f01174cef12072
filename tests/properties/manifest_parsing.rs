//! Property tests for manifest parsing.

use std::path::Path;

use proptest::prelude::*;

use scaffold_sync::infrastructure::repositories::parse_manifest;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,512}") {
        let _ = parse_manifest(&s, Path::new("scaffold-manifest.toml"));
    }

    /// PROPERTY: Unsafe keys are dropped and remembered, never loaded.
    #[test]
    fn property_unsafe_keys_are_not_managed(depth in 1usize..4, name in "[a-z]{1,8}") {
        let key = format!("{}{}", "../".repeat(depth), name);
        let text = format!(
            "version = 1\n\n[files.\"{}\"]\npackage = \"evil/pkg\"\nhash = \"sha256:00\"\nkind = \"replace\"\n",
            key
        );

        let manifest = parse_manifest(&text, Path::new("scaffold-manifest.toml")).unwrap();

        prop_assert!(manifest.is_empty());
        prop_assert_eq!(manifest.ignored_keys(), &[key][..]);
    }
}
