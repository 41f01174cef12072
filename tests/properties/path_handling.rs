//! Property tests for destination path validation.

use proptest::prelude::*;

use scaffold_sync::domain::value_objects::normalize_relative;
use scaffold_sync::{DestinationPath, Locations};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,11}")
        .unwrap()
        .prop_filter("not a dot segment", |s| s != "." && s != ".." && s != ".git")
}

fn relative_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=5).prop_map(|s| s.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Validation never panics on arbitrary input.
    #[test]
    fn property_validation_never_panics(s in "(?s).{0,256}") {
        let _ = DestinationPath::new(&s);
        let _ = normalize_relative(&s);
    }

    /// PROPERTY: Every accepted path stays under the project root.
    #[test]
    fn property_accepted_paths_are_contained(s in "[a-z./\\\\:]{0,40}") {
        if let Ok(path) = DestinationPath::new(&s) {
            let root = std::path::Path::new("/project");
            prop_assert!(path.to_path(root).starts_with(root));
            prop_assert!(!path.as_str().starts_with('/'));
            prop_assert!(path.segments().all(|seg| !seg.is_empty() && seg != "." && seg != ".."));
        }
    }

    /// PROPERTY: Normalization is idempotent.
    #[test]
    fn property_normalization_is_idempotent(s in "[a-z./]{0,40}") {
        if let Ok(path) = DestinationPath::new(&s) {
            let again = DestinationPath::new(path.as_str()).unwrap();
            prop_assert_eq!(again, path);
        }
    }

    /// PROPERTY: Any `..` segment is rejected, wherever it appears.
    #[test]
    fn property_traversal_is_rejected(
        before in proptest::collection::vec(segment(), 0..3),
        after in proptest::collection::vec(segment(), 0..3),
    ) {
        let mut parts = before;
        parts.push("..".to_string());
        parts.extend(after);
        prop_assert!(DestinationPath::new(&parts.join("/")).is_err());
    }

    /// PROPERTY: Redundant separators and `.` segments do not change the path.
    #[test]
    fn property_noise_segments_collapse(path in relative_path()) {
        let noisy = format!("./{}", path.replace('/', "//./"));
        prop_assert_eq!(
            DestinationPath::new(&noisy).unwrap(),
            DestinationPath::new(&path).unwrap()
        );
    }

    /// PROPERTY: Expanding a location yields the same path as writing it out.
    #[test]
    fn property_location_expansion(location in relative_path(), rest in relative_path()) {
        let locations = Locations::new([("web-root".to_string(), location.clone())].into()).unwrap();
        let expanded = locations.expand(&format!("[web-root]/{}", rest)).unwrap();
        prop_assert_eq!(expanded, format!("{}/{}", location, rest));
    }
}
