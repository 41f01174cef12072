use super::*;

fn path(s: &str) -> DestinationPath {
    DestinationPath::new(s).unwrap()
}

#[test]
fn manifest_new_is_empty() {
    let manifest = Manifest::new();

    assert!(manifest.is_empty());
    assert_eq!(manifest.len(), 0);
    assert_eq!(manifest.version(), MANIFEST_VERSION);
    assert!(manifest.generated_at().is_none());
}

#[test]
fn manifest_insert_and_get() {
    let mut manifest = Manifest::new();
    let hash = ContentHash::from_content("B-content");
    manifest.insert(
        path("web/robots.txt"),
        ManifestEntry::new("b", hash.clone(), ScaffoldKind::Replace),
    );

    let entry = manifest.get(&path("web/robots.txt")).unwrap();
    assert_eq!(entry.package(), "b");
    assert_eq!(entry.hash(), &hash);
    assert_eq!(entry.kind(), ScaffoldKind::Replace);
    assert!(!entry.symlink_fallback());
    assert_eq!(manifest.get_hash(&path("web/robots.txt")), Some(&hash));
}

#[test]
fn manifest_keys_are_normalized_paths() {
    let mut manifest = Manifest::new();
    manifest.insert(
        path("web/robots.txt/"),
        ManifestEntry::new("a", ContentHash::new("abc"), ScaffoldKind::Replace),
    );

    assert!(manifest.contains(&path("./web/robots.txt")));
}

#[test]
fn manifest_remove() {
    let mut manifest = Manifest::new();
    manifest.insert(
        path("a.txt"),
        ManifestEntry::new("a", ContentHash::new("abc"), ScaffoldKind::Replace),
    );

    let removed = manifest.remove(&path("a.txt"));
    assert!(removed.is_some());
    assert!(manifest.is_empty());
}

#[test]
fn manifest_owned_by_filters_package() {
    let mut manifest = Manifest::new();
    manifest.insert(
        path("a.txt"),
        ManifestEntry::new("a", ContentHash::new("1"), ScaffoldKind::Replace),
    );
    manifest.insert(
        path("b.txt"),
        ManifestEntry::new("b", ContentHash::new("2"), ScaffoldKind::Replace),
    );
    manifest.insert(
        path("c.txt"),
        ManifestEntry::new("a", ContentHash::new("3"), ScaffoldKind::Symlink),
    );

    let owned: Vec<&str> = manifest.owned_by("a").map(|p| p.as_str()).collect();
    assert_eq!(owned, vec!["a.txt", "c.txt"]);
}

#[test]
fn manifest_managed_paths_sorted() {
    let mut manifest = Manifest::new();
    for p in ["web/z.txt", "web/a.txt", ".editorconfig"] {
        manifest.insert(
            path(p),
            ManifestEntry::new("pkg", ContentHash::new("x"), ScaffoldKind::Replace),
        );
    }

    assert_eq!(
        manifest.managed_paths(),
        vec![".editorconfig", "web/a.txt", "web/z.txt"]
    );
}

#[test]
fn manifest_entry_contributors() {
    let entry = ManifestEntry::new("b", ContentHash::new("x"), ScaffoldKind::Append)
        .with_contributors(vec!["a".to_string(), "b".to_string()])
        .with_symlink_fallback(true);

    assert_eq!(entry.contributors(), ["a".to_string(), "b".to_string()]);
    assert!(entry.symlink_fallback());
}
