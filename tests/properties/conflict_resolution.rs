//! Property tests for precedence between packages.

use proptest::prelude::*;

use scaffold_sync::domain::entities::ScaffoldFileEntry;
use scaffold_sync::domain::services::ConflictResolver;
use scaffold_sync::{DestinationPath, ScaffoldKind};

fn entry(path: &DestinationPath, package: usize, order: usize, overrides: bool) -> ScaffoldFileEntry {
    ScaffoldFileEntry::new(path.clone(), format!("vendor/p{}", package), ScaffoldKind::Replace, order)
        .with_source(format!("/vendor/p{}/file", package))
        .with_override(overrides)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A path declared once resolves to exactly that declaration.
    #[test]
    fn property_single_candidate_wins(
        package in 0usize..20,
        order in 0usize..20,
        overrides in any::<bool>(),
    ) {
        let path = DestinationPath::new("web/robots.txt").unwrap();
        let only = entry(&path, package, order, overrides);

        let winner = ConflictResolver::resolve_path(&path, std::slice::from_ref(&only)).unwrap();

        prop_assert_eq!(winner.base, Some(only));
        prop_assert!(winner.fragments.is_empty());
        prop_assert!(winner.overridden.is_empty());
    }

    /// PROPERTY: The override declaration wins regardless of processing order.
    #[test]
    fn property_override_wins_in_any_order(
        orders in Just((0..6usize).collect::<Vec<_>>()).prop_shuffle(),
        overrider in 0usize..6,
    ) {
        let path = DestinationPath::new("web/robots.txt").unwrap();
        let entries: Vec<ScaffoldFileEntry> = orders
            .iter()
            .enumerate()
            .map(|(package, &order)| entry(&path, package, order, package == overrider))
            .collect();

        let winner = ConflictResolver::resolve_path(&path, &entries).unwrap();

        prop_assert_eq!(winner.owner(), format!("vendor/p{}", overrider));
        prop_assert_eq!(winner.overridden.len(), 5);
    }

    /// PROPERTY: Without overrides, the last processed package wins.
    #[test]
    fn property_last_processed_wins(
        orders in Just((0..6usize).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let path = DestinationPath::new("web/robots.txt").unwrap();
        let entries: Vec<ScaffoldFileEntry> = orders
            .iter()
            .enumerate()
            .map(|(package, &order)| entry(&path, package, order, false))
            .collect();
        let last = orders.iter().position(|&o| o == 5).unwrap();

        let winner = ConflictResolver::resolve_path(&path, &entries).unwrap();

        prop_assert_eq!(winner.owner(), format!("vendor/p{}", last));
    }

    /// PROPERTY: Two override claims are always a conflict.
    #[test]
    fn property_two_overrides_conflict(
        orders in Just((0..4usize).collect::<Vec<_>>()).prop_shuffle(),
        first in 0usize..4,
        offset in 1usize..4,
    ) {
        let second = (first + offset) % 4;
        let path = DestinationPath::new("web/robots.txt").unwrap();
        let entries: Vec<ScaffoldFileEntry> = orders
            .iter()
            .enumerate()
            .map(|(package, &order)| entry(&path, package, order, package == first || package == second))
            .collect();

        prop_assert!(ConflictResolver::resolve_path(&path, &entries).is_err());
    }
}
