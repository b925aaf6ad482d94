//! Property-based tests for locator resolution.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Every unique abbreviation of an object id resolves to the full id
//! - Ids, messages and paths that name nothing fail with `NotFound`
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::Fixture;
use gitnotes::{CommitLocator, Locator};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn abbreviations_resolve_to_full_id(len in 7usize..=40, upper in any::<bool>()) {
        let fixture = Fixture::new();
        let service = fixture.service();
        let full = fixture.initial.to_string();
        let prefix = if upper {
            full[..len].to_ascii_uppercase()
        } else {
            full[..len].to_string()
        };

        let resolved = service.resolver().resolve_hash(&prefix).unwrap();
        prop_assert_eq!(resolved.as_str(), full.as_str());
    }

    #[test]
    fn unknown_hashes_are_not_found(candidate in "[0-9a-f]{8,40}") {
        let fixture = Fixture::new();
        let known = [
            fixture.initial,
            fixture.second,
            fixture.license_blob(),
            fixture.github_tree(),
        ];
        prop_assume!(known.iter().all(|oid| !oid.to_string().starts_with(&candidate)));

        let service = fixture.service();
        let err = service.resolve(&Locator::Hash(candidate)).unwrap_err();
        prop_assert!(err.is_not_found());
    }

    #[test]
    fn unknown_messages_and_paths_are_not_found(needle in "[A-Z]{3,12}") {
        // The only uppercase run in the fixture is the LICENSE path.
        prop_assume!(needle != "LICENSE");
        let fixture = Fixture::new();
        let service = fixture.service();

        prop_assert!(service.resolver().resolve_commit(&needle).unwrap_err().is_not_found());
        prop_assert!(service
            .resolver()
            .resolve_file(&needle, &CommitLocator::infer("Initial commit"))
            .unwrap_err()
            .is_not_found());
        prop_assert!(service
            .resolver()
            .resolve_folder(&needle, &CommitLocator::infer("another folder"))
            .unwrap_err()
            .is_not_found());
    }
}
