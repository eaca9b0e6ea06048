//! Property-based tests for path manipulation functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{clone_url, repo_relative_dir, to_forward_slashes};
    use proptest::prelude::*;
    use std::path::{Component, Path};

    // ============================================================================
    // to_forward_slashes property tests
    // ============================================================================

    proptest! {
        /// Property: rendered paths never contain a backslash
        #[test]
        fn forward_slashes_never_contain_backslash(input in "[a-zA-Z0-9_./\\\\-]*") {
            let rendered = to_forward_slashes(Path::new(&input));
            prop_assert!(!rendered.contains('\\'));
        }

        /// Property: rendering is idempotent
        #[test]
        fn forward_slashes_is_idempotent(input in "[a-zA-Z0-9_./\\\\-]*") {
            let once = to_forward_slashes(Path::new(&input));
            let twice = to_forward_slashes(Path::new(&once));
            prop_assert_eq!(once, twice);
        }
    }

    // ============================================================================
    // repo_relative_dir property tests
    // ============================================================================

    proptest! {
        /// Property: a relative dir never escapes the submodule root
        #[test]
        fn relative_dir_only_has_normal_components(input in "[a-zA-Z0-9_./:@-]{0,40}") {
            if let Ok(dir) = repo_relative_dir(&input) {
                for component in dir.components() {
                    prop_assert!(
                        matches!(component, Component::Normal(_)),
                        "unexpected component {:?} from '{}'",
                        component,
                        input
                    );
                }
            }
        }

        /// Property: a shorthand and its expanded clone URL share a location
        #[test]
        fn shorthand_and_clone_url_share_location(
            owner in "[a-zA-Z0-9_-]{1,12}",
            name in "[a-zA-Z0-9_-]{1,12}(\\.nvim)?",
        ) {
            let shorthand = format!("{}/{}", owner, name);
            let from_shorthand = repo_relative_dir(&shorthand).unwrap();
            let from_url = repo_relative_dir(&clone_url(&shorthand)).unwrap();
            prop_assert_eq!(from_shorthand, from_url);
        }
    }
}
