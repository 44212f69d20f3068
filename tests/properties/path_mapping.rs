//! Property tests for filesystem to repository path mapping.

use std::path::PathBuf;

use proptest::prelude::*;

use lookout::domain::services::{resolve_repository_path, PathResolutionError};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,15}")
        .unwrap()
        .prop_filter("no jcr_root segments", |s| s != "jcr_root" && s != "." && s != "..")
}

fn segments(min: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(segment(), min..=5)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `<prefix>/jcr_root/X` resolves to `/X`.
    #[test]
    fn property_jcr_root_suffix_is_repository_path(
        prefix in segments(0),
        suffix in segments(1),
    ) {
        let mut path = PathBuf::from("/");
        path.extend(&prefix);
        path.push("jcr_root");
        path.extend(&suffix);

        let resolved = resolve_repository_path(&path).unwrap();

        prop_assert_eq!(resolved.as_str(), format!("/{}", suffix.join("/")));
    }

    /// PROPERTY: Without a `jcr_root` ancestor resolution fails.
    #[test]
    fn property_no_jcr_root_fails(
        parts in segments(1),
    ) {
        let mut path = PathBuf::from("/");
        path.extend(&parts);

        let result = resolve_repository_path(&path);
        let is_no_jcr_root = matches!(result, Err(PathResolutionError::NoJcrRoot { .. }));
        prop_assert!(is_no_jcr_root);
    }

    /// PROPERTY: The nearest `jcr_root` wins when several are nested.
    #[test]
    fn property_nearest_jcr_root_wins(
        outer in segments(1),
        inner in segments(1),
    ) {
        let mut path = PathBuf::from("/jcr_root");
        path.extend(&outer);
        path.push("jcr_root");
        path.extend(&inner);

        let resolved = resolve_repository_path(&path).unwrap();

        prop_assert_eq!(resolved.as_str(), format!("/{}", inner.join("/")));
    }
}
