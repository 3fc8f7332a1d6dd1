use crate::boundary::BoundaryWarning;
use crate::domain::version::{self, CalVer, RawVersion, SemVer, Versioned};
use crate::domain::Scheme;
use crate::error::{Result, ScanError};

/// Tags that survived validity and suffix filtering
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilteredTags {
    pub valid: Vec<String>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Keep the tags that parse under `scheme` and contain none of `ignore_suffixes`.
///
/// Suffix matching is case-sensitive and unanchored, applied after the validity
/// check. An empty suffix matches every tag. Input order is preserved.
pub fn filter_tags(tags: &[String], scheme: Scheme, ignore_suffixes: &[String]) -> FilteredTags {
    let mut filtered = FilteredTags::default();
    let mut invalid = 0;

    for tag in tags {
        if !version::is_valid(tag, scheme) {
            invalid += 1;
            continue;
        }

        let ignored = ignore_suffixes
            .iter()
            .find(|suffix| tag.contains(suffix.as_str()));

        match ignored {
            Some(suffix) => filtered.warnings.push(BoundaryWarning::TagIgnoredBySuffix {
                tag: tag.clone(),
                suffix: suffix.clone(),
            }),
            None => filtered.valid.push(tag.clone()),
        }
    }

    if invalid > 0 {
        filtered.warnings.insert(
            0,
            BoundaryWarning::InvalidTagsSkipped {
                scheme,
                count: invalid,
            },
        );
    }

    filtered
}

fn sort_as<V: Versioned>(tags: &[String]) -> Vec<String> {
    let mut versions: Vec<V> = tags.iter().filter_map(|t| V::parse(t).ok()).collect();
    // Stable: equal-ranked tags keep their input order
    versions.sort();
    versions.into_iter().map(|v| v.original().to_string()).collect()
}

/// Sort tags ascending under `scheme`, dropping any that do not parse
pub fn sort_tags(tags: &[String], scheme: Scheme) -> Vec<String> {
    match scheme {
        Scheme::SemVer => sort_as::<SemVer>(tags),
        Scheme::CalVer => sort_as::<CalVer>(tags),
        Scheme::String => sort_as::<RawVersion>(tags),
    }
}

/// Highest-ranked tag of an already filtered set.
///
/// Among equal-ranked tags the one appearing last in `valid` wins.
pub fn latest_of(valid: &[String], scheme: Scheme) -> Result<String> {
    sort_tags(valid, scheme)
        .pop()
        .ok_or(ScanError::NoValidTags { scheme })
}

/// Select the highest-ranked tag after validity and suffix filtering
pub fn select_latest(
    tags: &[String],
    scheme: Scheme,
    ignore_suffixes: &[String],
) -> Result<String> {
    let filtered = filter_tags(tags, scheme, ignore_suffixes);
    latest_of(&filtered.valid, scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_latest_semver() {
        let latest = select_latest(&tags(&["v1.2.0", "v1.3.0", "v1.2.5"]), Scheme::SemVer, &[]);
        assert_eq!(latest.unwrap(), "v1.3.0");
    }

    #[test]
    fn test_select_latest_calver() {
        let latest = select_latest(
            &tags(&["2024.05.1", "2024.04.9", "2023.12.1"]),
            Scheme::CalVer,
            &[],
        );
        assert_eq!(latest.unwrap(), "2024.05.1");
    }

    #[test]
    fn test_select_latest_calver_numeric_not_lexicographic() {
        let latest = select_latest(&tags(&["2024.10.1", "2024.9.3"]), Scheme::CalVer, &[]);
        assert_eq!(latest.unwrap(), "2024.10.1");
    }

    #[test]
    fn test_select_latest_string() {
        let latest = select_latest(&tags(&["b", "a", "c"]), Scheme::String, &[]);
        assert_eq!(latest.unwrap(), "c");
    }

    #[test]
    fn test_select_latest_ignores_suffix() {
        let latest = select_latest(
            &tags(&["1.0.0", "1.0.0-beta", "2.0.0-beta"]),
            Scheme::SemVer,
            &tags(&["beta"]),
        );
        assert_eq!(latest.unwrap(), "1.0.0");

        let latest = select_latest(
            &tags(&["1.0.0", "1.0.0-beta", "2.0.0"]),
            Scheme::SemVer,
            &tags(&["beta"]),
        );
        assert_eq!(latest.unwrap(), "2.0.0");
    }

    #[test]
    fn test_suffix_match_is_case_sensitive_substring() {
        let filtered = filter_tags(
            &tags(&["1.0.0-BETA", "1.1.0-rc.beta.1", "1.2.0"]),
            Scheme::SemVer,
            &tags(&["beta"]),
        );
        assert_eq!(filtered.valid, tags(&["1.0.0-BETA", "1.2.0"]));
        assert_eq!(
            filtered.warnings,
            vec![BoundaryWarning::TagIgnoredBySuffix {
                tag: "1.1.0-rc.beta.1".to_string(),
                suffix: "beta".to_string(),
            }]
        );
    }

    #[test]
    fn test_invalid_tags_are_skipped_not_fatal() {
        let latest = select_latest(&tags(&["not-a-version", "v0.1.0"]), Scheme::SemVer, &[]);
        assert_eq!(latest.unwrap(), "v0.1.0");

        let filtered = filter_tags(&tags(&["not-a-version", "v0.1.0"]), Scheme::SemVer, &[]);
        assert_eq!(
            filtered.warnings[0],
            BoundaryWarning::InvalidTagsSkipped {
                scheme: Scheme::SemVer,
                count: 1
            }
        );
    }

    #[test]
    fn test_no_valid_tags() {
        let err = select_latest(&tags(&["not-a-version"]), Scheme::SemVer, &[]).unwrap_err();
        assert!(matches!(err, ScanError::NoValidTags { scheme: Scheme::SemVer }));

        let err = select_latest(&tags(&["1.0.0-beta"]), Scheme::SemVer, &tags(&["beta"]))
            .unwrap_err();
        assert!(matches!(err, ScanError::NoValidTags { .. }));

        assert!(select_latest(&[], Scheme::String, &[]).is_err());
    }

    #[test]
    fn test_release_outranks_pre_release_in_selection() {
        let latest = select_latest(
            &tags(&["v1.0.0-rc.1", "v1.0.0", "v1.0.0-rc.2"]),
            Scheme::SemVer,
            &[],
        );
        assert_eq!(latest.unwrap(), "v1.0.0");
    }

    #[test]
    fn test_sort_is_idempotent() {
        let sorted = sort_tags(
            &tags(&["1.10.0", "1.2.0", "1.0.0-rc.1", "0.9.0", "1.0.0"]),
            Scheme::SemVer,
        );
        assert_eq!(sorted, tags(&["0.9.0", "1.0.0-rc.1", "1.0.0", "1.2.0", "1.10.0"]));
        assert_eq!(sort_tags(&sorted, Scheme::SemVer), sorted);
    }

    #[test]
    fn test_tie_break_last_in_input_order() {
        let latest = select_latest(&tags(&["1.0.0+a", "v1.0.0", "1.0.0+b"]), Scheme::SemVer, &[]);
        assert_eq!(latest.unwrap(), "1.0.0+b");

        let latest = select_latest(&tags(&["2024.5.1", "2024.05.01"]), Scheme::CalVer, &[]);
        assert_eq!(latest.unwrap(), "2024.05.01");
    }

    #[test]
    fn test_empty_suffix_excludes_every_tag() {
        let filtered = filter_tags(&tags(&["1.0.0"]), Scheme::SemVer, &tags(&[""]));
        assert!(filtered.valid.is_empty());

        let err = select_latest(&tags(&["1.0.0", "2.0.0"]), Scheme::SemVer, &tags(&[""]))
            .unwrap_err();
        assert!(matches!(err, ScanError::NoValidTags { scheme: Scheme::SemVer }));
    }
}
