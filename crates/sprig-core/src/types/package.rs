//! Package identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one resolved package instance
///
/// Two occurrences of the same `(name, version)` pair anywhere in a
/// dependency graph denote the same package. Versions are kept verbatim:
/// lock data may hold prerelease tags, tarball URLs or git hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId {
    /// Package name (e.g., "lodash" or "@types/node")
    pub name: String,
    /// Resolved version
    pub version: String,
}

impl PackageId {
    /// Create a new package ID
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Split a `name@range` selector into its name and range
///
/// The leading `@` of a scoped name is part of the name, so the split
/// happens at the first `@` after the first character. Ranges may contain
/// `@` themselves (`npm:other@^1.0.0` aliases).
pub fn split_selector(selector: &str) -> Option<(&str, &str)> {
    let at = selector.get(1..)?.find('@')? + 1;
    Some((&selector[..at], &selector[at + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_package_id_display() {
        let id = PackageId::new("lodash", "4.17.21");
        assert_eq!(id.to_string(), "lodash@4.17.21");
        assert_eq!(
            PackageId::new("@types/node", "20.0.0").to_string(),
            "@types/node@20.0.0"
        );
    }

    #[test]
    fn test_identity_equality() {
        assert_eq!(PackageId::new("a", "1.0.0"), PackageId::new("a", "1.0.0"));
        assert_ne!(PackageId::new("a", "1.0.0"), PackageId::new("a", "1.0.1"));
    }

    #[test]
    fn test_split_selector() {
        assert_eq!(split_selector("lodash@^4.0.0"), Some(("lodash", "^4.0.0")));
        assert_eq!(
            split_selector("@babel/core@7.0.0"),
            Some(("@babel/core", "7.0.0"))
        );
        assert_eq!(split_selector("a@npm:b@1"), Some(("a", "npm:b@1")));
        assert_eq!(split_selector("lodash"), None);
        assert_eq!(split_selector("@scope"), None);
    }

    proptest! {
        #[test]
        fn prop_split_selector_recovers_name(
            scope in proptest::option::of("[a-z][a-z0-9-]{0,8}"),
            name in "[a-z][a-z0-9.-]{0,12}",
            range in "[~^<>=| 0-9a-z.:@/-]{1,16}",
        ) {
            let full_name = match scope {
                Some(scope) => format!("@{}/{}", scope, name),
                None => name,
            };
            let selector = format!("{}@{}", full_name, range);
            prop_assert_eq!(
                split_selector(&selector),
                Some((full_name.as_str(), range.as_str()))
            );
        }
    }
}
