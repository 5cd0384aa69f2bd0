//! Manifest dependency sections.

use serde::{Deserialize, Serialize};

/// Section of package.json a dependency was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// `dependencies`
    Normal,
    /// `devDependencies`
    Dev,
    /// `optionalDependencies`
    Optional,
}

impl DependencyKind {
    /// Sections in the order top-level requirements are merged
    pub const MERGE_ORDER: [DependencyKind; 3] = [
        DependencyKind::Normal,
        DependencyKind::Dev,
        DependencyKind::Optional,
    ];

    /// Check if this dependency is only for development
    pub fn is_dev_only(&self) -> bool {
        matches!(self, DependencyKind::Dev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_kinds() {
        assert!(!DependencyKind::Normal.is_dev_only());
        assert!(DependencyKind::Dev.is_dev_only());
        assert!(!DependencyKind::Optional.is_dev_only());
    }

    #[test]
    fn test_merge_order() {
        assert_eq!(
            DependencyKind::MERGE_ORDER,
            [
                DependencyKind::Normal,
                DependencyKind::Dev,
                DependencyKind::Optional
            ]
        );
    }
}
