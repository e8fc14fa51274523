use crate::domain::{BumpCategory, LabelCategoryMapping, LabelSet, Version};
use crate::error::Result;

/// Outcome of resolving a label set against the current version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub category: BumpCategory,
    pub current: Version,
    pub next: Version,
    /// Every category whose labels were present, highest first
    pub matched: Vec<BumpCategory>,
}

impl Resolution {
    pub fn is_change(&self) -> bool {
        self.next != self.current
    }
}

/// Maps pull request labels to a single bump category.
///
/// Precedence is strict: Major beats Minor beats Patch. Bumps are never combined,
/// so a pull request labelled both `breaking` and `fix` moves 1.2.3 to 2.0.0.
pub struct VersionResolver {
    mapping: LabelCategoryMapping,
}

impl VersionResolver {
    pub fn new(mapping: LabelCategoryMapping) -> Self {
        VersionResolver { mapping }
    }

    /// Categories whose configured labels intersect `labels`, highest first
    pub fn matched_categories(&self, labels: &LabelSet) -> Vec<BumpCategory> {
        let mut matched = Vec::new();
        if labels.intersects(&self.mapping.major) {
            matched.push(BumpCategory::Major);
        }
        if labels.intersects(&self.mapping.minor) {
            matched.push(BumpCategory::Minor);
        }
        if labels.intersects(&self.mapping.patch) {
            matched.push(BumpCategory::Patch);
        }
        matched
    }

    pub fn category(&self, labels: &LabelSet) -> BumpCategory {
        self.matched_categories(labels)
            .first()
            .copied()
            .unwrap_or(BumpCategory::None)
    }

    /// Fails only when the selected bump overflows the current version.
    pub fn resolve(&self, current: Version, labels: &LabelSet) -> Result<Resolution> {
        let matched = self.matched_categories(labels);
        let category = matched.first().copied().unwrap_or(BumpCategory::None);

        Ok(Resolution {
            category,
            current,
            next: current.bump(category)?,
            matched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> VersionResolver {
        VersionResolver::new(LabelCategoryMapping::new(
            vec!["major".to_string(), "breaking".to_string()],
            vec!["minor".to_string(), "feature".to_string()],
            vec!["patch".to_string(), "fix".to_string()],
        ))
    }

    #[test]
    fn test_resolve_major() {
        let resolution = resolver()
            .resolve(Version::new(1, 2, 3), &LabelSet::new(["breaking"]))
            .unwrap();
        assert_eq!(resolution.category, BumpCategory::Major);
        assert_eq!(resolution.next, Version::new(2, 0, 0));
        assert!(resolution.is_change());
    }

    #[test]
    fn test_resolve_minor() {
        let resolution = resolver()
            .resolve(Version::new(1, 2, 3), &LabelSet::new(["feature"]))
            .unwrap();
        assert_eq!(resolution.category, BumpCategory::Minor);
        assert_eq!(resolution.next, Version::new(1, 3, 0));
    }

    #[test]
    fn test_resolve_patch() {
        let resolution = resolver()
            .resolve(Version::new(1, 0, 0), &LabelSet::new(["fix"]))
            .unwrap();
        assert_eq!(resolution.category, BumpCategory::Patch);
        assert_eq!(resolution.next, Version::new(1, 0, 1));
    }

    #[test]
    fn test_resolve_no_labels() {
        let resolution = resolver().resolve(Version::new(0, 9, 0), &LabelSet::default()).unwrap();
        assert_eq!(resolution.category, BumpCategory::None);
        assert_eq!(resolution.next, Version::new(0, 9, 0));
        assert!(!resolution.is_change());
        assert!(resolution.matched.is_empty());
    }

    #[test]
    fn test_unrelated_labels_are_ignored() {
        let labels = LabelSet::new(["documentation", "dependencies"]);
        assert_eq!(resolver().category(&labels), BumpCategory::None);
    }

    #[test]
    fn test_precedence_never_combines() {
        let labels = LabelSet::new(["fix", "feature", "breaking"]);
        let resolution = resolver().resolve(Version::new(1, 2, 3), &labels).unwrap();
        assert_eq!(resolution.category, BumpCategory::Major);
        assert_eq!(resolution.next, Version::new(2, 0, 0));
        assert_eq!(
            resolution.matched,
            vec![BumpCategory::Major, BumpCategory::Minor, BumpCategory::Patch]
        );
    }

    #[test]
    fn test_overflowing_bump_is_error() {
        let current = Version::new(u64::MAX, 0, 0);
        let err = resolver()
            .resolve(current, &LabelSet::new(["breaking"]))
            .unwrap_err();
        assert!(err.to_string().contains("major"));

        // unmapped labels never touch the version
        let resolution = resolver().resolve(current, &LabelSet::new(["docs"])).unwrap();
        assert!(!resolution.is_change());
    }

    #[test]
    fn test_overlapping_mapping_takes_highest() {
        let resolver = VersionResolver::new(LabelCategoryMapping::new(
            vec!["release".to_string()],
            vec!["release".to_string()],
            vec![],
        ));
        assert_eq!(
            resolver.category(&LabelSet::new(["release"])),
            BumpCategory::Major
        );
    }

    #[test]
    fn test_label_case_is_ignored() {
        assert_eq!(
            resolver().category(&LabelSet::new(["Feature"])),
            BumpCategory::Minor
        );
    }
}
