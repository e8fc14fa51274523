use std::collections::BTreeSet;

/// Labels attached to a pull request at resolution time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: BTreeSet<String>,
}

impl LabelSet {
    /// Create a label set from any collection of label names
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LabelSet {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// True if any label in this set appears in `names` (case-insensitive)
    pub fn intersects(&self, names: &[String]) -> bool {
        self.iter()
            .any(|label| names.iter().any(|name| name.eq_ignore_ascii_case(label)))
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        LabelSet::new(iter)
    }
}

/// Label names that select each bump category.
///
/// The three lists may overlap; precedence is applied by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCategoryMapping {
    pub major: Vec<String>,
    pub minor: Vec<String>,
    pub patch: Vec<String>,
}

impl LabelCategoryMapping {
    pub fn new(major: Vec<String>, minor: Vec<String>, patch: Vec<String>) -> Self {
        LabelCategoryMapping {
            major,
            minor,
            patch,
        }
    }
}
