//! Non-failing resolution report

/// A required placeholder with no value in the environment source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReference {
    /// The referenced variable name.
    pub name: String,
    /// JSON pointer of the leaf containing the placeholder.
    pub path: String,
}

/// A token that starts with `${` but is not a valid placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedReference {
    /// The raw token.
    pub token: String,
    /// JSON pointer of the leaf containing the token.
    pub path: String,
}

/// What resolving a template would need, gathered without stopping at the
/// first problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Every well-formed name referenced, sorted and deduplicated.
    pub references: Vec<String>,

    /// Required placeholders the source cannot satisfy, in document order.
    pub missing: Vec<MissingReference>,

    /// Malformed tokens, in document order.
    pub malformed: Vec<MalformedReference>,

    /// Names that will fall back to their inline default, sorted and deduplicated.
    pub defaulted: Vec<String>,
}

impl ResolutionReport {
    /// Returns true if resolution would not fail on a missing or malformed
    /// placeholder.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.malformed.is_empty()
    }

    /// Returns the missing names, sorted and deduplicated.
    #[must_use]
    pub fn missing_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.missing.iter().map(|m| m.name.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    pub(super) fn finish(&mut self) {
        self.references.sort();
        self.references.dedup();
        self.defaulted.sort();
        self.defaulted.dedup();
        self.missing.dedup();
    }
}
