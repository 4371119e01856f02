// Copyright 2025 Cowboy AI, LLC.

//! Validation failures collected while assessing the metamodel

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One problem found in the metamodel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Identifier of the element at fault
    pub origin: String,
    /// Human readable description
    pub message: String,
}

impl ValidationFailure {
    /// Create a failure
    pub fn new(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Distinct failures in the order first reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailures(IndexSet<ValidationFailure>);

impl ValidationFailures {
    /// No failures
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; returns false if it was already recorded
    pub fn add(&mut self, failure: ValidationFailure) -> bool {
        self.0.insert(failure)
    }

    /// Record a failure from its parts
    pub fn add_failure(&mut self, origin: impl Into<String>, message: impl Into<String>) -> bool {
        self.add(ValidationFailure::new(origin, message))
    }

    /// Merge another set in
    pub fn extend(&mut self, other: &ValidationFailures) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Whether any failure was recorded
    pub fn has_failures(&self) -> bool {
        !self.0.is_empty()
    }

    /// Number of failures
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no failure was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate failures in report order
    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.0.iter()
    }

    /// The failure messages in report order
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|failure| failure.message.clone()).collect()
    }

    /// Forget every failure
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for ValidationFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl FromIterator<ValidationFailure> for ValidationFailures {
    fn from_iter<I: IntoIterator<Item = ValidationFailure>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse_and_order_is_kept() {
        let mut failures = ValidationFailures::new();
        assert!(failures.add_failure("b", "second"));
        assert!(failures.add_failure("a", "first"));
        assert!(!failures.add_failure("b", "second"));
        assert_eq!(failures.len(), 2);
        assert_eq!(failures.messages(), vec!["second", "first"]);
        assert_eq!(failures.to_string(), "second\nfirst");
    }

    #[test]
    fn test_extend_merges() {
        let mut left: ValidationFailures = [ValidationFailure::new("x", "one")].into_iter().collect();
        let right: ValidationFailures =
            [ValidationFailure::new("x", "one"), ValidationFailure::new("y", "two")]
                .into_iter()
                .collect();
        left.extend(&right);
        assert_eq!(left.len(), 2);
        assert!(left.has_failures());
        left.clear();
        assert!(left.is_empty());
    }
}
