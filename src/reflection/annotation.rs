// Copyright 2025 Cowboy AI, LLC.

//! Annotations attached to classes, methods and parameters

use std::collections::BTreeMap;

/// Well-known annotation names recognized by the default programming model
pub mod annotations {
    /// Marks a method as an action; attributes `semantics`, `restrictTo`
    pub const ACTION: &str = "Action";
    /// Marks a method as a property accessor
    pub const PROPERTY: &str = "Property";
    /// Marks a method as a collection accessor
    pub const COLLECTION: &str = "Collection";
    /// Forces a method into the metamodel
    pub const DOMAIN_INCLUDE: &str = "Domain.Include";
    /// Keeps a method out of the metamodel
    pub const DOMAIN_EXCLUDE: &str = "Domain.Exclude";
    /// Class-level domain object marker; attributes `nature`, `aliased`
    pub const DOMAIN_OBJECT: &str = "DomainObject";
    /// Class-level domain service marker
    pub const DOMAIN_SERVICE: &str = "DomainService";
    /// Class-level value type marker
    pub const VALUE: &str = "Value";
    /// Explicit name; attribute `value`
    pub const NAMED: &str = "Named";
    /// Member ordering; attribute `sequence`
    pub const MEMBER_ORDER: &str = "MemberOrder";
    /// Hides a method or class from the framework entirely
    pub const PROGRAMMATIC: &str = "Programmatic";
    /// Vetoes a class from the metamodel
    pub const VETOED: &str = "Vetoed";
}

/// A single annotation with string attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation name, e.g. `Action`
    pub name: String,
    /// Attribute values keyed by attribute name
    pub attributes: BTreeMap<String, String>,
}

impl Annotation {
    /// Create an annotation without attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute value
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Comma separated attribute value as a list
    pub fn attr_list(&self, key: &str) -> Vec<String> {
        self.attr(key)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// An ordered set of annotations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    /// Empty annotation set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add an annotation
    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    /// First annotation with the given name
    pub fn get(&self, name: &str) -> Option<&Annotation> {
        self.0.iter().find(|a| a.name == name)
    }

    /// Whether an annotation with the given name is present
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attribute of a named annotation
    pub fn attr(&self, name: &str, key: &str) -> Option<&str> {
        self.get(name).and_then(|a| a.attr(key))
    }

    /// Iterate in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }
}

impl FromIterator<Annotation> for Annotations {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
