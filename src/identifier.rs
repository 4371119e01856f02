// Copyright 2025 Cowboy AI, LLC.

//! Logical types, member identifiers and bookmarks

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{MetaModelError, MetaModelResult};
use crate::reflection::TypeKey;

/// The business-level name of a type together with the class it maps to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalType {
    name: String,
    class: TypeKey,
}

impl LogicalType {
    /// Create a logical type
    pub fn new(name: impl Into<String>, class: TypeKey) -> Self {
        Self {
            name: name.into(),
            class,
        }
    }

    /// Logical type that falls back to the fully qualified class name
    pub fn infer(class: TypeKey) -> Self {
        Self {
            name: class.as_str().to_string(),
            class,
        }
    }

    /// The logical type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class this logical type resolves to
    pub fn class(&self) -> &TypeKey {
        &self.class
    }

    /// Last segment of the logical type name
    pub fn simple_name(&self) -> &str {
        crate::naming::simple_name(&self.name)
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What an [`Identifier`] points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentifierKind {
    /// A type
    Class,
    /// A property or a collection
    PropertyOrCollection,
    /// An action
    Action,
    /// A parameter of an action
    ActionParameter,
}

/// Identifies a type, one of its members, or one of an action's parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    logical_type_name: String,
    class: TypeKey,
    kind: IdentifierKind,
    member_id: String,
    parameter_index: Option<usize>,
}

impl Identifier {
    /// Identifier of a type
    pub fn class_identifier(logical_type: &LogicalType) -> Self {
        Self {
            logical_type_name: logical_type.name().to_string(),
            class: logical_type.class().clone(),
            kind: IdentifierKind::Class,
            member_id: String::new(),
            parameter_index: None,
        }
    }

    /// Identifier of a property or collection
    pub fn property_identifier(logical_type: &LogicalType, member_id: impl Into<String>) -> Self {
        Self {
            kind: IdentifierKind::PropertyOrCollection,
            member_id: member_id.into(),
            ..Self::class_identifier(logical_type)
        }
    }

    /// Identifier of an action
    pub fn action_identifier(logical_type: &LogicalType, member_id: impl Into<String>) -> Self {
        Self {
            kind: IdentifierKind::Action,
            member_id: member_id.into(),
            ..Self::class_identifier(logical_type)
        }
    }

    /// Identifier of one parameter of this action
    pub fn with_parameter_index(&self, index: usize) -> Self {
        Self {
            kind: IdentifierKind::ActionParameter,
            parameter_index: Some(index),
            ..self.clone()
        }
    }

    /// Logical type name of the owning type
    pub fn logical_type_name(&self) -> &str {
        &self.logical_type_name
    }

    /// Class of the owning type
    pub fn class(&self) -> &TypeKey {
        &self.class
    }

    /// What this identifier points at
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Member id, empty for class identifiers
    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    /// Parameter index for parameter identifiers
    pub fn parameter_index(&self) -> Option<usize> {
        self.parameter_index
    }

    /// Full identity string: `logical.Type#member[index]`
    pub fn full_identity_string(&self) -> String {
        match (self.kind, self.parameter_index) {
            (IdentifierKind::Class, _) => self.logical_type_name.clone(),
            (_, Some(index)) => format!("{}#{}[{}]", self.logical_type_name, self.member_id, index),
            (_, None) => format!("{}#{}", self.logical_type_name, self.member_id),
        }
    }

    /// Short identity string: the member id, or the simple type name
    pub fn short_identity_string(&self) -> String {
        match self.kind {
            IdentifierKind::Class => crate::naming::simple_name(&self.logical_type_name).to_string(),
            _ => self.member_id.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_identity_string())
    }
}

/// A persistent reference to a domain object: logical type name plus id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bookmark {
    /// Logical type name
    pub logical_type_name: String,
    /// Object identifier within the type
    pub identifier: String,
}

impl Bookmark {
    /// Create a bookmark
    pub fn new(logical_type_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            logical_type_name: logical_type_name.into(),
            identifier: identifier.into(),
        }
    }

    /// Parse `logical.Type:id`; the id may itself contain colons
    pub fn parse(raw: &str) -> MetaModelResult<Self> {
        match raw.split_once(':') {
            Some((type_name, id)) if !type_name.is_empty() && !id.is_empty() => {
                Ok(Self::new(type_name, id))
            }
            _ => Err(MetaModelError::InvalidBookmark(raw.to_string())),
        }
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.logical_type_name, self.identifier)
    }
}
