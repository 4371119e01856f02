// Copyright 2025 Cowboy AI, LLC.

//! Reflection model of domain classes
//!
//! The metamodel never inspects live Rust types. Instead, classes are
//! described up front by [`ClassDescriptor`]s (methods, annotations,
//! superclass, interfaces) held in a [`ClassRepository`], which plays the
//! role of the class loader for the rest of the crate.

mod annotation;
mod class;
mod method;
mod repository;

pub use annotation::{annotations, Annotation, Annotations};
pub use class::{ClassBuilder, ClassDescriptor, ClassKind};
pub use method::{MethodBuilder, MethodDescriptor, ParameterDescriptor, TypeRef, Visibility};
pub use repository::ClassRepository;

use std::fmt;
use std::sync::Arc;

/// Stable key identifying a class by its fully qualified name
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Arc<str>);

impl TypeKey {
    /// Key for the `void` pseudo type
    pub const VOID: &'static str = "void";

    /// Create a key from a fully qualified class name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The fully qualified name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The unqualified name
    pub fn simple_name(&self) -> &str {
        crate::naming::simple_name(&self.0)
    }

    /// Whether this is the `void` pseudo type
    pub fn is_void(&self) -> bool {
        &*self.0 == Self::VOID
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        TypeKey::new(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        TypeKey(Arc::from(name))
    }
}
