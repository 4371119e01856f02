// Copyright 2025 Cowboy AI, LLC.

//! Class descriptors

use std::sync::Arc;

use super::annotation::{Annotation, Annotations};
use super::method::{MethodBuilder, MethodDescriptor};
use super::TypeKey;

/// What kind of type a class descriptor describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// A concrete or abstract class
    Class,
    /// An interface
    Interface,
    /// An enumeration
    Enum,
    /// A collection type such as a list or set
    Collection,
}

/// Description of a single class: its hierarchy, methods and annotations
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    /// Fully qualified name
    pub name: TypeKey,
    /// Kind of type
    pub kind: ClassKind,
    /// Whether the class is abstract (interfaces always are)
    pub is_abstract: bool,
    /// Anonymous and synthetic classes have no canonical name
    pub is_anonymous: bool,
    /// Direct superclass
    pub superclass: Option<TypeKey>,
    /// Directly implemented interfaces, in declaration order
    pub interfaces: Vec<TypeKey>,
    /// Declared methods, in declaration order
    pub methods: Vec<Arc<MethodDescriptor>>,
    /// Class annotations
    pub annotations: Annotations,
    /// Type of the single constructor argument, for mixins
    pub mixin_target: Option<TypeKey>,
}

impl ClassDescriptor {
    /// Start building a concrete class
    pub fn builder(name: impl Into<TypeKey>) -> ClassBuilder {
        ClassBuilder {
            class: ClassDescriptor {
                name: name.into(),
                kind: ClassKind::Class,
                is_abstract: false,
                is_anonymous: false,
                superclass: None,
                interfaces: Vec::new(),
                methods: Vec::new(),
                annotations: Annotations::new(),
                mixin_target: None,
            },
        }
    }

    /// The unqualified class name
    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }

    /// Canonical name, absent for anonymous classes
    pub fn canonical_name(&self) -> Option<&str> {
        (!self.is_anonymous).then(|| self.name.as_str())
    }

    /// Whether the class is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Whether instances can be created directly
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract && !self.is_interface()
    }

    /// Whether an annotation is present on the class
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.has(name)
    }

    /// First declared method with the given name
    pub fn method(&self, name: &str) -> Option<&Arc<MethodDescriptor>> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Builder for [`ClassDescriptor`]
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    class: ClassDescriptor,
}

impl ClassBuilder {
    /// Set the kind
    pub fn kind(mut self, kind: ClassKind) -> Self {
        if kind == ClassKind::Interface {
            self.class.is_abstract = true;
        }
        self.class.kind = kind;
        self
    }

    /// Mark as abstract
    pub fn abstract_class(mut self) -> Self {
        self.class.is_abstract = true;
        self
    }

    /// Mark as anonymous
    pub fn anonymous(mut self) -> Self {
        self.class.is_anonymous = true;
        self
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: impl Into<TypeKey>) -> Self {
        self.class.superclass = Some(superclass.into());
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: impl Into<TypeKey>) -> Self {
        self.class.interfaces.push(interface.into());
        self
    }

    /// Add a class annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.class.annotations.push(annotation);
        self
    }

    /// Declare the mixee type taken by the mixin constructor
    pub fn mixin_for(mut self, mixee: impl Into<TypeKey>) -> Self {
        self.class.mixin_target = Some(mixee.into());
        self
    }

    /// Add a method declared by this class
    pub fn method(mut self, method: MethodBuilder) -> Self {
        let mut method = method.build();
        method.declaring_class = self.class.name.clone();
        self.class.methods.push(Arc::new(method));
        self
    }

    /// Finish building
    pub fn build(self) -> ClassDescriptor {
        self.class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::TypeRef;

    #[test]
    fn test_builder_sets_declaring_class() {
        let class = ClassDescriptor::builder("com.acme.Customer")
            .method(MethodDescriptor::builder("getName").returns(TypeRef::of("java.lang.String")))
            .build();
        assert_eq!(class.methods[0].declaring_class.as_str(), "com.acme.Customer");
        assert_eq!(class.simple_name(), "Customer");
        assert!(class.method("getName").is_some());
    }

    #[test]
    fn test_interfaces_are_abstract() {
        let class = ClassDescriptor::builder("com.acme.HasName")
            .kind(ClassKind::Interface)
            .build();
        assert!(class.is_interface());
        assert!(!class.is_concrete());
    }

    #[test]
    fn test_anonymous_class_has_no_canonical_name() {
        let class = ClassDescriptor::builder("com.acme.Customer$1").anonymous().build();
        assert_eq!(class.canonical_name(), None);
    }
}
