// Copyright 2025 Cowboy AI, LLC.

//! Method and parameter descriptors

use std::fmt;

use super::annotation::{Annotation, Annotations};
use super::TypeKey;

/// Method visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Visible everywhere
    Public,
    /// Visible to subclasses
    Protected,
    /// Visible within the package
    PackagePrivate,
    /// Visible within the class
    Private,
}

/// A reference to a type as used in a signature
///
/// Collection types carry their element type; scalar types do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// The raw (erased) type
    pub raw: TypeKey,
    /// Element type when `raw` is a collection
    pub element: Option<TypeKey>,
}

impl TypeRef {
    /// A scalar type
    pub fn of(raw: impl Into<TypeKey>) -> Self {
        Self {
            raw: raw.into(),
            element: None,
        }
    }

    /// A collection type with its element type
    pub fn collection_of(raw: impl Into<TypeKey>, element: impl Into<TypeKey>) -> Self {
        Self {
            raw: raw.into(),
            element: Some(element.into()),
        }
    }

    /// The `void` return type
    pub fn void() -> Self {
        Self::of(TypeKey::VOID)
    }

    /// Whether this is `void`
    pub fn is_void(&self) -> bool {
        self.raw.is_void()
    }

    /// Whether this is a collection type
    pub fn is_collection(&self) -> bool {
        self.element.is_some()
    }

    /// The type a member of this type refers to: the element type for
    /// collections, the raw type otherwise
    pub fn element_or_raw(&self) -> &TypeKey {
        self.element.as_ref().unwrap_or(&self.raw)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(element) => write!(f, "{}<{}>", self.raw.simple_name(), element.simple_name()),
            None => f.write_str(self.raw.simple_name()),
        }
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Declared parameter name
    pub name: String,
    /// Declared parameter type
    pub type_ref: TypeRef,
    /// Parameter annotations
    pub annotations: Annotations,
}

impl ParameterDescriptor {
    /// Create an unannotated parameter
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            annotations: Annotations::new(),
        }
    }
}

/// A method declared on a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Method name
    pub name: String,
    /// Class declaring the method
    pub declaring_class: TypeKey,
    /// Return type
    pub return_type: TypeRef,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterDescriptor>,
    /// Visibility
    pub visibility: Visibility,
    /// Whether the method is static
    pub is_static: bool,
    /// Method annotations
    pub annotations: Annotations,
}

impl MethodDescriptor {
    /// Start building a public, non-static, `void`, no-arg method
    pub fn builder(name: impl Into<String>) -> MethodBuilder {
        MethodBuilder {
            method: MethodDescriptor {
                name: name.into(),
                declaring_class: TypeKey::new("?"),
                return_type: TypeRef::void(),
                parameters: Vec::new(),
                visibility: Visibility::Public,
                is_static: false,
                annotations: Annotations::new(),
            },
        }
    }

    /// Whether the method is public
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Number of parameters
    pub fn param_count(&self) -> usize {
        self.parameters.len()
    }

    /// Whether an annotation is present
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.has(name)
    }

    /// Name plus parameter types, e.g. `placeOrder(Product,int)`
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.type_ref.raw.simple_name())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({})", self.name, params)
    }

    /// Whether two methods have the same name and parameter types
    pub fn same_signature(&self, other: &MethodDescriptor) -> bool {
        self.name == other.name
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.type_ref.raw == b.type_ref.raw)
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.declaring_class, self.signature())
    }
}

/// Builder for [`MethodDescriptor`]
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    method: MethodDescriptor,
}

impl MethodBuilder {
    /// Set the return type
    pub fn returns(mut self, type_ref: TypeRef) -> Self {
        self.method.return_type = type_ref;
        self
    }

    /// Append a parameter
    pub fn param(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.method
            .parameters
            .push(ParameterDescriptor::new(name, type_ref));
        self
    }

    /// Append an annotated parameter
    pub fn param_annotated(mut self, parameter: ParameterDescriptor) -> Self {
        self.method.parameters.push(parameter);
        self
    }

    /// Set the visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.method.visibility = visibility;
        self
    }

    /// Mark as static
    pub fn static_method(mut self) -> Self {
        self.method.is_static = true;
        self
    }

    /// Add an annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.method.annotations.push(annotation);
        self
    }

    /// Finish; the declaring class is filled in when added to a class
    pub fn build(self) -> MethodDescriptor {
        self.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_uses_simple_names() {
        let method = MethodDescriptor::builder("placeOrder")
            .param("product", TypeRef::of("com.acme.Product"))
            .param("quantity", TypeRef::of("int"))
            .build();
        assert_eq!(method.signature(), "placeOrder(Product,int)");
    }

    #[test]
    fn test_same_signature_compares_raw_types() {
        let a = MethodDescriptor::builder("f")
            .param("x", TypeRef::of("int"))
            .build();
        let b = MethodDescriptor::builder("f")
            .param("y", TypeRef::of("int"))
            .returns(TypeRef::of("java.lang.String"))
            .build();
        let c = MethodDescriptor::builder("f")
            .param("x", TypeRef::of("long"))
            .build();
        assert!(a.same_signature(&b));
        assert!(!a.same_signature(&c));
    }

    #[test]
    fn test_collection_type_ref() {
        let orders = TypeRef::collection_of("java.util.List", "com.acme.Order");
        assert!(orders.is_collection());
        assert_eq!(orders.element_or_raw().as_str(), "com.acme.Order");
        assert_eq!(orders.to_string(), "List<Order>");
        assert!(TypeRef::void().is_void());
    }
}
