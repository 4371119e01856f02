// Copyright 2025 Cowboy AI, LLC.

//! Coarse classification of domain types

use serde::{Deserialize, Serialize};

use crate::identifier::LogicalType;
use crate::reflection::{annotations, ClassDescriptor, ClassKind, TypeKey};

/// Coarse classification of a type
///
/// # Examples
///
/// ```rust
/// use causeway_metamodel::BeanSort;
///
/// assert!(BeanSort::Entity.is_to_be_introspected());
/// assert!(!BeanSort::Value.has_members());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeanSort {
    /// Immutable value type with registered semantics
    Value,
    /// Persistent entity
    Entity,
    /// Non-persistent view model
    ViewModel,
    /// Contributes a member to another type
    Mixin,
    /// Managed service bean
    ManagedBean,
    /// Collection type such as a list or set
    Collection,
    /// Abstract class or interface
    Abstract,
    /// Explicitly excluded from the metamodel
    Vetoed,
    /// Anything else
    Unknown,
}

impl BeanSort {
    /// Whether this is a value type
    pub fn is_value(self) -> bool {
        self == BeanSort::Value
    }

    /// Whether this is an entity
    pub fn is_entity(self) -> bool {
        self == BeanSort::Entity
    }

    /// Whether this is a view model
    pub fn is_view_model(self) -> bool {
        self == BeanSort::ViewModel
    }

    /// Whether this is a mixin
    pub fn is_mixin(self) -> bool {
        self == BeanSort::Mixin
    }

    /// Whether this is a managed service bean
    pub fn is_managed_bean(self) -> bool {
        self == BeanSort::ManagedBean
    }

    /// Whether this is a collection type
    pub fn is_collection(self) -> bool {
        self == BeanSort::Collection
    }

    /// Whether this is abstract
    pub fn is_abstract(self) -> bool {
        self == BeanSort::Abstract
    }

    /// Whether this was vetoed
    pub fn is_vetoed(self) -> bool {
        self == BeanSort::Vetoed
    }

    /// Whether the type takes part in the metamodel at all
    pub fn is_to_be_introspected(self) -> bool {
        !matches!(self, BeanSort::Vetoed | BeanSort::Unknown)
    }

    /// Whether member introspection applies to this sort
    pub fn has_members(self) -> bool {
        !matches!(self, BeanSort::Collection | BeanSort::Vetoed | BeanSort::Value)
    }
}

/// Who is responsible for instances of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManagedBy {
    /// Not managed
    Unspecified,
    /// The dependency injection container
    Container,
    /// The framework itself (view models, mixins)
    Framework,
    /// A persistence mechanism
    Persistence,
}

/// Scan result for one discovered type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanMetaData {
    /// The discovered class
    pub corresponding_class: TypeKey,
    /// Preliminary classification
    pub bean_sort: BeanSort,
    /// Logical type of the class
    pub logical_type: LogicalType,
    /// Origin of instances
    pub managed_by: ManagedBy,
}

impl BeanMetaData {
    /// Metadata with the logical type inferred from the class name
    pub fn new(corresponding_class: TypeKey, bean_sort: BeanSort) -> Self {
        let managed_by = match bean_sort {
            BeanSort::ManagedBean => ManagedBy::Container,
            BeanSort::Entity => ManagedBy::Persistence,
            BeanSort::ViewModel | BeanSort::Mixin => ManagedBy::Framework,
            _ => ManagedBy::Unspecified,
        };
        Self {
            logical_type: LogicalType::infer(corresponding_class.clone()),
            corresponding_class,
            bean_sort,
            managed_by,
        }
    }

    /// Replace the logical type name
    pub fn named(mut self, logical_type_name: impl Into<String>) -> Self {
        self.logical_type = LogicalType::new(logical_type_name, self.corresponding_class.clone());
        self
    }

    /// Classify a class from its descriptor, reading the logical type name
    /// from a `Named` annotation when present
    pub fn classify(class: &ClassDescriptor, has_value_semantics: bool) -> Self {
        let sort = classify(class, has_value_semantics);
        let metadata = Self::new(class.name.clone(), sort);
        match class.annotations.attr(annotations::NAMED, "value") {
            Some(name) => metadata.named(name),
            None => metadata,
        }
    }
}

/// Classify a class from its annotations and shape
pub fn classify(class: &ClassDescriptor, has_value_semantics: bool) -> BeanSort {
    if class.has_annotation(annotations::VETOED) || class.has_annotation(annotations::PROGRAMMATIC) {
        return BeanSort::Vetoed;
    }
    if class.kind == ClassKind::Collection {
        return BeanSort::Collection;
    }
    if has_value_semantics || class.has_annotation(annotations::VALUE) {
        return BeanSort::Value;
    }
    let nature = class.annotations.attr(annotations::DOMAIN_OBJECT, "nature");
    let member_annotated = [annotations::ACTION, annotations::PROPERTY, annotations::COLLECTION]
        .iter()
        .any(|name| class.has_annotation(name));
    if nature == Some("MIXIN") || (member_annotated && class.mixin_target.is_some()) {
        return BeanSort::Mixin;
    }
    if !class.is_concrete() {
        return BeanSort::Abstract;
    }
    if class.has_annotation(annotations::DOMAIN_SERVICE) {
        return BeanSort::ManagedBean;
    }
    match nature {
        Some("ENTITY") => BeanSort::Entity,
        Some(_) => BeanSort::ViewModel,
        None if class.has_annotation(annotations::DOMAIN_OBJECT) => BeanSort::ViewModel,
        None => BeanSort::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::Annotation;
    use test_case::test_case;

    fn domain_object(nature: &str) -> ClassDescriptor {
        ClassDescriptor::builder("com.acme.Thing")
            .annotate(Annotation::new(annotations::DOMAIN_OBJECT).with("nature", nature))
            .build()
    }

    #[test_case("ENTITY", BeanSort::Entity)]
    #[test_case("VIEW_MODEL", BeanSort::ViewModel)]
    #[test_case("MIXIN", BeanSort::Mixin)]
    fn test_classify_by_nature(nature: &str, expected: BeanSort) {
        assert_eq!(classify(&domain_object(nature), false), expected);
    }

    #[test]
    fn test_classify_mixin_by_member_annotation() {
        let class = ClassDescriptor::builder("com.acme.Customer_rename")
            .annotate(Annotation::new(annotations::ACTION))
            .mixin_for("com.acme.Customer")
            .build();
        assert_eq!(classify(&class, false), BeanSort::Mixin);
    }

    #[test]
    fn test_classify_precedence() {
        let vetoed = ClassDescriptor::builder("X")
            .annotate(Annotation::new(annotations::VETOED))
            .annotate(Annotation::new(annotations::VALUE))
            .build();
        assert_eq!(classify(&vetoed, true), BeanSort::Vetoed);

        let value = ClassDescriptor::builder("Money").build();
        assert_eq!(classify(&value, true), BeanSort::Value);

        let list = ClassDescriptor::builder("java.util.List")
            .kind(ClassKind::Collection)
            .build();
        assert_eq!(classify(&list, false), BeanSort::Collection);

        let base = ClassDescriptor::builder("Base").abstract_class().build();
        assert_eq!(classify(&base, false), BeanSort::Abstract);

        let plain = ClassDescriptor::builder("Plain").build();
        assert_eq!(classify(&plain, false), BeanSort::Unknown);
    }

    #[test]
    fn test_metadata_reads_named_annotation() {
        let class = ClassDescriptor::builder("com.acme.Customer")
            .annotate(Annotation::new(annotations::DOMAIN_OBJECT).with("nature", "ENTITY"))
            .annotate(Annotation::new(annotations::NAMED).with("value", "acme.Customer"))
            .build();
        let metadata = BeanMetaData::classify(&class, false);
        assert_eq!(metadata.logical_type.name(), "acme.Customer");
        assert_eq!(metadata.managed_by, ManagedBy::Persistence);
    }
}
