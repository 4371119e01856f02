// Copyright 2025 Cowboy AI, LLC.

//! Shared fixtures: a small CRM domain

#![allow(dead_code)]

use std::sync::Arc;

use causeway_metamodel::reflection::{annotations, Annotation, ClassBuilder, Visibility};
use causeway_metamodel::{
    BeanMetaData, BeanTypeRegistry, ClassDescriptor, ClassRepository, MetaModelConfig,
    MethodDescriptor, ProgrammingModel, SpecificationLoader, TypeKey, TypeRef,
};

pub const PARTY: &str = "com.acme.Party";
pub const CUSTOMER: &str = "com.acme.Customer";
pub const ORDER: &str = "com.acme.Order";
pub const PRODUCT: &str = "com.acme.Product";
pub const CUSTOMER_RENAME: &str = "com.acme.Customer_rename";
pub const CUSTOMER_ORDER_COUNT: &str = "com.acme.Customer_orderCount";
pub const CUSTOMER_REPOSITORY: &str = "com.acme.CustomerRepository";

pub fn key(name: &str) -> TypeKey {
    TypeKey::new(name)
}

fn domain_object(name: &str, nature: &str) -> ClassBuilder {
    ClassDescriptor::builder(name)
        .annotate(Annotation::new(annotations::DOMAIN_OBJECT).with("nature", nature))
}

fn getter(name: &str, type_name: &str) -> causeway_metamodel::reflection::MethodBuilder {
    MethodDescriptor::builder(name).returns(TypeRef::of(type_name))
}

pub fn party() -> ClassDescriptor {
    ClassDescriptor::builder(PARTY)
        .abstract_class()
        .method(getter("getEmail", "String"))
        .build()
}

pub fn customer() -> ClassDescriptor {
    ClassDescriptor::builder(CUSTOMER)
        .extends(PARTY)
        .annotate(
            Annotation::new(annotations::DOMAIN_OBJECT)
                .with("nature", "ENTITY")
                .with("aliased", "crm.Client"),
        )
        .method(getter("title", "String"))
        .method(getter("getName", "String"))
        .method(getter("hideName", "boolean"))
        .method(
            MethodDescriptor::builder("getOrders")
                .returns(TypeRef::collection_of("java.util.List", ORDER)),
        )
        .method(
            MethodDescriptor::builder("placeOrder")
                .param("product", TypeRef::of(PRODUCT))
                .returns(TypeRef::of(ORDER))
                .annotate(Annotation::new(annotations::ACTION).with("semantics", "IDEMPOTENT"))
                .annotate(Annotation::new(annotations::MEMBER_ORDER).with("sequence", "1")),
        )
        .method(
            MethodDescriptor::builder("choices0PlaceOrder")
                .returns(TypeRef::collection_of("java.util.List", PRODUCT)),
        )
        .method(
            MethodDescriptor::builder("archive")
                .annotate(Annotation::new(annotations::ACTION).with("restrictTo", "PROTOTYPING")),
        )
        .method(getter("hashCode", "int"))
        .build()
}

pub fn order() -> ClassDescriptor {
    domain_object(ORDER, "ENTITY")
        .method(getter("getCustomer", CUSTOMER))
        .method(getter("getTotal", "java.math.BigDecimal"))
        .method(MethodDescriptor::builder("cancel"))
        .build()
}

pub fn product() -> ClassDescriptor {
    domain_object(PRODUCT, "VIEW_MODEL")
        .method(getter("getName", "String"))
        .build()
}

pub fn customer_rename() -> ClassDescriptor {
    ClassDescriptor::builder(CUSTOMER_RENAME)
        .mixin_for(CUSTOMER)
        .annotate(Annotation::new(annotations::ACTION))
        .method(
            MethodDescriptor::builder("act")
                .param("newName", TypeRef::of("String"))
                .returns(TypeRef::of(CUSTOMER)),
        )
        .build()
}

pub fn customer_order_count() -> ClassDescriptor {
    ClassDescriptor::builder(CUSTOMER_ORDER_COUNT)
        .mixin_for(CUSTOMER)
        .annotate(Annotation::new(annotations::PROPERTY))
        .method(getter("prop", "int"))
        .build()
}

pub fn customer_repository() -> ClassDescriptor {
    ClassDescriptor::builder(CUSTOMER_REPOSITORY)
        .annotate(Annotation::new(annotations::DOMAIN_SERVICE))
        .method(
            MethodDescriptor::builder("findByName")
                .param("name", TypeRef::of("String"))
                .returns(TypeRef::collection_of("java.util.List", CUSTOMER)),
        )
        .method(MethodDescriptor::builder("purge").visibility(Visibility::Private))
        .build()
}

/// The CRM classes
pub fn crm_classes() -> Vec<ClassDescriptor> {
    vec![
        party(),
        customer(),
        order(),
        product(),
        customer_rename(),
        customer_order_count(),
        customer_repository(),
    ]
}

/// Scan metadata for every concrete class, with `crm.*` logical names for
/// the domain objects
pub fn beans_for(classes: &ClassRepository) -> BeanTypeRegistry {
    let registry = BeanTypeRegistry::new();
    for class in classes.all() {
        if !class.is_concrete() {
            continue;
        }
        let metadata = BeanMetaData::classify(&class, false);
        let metadata = match class.name.as_str() {
            CUSTOMER => metadata.named("crm.Customer"),
            ORDER => metadata.named("crm.Order"),
            PRODUCT => metadata.named("crm.Product"),
            _ => metadata,
        };
        registry.register(metadata);
    }
    registry
}

pub fn loader_for(classes: Vec<ClassDescriptor>, config: MetaModelConfig) -> Arc<SpecificationLoader> {
    loader_with_model(classes, config.clone(), ProgrammingModel::default_model(&config))
}

pub fn loader_with_model(
    classes: Vec<ClassDescriptor>,
    config: MetaModelConfig,
    model: ProgrammingModel,
) -> Arc<SpecificationLoader> {
    let classes = Arc::new(ClassRepository::with_classes(classes));
    let beans = Arc::new(beans_for(&classes));
    SpecificationLoader::builder(classes)
        .config(config)
        .bean_types(beans)
        .programming_model(model)
        .build()
}

/// A CRM loader, not yet bootstrapped
pub fn crm_loader(config: MetaModelConfig) -> Arc<SpecificationLoader> {
    loader_for(crm_classes(), config)
}

/// A bootstrapped CRM loader
pub fn bootstrapped(config: MetaModelConfig) -> Arc<SpecificationLoader> {
    let loader = crm_loader(config);
    loader.create_meta_model().expect("bootstrap");
    loader
}

pub fn full_mode() -> MetaModelConfig {
    MetaModelConfig {
        mode: causeway_metamodel::IntrospectionMode::Full,
        ..MetaModelConfig::default()
    }
}

pub fn ids<T: causeway_metamodel::ObjectMember>(members: &[Arc<T>]) -> Vec<String> {
    members.iter().map(|member| member.id().to_string()).collect()
}
