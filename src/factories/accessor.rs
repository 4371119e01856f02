// Copyright 2025 Cowboy AI, LLC.

//! Property and collection accessor factories

use std::sync::Arc;

use super::{AccessorFacetFactory, FacetFactory, ProcessMethodContext};
use crate::facets::{CollectionAccessorFacet, PropertyAccessorFacet};
use crate::feature::FeatureType;
use crate::naming::accessor_member_id;
use crate::reflection::MethodDescriptor;

fn is_getter_shape(method: &MethodDescriptor) -> bool {
    method.is_public()
        && !method.is_static
        && method.param_count() == 0
        && !method.return_type.is_void()
        && accessor_member_id(&method.name).is_some()
}

/// Identifies `getX()` / `isX()` getters with scalar return types
#[derive(Debug, Default)]
pub struct PropertyAccessorFacetFactory;

impl FacetFactory for PropertyAccessorFacetFactory {
    fn name(&self) -> &'static str {
        "PropertyAccessor"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &[FeatureType::Property]
    }

    fn process_method(&self, ctx: &mut ProcessMethodContext<'_>) -> anyhow::Result<()> {
        ctx.holder.add_facet(PropertyAccessorFacet {
            method: Arc::clone(ctx.method),
        });
        Ok(())
    }

    fn as_accessor_factory(&self) -> Option<&dyn AccessorFacetFactory> {
        Some(self)
    }
}

impl AccessorFacetFactory for PropertyAccessorFacetFactory {
    fn accessor_feature_type(&self) -> FeatureType {
        FeatureType::Property
    }

    fn is_accessor(&self, method: &MethodDescriptor) -> bool {
        is_getter_shape(method) && !method.return_type.is_collection()
    }
}

/// Identifies `getX()` getters returning collections
#[derive(Debug, Default)]
pub struct CollectionAccessorFacetFactory;

impl FacetFactory for CollectionAccessorFacetFactory {
    fn name(&self) -> &'static str {
        "CollectionAccessor"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &[FeatureType::Collection]
    }

    fn process_method(&self, ctx: &mut ProcessMethodContext<'_>) -> anyhow::Result<()> {
        let element_type = ctx.method.return_type.element_or_raw().clone();
        ctx.holder.add_facet(CollectionAccessorFacet {
            method: Arc::clone(ctx.method),
            element_type,
        });
        Ok(())
    }

    fn as_accessor_factory(&self) -> Option<&dyn AccessorFacetFactory> {
        Some(self)
    }
}

impl AccessorFacetFactory for CollectionAccessorFacetFactory {
    fn accessor_feature_type(&self) -> FeatureType {
        FeatureType::Collection
    }

    fn is_accessor(&self, method: &MethodDescriptor) -> bool {
        is_getter_shape(method) && method.return_type.is_collection() && method.name.starts_with("get")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factories::MethodRemover;
    use crate::reflection::TypeRef;

    fn candidates() -> Vec<Arc<MethodDescriptor>> {
        [
            MethodDescriptor::builder("getName").returns(TypeRef::of("String")),
            MethodDescriptor::builder("isActive").returns(TypeRef::of("boolean")),
            MethodDescriptor::builder("getOrders")
                .returns(TypeRef::collection_of("java.util.List", "Order")),
            MethodDescriptor::builder("getTotal")
                .param("currency", TypeRef::of("String"))
                .returns(TypeRef::of("Money")),
            MethodDescriptor::builder("getNothing"),
            MethodDescriptor::builder("placeOrder").returns(TypeRef::of("Order")),
        ]
        .into_iter()
        .map(|b| Arc::new(b.build()))
        .collect()
    }

    #[test]
    fn test_property_accessors() {
        let mut remover = MethodRemover::new(candidates());
        let found = PropertyAccessorFacetFactory.find_and_remove_accessors(&mut remover);
        let names: Vec<_> = found.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["getName", "isActive"]);
        assert_eq!(remover.len(), 4);
    }

    #[test]
    fn test_collection_accessors() {
        let mut remover = MethodRemover::new(candidates());
        let found = CollectionAccessorFacetFactory.find_and_remove_accessors(&mut remover);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "getOrders");
    }
}
