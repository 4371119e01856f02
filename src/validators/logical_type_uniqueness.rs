// Copyright 2025 Cowboy AI, LLC.

//! Logical type names shared by more than one class

use indexmap::IndexMap;

use super::MetaModelValidator;
use crate::loader::{SpecificationLoader, ValidationFailures};
use crate::reflection::TypeKey;

/// Reports logical type names and aliases claimed by several classes
///
/// The resolver keeps the first registration and only warns; this turns the
/// collision into a validation failure.
#[derive(Debug, Default)]
pub struct LogicalTypeNameUniquenessValidator;

impl MetaModelValidator for LogicalTypeNameUniquenessValidator {
    fn name(&self) -> &'static str {
        "LogicalTypeNameUniqueness"
    }

    fn validate(
        &self,
        loader: &SpecificationLoader,
        failures: &mut ValidationFailures,
    ) -> anyhow::Result<()> {
        let mut claims: IndexMap<String, Vec<TypeKey>> = IndexMap::new();
        for spec in loader.all_specifications() {
            if !spec.is_registrable() {
                continue;
            }
            let names = std::iter::once(spec.logical_type_name().to_string()).chain(spec.aliases());
            for name in names {
                let classes = claims.entry(name).or_default();
                if !classes.contains(spec.class_key()) {
                    classes.push(spec.class_key().clone());
                }
            }
        }

        for (name, classes) in claims.into_iter().filter(|(_, classes)| classes.len() > 1) {
            let listed = classes
                .iter()
                .map(TypeKey::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            failures.add_failure(
                name.clone(),
                format!("logical type name '{name}' is claimed by more than one class: {listed}"),
            );
        }
        Ok(())
    }
}
