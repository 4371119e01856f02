// Copyright 2025 Cowboy AI, LLC.

//! Metamodel validators

mod domain_include;
mod logical_type_uniqueness;

pub use domain_include::DomainIncludeValidator;
pub use logical_type_uniqueness::LogicalTypeNameUniquenessValidator;

use std::fmt;

use crate::loader::{SpecificationLoader, ValidationFailures};

/// Inspects the whole metamodel and reports what is wrong with it
///
/// Findings go into `failures`. An `Err` means the validator itself broke
/// and aborts the assessment.
pub trait MetaModelValidator: fmt::Debug + Send + Sync {
    /// Name used in errors and logs
    fn name(&self) -> &'static str;

    /// Add the failures found in the loader's specifications
    fn validate(
        &self,
        loader: &SpecificationLoader,
        failures: &mut ValidationFailures,
    ) -> anyhow::Result<()>;
}
