// Copyright 2025 Cowboy AI, LLC.

//! Error types for metamodel operations

use thiserror::Error;

use crate::reflection::TypeKey;

/// Errors that can occur while building or querying the metamodel
#[derive(Debug, Error)]
pub enum MetaModelError {
    /// A class was requested that the class repository does not know
    #[error("Class not found: {0}")]
    ClassNotFound(TypeKey),

    /// A specification could not be resolved for a type
    #[error("Specification not found: {0}")]
    SpecificationNotFound(String),

    /// A member lookup on a specification failed
    #[error("Member not found: {type_name}#{member_id}")]
    MemberNotFound {
        /// Type the member was looked up on
        type_name: String,
        /// Member id that was searched for
        member_id: String,
    },

    /// A facet factory failed while processing a class, method or parameter
    #[error("Facet factory {factory} failed on {target}: {source}")]
    FacetFactory {
        /// Name of the failing factory
        factory: &'static str,
        /// What was being processed
        target: String,
        /// Underlying plugin error
        #[source]
        source: anyhow::Error,
    },

    /// A post-processor failed after member introspection
    #[error("Post-processor {processor} failed on {type_name}: {source}")]
    PostProcessor {
        /// Name of the failing post-processor
        processor: &'static str,
        /// Specification being post-processed
        type_name: String,
        /// Underlying plugin error
        #[source]
        source: anyhow::Error,
    },

    /// A validator itself failed (as opposed to reporting failures)
    #[error("Validator {validator} failed: {source}")]
    Validator {
        /// Name of the failing validator
        validator: &'static str,
        /// Underlying plugin error
        #[source]
        source: anyhow::Error,
    },

    /// Introspection of one or more specifications failed during bootstrap
    #[error("Introspection failed for {type_name}: {reason}")]
    Introspection {
        /// Type whose introspection failed
        type_name: String,
        /// Description of the failure
        reason: String,
    },

    /// The metamodel did not pass validation
    #[error("Metamodel validation failed:\n{0}")]
    ValidationFailed(String),

    /// A bookmark string could not be parsed
    #[error("Invalid bookmark: {0}")]
    InvalidBookmark(String),

    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A framework invariant was violated
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type for metamodel operations
pub type MetaModelResult<T> = Result<T, MetaModelError>;

impl From<serde_json::Error> for MetaModelError {
    fn from(err: serde_json::Error) -> Self {
        MetaModelError::Configuration(err.to_string())
    }
}

impl MetaModelError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        MetaModelError::InternalError(msg.into())
    }

    /// Check if this error aborts metamodel bootstrap
    pub fn is_bootstrap_fatal(&self) -> bool {
        matches!(
            self,
            MetaModelError::FacetFactory { .. }
                | MetaModelError::PostProcessor { .. }
                | MetaModelError::Introspection { .. }
                | MetaModelError::InternalError(_)
        )
    }

    /// Check if this error carries validation failures
    pub fn is_validation(&self) -> bool {
        matches!(self, MetaModelError::ValidationFailed(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MetaModelError::ClassNotFound(_)
                | MetaModelError::SpecificationNotFound(_)
                | MetaModelError::MemberNotFound { .. }
        )
    }
}
