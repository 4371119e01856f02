// Copyright 2025 Cowboy AI, LLC.

//! Facets installed by the default programming model

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use super::facet::{Facet, Precedence};
use crate::reflection::{ClassRepository, MethodDescriptor, TypeKey, TypeRef};

/// Display name of a type
#[derive(Debug, Clone)]
pub struct ObjectNamedFacet {
    /// Singular name
    pub name: String,
    /// Rank
    pub precedence: Precedence,
}

impl Facet for ObjectNamedFacet {
    fn precedence(&self) -> Precedence {
        self.precedence
    }
}

/// Display name of a member
#[derive(Debug, Clone)]
pub struct MemberNamedFacet {
    /// Name shown to users
    pub name: String,
    /// Rank
    pub precedence: Precedence,
}

impl Facet for MemberNamedFacet {
    fn precedence(&self) -> Precedence {
        self.precedence
    }
}

/// How an object's title is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSource {
    /// Calls a `title()` method
    Method(Arc<MethodDescriptor>),
    /// Uses the type's display name
    TypeName(String),
}

/// Title of an object
#[derive(Debug, Clone)]
pub struct TitleFacet {
    /// Where the title comes from
    pub source: TitleSource,
    /// Rank
    pub precedence: Precedence,
}

impl Facet for TitleFacet {
    fn precedence(&self) -> Precedence {
        self.precedence
    }

    fn support_methods(&self) -> Vec<Arc<MethodDescriptor>> {
        match &self.source {
            TitleSource::Method(method) => vec![Arc::clone(method)],
            TitleSource::TypeName(_) => Vec::new(),
        }
    }
}

/// Icon name of an object, obtained through an `iconName()` method
#[derive(Debug, Clone)]
pub struct IconFacet {
    /// The icon method
    pub method: Arc<MethodDescriptor>,
}

impl Facet for IconFacet {
    fn precedence(&self) -> Precedence {
        Precedence::Default
    }

    fn support_methods(&self) -> Vec<Arc<MethodDescriptor>> {
        vec![Arc::clone(&self.method)]
    }
}

/// Marks a value type and names where its semantics come from
#[derive(Debug, Clone)]
pub struct ValueFacet {
    /// Value type
    pub value_type: TypeKey,
    /// Origin of the value semantics, e.g. `annotation` or a provider name
    pub semantics_origin: String,
    /// Rank
    pub precedence: Precedence,
}

impl Facet for ValueFacet {
    fn precedence(&self) -> Precedence {
        self.precedence
    }
}

/// What kind of member a mixin contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MixinContribution {
    /// An action
    Action,
    /// A property
    Property,
    /// A collection
    Collection,
}

/// Declares a type as a mixin for some mixee type
#[derive(Debug, Clone)]
pub struct MixinFacet {
    /// The type the mixin contributes to
    pub mixee: TypeKey,
    /// Name of the mixin's main method
    pub main_method: String,
    /// Kind of contributed member
    pub contribution: MixinContribution,
}

impl MixinFacet {
    /// Whether the mixin applies to `candidate`, directly or through
    /// inheritance
    pub fn is_mixin_for(&self, candidate: &TypeKey, classes: &ClassRepository) -> bool {
        classes.is_assignable(&self.mixee, candidate)
    }
}

impl Facet for MixinFacet {
    fn precedence(&self) -> Precedence {
        Precedence::Default
    }
}

/// Additional logical type names a type is known under
#[derive(Debug, Clone)]
pub struct AliasedFacet {
    /// Alias names
    pub aliases: Vec<String>,
}

impl Facet for AliasedFacet {
    fn precedence(&self) -> Precedence {
        Precedence::Default
    }
}

/// Marks a managed domain service
#[derive(Debug, Clone)]
pub struct DomainServiceFacet;

impl Facet for DomainServiceFacet {
    fn precedence(&self) -> Precedence {
        Precedence::Default
    }
}

/// Side-effect semantics of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticsOf {
    /// Query only, no side effects
    Safe,
    /// Query only, results may be cached per request
    SafeAndRequestCacheable,
    /// Repeated invocation has the same effect
    Idempotent,
    /// Idempotent, ask for confirmation
    IdempotentAreYouSure,
    /// Each invocation has an effect
    NonIdempotent,
    /// Non-idempotent, ask for confirmation
    NonIdempotentAreYouSure,
    /// Nothing declared
    NotSpecified,
}

impl SemanticsOf {
    /// Whether the action changes no state
    pub fn is_safe(self) -> bool {
        matches!(self, SemanticsOf::Safe | SemanticsOf::SafeAndRequestCacheable)
    }

    /// Whether confirmation should be requested
    pub fn is_are_you_sure(self) -> bool {
        matches!(
            self,
            SemanticsOf::IdempotentAreYouSure | SemanticsOf::NonIdempotentAreYouSure
        )
    }
}

impl FromStr for SemanticsOf {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "SAFE" => Ok(SemanticsOf::Safe),
            "SAFE_AND_REQUEST_CACHEABLE" => Ok(SemanticsOf::SafeAndRequestCacheable),
            "IDEMPOTENT" => Ok(SemanticsOf::Idempotent),
            "IDEMPOTENT_ARE_YOU_SURE" => Ok(SemanticsOf::IdempotentAreYouSure),
            "NON_IDEMPOTENT" => Ok(SemanticsOf::NonIdempotent),
            "NON_IDEMPOTENT_ARE_YOU_SURE" => Ok(SemanticsOf::NonIdempotentAreYouSure),
            "NOT_SPECIFIED" => Ok(SemanticsOf::NotSpecified),
            other => Err(format!("unknown action semantics: {other}")),
        }
    }
}

/// Side-effect semantics of an action
#[derive(Debug, Clone)]
pub struct ActionSemanticsFacet {
    /// The semantics
    pub semantics: SemanticsOf,
    /// Rank
    pub precedence: Precedence,
}

impl Facet for ActionSemanticsFacet {
    fn precedence(&self) -> Precedence {
        self.precedence
    }
}

/// How an action is invoked
#[derive(Debug, Clone)]
pub struct ActionInvocationFacet {
    /// The action method
    pub method: Arc<MethodDescriptor>,
    /// Declared return type
    pub return_type: TypeRef,
}

impl Facet for ActionInvocationFacet {
    fn precedence(&self) -> Precedence {
        Precedence::Default
    }
}

/// Marks an action as only available while prototyping
#[derive(Debug, Clone)]
pub struct PrototypeFacet;

impl Facet for PrototypeFacet {
    fn precedence(&self) -> Precedence {
        Precedence::Default
    }
}

/// Reads a property through its getter
#[derive(Debug, Clone)]
pub struct PropertyAccessorFacet {
    /// The getter
    pub method: Arc<MethodDescriptor>,
}

impl Facet for PropertyAccessorFacet {
    fn precedence(&self) -> Precedence {
        Precedence::Default
    }
}

/// Reads a collection through its getter
#[derive(Debug, Clone)]
pub struct CollectionAccessorFacet {
    /// The getter
    pub method: Arc<MethodDescriptor>,
    /// Element type of the collection
    pub element_type: TypeKey,
}

impl Facet for CollectionAccessorFacet {
    fn precedence(&self) -> Precedence {
        Precedence::Default
    }
}

/// Ordering hint for a member, a dewey-decimal sequence such as `1.2`
#[derive(Debug, Clone)]
pub struct MemberOrderFacet {
    /// Sequence string
    pub sequence: String,
}

impl MemberOrderFacet {
    /// Numeric components of the sequence; non-numeric parts sort last
    pub fn sequence_key(&self) -> Vec<u32> {
        self.sequence
            .split('.')
            .map(|part| part.trim().parse::<u32>().unwrap_or(u32::MAX))
            .collect()
    }
}

impl Facet for MemberOrderFacet {
    fn precedence(&self) -> Precedence {
        Precedence::Default
    }
}

macro_rules! support_method_facet {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            /// The support method
            pub method: Arc<MethodDescriptor>,
        }

        impl Facet for $name {
            fn precedence(&self) -> Precedence {
                Precedence::Default
            }

            fn support_methods(&self) -> Vec<Arc<MethodDescriptor>> {
                vec![Arc::clone(&self.method)]
            }
        }
    };
}

support_method_facet!(
    /// Hides a member through a `hideXxx()` method
    HiddenFacet
);
support_method_facet!(
    /// Disables a member through a `disableXxx()` method
    DisabledFacet
);
support_method_facet!(
    /// Validates a member through a `validateXxx(..)` method
    ValidateFacet
);
support_method_facet!(
    /// Supplies a parameter default through a `defaultNXxx()` method
    ParameterDefaultsFacet
);
support_method_facet!(
    /// Supplies parameter choices through a `choicesNXxx()` method
    ParameterChoicesFacet
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::FacetHolder;
    use crate::reflection::ClassDescriptor;

    #[test]
    fn test_semantics_parsing() {
        assert_eq!("SAFE".parse::<SemanticsOf>().unwrap(), SemanticsOf::Safe);
        assert!("IDEMPOTENT_ARE_YOU_SURE"
            .parse::<SemanticsOf>()
            .unwrap()
            .is_are_you_sure());
        assert!("bogus".parse::<SemanticsOf>().is_err());
    }

    #[test]
    fn test_member_order_sequence_key() {
        let a = MemberOrderFacet { sequence: "1.2".to_string() };
        let b = MemberOrderFacet { sequence: "1.10".to_string() };
        let c = MemberOrderFacet { sequence: "x".to_string() };
        assert!(a.sequence_key() < b.sequence_key());
        assert!(b.sequence_key() < c.sequence_key());
    }

    #[test]
    fn test_support_method_facets_report_their_method() {
        let method = Arc::new(MethodDescriptor::builder("hideName").build());
        let holder = FacetHolder::new();
        holder.add_facet(HiddenFacet { method: Arc::clone(&method) });
        holder.add_facet(MemberOrderFacet { sequence: "1".to_string() });
        assert_eq!(holder.support_methods(), vec![method]);
    }

    #[test]
    fn test_mixin_applies_to_subtypes() {
        let classes = ClassRepository::with_classes([
            ClassDescriptor::builder("Customer").build(),
            ClassDescriptor::builder("VipCustomer").extends("Customer").build(),
            ClassDescriptor::builder("Order").build(),
        ]);
        let facet = MixinFacet {
            mixee: TypeKey::new("Customer"),
            main_method: "act".to_string(),
            contribution: MixinContribution::Action,
        };
        assert!(facet.is_mixin_for(&TypeKey::new("VipCustomer"), &classes));
        assert!(!facet.is_mixin_for(&TypeKey::new("Order"), &classes));
    }
}
