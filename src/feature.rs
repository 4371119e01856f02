// Copyright 2025 Cowboy AI, LLC.

//! Feature types and member stream filters

use serde::{Deserialize, Serialize};

/// The kind of metamodel element a facet factory applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureType {
    /// A domain type
    Object,
    /// A scalar property
    Property,
    /// A collection
    Collection,
    /// An action
    Action,
    /// A scalar action parameter
    ActionParameterSingular,
    /// A collection-valued action parameter
    ActionParameterPlural,
}

impl FeatureType {
    /// All feature types
    pub const ALL: [FeatureType; 6] = [
        FeatureType::Object,
        FeatureType::Property,
        FeatureType::Collection,
        FeatureType::Action,
        FeatureType::ActionParameterSingular,
        FeatureType::ActionParameterPlural,
    ];

    /// Object members
    pub const MEMBERS: [FeatureType; 3] = [
        FeatureType::Property,
        FeatureType::Collection,
        FeatureType::Action,
    ];

    /// Property and collection
    pub const PROPERTIES_AND_COLLECTIONS: [FeatureType; 2] =
        [FeatureType::Property, FeatureType::Collection];

    /// Both kinds of action parameter
    pub const PARAMETERS: [FeatureType; 2] = [
        FeatureType::ActionParameterSingular,
        FeatureType::ActionParameterPlural,
    ];

    /// Whether this is a property or collection
    pub fn is_association(self) -> bool {
        matches!(self, FeatureType::Property | FeatureType::Collection)
    }

    /// Whether this is an action parameter
    pub fn is_parameter(self) -> bool {
        matches!(
            self,
            FeatureType::ActionParameterSingular | FeatureType::ActionParameterPlural
        )
    }
}

/// Where an action may be invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionScope {
    /// Available in every deployment
    Production,
    /// Only available while prototyping
    Prototype,
    /// Filter accepting both scopes
    Any,
}

impl ActionScope {
    /// Whether an action declared with `self` passes the `filter` scope
    pub fn matches(self, filter: ActionScope) -> bool {
        filter == ActionScope::Any || filter == self
    }
}

/// Whether member streams include members contributed by mixins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MixedIn {
    /// Include mixed-in members
    Included,
    /// Only regular members
    Excluded,
}

impl MixedIn {
    /// Whether mixed-in members are wanted
    pub fn is_included(self) -> bool {
        self == MixedIn::Included
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_scope_filter() {
        assert!(ActionScope::Production.matches(ActionScope::Any));
        assert!(ActionScope::Prototype.matches(ActionScope::Prototype));
        assert!(!ActionScope::Prototype.matches(ActionScope::Production));
    }

    #[test]
    fn test_feature_type_groups() {
        assert!(FeatureType::PARAMETERS.iter().all(|f| f.is_parameter()));
        assert!(FeatureType::PROPERTIES_AND_COLLECTIONS
            .iter()
            .all(|f| f.is_association()));
        assert!(!FeatureType::Action.is_association());
    }
}
