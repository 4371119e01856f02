// Copyright 2025 Cowboy AI, LLC.

//! Metamodel configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::MetaModelResult;

/// Which methods become members without explicit annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntrospectionPolicy {
    /// Only methods annotated `Action` become actions
    AnnotationRequired,
    /// Every remaining public method becomes an action
    AnnotationOptional,
}

/// How much of the metamodel is built at bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntrospectionMode {
    /// Specs not reached from a bootstrap wave stay at type level until used
    Lazy,
    /// Every spec is fully introspected at bootstrap
    Full,
}

/// Order in which members are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberSortingPolicy {
    /// `MemberOrder` sequence first, then member id
    MemberOrder,
    /// Member id only
    Alphabetical,
    /// Declaration order of the underlying methods
    Declaration,
}

/// Configuration for the specification loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaModelConfig {
    /// Action discovery policy
    pub policy: IntrospectionPolicy,
    /// Bootstrap depth
    pub mode: IntrospectionMode,
    /// Run bootstrap waves on the rayon pool
    pub parallelize: bool,
    /// Member ordering
    pub member_sorting: MemberSortingPolicy,
    /// Re-validate when specs are introspected after bootstrap
    pub revalidate_incrementally: bool,
    /// Maximum queued validation requests
    pub validation_queue_capacity: usize,
    /// How long dispose waits for pending validation
    pub dispose_timeout_ms: u64,
    /// How often dispose checks for pending validation
    pub dispose_poll_interval_ms: u64,
    /// Types loaded before the scanned beans
    pub preload_types: Vec<String>,
    /// Name of the method a mixin contributes
    pub mixin_main_method: String,
    /// Types that are never introspected
    pub never_introspect: Vec<String>,
}

impl Default for MetaModelConfig {
    fn default() -> Self {
        Self {
            policy: IntrospectionPolicy::AnnotationOptional,
            mode: IntrospectionMode::Lazy,
            parallelize: false,
            member_sorting: MemberSortingPolicy::MemberOrder,
            revalidate_incrementally: true,
            validation_queue_capacity: 1024,
            dispose_timeout_ms: 5_000,
            dispose_poll_interval_ms: 100,
            preload_types: vec![],
            mixin_main_method: "act".to_string(),
            never_introspect: vec![
                "java.lang.Object".to_string(),
                "java.lang.Enum".to_string(),
                "java.io.Serializable".to_string(),
                "java.lang.Comparable".to_string(),
            ],
        }
    }
}

impl MetaModelConfig {
    /// Read a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(raw: &str) -> MetaModelResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Dispose timeout as a duration
    pub fn dispose_timeout(&self) -> Duration {
        Duration::from_millis(self.dispose_timeout_ms)
    }

    /// Dispose poll interval as a duration
    pub fn dispose_poll_interval(&self) -> Duration {
        Duration::from_millis(self.dispose_poll_interval_ms.max(1))
    }

    /// Whether `AnnotationRequired` is in force
    pub fn is_annotation_required(&self) -> bool {
        self.policy == IntrospectionPolicy::AnnotationRequired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MetaModelConfig::default();
        assert_eq!(config.mode, IntrospectionMode::Lazy);
        assert_eq!(config.dispose_timeout(), Duration::from_secs(5));
        assert_eq!(config.dispose_poll_interval(), Duration::from_millis(100));
        assert_eq!(config.mixin_main_method, "act");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MetaModelConfig::from_json_str(
            r#"{"mode": "full", "parallelize": true, "policy": "annotation_required"}"#,
        )
        .unwrap();
        assert_eq!(config.mode, IntrospectionMode::Full);
        assert!(config.parallelize);
        assert!(config.is_annotation_required());
        assert_eq!(config.validation_queue_capacity, 1024);
    }

    #[test]
    fn test_invalid_json_is_configuration_error() {
        let err = MetaModelConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, crate::MetaModelError::Configuration(_)));
    }
}
