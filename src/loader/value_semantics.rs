// Copyright 2025 Cowboy AI, LLC.

//! Value types known outside the scanned beans

use std::collections::BTreeMap;
use std::fmt;

use crate::reflection::TypeKey;

/// Supplies the value types registered by value-semantics providers
pub trait ValueSemanticsProvider: fmt::Debug + Send + Sync {
    /// Every registered value type
    fn value_types(&self) -> Vec<TypeKey>;

    /// Whether `class` has value semantics
    fn has_value_semantics(&self, class: &TypeKey) -> bool;

    /// Name of the provider registered for `class`
    fn provider_name(&self, class: &TypeKey) -> Option<String>;
}

/// A fixed table of value types
#[derive(Debug, Clone, Default)]
pub struct StaticValueSemantics {
    providers: BTreeMap<TypeKey, String>,
}

impl StaticValueSemantics {
    /// No value types
    pub fn new() -> Self {
        Self::default()
    }

    /// The usual scalar and temporal types
    pub fn with_defaults() -> Self {
        [
            ("java.lang.String", "string"),
            ("java.lang.Boolean", "boolean"),
            ("java.lang.Integer", "integer"),
            ("java.lang.Long", "long"),
            ("java.lang.Double", "double"),
            ("java.math.BigDecimal", "big-decimal"),
            ("java.time.LocalDate", "local-date"),
            ("java.time.Instant", "instant"),
            ("java.util.UUID", "uuid"),
            ("String", "string"),
            ("boolean", "boolean"),
            ("int", "integer"),
            ("long", "long"),
            ("double", "double"),
        ]
        .into_iter()
        .fold(Self::new(), |semantics, (class, provider)| semantics.with(class, provider))
    }

    /// Add a value type
    pub fn with(mut self, class: impl Into<TypeKey>, provider: impl Into<String>) -> Self {
        self.providers.insert(class.into(), provider.into());
        self
    }
}

impl ValueSemanticsProvider for StaticValueSemantics {
    fn value_types(&self) -> Vec<TypeKey> {
        self.providers.keys().cloned().collect()
    }

    fn has_value_semantics(&self, class: &TypeKey) -> bool {
        self.providers.contains_key(class)
    }

    fn provider_name(&self, class: &TypeKey) -> Option<String> {
        self.providers.get(class).cloned()
    }
}
