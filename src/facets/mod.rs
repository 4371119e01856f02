// Copyright 2025 Cowboy AI, LLC.

//! Facets: typed, precedence-ranked behavioural contracts
//!
//! Every metamodel element owns a [`FacetHolder`]. Facet factories add
//! competing facets to holders while a type is introspected; the winner per
//! facet type is resolved lazily when the facet is read.

mod builtin;
mod facet;
mod holder;

pub use builtin::*;
pub use facet::{Facet, FacetAny, Precedence};
pub use holder::FacetHolder;
