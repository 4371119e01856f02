// Copyright 2025 Cowboy AI, LLC.

//! Object specifications and their members
//!
//! An [`ObjectSpecification`] is created per domain type and introspected in
//! two phases: the type hierarchy first, then members. Mixed-in members are
//! contributed lazily on first access.

mod faceted_method;
mod member_list;
mod members;
mod mixin;
mod object_spec;
pub mod post_processing;
mod sorting;
mod state;

pub use faceted_method::{FacetedMethod, FacetedMethodParameter, FacetedMethodsBuilder};
pub use member_list::MemberList;
pub use members::{MixedInMember, ObjectAction, ObjectActionParameter, ObjectAssociation, ObjectMember};
pub use object_spec::{Depth, ObjectSpecification};
pub use post_processing::ObjectSpecificationPostProcessor;
pub use sorting::sort_members;
pub use state::IntrospectionState;
