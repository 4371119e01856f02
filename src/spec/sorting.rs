// Copyright 2025 Cowboy AI, LLC.

//! Member ordering

use std::cmp::Ordering;
use std::sync::Arc;

use super::members::ObjectMember;
use crate::config::MemberSortingPolicy;

/// Sort members in place according to `policy`; the sort is stable
pub fn sort_members<T: ObjectMember>(members: &mut [Arc<T>], policy: MemberSortingPolicy) {
    match policy {
        MemberSortingPolicy::MemberOrder => members.sort_by(|a, b| by_member_order(&**a, &**b)),
        MemberSortingPolicy::Alphabetical => members.sort_by(|a, b| a.id().cmp(b.id())),
        MemberSortingPolicy::Declaration => {
            members.sort_by_key(|member| member.declaration_index())
        }
    }
}

/// Members with a sequence come first, by dewey-decimal sequence; then by id
fn by_member_order<T: ObjectMember>(a: &T, b: &T) -> Ordering {
    let key_a = a.member_order().map(|order| order.sequence_key());
    let key_b = b.member_order().map(|order| order.sequence_key());
    match (key_a, key_b) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id().cmp(b.id())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id().cmp(b.id()),
    }
}
