// Copyright 2025 Cowboy AI, LLC.

//! Introspection states of a specification

use serde::{Deserialize, Serialize};
use std::fmt;

/// How far a specification has been introspected
///
/// States move forward, except that a failed step falls back to the last
/// state reached before it. The two `Being*` states mark work in
/// progress; a request reaching a spec in one of them returns immediately,
/// which is what stops mutually referencing types from recursing forever.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum IntrospectionState {
    /// Created, nothing introspected
    NotIntrospected = 0,
    /// Type hierarchy introspection running
    TypeBeingIntrospected = 1,
    /// Type hierarchy and object facets done
    TypeIntrospected = 2,
    /// Member introspection running
    MembersBeingIntrospected = 3,
    /// Members done
    FullyIntrospected = 4,
}

impl IntrospectionState {
    /// Decode a stored state; out-of-range values read as fully introspected
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => IntrospectionState::NotIntrospected,
            1 => IntrospectionState::TypeBeingIntrospected,
            2 => IntrospectionState::TypeIntrospected,
            3 => IntrospectionState::MembersBeingIntrospected,
            _ => IntrospectionState::FullyIntrospected,
        }
    }

    /// Whether introspection is running
    pub fn is_being_introspected(self) -> bool {
        matches!(
            self,
            IntrospectionState::TypeBeingIntrospected | IntrospectionState::MembersBeingIntrospected
        )
    }

    /// Whether at least the type hierarchy is done
    pub fn is_type_introspected(self) -> bool {
        self >= IntrospectionState::TypeIntrospected
    }

    /// Whether members are done
    pub fn is_fully_introspected(self) -> bool {
        self == IntrospectionState::FullyIntrospected
    }
}

impl fmt::Display for IntrospectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IntrospectionState::NotIntrospected => "not introspected",
            IntrospectionState::TypeBeingIntrospected => "type being introspected",
            IntrospectionState::TypeIntrospected => "type introspected",
            IntrospectionState::MembersBeingIntrospected => "members being introspected",
            IntrospectionState::FullyIntrospected => "fully introspected",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_u8() {
        for state in [
            IntrospectionState::NotIntrospected,
            IntrospectionState::TypeBeingIntrospected,
            IntrospectionState::TypeIntrospected,
            IntrospectionState::MembersBeingIntrospected,
            IntrospectionState::FullyIntrospected,
        ] {
            assert_eq!(IntrospectionState::from_u8(state as u8), state);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(IntrospectionState::TypeIntrospected < IntrospectionState::FullyIntrospected);
        assert!(IntrospectionState::MembersBeingIntrospected.is_type_introspected());
        assert!(!IntrospectionState::TypeBeingIntrospected.is_type_introspected());
    }
}
