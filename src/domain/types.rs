//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers arriving from the backend are wrapped so that a house id can
//! never be passed where an activity id is expected.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(HouseId, "Unique identifier for a rentable house listing.");
id_newtype!(ActivityId, "Unique identifier for a host activity.");
id_newtype!(HostId, "Unique identifier for the user hosting a listing.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert!(HouseId::new(1).is_ok());
        assert_eq!(HouseId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ActivityId::new(-3), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = HouseId::new(42).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let parsed: HouseId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }
}
