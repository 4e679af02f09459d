//! Strongly-typed wrappers for game concepts
//!
//! Instead of using bare Strings for different concepts, we wrap them in
//! distinct types that cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                $name(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }
    };
}

string_newtype!(
    /// Card name (e.g. "Boardwalk", "Sly Deal")
    CardName
);

string_newtype!(
    /// Player display name
    PlayerName
);

string_newtype!(
    /// Identifier of the room a match is played in
    ///
    /// Owned by the session layer; the engine only carries it so snapshots
    /// can be keyed by it.
    RoomId
);

string_newtype!(
    /// Opaque connection handle supplied by the transport layer
    SessionHandle
);
