//! Strongly-typed record identifiers
//!
//! Expense and income ids are opaque to callers. They display as a short
//! prefixed form (`exp-1a2b3c4d`) which the CLI accepts back as a handle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh unique id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Whether a user-supplied handle refers to this id.
            ///
            /// Accepts the full UUID, the short display form, or the short
            /// form without its prefix.
            pub fn matches(&self, handle: &str) -> bool {
                let handle = handle.trim();
                if handle.is_empty() {
                    return false;
                }
                let full = self.0.to_string();
                if handle.eq_ignore_ascii_case(&full) {
                    return true;
                }
                let bare = handle.strip_prefix($display_prefix).unwrap_or(handle);
                bare.len() >= 8 && full.starts_with(&bare.to_ascii_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(IncomeId, "inc-");
