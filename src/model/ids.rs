// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Identifier newtypes.
//!
//! Store-allocated ids follow the `{kind}-{n}` scheme (`task-3`, `edge-7`);
//! imported documents may carry anything that survives [`IdError`] screening.
//! Ids end up in repository keys and collaborator URLs, so a value must be a
//! single non-empty path segment with no control characters.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    IllegalChar(char),
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::IllegalChar(c) => write!(f, "id must not contain {c:?}"),
        }
    }
}

impl std::error::Error for IdError {}

fn screen(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if let Some(c) = value.chars().find(|c| *c == '/' || c.is_control()) {
        return Err(IdError::IllegalChar(c));
    }
    Ok(())
}

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                screen(&value)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }

            /// For a `{prefix}-{n}` id, the numeric suffix `n`. Counter
            /// resumption after loads and imports is keyed on this.
            pub fn sequence_after(&self, prefix: &str) -> Option<u64> {
                self.0.strip_prefix(prefix)?.strip_prefix('-')?.parse().ok()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

id_newtype!(
    /// Identifies a node within one workflow graph.
    NodeId
);
id_newtype!(
    /// Identifies an edge within one workflow graph.
    EdgeId
);
id_newtype!(
    /// Identifies a stored workflow at the persistence collaborator.
    WorkflowId
);
id_newtype!(
    /// Identifies the organization a session resolves to.
    OrgId
);

#[cfg(test)]
mod tests {
    use super::{EdgeId, IdError, NodeId};

    #[test]
    fn screening_rejects_empty_and_path_breaking_values() {
        assert_eq!(NodeId::new(""), Err(IdError::Empty));
        assert_eq!(NodeId::new("a/b"), Err(IdError::IllegalChar('/')));
        assert_eq!(NodeId::new("a\nb"), Err(IdError::IllegalChar('\n')));
    }

    #[test]
    fn accepted_values_display_unchanged() {
        let id = NodeId::new("approval-12").expect("id");
        assert_eq!(id.as_str(), "approval-12");
        assert_eq!(id.to_string(), "approval-12");
        assert_eq!("task-1".parse::<NodeId>().expect("parse").as_str(), "task-1");
    }

    #[test]
    fn sequence_suffix_parses_generated_ids_only() {
        let id = NodeId::new("task-31").expect("id");
        assert_eq!(id.sequence_after("task"), Some(31));
        assert_eq!(id.sequence_after("approval"), None);

        // Foreign ids that merely resemble the scheme do not parse.
        assert_eq!(NodeId::new("task-x").expect("id").sequence_after("task"), None);
        assert_eq!(NodeId::new("taskforce-2").expect("id").sequence_after("task"), None);
        assert_eq!(EdgeId::new("edge").expect("id").sequence_after("edge"), None);
    }
}
