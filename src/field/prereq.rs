//! Prerequisite Rules
//!
//! A rule gates one field on another field already being in the match,
//! optionally restricted to a finite set of permitted values. Rules are
//! evaluated against the match's current contents only; whether a `false`
//! answer rejects the insertion attempt is the caller's policy.

use super::{FieldId, Match};
use crate::value::FieldVal;
use tracing::trace;

/// A single prerequisite: "field X may be used only if field Y is present"
/// (optionally: "and holds one of these values").
#[derive(Debug, Clone)]
pub struct Prerequisite {
    field: FieldId,
    permitted: Vec<FieldVal>,
}

impl Prerequisite {
    /// The referenced field must merely be present.
    pub fn presence(field: FieldId) -> Self {
        Prerequisite {
            field,
            permitted: Vec::new(),
        }
    }

    /// The referenced field must be present and equal one of `values`.
    pub fn one_of<I>(field: FieldId, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldVal>,
    {
        Prerequisite {
            field,
            permitted: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The field this rule references.
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Permitted values; empty means presence-only.
    pub fn permitted(&self) -> &[FieldVal] {
        &self.permitted
    }

    /// Evaluate against the match's current contents.
    pub fn is_satisfied(&self, m: &dyn Match) -> bool {
        let Some(value) = m.get_value(self.field) else {
            trace!(field = ?self.field, "prerequisite field absent from match");
            return false;
        };
        if self.permitted.is_empty() {
            return true;
        }
        // value equality, never instance identity
        let ok = self.permitted.iter().any(|permitted| permitted == value);
        if !ok {
            trace!(field = ?self.field, "prerequisite value not permitted");
        }
        ok
    }
}
