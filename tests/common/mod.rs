//! Shared test fixtures.

use flowmatch_core::{FieldId, FieldVal, Match};
use std::collections::HashMap;

/// HashMap-backed match predicate for driving prerequisite checks.
#[derive(Default)]
pub struct TestMatch {
    values: HashMap<FieldId, FieldVal>,
}

impl TestMatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FieldId, value: impl Into<FieldVal>) -> Self {
        self.values.insert(field, value.into());
        self
    }
}

impl Match for TestMatch {
    fn get_value(&self, field: FieldId) -> Option<&FieldVal> {
        self.values.get(&field)
    }
}
