use std::collections::HashMap;

use serde_json::Value;

use crate::v1::book::{Book, ISBN};

/// A `SET` update over book attributes.
///
/// Attribute names never appear in the expression text: each one is bound to a `#fN`
/// placeholder in [`UpdateExpression::names`] and its value to `:vN` in
/// [`UpdateExpression::values`], so reserved words and punctuation in field names are safe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExpression {
    assignments: Vec<(String, Value)>,
}

impl UpdateExpression {
    pub fn new() -> Self {
        Self::default()
    }
    /// Every attribute of `book` except its key.
    pub fn for_book(book: &Book) -> Self {
        book.attributes
            .iter()
            .fold(Self::new(), |update, (name, value)| {
                update.set(name.clone(), value.clone())
            })
    }
    /// Adds or replaces an assignment. The key attribute is immutable and is skipped.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if name == ISBN {
            return self;
        }
        let value = value.into();
        match self.assignments.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.assignments.push((name, value)),
        }
        self
    }
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
    pub fn assignments(&self) -> &[(String, Value)] {
        &self.assignments
    }
    pub fn field_names(&self) -> Vec<&str> {
        self.assignments.iter().map(|(n, _)| n.as_str()).collect()
    }
    pub fn expression(&self) -> String {
        let clauses = (0..self.assignments.len())
            .map(|i| format!("#f{i} = :v{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("SET {clauses}")
    }
    pub fn names(&self) -> HashMap<String, String> {
        self.assignments
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (format!("#f{i}"), name.clone()))
            .collect()
    }
    pub fn values(&self) -> HashMap<String, Value> {
        self.assignments
            .iter()
            .enumerate()
            .map(|(i, (_, value))| (format!(":v{i}"), value.clone()))
            .collect()
    }
}
