//! Named outputs of a calculator run

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::presentation::{format_currency, format_percent};

/// Scalar outputs keyed by metric name, with their display strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Calculator that produced the outputs
    pub calculator: String,
    pub scalar_outputs: BTreeMap<String, f64>,
    pub formatted_outputs: BTreeMap<String, String>,
}

impl ProjectionResult {
    pub fn new(calculator: impl Into<String>) -> Self {
        Self {
            calculator: calculator.into(),
            ..Default::default()
        }
    }

    /// Store a value with an explicit display string
    pub fn insert(&mut self, name: &str, value: f64, formatted: String) -> &mut Self {
        self.scalar_outputs.insert(name.to_string(), value);
        self.formatted_outputs.insert(name.to_string(), formatted);
        self
    }

    pub fn insert_currency(&mut self, name: &str, value: f64) -> &mut Self {
        self.insert(name, value, format_currency(value))
    }

    /// `value` is already in percent units
    pub fn insert_percent(&mut self, name: &str, value: f64, decimals: usize) -> &mut Self {
        self.insert(name, value, format_percent(value, decimals))
    }

    pub fn insert_count(&mut self, name: &str, value: u32) -> &mut Self {
        self.insert(name, value as f64, value.to_string())
    }

    /// Display-only entry with no scalar counterpart
    pub fn insert_text(&mut self, name: &str, text: impl Into<String>) -> &mut Self {
        self.formatted_outputs.insert(name.to_string(), text.into());
        self
    }

    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.scalar_outputs.get(name).copied()
    }

    pub fn formatted(&self, name: &str) -> Option<&str> {
        self.formatted_outputs.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_scalar_exact() {
        let mut result = ProjectionResult::new("test");
        result
            .insert_currency("future_value", 127_628.156)
            .insert_percent("rate", 5.25, 2)
            .insert_count("years", 5)
            .insert_text("note", "illustrative only");

        assert_eq!(result.scalar("future_value"), Some(127_628.156));
        assert_eq!(result.formatted("future_value"), Some("$127,628"));
        assert_eq!(result.formatted("rate"), Some("5.25%"));
        assert_eq!(result.scalar("years"), Some(5.0));
        assert_eq!(result.scalar("note"), None);
        assert_eq!(result.formatted("note"), Some("illustrative only"));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut result = ProjectionResult::new("coverage_gap");
        result.insert_currency("gap", 1_075_000.0);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["calculator"], "coverage_gap");
        assert_eq!(json["scalar_outputs"]["gap"], 1_075_000.0);
        assert_eq!(json["formatted_outputs"]["gap"], "$1,075,000");
    }
}
