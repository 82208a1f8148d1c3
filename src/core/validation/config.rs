//! Per-payload validation configuration

use crate::core::error::FieldValidationError;
use anyhow::Result;
use serde_json::{Map, Value};

type FieldFilter = Box<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;
type FieldValidator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

struct FieldRules {
    field: String,
    filters: Vec<FieldFilter>,
    validators: Vec<FieldValidator>,
}

/// Ordered set of filters and validators for one payload shape
///
/// Only configured fields survive [`validate_and_filter`](Self::validate_and_filter);
/// anything else in the payload is dropped. Fields are checked in the order
/// they were first configured, and every failure is reported, not just
/// the first.
pub struct ValidationConfig {
    name: String,
    rules: Vec<FieldRules>,
}

impl ValidationConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn rules_for(&mut self, field: &str) -> &mut FieldRules {
        let index = match self.rules.iter().position(|r| r.field == field) {
            Some(index) => index,
            None => {
                self.rules.push(FieldRules {
                    field: field.to_string(),
                    filters: Vec::new(),
                    validators: Vec::new(),
                });
                self.rules.len() - 1
            }
        };
        &mut self.rules[index]
    }

    /// Add a filter applied to `field` before validation
    pub fn add_filter<F>(&mut self, field: &str, filter: F) -> &mut Self
    where
        F: Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.rules_for(field).filters.push(Box::new(filter));
        self
    }

    /// Add a validator for `field`
    pub fn add_validator<V>(&mut self, field: &str, validator: V) -> &mut Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules_for(field).validators.push(Box::new(validator));
        self
    }

    /// Filter then validate a JSON object payload
    ///
    /// Missing fields are validated as `null`. Returns the filtered object
    /// containing only configured fields, or every field error found.
    pub fn validate_and_filter(
        &self,
        payload: Value,
    ) -> std::result::Result<Value, Vec<FieldValidationError>> {
        let Value::Object(mut input) = payload else {
            return Err(vec![FieldValidationError {
                field: self.name.clone(),
                message: "expected an object".to_string(),
            }]);
        };

        let mut output = Map::new();
        let mut errors = Vec::new();

        for rules in &self.rules {
            let mut value = input.remove(&rules.field).unwrap_or(Value::Null);

            let mut filter_failed = false;
            for filter in &rules.filters {
                match filter(&rules.field, value.clone()) {
                    Ok(filtered) => value = filtered,
                    Err(e) => {
                        errors.push(FieldValidationError {
                            field: rules.field.clone(),
                            message: e.to_string(),
                        });
                        filter_failed = true;
                        break;
                    }
                }
            }
            if filter_failed {
                continue;
            }

            for validator in &rules.validators {
                if let Err(message) = validator(&rules.field, &value) {
                    errors.push(FieldValidationError {
                        field: rules.field.clone(),
                        message,
                    });
                }
            }

            output.insert(rules.field.clone(), value);
        }

        if errors.is_empty() {
            Ok(Value::Object(output))
        } else {
            Err(errors)
        }
    }
}
