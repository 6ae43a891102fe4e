//! Reusable attribute validators
//!
//! Each validator ignores values of a type it does not check; type checking
//! is the framework's job, not the validator's.

use crate::schema::{Validator, ValidatorRequest, ValidatorResponse};
use crate::types::{AttributePath, Diagnostic, Dynamic};

fn path_name(path: &AttributePath) -> String {
    path.steps
        .iter()
        .map(|step| match step {
            crate::types::AttributePathStep::AttributeName(name) => name.clone(),
            crate::types::AttributePathStep::ElementKeyInt(idx) => format!("[{}]", idx),
        })
        .collect::<Vec<_>>()
        .join(".")
}

pub struct StringLengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Validator for StringLengthValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("string length must be between {} and {}", min, max),
            (Some(min), None) => format!("string length must be at least {}", min),
            (None, Some(max)) => format!("string length must be at most {}", max),
            (None, None) => "any string length".to_string(),
        }
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut diagnostics = vec![];
        let name = path_name(&request.path);

        if let Dynamic::String(s) = &request.config_value.value {
            if let Some(min) = self.min {
                if s.len() < min {
                    diagnostics.push(
                        Diagnostic::error(
                            format!("{} must have minimum length of {}", name, min),
                            format!("Got length {}", s.len()),
                        )
                        .with_attribute(request.path.clone()),
                    );
                }
            }
            if let Some(max) = self.max {
                if s.len() > max {
                    diagnostics.push(
                        Diagnostic::error(
                            format!("{} must have maximum length of {}", name, max),
                            format!("Got length {}", s.len()),
                        )
                        .with_attribute(request.path.clone()),
                    );
                }
            }
        }

        ValidatorResponse { diagnostics }
    }
}

/// Matches string values against a regular expression.
/// `description` is the human form of the pattern used in the error summary.
pub struct StringPatternValidator {
    pub pattern: regex::Regex,
    pub description: String,
}

impl StringPatternValidator {
    pub fn new(pattern: &str, description: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: regex::Regex::new(pattern)?,
            description: description.to_string(),
        })
    }
}

impl Validator for StringPatternValidator {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut diagnostics = vec![];

        if let Dynamic::String(s) = &request.config_value.value {
            if !self.pattern.is_match(s) {
                diagnostics.push(
                    Diagnostic::error(
                        format!(
                            "\"{}\" must match {}",
                            path_name(&request.path),
                            self.description
                        ),
                        format!("Value '{}' does not match pattern {}", s, self.pattern),
                    )
                    .with_attribute(request.path.clone()),
                );
            }
        }

        ValidatorResponse { diagnostics }
    }
}

pub struct NumberRangeValidator {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Validator for NumberRangeValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("value must be between {} and {}", min, max),
            (Some(min), None) => format!("value must be at least {}", min),
            (None, Some(max)) => format!("value must be at most {}", max),
            (None, None) => "any number".to_string(),
        }
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut diagnostics = vec![];
        let name = path_name(&request.path);

        if let Dynamic::Number(n) = request.config_value.value {
            if let Some(min) = self.min {
                if n < min {
                    diagnostics.push(
                        Diagnostic::error(
                            format!("{} must be at least {}", name, min),
                            format!("Got {}", n),
                        )
                        .with_attribute(request.path.clone()),
                    );
                }
            }
            if let Some(max) = self.max {
                if n > max {
                    diagnostics.push(
                        Diagnostic::error(
                            format!("{} must be at most {}", name, max),
                            format!("Got {}", n),
                        )
                        .with_attribute(request.path.clone()),
                    );
                }
            }
        }

        ValidatorResponse { diagnostics }
    }
}
