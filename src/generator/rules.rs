//! Name validity rules compiled from a profile

use regex::Regex;

use crate::config::Rules;
use crate::error::GenerationError;

/// Compiled form of [`Rules`]
#[derive(Debug)]
pub struct Validator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    exclude: Vec<String>,
    pattern: Option<Regex>,
}

impl Validator {
    pub fn compile(rules: &Rules) -> Result<Self, GenerationError> {
        let pattern = rules
            .pattern
            .as_deref()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    GenerationError::with_source(format!("Invalid name pattern: {}", p), e)
                })
            })
            .transpose()?;

        Ok(Self {
            min_length: rules.min_length,
            max_length: rules.max_length,
            exclude: rules.exclude.iter().map(|e| e.to_lowercase()).collect(),
            pattern,
        })
    }

    pub fn is_valid(&self, name: &str) -> bool {
        let len = name.chars().count();
        if len == 0 {
            return false;
        }
        if self.min_length.is_some_and(|min| len < min) {
            return false;
        }
        if self.max_length.is_some_and(|max| len > max) {
            return false;
        }
        if self.exclude.contains(&name.to_lowercase()) {
            return false;
        }
        self.pattern.as_ref().map_or(true, |re| re.is_match(name))
    }
}
