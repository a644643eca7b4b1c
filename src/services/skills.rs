//! Skills block extraction from detail pages.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::ExtractionConfig;

/// Pulls the "Skills:" value out of a detail page body.
///
/// Patterns are tried in order and the first one that matches wins. Every
/// capture group of that match is split on commas, trimmed and joined with
/// `,`; configured strip tokens (e.g. `&nbsp;`) are removed first.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    patterns: Vec<Regex>,
    strip_tokens: Vec<String>,
    default_value: String,
}

impl SkillExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let patterns = config
            .skills_patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| AppError::pattern(p, e)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            strip_tokens: config.strip_tokens.clone(),
            default_value: config.default_value.clone(),
        })
    }

    /// Extract the skills value, or the default value if no block is present.
    pub fn extract(&self, body: &str) -> String {
        let Some(captures) = self.patterns.iter().find_map(|re| re.captures(body)) else {
            return self.default_value.clone();
        };

        captures
            .iter()
            .skip(1)
            .flatten()
            .map(|m| self.strip(m.as_str()))
            .flat_map(|value| {
                value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn strip(&self, value: &str) -> String {
        self.strip_tokens
            .iter()
            .fold(value.to_string(), |acc, token| acc.replace(token.as_str(), ""))
    }
}
