//! Provider contract and the static `Template` implementation
//!
//! A provider is an immutable, named step generator. Built-in providers are
//! `Template` values: static checklist data (step blueprints plus keyword
//! patterns) with a single point of logic, `{task}` interpolation.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// A single generated step, before it gains an identity in an engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescriptor {
    /// Step kind (e.g. "analysis", "planning", "information_gathering")
    pub kind: String,

    /// Short display name
    pub name: String,

    /// What the caller should do in this step
    pub description: String,

    /// What the step is expected to produce, if the template says
    #[serde(default)]
    pub expected_output: Option<String>,
}

/// A named step-sequence generator
///
/// Providers are constructed once at startup and never mutated. `generate`
/// is synchronous and CPU-only; it must not touch the filesystem or network.
pub trait Provider: Send + Sync {
    /// Unique provider name (registry key)
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Keyword patterns used only for suggestion scoring
    fn keywords(&self) -> &[Regex];

    /// Produce the ordered step list for a task
    fn generate(&self, task: &str, context: &Value) -> eyre::Result<Vec<StepDescriptor>>;
}

/// Blueprint for one step of a static template
///
/// `description` may contain the `{task}` placeholder, replaced with the
/// caller's task text at generation time.
#[derive(Debug, Clone, Copy)]
pub struct StepBlueprint {
    pub kind: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub expected_output: Option<&'static str>,
}

/// A static checklist template implementing [`Provider`]
pub struct Template {
    name: &'static str,
    description: &'static str,
    keywords: Vec<Regex>,
    steps: Vec<StepBlueprint>,
}

impl Template {
    /// Build a template from static data
    ///
    /// Keyword patterns are compiled case-insensitive. An invalid pattern is
    /// skipped with a warning rather than failing construction; templates
    /// must stay usable even if one trigger is bad.
    pub fn new(
        name: &'static str,
        description: &'static str,
        keyword_patterns: &[&str],
        steps: Vec<StepBlueprint>,
    ) -> Self {
        let keywords = keyword_patterns
            .iter()
            .filter_map(|pattern| {
                match RegexBuilder::new(pattern).case_insensitive(true).build() {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(%name, %pattern, error = %e, "Template::new: skipping invalid keyword pattern");
                        None
                    }
                }
            })
            .collect();

        Self {
            name,
            description,
            keywords,
            steps,
        }
    }

    /// Number of steps this template generates
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

impl Provider for Template {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn keywords(&self) -> &[Regex] {
        &self.keywords
    }

    fn generate(&self, task: &str, _context: &Value) -> eyre::Result<Vec<StepDescriptor>> {
        debug!(name = %self.name, %task, "Template::generate: called");
        Ok(self
            .steps
            .iter()
            .map(|step| StepDescriptor {
                kind: step.kind.to_string(),
                name: step.name.to_string(),
                description: step.description.replace("{task}", task),
                expected_output: step.expected_output.map(str::to_string),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Template {
        Template::new(
            "sample",
            "Sample template",
            &[r"\b(alpha|beta)\b"],
            vec![
                StepBlueprint {
                    kind: "analysis",
                    name: "Analyze",
                    description: "Analyze the requirements for: {task}",
                    expected_output: Some("Requirement list"),
                },
                StepBlueprint {
                    kind: "execution",
                    name: "Execute",
                    description: "Do the work",
                    expected_output: None,
                },
            ],
        )
    }

    #[test]
    fn test_generate_interpolates_task() {
        let t = sample();
        let steps = t.generate("ship the release", &json!({})).unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].description, "Analyze the requirements for: ship the release");
        assert_eq!(steps[0].expected_output.as_deref(), Some("Requirement list"));
        assert_eq!(steps[1].description, "Do the work");
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let t = sample();
        assert!(t.keywords()[0].is_match("the ALPHA release"));
        assert!(!t.keywords()[0].is_match("gamma only"));
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let t = Template::new("broken", "has a bad trigger", &[r"\b(ok)\b", r"("], vec![]);
        assert_eq!(t.keywords().len(), 1);
    }

    #[test]
    fn test_step_descriptor_serde() {
        let step = StepDescriptor {
            kind: "analysis".to_string(),
            name: "Analyze".to_string(),
            description: "Look closely".to_string(),
            expected_output: None,
        };
        let json = serde_json::to_string(&step).unwrap();
        let parsed: StepDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(step, parsed);
    }
}
