//! SWOT analysis template

use crate::template::{StepBlueprint, Template};

pub fn swot_analysis() -> Template {
    Template::new(
        "swot_analysis",
        "Assess strengths, weaknesses, opportunities, and threats",
        &[
            r"\b(strength|weakness|opportunity|threat)",
            r"\b(advantage|disadvantage|risk|benefit)",
            r"\b(internal|external|competitive)",
        ],
        vec![
            StepBlueprint {
                kind: "strengths",
                name: "Identify Strengths",
                description: "Identify internal strengths relevant to {task}",
                expected_output: Some("Strength inventory"),
            },
            StepBlueprint {
                kind: "weaknesses",
                name: "Identify Weaknesses",
                description: "Identify internal weaknesses and gaps",
                expected_output: Some("Weakness inventory"),
            },
            StepBlueprint {
                kind: "opportunities",
                name: "Identify Opportunities",
                description: "Identify external opportunities to exploit",
                expected_output: Some("Opportunity list"),
            },
            StepBlueprint {
                kind: "threats",
                name: "Identify Threats",
                description: "Identify external threats and risks",
                expected_output: Some("Threat list"),
            },
            StepBlueprint {
                kind: "synthesis",
                name: "Synthesize Strategy",
                description: "Combine the four quadrants into a strategy",
                expected_output: Some("SWOT-informed strategy"),
            },
        ],
    )
}
