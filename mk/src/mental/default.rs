//! General-purpose planning template

use crate::template::{StepBlueprint, Template};

pub fn default() -> Template {
    Template::new(
        "default",
        "General-purpose planning model for any knowledge domain",
        &[r"\b(plan|strategy|approach|method)", r"\b(goal|objective|target|aim)"],
        vec![
            StepBlueprint {
                kind: "analysis",
                name: "Analyze Requirements",
                description: "Analyze the requirements for: {task}",
                expected_output: Some("List of requirements and constraints"),
            },
            StepBlueprint {
                kind: "planning",
                name: "Create Action Plan",
                description: "Create a detailed action plan based on the analysis",
                expected_output: Some("Ordered list of actions"),
            },
            StepBlueprint {
                kind: "execution",
                name: "Execute Plan",
                description: "Execute the action plan step by step",
                expected_output: Some("Execution results"),
            },
            StepBlueprint {
                kind: "validation",
                name: "Validate Results",
                description: "Validate that the results meet the requirements",
                expected_output: Some("Validation report"),
            },
        ],
    )
}
