//! Design thinking template

use crate::template::{StepBlueprint, Template};

pub fn design_thinking() -> Template {
    Template::new(
        "design_thinking",
        "Human-centered approach: empathize, define, ideate, prototype, test",
        &[
            r"\b(user|customer|people|human|experience)",
            r"\b(need|want|pain|problem|solution)",
            r"\b(prototype|test|iterate|feedback)",
        ],
        vec![
            StepBlueprint {
                kind: "empathize",
                name: "Empathize With Users",
                description: "Understand the users affected by {task} and their needs",
                expected_output: Some("User needs and pain points"),
            },
            StepBlueprint {
                kind: "define",
                name: "Define the Problem",
                description: "Frame the core problem from the user's point of view",
                expected_output: Some("Problem statement"),
            },
            StepBlueprint {
                kind: "ideate",
                name: "Generate Ideas",
                description: "Generate a broad range of candidate solutions",
                expected_output: Some("Idea list"),
            },
            StepBlueprint {
                kind: "prototype",
                name: "Build Prototype",
                description: "Build a low-cost prototype of the most promising idea",
                expected_output: Some("Prototype description"),
            },
            StepBlueprint {
                kind: "test",
                name: "Test With Users",
                description: "Test the prototype with users and capture feedback",
                expected_output: Some("Test results and iteration plan"),
            },
        ],
    )
}
