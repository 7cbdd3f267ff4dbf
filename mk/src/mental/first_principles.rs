//! First principles thinking template

use crate::template::{StepBlueprint, Template};

pub fn first_principles() -> Template {
    Template::new(
        "first_principles",
        "Break complex problems down into fundamental elements and build solutions from the ground up",
        &[
            r"\b(fundamental|basic|core|essential|simple)",
            r"\b(assumption|given|premise)",
            r"\b(why|how|what if)",
        ],
        vec![
            StepBlueprint {
                kind: "decomposition",
                name: "Break Down Problem",
                description: "Break down {task} into fundamental elements",
                expected_output: Some("List of fundamental components"),
            },
            StepBlueprint {
                kind: "analysis",
                name: "Analyze Components",
                description: "Analyze each fundamental component and challenge the assumptions behind it",
                expected_output: Some("Component analysis"),
            },
            StepBlueprint {
                kind: "synthesis",
                name: "Synthesize Solution",
                description: "Build a solution from the fundamental components",
                expected_output: Some("Synthesized solution"),
            },
        ],
    )
}
