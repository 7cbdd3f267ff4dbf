//! Systems thinking template

use crate::template::{StepBlueprint, Template};

pub fn systems_thinking() -> Template {
    Template::new(
        "systems_thinking",
        "Understand interconnections and relationships in complex systems",
        &[
            r"\b(system|network|interconnect|relationship|feedback)",
            r"\b(stakeholder|component|element)",
            r"\b(impact|effect|consequence|ripple)",
        ],
        vec![
            StepBlueprint {
                kind: "mapping",
                name: "Map System Components",
                description: "Identify all components and stakeholders involved in {task}",
                expected_output: Some("System component map"),
            },
            StepBlueprint {
                kind: "relationships",
                name: "Analyze Relationships",
                description: "Identify relationships, dependencies, and feedback loops",
                expected_output: Some("Relationship analysis"),
            },
            StepBlueprint {
                kind: "leverage_points",
                name: "Find Leverage Points",
                description: "Identify high-impact intervention points in the system",
                expected_output: Some("List of leverage points"),
            },
            StepBlueprint {
                kind: "intervention",
                name: "Design Intervention",
                description: "Design an intervention strategy based on the leverage points",
                expected_output: Some("Intervention plan"),
            },
            StepBlueprint {
                kind: "feedback",
                name: "Monitor Feedback",
                description: "Monitor system response and adjust the approach",
                expected_output: Some("Feedback analysis and adjustments"),
            },
        ],
    )
}
