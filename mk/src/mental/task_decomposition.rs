//! Task decomposition template

use crate::template::{StepBlueprint, Template};

pub fn task_decomposition() -> Template {
    Template::new(
        "task_decomposition",
        "Split a large goal into small, independently verifiable work items",
        &[
            r"\b(complex|complicated|large|big)",
            r"\b(break|split|divide|decompose)",
            r"\b(subtask|milestone|deliverable)",
        ],
        vec![
            StepBlueprint {
                kind: "scoping",
                name: "Scope the Goal",
                description: "State the finished form of {task} and its boundaries",
                expected_output: Some("Goal statement with explicit non-goals"),
            },
            StepBlueprint {
                kind: "decomposition",
                name: "List Work Items",
                description: "Decompose the goal into small, independently verifiable work items",
                expected_output: Some("Work item list"),
            },
            StepBlueprint {
                kind: "ordering",
                name: "Order Work Items",
                description: "Order work items by dependency and risk",
                expected_output: Some("Ordered backlog"),
            },
            StepBlueprint {
                kind: "verification",
                name: "Define Done Criteria",
                description: "Define a concrete completion check for each work item",
                expected_output: Some("Done criteria per item"),
            },
        ],
    )
}
