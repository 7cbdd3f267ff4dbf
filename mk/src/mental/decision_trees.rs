//! Decision tree analysis template

use crate::template::{StepBlueprint, Template};

pub fn decision_trees() -> Template {
    Template::new(
        "decision_trees",
        "Structure decisions using decision tree analysis",
        &[
            r"\b(decide|decision|choice|choose|option)",
            r"\b(alternative|trade.?off|versus|vs)",
            r"\b(probability|risk|uncertain)",
        ],
        vec![
            StepBlueprint {
                kind: "problem_definition",
                name: "Define Decision Problem",
                description: "Clearly define the decision problem for {task}",
                expected_output: Some("Problem definition"),
            },
            StepBlueprint {
                kind: "alternatives",
                name: "Identify Alternatives",
                description: "Identify all possible alternatives and options",
                expected_output: Some("List of alternatives"),
            },
            StepBlueprint {
                kind: "criteria",
                name: "Define Criteria",
                description: "Define evaluation criteria and success metrics",
                expected_output: Some("Evaluation criteria"),
            },
            StepBlueprint {
                kind: "outcomes",
                name: "Map Outcomes",
                description: "Map potential outcomes and consequences for each alternative",
                expected_output: Some("Outcome analysis"),
            },
            StepBlueprint {
                kind: "probabilities",
                name: "Assess Probabilities",
                description: "Assess probabilities and risks for each outcome",
                expected_output: Some("Risk and probability assessment"),
            },
            StepBlueprint {
                kind: "selection",
                name: "Select Best Option",
                description: "Select the optimal decision based on the analysis",
                expected_output: Some("Selected decision with rationale"),
            },
        ],
    )
}
