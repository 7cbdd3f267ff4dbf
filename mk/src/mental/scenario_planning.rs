//! Scenario planning template

use crate::template::{StepBlueprint, Template};

pub fn scenario_planning() -> Template {
    Template::new(
        "scenario_planning",
        "Plan against multiple plausible futures instead of a single forecast",
        &[
            r"\b(future|forecast|predict|scenario)",
            r"\b(uncertain|unknown|volatile|change)",
            r"\b(contingency|fallback|plan b)",
        ],
        vec![
            StepBlueprint {
                kind: "drivers",
                name: "Identify Driving Forces",
                description: "Identify the forces that will shape the outcome of {task}",
                expected_output: Some("List of driving forces"),
            },
            StepBlueprint {
                kind: "uncertainties",
                name: "Rank Uncertainties",
                description: "Rank the forces by impact and uncertainty",
                expected_output: Some("Ranked uncertainty matrix"),
            },
            StepBlueprint {
                kind: "scenarios",
                name: "Draft Scenarios",
                description: "Draft two to four distinct, plausible scenarios",
                expected_output: Some("Scenario narratives"),
            },
            StepBlueprint {
                kind: "responses",
                name: "Plan Responses",
                description: "Plan robust actions that work across scenarios, plus contingencies",
                expected_output: Some("Response and contingency plan"),
            },
        ],
    )
}
