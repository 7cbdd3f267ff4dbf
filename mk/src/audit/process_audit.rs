//! Process audit framework

use crate::template::{StepBlueprint, Template};

pub fn process_audit() -> Template {
    Template::new(
        "process_audit",
        "Examine whether a process is followed, effective, and efficient",
        &[
            r"\b(process|procedure|workflow|operation)",
            r"\b(efficien|waste|delay|handoff)",
            r"\b(sop|runbook|checklist)",
        ],
        vec![
            StepBlueprint {
                kind: "planning",
                name: "Plan Process Audit",
                description: "Map the documented process behind {task}; define the audit trail to follow",
                expected_output: Some("Process map and audit trail"),
            },
            StepBlueprint {
                kind: "information_gathering",
                name: "Observe the Process",
                description: "Collect execution records and timings; interview operators; note where practice diverges from the documented process",
                expected_output: Some("Observed-vs-documented comparison"),
            },
            StepBlueprint {
                kind: "testing_and_evaluation",
                name: "Evaluate Effectiveness",
                description: "Measure outcomes against process goals; identify bottlenecks, rework loops, and unnecessary handoffs",
                expected_output: Some("Effectiveness and efficiency assessment"),
            },
            StepBlueprint {
                kind: "analysis_and_reporting",
                name: "Report Process Findings",
                description: "Summarize deviations and inefficiencies; propose process changes with expected impact",
                expected_output: Some("Process audit report"),
            },
        ],
    )
}
