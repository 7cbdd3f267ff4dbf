//! IT general controls audit framework

use crate::template::{StepBlueprint, Template};

pub fn it_audit() -> Template {
    Template::new(
        "it_audit",
        "Evaluate IT systems, infrastructure, and general controls",
        &[
            r"\b(infrastructure|server|database|deploy)",
            r"\b(backup|recovery|availability|uptime)",
            r"\b(change management|configuration|patch)",
        ],
        vec![
            StepBlueprint {
                kind: "planning",
                name: "Plan IT Audit",
                description: "Inventory the systems supporting {task}; define control objectives for availability, integrity, and change management",
                expected_output: Some("System inventory and control objectives"),
            },
            StepBlueprint {
                kind: "information_gathering",
                name: "Collect IT Evidence",
                description: "Gather configuration baselines, change tickets, backup logs, and monitoring data",
                expected_output: Some("IT evidence package"),
            },
            StepBlueprint {
                kind: "testing_and_evaluation",
                name: "Test IT Controls",
                description: "Verify change approvals, test restore procedures, and check patch and configuration compliance",
                expected_output: Some("IT control test results"),
            },
            StepBlueprint {
                kind: "analysis_and_reporting",
                name: "Report IT Findings",
                description: "Rank control deficiencies by operational risk; recommend remediations and monitoring improvements",
                expected_output: Some("IT audit report"),
            },
        ],
    )
}
