//! Quality audit framework

use crate::template::{StepBlueprint, Template};

pub fn quality_audit() -> Template {
    Template::new(
        "quality_audit",
        "Assess whether outputs and processes meet defined quality criteria",
        &[
            r"\b(quality|defect|bug|reliab)",
            r"\b(test coverage|review|inspection)",
            r"\b(metric|criteria|benchmark)",
        ],
        vec![
            StepBlueprint {
                kind: "planning",
                name: "Plan Quality Audit",
                description: "Define quality criteria and acceptance thresholds for {task}; select the artifacts to audit",
                expected_output: Some("Quality criteria and audit sample"),
            },
            StepBlueprint {
                kind: "information_gathering",
                name: "Collect Quality Data",
                description: "Gather defect records, test results, review notes, and process metrics for the audited artifacts",
                expected_output: Some("Quality data set"),
            },
            StepBlueprint {
                kind: "testing_and_evaluation",
                name: "Evaluate Against Criteria",
                description: "Score each artifact against the criteria; verify that quality gates were applied as defined",
                expected_output: Some("Scored evaluation matrix"),
            },
            StepBlueprint {
                kind: "analysis_and_reporting",
                name: "Report Quality Findings",
                description: "Identify systemic quality issues and their root causes; recommend process improvements",
                expected_output: Some("Quality audit report with improvement actions"),
            },
        ],
    )
}
