//! Security audit framework

use crate::template::{StepBlueprint, Template};

pub fn security_audit() -> Template {
    Template::new(
        "security_audit",
        "Systematic security audit focusing on threat assessment, vulnerability identification, access controls, and security posture",
        &[
            r"\b(security|threat|attack|vulnerab)",
            r"\b(access control|permission|privilege|auth)",
            r"\b(incident|breach|exploit)",
        ],
        vec![
            StepBlueprint {
                kind: "planning",
                name: "Plan Security Audit",
                description: "Define scope and objectives for {task}; identify critical assets and systems; conduct an initial risk assessment",
                expected_output: Some("Audit scope, asset inventory, and initial risk assessment"),
            },
            StepBlueprint {
                kind: "information_gathering",
                name: "Gather Security Evidence",
                description: "Review security policies; examine network architecture; analyze access control matrices; collect vulnerability scan results; review incident response logs",
                expected_output: Some("Collected security documentation and scan results"),
            },
            StepBlueprint {
                kind: "testing_and_evaluation",
                name: "Test Security Controls",
                description: "Test access controls; evaluate control effectiveness; assess the vulnerability management process; review compliance with security standards",
                expected_output: Some("Control test results and effectiveness ratings"),
            },
            StepBlueprint {
                kind: "analysis_and_reporting",
                name: "Report Security Findings",
                description: "Identify gaps and weaknesses; assess risk levels and impact; develop findings, recommendations, and mitigation strategies",
                expected_output: Some("Security audit report with prioritized findings"),
            },
        ],
    )
}
