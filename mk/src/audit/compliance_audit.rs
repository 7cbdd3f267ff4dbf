//! Compliance audit framework

use crate::template::{StepBlueprint, Template};

pub fn compliance_audit() -> Template {
    Template::new(
        "compliance_audit",
        "Evaluate adherence to regulations, standards, and internal policies",
        &[
            r"\b(complian|regulat|standard|policy|policies)",
            r"\b(gdpr|hipaa|sox|pci|iso)",
            r"\b(requirement|obligation|mandate)",
        ],
        vec![
            StepBlueprint {
                kind: "planning",
                name: "Plan Compliance Audit",
                description: "Identify the regulations and standards applicable to {task}; define audit scope and the compliance baseline",
                expected_output: Some("Applicable requirement catalog and audit scope"),
            },
            StepBlueprint {
                kind: "information_gathering",
                name: "Collect Compliance Evidence",
                description: "Gather policies, procedures, training records, and prior audit reports; interview process owners",
                expected_output: Some("Evidence inventory mapped to requirements"),
            },
            StepBlueprint {
                kind: "testing_and_evaluation",
                name: "Test Compliance Controls",
                description: "Sample transactions and records; verify controls against each requirement; document deviations",
                expected_output: Some("Requirement-by-requirement conformance results"),
            },
            StepBlueprint {
                kind: "analysis_and_reporting",
                name: "Report Compliance Gaps",
                description: "Classify gaps by severity; recommend remediation with owners and deadlines; prepare the compliance report",
                expected_output: Some("Compliance report with remediation plan"),
            },
        ],
    )
}
