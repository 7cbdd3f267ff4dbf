//! Financial audit framework

use crate::template::{StepBlueprint, Template};

pub fn financial_audit() -> Template {
    Template::new(
        "financial_audit",
        "Verify the accuracy and integrity of financial records and controls",
        &[
            r"\b(financ|budget|cost|spend|revenue)",
            r"\b(invoice|ledger|transaction|account)",
            r"\b(fraud|misstate|reconcil)",
        ],
        vec![
            StepBlueprint {
                kind: "planning",
                name: "Plan Financial Audit",
                description: "Define materiality thresholds and scope for {task}; identify the accounts and periods under audit",
                expected_output: Some("Audit scope with materiality thresholds"),
            },
            StepBlueprint {
                kind: "information_gathering",
                name: "Collect Financial Records",
                description: "Obtain ledgers, statements, invoices, and reconciliations for the audited periods",
                expected_output: Some("Complete record set for sampling"),
            },
            StepBlueprint {
                kind: "testing_and_evaluation",
                name: "Test Transactions",
                description: "Sample and trace transactions to source documents; test reconciliation and approval controls",
                expected_output: Some("Transaction test results"),
            },
            StepBlueprint {
                kind: "analysis_and_reporting",
                name: "Report Financial Findings",
                description: "Quantify misstatements and control weaknesses; prepare the audit opinion and recommendations",
                expected_output: Some("Financial audit report"),
            },
        ],
    )
}
