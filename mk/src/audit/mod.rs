//! Audit framework templates
//!
//! Professional audit methodologies rendered as four-phase checklists:
//! planning, information gathering, testing and evaluation, analysis and
//! reporting. Same compiled-in registration scheme as the mental models.

use std::sync::Arc;

use crate::template::Provider;

mod compliance_audit;
mod financial_audit;
mod it_audit;
mod process_audit;
mod quality_audit;
mod security_audit;

pub use compliance_audit::compliance_audit;
pub use financial_audit::financial_audit;
pub use it_audit::it_audit;
pub use process_audit::process_audit;
pub use quality_audit::quality_audit;
pub use security_audit::security_audit;

/// Audit phase kinds, in methodology order
pub const PHASES: [&str; 4] = [
    "planning",
    "information_gathering",
    "testing_and_evaluation",
    "analysis_and_reporting",
];

/// All built-in audit frameworks, in registration order
pub fn all() -> Vec<Arc<dyn Provider>> {
    vec![
        Arc::new(security_audit()),
        Arc::new(compliance_audit()),
        Arc::new(quality_audit()),
        Arc::new(process_audit()),
        Arc::new(financial_audit()),
        Arc::new(it_audit()),
    ]
}
