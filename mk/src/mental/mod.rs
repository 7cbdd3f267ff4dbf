//! Mental model templates for planning enhancement
//!
//! Each module holds one static checklist template. The compiled-in `all()`
//! list is the only way providers enter a registry - there is no runtime
//! plugin discovery.

use std::sync::Arc;

use crate::template::Provider;

mod critical_path;
mod decision_trees;
mod default;
mod design_thinking;
mod first_principles;
mod scenario_planning;
mod swot_analysis;
mod systems_thinking;
mod task_decomposition;

pub use critical_path::critical_path;
pub use decision_trees::decision_trees;
pub use default::default;
pub use design_thinking::design_thinking;
pub use first_principles::first_principles;
pub use scenario_planning::scenario_planning;
pub use swot_analysis::swot_analysis;
pub use systems_thinking::systems_thinking;
pub use task_decomposition::task_decomposition;

/// All built-in mental models, in registration order
pub fn all() -> Vec<Arc<dyn Provider>> {
    vec![
        Arc::new(default()),
        Arc::new(first_principles()),
        Arc::new(systems_thinking()),
        Arc::new(critical_path()),
        Arc::new(decision_trees()),
        Arc::new(design_thinking()),
        Arc::new(swot_analysis()),
        Arc::new(task_decomposition()),
        Arc::new(scenario_planning()),
    ]
}
