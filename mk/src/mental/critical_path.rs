//! Critical path method template

use crate::template::{StepBlueprint, Template};

pub fn critical_path() -> Template {
    Template::new(
        "critical_path",
        "Identify the critical path and optimize project scheduling",
        &[
            r"\b(task|step|sequence|order|timeline)",
            r"\b(depend|prerequisite|before|after)",
            r"\b(bottleneck|constraint|limit)",
        ],
        vec![
            StepBlueprint {
                kind: "task_breakdown",
                name: "Break Down Tasks",
                description: "Break down {task} into individual tasks and activities",
                expected_output: Some("Detailed task list"),
            },
            StepBlueprint {
                kind: "dependencies",
                name: "Map Dependencies",
                description: "Identify dependencies and prerequisites between tasks",
                expected_output: Some("Dependency map"),
            },
            StepBlueprint {
                kind: "estimation",
                name: "Estimate Duration",
                description: "Estimate time and resources required for each task",
                expected_output: Some("Time and resource estimates"),
            },
            StepBlueprint {
                kind: "critical_path",
                name: "Identify Critical Path",
                description: "Calculate the critical path and identify bottlenecks",
                expected_output: Some("Critical path analysis"),
            },
            StepBlueprint {
                kind: "optimization",
                name: "Optimize Schedule",
                description: "Optimize schedule and resource allocation",
                expected_output: Some("Optimized project schedule"),
            },
            StepBlueprint {
                kind: "monitoring",
                name: "Monitor Progress",
                description: "Track progress and adjust the critical path as needed",
                expected_output: Some("Progress tracking and adjustments"),
            },
        ],
    )
}
