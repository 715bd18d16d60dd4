use serde::Serialize;
use std::fmt;

/// Notification emitted by the transfer pipeline for external consumers
/// (CLI, tests). Events are ephemeral and never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferEvent {
    /// Emitted after each committed batch during a task's write phase.
    /// `processed_records` is strictly increasing within one task.
    Progress {
        total_records: usize,
        processed_records: usize,
    },

    /// Emitted after each task completes, successfully or not.
    TaskProgress {
        task_name: String,
        completed_tasks: usize,
        total_tasks: usize,
        task_succeeded: bool,
    },

    /// Human-readable log line, labeled with the active task.
    Message { task_name: String, text: String },
}

impl fmt::Display for TransferEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferEvent::Progress {
                total_records,
                processed_records,
            } => write!(f, "progress: {processed_records}/{total_records} records"),
            TransferEvent::TaskProgress {
                task_name,
                completed_tasks,
                total_tasks,
                task_succeeded,
            } => {
                let outcome = if *task_succeeded { "ok" } else { "failed" };
                write!(
                    f,
                    "task '{task_name}' {outcome} ({completed_tasks}/{total_tasks})"
                )
            }
            TransferEvent::Message { task_name, text } => write!(f, "[{task_name}] {text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_render_for_humans() {
        let progress = TransferEvent::Progress {
            total_records: 100,
            processed_records: 40,
        };
        assert_eq!(progress.to_string(), "progress: 40/100 records");

        let task = TransferEvent::TaskProgress {
            task_name: "departments".to_string(),
            completed_tasks: 2,
            total_tasks: 3,
            task_succeeded: false,
        };
        assert_eq!(task.to_string(), "task 'departments' failed (2/3)");
    }
}
