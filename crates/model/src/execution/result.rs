use serde::Serialize;
use std::time::Duration;

/// Outcome of a single transfer task. Created when the task starts, updated
/// as batches commit, and frozen once the task succeeds or fails.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransferResult {
    pub task_name: String,
    pub is_success: bool,
    pub total_records: usize,
    pub processed_records: usize,
    pub duration: Duration,
    pub error_message: Option<String>,
}

impl TransferResult {
    pub fn started(task_name: &str) -> Self {
        TransferResult {
            task_name: task_name.to_string(),
            is_success: false,
            total_records: 0,
            processed_records: 0,
            duration: Duration::ZERO,
            error_message: None,
        }
    }
}

/// Aggregate outcome of one run over the whole task list.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct MultiTaskTransferResult {
    pub is_success: bool,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_records_processed: usize,
    pub duration: Duration,
    pub error_message: Option<String>,
    pub task_results: Vec<TransferResult>,
}

impl MultiTaskTransferResult {
    pub fn failed_tasks(&self) -> Vec<&TransferResult> {
        self.task_results.iter().filter(|r| !r.is_success).collect()
    }
}
