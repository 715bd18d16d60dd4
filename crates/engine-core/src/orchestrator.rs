use crate::{
    error::PipelineError, factory::DestinationProvider, runner::TaskRunner, sink::EventSink,
    transform::RowTransform,
};
use connectors::source::DataSource;
use engine_config::{config::RunConfig, mask::mask_password};
use model::execution::result::MultiTaskTransferResult;
use std::{sync::Arc, time::Instant};

/// Label used for log lines that belong to the run itself rather than to
/// one task.
const RUN_LABEL: &str = "pipeline";

pub struct OrchestratorParams {
    pub config: Arc<RunConfig>,
    pub source: Arc<dyn DataSource>,
    pub destinations: Arc<dyn DestinationProvider>,
    pub transform: Arc<dyn RowTransform>,
    pub sink: EventSink,
}

/// Drives one run over the configured task list: strictly sequential,
/// continue-on-error, aggregating per-task results into one run result.
pub struct PipelineOrchestrator {
    config: Arc<RunConfig>,
    runner: TaskRunner,
    sink: EventSink,
}

impl PipelineOrchestrator {
    pub fn new(params: OrchestratorParams) -> Self {
        let runner = TaskRunner::new(
            params.source,
            params.destinations,
            params.transform,
            params.config.clone(),
            params.sink.clone(),
        );
        PipelineOrchestrator {
            config: params.config,
            runner,
            sink: params.sink,
        }
    }

    /// Execute every task in order. One task's failure never skips the
    /// tasks after it; only a failure outside task scope aborts the run.
    pub async fn run(&self) -> MultiTaskTransferResult {
        let started = Instant::now();
        let mut run_result = MultiTaskTransferResult {
            total_tasks: self.config.tasks.len(),
            ..Default::default()
        };

        match self.execute(&mut run_result).await {
            Ok(()) => {
                run_result.is_success = run_result.task_results.iter().all(|r| r.is_success);
            }
            Err(PipelineError::RunFatal(message)) => {
                self.sink
                    .warning(RUN_LABEL, format!("run aborted: {message}"));
                run_result.is_success = false;
                run_result.error_message = Some(message);
            }
        }

        run_result.duration = started.elapsed();
        self.sink.message(
            RUN_LABEL,
            format!(
                "run finished: {}/{} tasks, {} records, {:.2}s",
                run_result.completed_tasks,
                run_result.total_tasks,
                run_result.total_records_processed,
                run_result.duration.as_secs_f64()
            ),
        );
        run_result
    }

    async fn execute(
        &self,
        run_result: &mut MultiTaskTransferResult,
    ) -> Result<(), PipelineError> {
        self.config
            .validate()
            .map_err(|e| PipelineError::RunFatal(e.to_string()))?;

        let total_tasks = self.config.tasks.len();
        self.sink.message(
            RUN_LABEL,
            format!(
                "starting {total_tasks} transfer task(s), batch size {}",
                self.config.batch_size
            ),
        );
        if self.config.use_mock_source {
            self.sink.message(RUN_LABEL, "source: mock connector");
        } else {
            self.sink.message(
                RUN_LABEL,
                format!(
                    "source: {}",
                    mask_password(&self.config.source_connection_string)
                ),
            );
        }

        for task in &self.config.tasks {
            let result = self.runner.run_task(task).await;
            run_result.completed_tasks += 1;
            run_result.total_records_processed += result.processed_records;
            self.sink.task_progress(
                &task.name,
                run_result.completed_tasks,
                total_tasks,
                result.is_success,
            );
            run_result.task_results.push(result);
        }

        Ok(())
    }
}
