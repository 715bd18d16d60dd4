use crate::{
    error::TaskError, factory::DestinationProvider, sink::EventSink, transform::RowTransform,
    writer::write_in_batches,
};
use connectors::source::DataSource;
use engine_config::{config::RunConfig, mask::mask_password};
use model::execution::{result::TransferResult, task::TransferTask};
use std::{fmt, sync::Arc, time::Instant};

/// Phase a task is currently in; names the failing stage in log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskStage {
    Init,
    Connecting,
    Reading,
    Transforming,
    EnsuringSchema,
    Writing,
}

impl fmt::Display for TaskStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskStage::Init => "initializing",
            TaskStage::Connecting => "connecting",
            TaskStage::Reading => "reading",
            TaskStage::Transforming => "transforming",
            TaskStage::EnsuringSchema => "ensuring schema",
            TaskStage::Writing => "writing",
        })
    }
}

/// Executes one task end to end. Owns nothing across tasks: the source is
/// shared, but destination connections are opened per task and dropped on
/// every exit path.
pub struct TaskRunner {
    source: Arc<dyn DataSource>,
    destinations: Arc<dyn DestinationProvider>,
    transform: Arc<dyn RowTransform>,
    config: Arc<RunConfig>,
    sink: EventSink,
}

impl TaskRunner {
    pub fn new(
        source: Arc<dyn DataSource>,
        destinations: Arc<dyn DestinationProvider>,
        transform: Arc<dyn RowTransform>,
        config: Arc<RunConfig>,
        sink: EventSink,
    ) -> Self {
        TaskRunner {
            source,
            destinations,
            transform,
            config,
            sink,
        }
    }

    /// Run a task to completion. All task-scoped errors are caught here and
    /// recorded in the result; they never propagate to sibling tasks.
    pub async fn run_task(&self, task: &TransferTask) -> TransferResult {
        let started = Instant::now();
        let mut result = TransferResult::started(&task.name);
        let mut stage = TaskStage::Init;

        match self.execute(task, &mut result, &mut stage).await {
            Ok(()) => {
                result.is_success = true;
                self.sink.message(
                    &task.name,
                    format!(
                        "task completed: {}/{} records in {:.2}s",
                        result.processed_records,
                        result.total_records,
                        started.elapsed().as_secs_f64()
                    ),
                );
            }
            Err(err) => {
                result.is_success = false;
                result.error_message = Some(err.to_string());
                self.sink
                    .warning(&task.name, format!("task failed while {stage}: {err}"));
            }
        }

        result.duration = started.elapsed();
        result
    }

    async fn execute(
        &self,
        task: &TransferTask,
        result: &mut TransferResult,
        stage: &mut TaskStage,
    ) -> Result<(), TaskError> {
        self.sink.message(&task.name, "starting transfer");

        let choice = self
            .config
            .resolve_destination(task.destination_server_key.as_deref());
        if let Some(profile) = &choice.profile {
            self.sink
                .message(&task.name, format!("using destination profile '{profile}'"));
        } else if choice.fell_back {
            let key = task.destination_server_key.as_deref().unwrap_or_default();
            self.sink.warning(
                &task.name,
                format!(
                    "destination profile '{key}' not found, falling back to the default connection"
                ),
            );
        }
        self.sink.message(
            &task.name,
            format!("destination: {}", mask_password(&choice.connection_string)),
        );

        *stage = TaskStage::Connecting;
        let destination = self.destinations.connect(&choice.connection_string).await?;
        self.sink
            .message(&task.name, "destination connection established");

        *stage = TaskStage::Reading;
        let buffer = self
            .source
            .read_query(&task.source_query, &task.name)
            .await?;
        result.total_records = buffer.row_count();
        self.sink.message(
            &task.name,
            format!("read {} records from the source", result.total_records),
        );

        let buffer = if task.enable_transform {
            *stage = TaskStage::Transforming;
            self.sink.message(
                &task.name,
                format!("applying row transform to {} records", buffer.row_count()),
            );
            self.transform.transform(buffer, &task.name)?
        } else {
            self.sink
                .message(&task.name, "row transform disabled, passing buffer through");
            buffer
        };

        *stage = TaskStage::EnsuringSchema;
        destination
            .ensure_table(&task.destination_table, &buffer.columns)
            .await?;
        self.sink.message(
            &task.name,
            format!("ensured destination table '{}'", task.destination_table),
        );

        *stage = TaskStage::Writing;
        let total = result.total_records;
        let sink = self.sink.clone();
        let task_name = task.name.clone();
        write_in_batches(
            destination.as_ref(),
            &buffer,
            &task.destination_table,
            self.config.batch_size,
            |done| {
                result.processed_records = done;
                sink.progress(total, done);
                sink.message(&task_name, format!("progress: {done}/{total} records"));
            },
        )
        .await?;

        Ok(())
    }
}
