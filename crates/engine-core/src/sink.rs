use model::events::TransferEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Injected event/log capability. Every emission is mirrored to `tracing`
/// and, when a channel is attached, forwarded to the consumer in emit order
/// (the channel is unbounded, so ordering is exactly emission order and
/// progress stays monotonic per task).
#[derive(Clone, Default)]
pub struct EventSink {
    tx: Option<UnboundedSender<TransferEvent>>,
}

impl EventSink {
    /// Sink wired to a channel; the receiver side belongs to the caller.
    pub fn channel() -> (Self, UnboundedReceiver<TransferEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EventSink { tx: Some(tx) }, rx)
    }

    /// Sink that only logs, for callers without an event consumer.
    pub fn log_only() -> Self {
        EventSink { tx: None }
    }

    pub fn message(&self, task_name: &str, text: impl Into<String>) {
        let text = text.into();
        info!("[{task_name}] {text}");
        self.send(TransferEvent::Message {
            task_name: task_name.to_string(),
            text,
        });
    }

    pub fn warning(&self, task_name: &str, text: impl Into<String>) {
        let text = text.into();
        warn!("[{task_name}] {text}");
        self.send(TransferEvent::Message {
            task_name: task_name.to_string(),
            text,
        });
    }

    pub fn progress(&self, total_records: usize, processed_records: usize) {
        debug!("progress: {processed_records}/{total_records} records");
        self.send(TransferEvent::Progress {
            total_records,
            processed_records,
        });
    }

    pub fn task_progress(
        &self,
        task_name: &str,
        completed_tasks: usize,
        total_tasks: usize,
        task_succeeded: bool,
    ) {
        let event = TransferEvent::TaskProgress {
            task_name: task_name.to_string(),
            completed_tasks,
            total_tasks,
            task_succeeded,
        };
        info!("{event}");
        self.send(event);
    }

    fn send(&self, event: TransferEvent) {
        if let Some(tx) = &self.tx {
            // A dropped receiver only means nobody is listening anymore.
            let _ = tx.send(event);
        }
    }
}
