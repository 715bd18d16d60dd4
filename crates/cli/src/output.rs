use engine_config::config::RunConfig;
use model::{events::TransferEvent, execution::result::MultiTaskTransferResult};

/// Render one pipeline event. Message and task events already reach the
/// console through the log subscriber, so only write-phase progress is
/// printed here.
pub fn print_event(event: &TransferEvent) {
    if let TransferEvent::Progress {
        total_records,
        processed_records,
    } = event
    {
        println!("  ... {processed_records}/{total_records} records");
    }
}

pub fn print_summary(result: &MultiTaskTransferResult) {
    println!();
    println!("Run summary");
    println!("-----------------------------");
    println!(
        "{:<18} {}",
        "Outcome",
        if result.is_success { "success" } else { "failed" }
    );
    println!(
        "{:<18} {}/{}",
        "Tasks completed", result.completed_tasks, result.total_tasks
    );
    println!(
        "{:<18} {}",
        "Records processed", result.total_records_processed
    );
    println!("{:<18} {:.2}s", "Duration", result.duration.as_secs_f64());

    if let Some(message) = &result.error_message {
        println!("{:<18} {}", "Run error", message);
    }

    let failed = result.failed_tasks();
    if !failed.is_empty() {
        println!();
        println!("Failed tasks:");
        for task in failed {
            println!(
                "  - {}: {}",
                task.task_name,
                task.error_message.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

pub fn print_tasks(config: &RunConfig) {
    println!("{} configured task(s):", config.tasks.len());
    for task in &config.tasks {
        let destination = task
            .destination_server_key
            .as_deref()
            .unwrap_or("default destination");
        let transform = if task.enable_transform {
            "transform on"
        } else {
            "transform off"
        };
        println!(
            "  - {} -> {} ({destination}, {transform})",
            task.name, task.destination_table
        );
    }
}
