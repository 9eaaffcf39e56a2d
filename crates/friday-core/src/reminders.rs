//! Periodic due-task reminders.
//!
//! Uses tokio-cron-scheduler to run the assistant's due-task check at a
//! fixed interval. Each run posts at most one reminder message.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{debug, info};

use crate::assistant::Assistant;
use crate::config::ReminderConfig;

/// Scheduler for the due-task check.
///
/// Call `start()` to begin periodic execution; the first check runs
/// immediately.
pub struct ReminderScheduler {
    scheduler: JobScheduler,
    assistant: Arc<RwLock<Assistant>>,
    interval: Duration,
}

impl ReminderScheduler {
    /// Create a new ReminderScheduler.
    pub async fn new(
        assistant: Arc<RwLock<Assistant>>,
        config: &ReminderConfig,
    ) -> Result<Self, JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;
        Ok(Self {
            scheduler,
            assistant,
            // Minimum 1 second
            interval: config.interval().max(Duration::from_secs(1)),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        let assistant = self.assistant.clone();

        let job = Job::new_repeated_async(self.interval, move |_uuid, _lock| {
            let assistant = assistant.clone();
            Box::pin(async move {
                debug!("Checking for due tasks");
                run_check(&assistant).await;
            })
        })?;
        self.scheduler.add(job).await?;

        debug!("Running initial due-task check");
        self.run_now().await;

        self.scheduler.start().await?;
        info!(
            interval_secs = self.interval.as_secs(),
            "Reminder scheduler started"
        );
        Ok(())
    }

    /// Run the check outside the schedule. Returns the posted reminder.
    pub async fn run_now(&self) -> Option<String> {
        run_check(&self.assistant).await
    }

    /// Stop the scheduler gracefully.
    pub async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
        info!("Shutting down reminder scheduler");
        self.scheduler.shutdown().await
    }
}

async fn run_check(assistant: &RwLock<Assistant>) -> Option<String> {
    let reminder = assistant.write().await.check_due_tasks();
    if reminder.is_some() {
        info!("Due-task reminder posted");
    }
    reminder
}
