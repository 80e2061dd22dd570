//! Completion polling for asynchronous remote jobs.
//!
//! Encoding and manifest jobs run remotely; the service exposes no push
//! channel besides webhooks, so completion is observed by polling the
//! status endpoint. [`await_completion`] is the single polling primitive:
//! sleep, fetch, repeat until the first terminal observation.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use vodforge_models::TaskStatus;

use crate::error::{ClientError, ClientResult};

/// Polling behaviour for [`await_completion`].
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Base interval between status fetches. The poller never sleeps less
    /// than this.
    pub interval: Duration,
    /// Multiplier applied to the sleep after each non-terminal
    /// observation. `1.0` keeps the interval fixed.
    pub backoff: f64,
    /// Upper bound for the backed-off sleep.
    pub max_interval: Duration,
    /// Overall deadline; `None` polls until a terminal state is observed.
    pub deadline: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            backoff: 1.0,
            max_interval: Duration::from_secs(60),
            deadline: None,
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration) -> Self {
        Self { interval, ..Default::default() }
    }

    /// Enable exponential backoff; values below 1.0 are clamped.
    pub fn with_backoff(mut self, backoff: f64) -> Self {
        self.backoff = backoff.max(1.0);
        self
    }

    pub fn with_max_interval(mut self, max_interval: Duration) -> Self {
        self.max_interval = max_interval;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sleep before the fetch with the given attempt number.
    fn sleep_for_attempt(&self, attempt: u32) -> Duration {
        if self.backoff <= 1.0 {
            return self.interval;
        }
        let secs = self.interval.as_secs_f64() * self.backoff.powi(attempt as i32);
        let capped = secs.min(self.max_interval.as_secs_f64());
        Duration::from_secs_f64(capped).max(self.interval)
    }
}

/// Wait for a remote job to reach a terminal state.
///
/// Sleeps the configured interval, fetches the status, and repeats until
/// the first FINISHED or ERROR observation, which is returned as-is.
/// Interpreting an ERROR terminal state, surfacing its task messages and
/// failing the operation, is the caller's responsibility.
///
/// A configured deadline is checked before each sleep; a sleep that would
/// overrun it fails with [`ClientError::DeadlineExceeded`]. Cancelling the
/// token aborts the wait with [`ClientError::Cancelled`].
pub async fn await_completion<F, Fut>(
    mut fetch_status: F,
    config: &PollConfig,
    cancel: &CancellationToken,
) -> ClientResult<TaskStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<TaskStatus>>,
{
    let started = tokio::time::Instant::now();
    let mut attempt = 0u32;

    loop {
        let sleep = config.sleep_for_attempt(attempt);
        if let Some(deadline) = config.deadline {
            if started.elapsed() + sleep > deadline {
                return Err(ClientError::DeadlineExceeded(deadline));
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            _ = tokio::time::sleep(sleep) => {}
        }

        let task = fetch_status().await?;
        debug!(status = %task.status, progress = ?task.progress, "job status");

        if task.status.is_terminal() {
            return Ok(task);
        }
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use vodforge_models::{JobStatus, MessageLevel, TaskMessage};

    use super::*;

    fn status(job_status: JobStatus) -> TaskStatus {
        TaskStatus { status: job_status, progress: None, messages: Vec::new() }
    }

    #[test]
    fn test_sleep_never_below_interval() {
        let fixed = PollConfig::default();
        assert_eq!(fixed.sleep_for_attempt(0), Duration::from_secs(5));
        assert_eq!(fixed.sleep_for_attempt(9), Duration::from_secs(5));

        let backed_off = PollConfig::default().with_backoff(2.0);
        assert_eq!(backed_off.sleep_for_attempt(0), Duration::from_secs(5));
        assert_eq!(backed_off.sleep_for_attempt(1), Duration::from_secs(10));
        assert_eq!(backed_off.sleep_for_attempt(2), Duration::from_secs(20));
        // Capped at max_interval
        assert_eq!(backed_off.sleep_for_attempt(10), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_first_terminal_observation() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let task = await_completion(
            || {
                let counter = Arc::clone(&counter);
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    Ok(status(if n < 2 { JobStatus::Running } else { JobStatus::Finished }))
                }
            },
            &PollConfig::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(task.status, JobStatus::Finished);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_terminal_state_stops_polling_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let task = await_completion(
            || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(TaskStatus {
                        status: JobStatus::Error,
                        progress: Some(10),
                        messages: vec![TaskMessage {
                            level: MessageLevel::Error,
                            text: "input not readable".into(),
                        }],
                    })
                }
            },
            &PollConfig::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(task.status, JobStatus::Error);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // The caller observes the extracted error messages
        assert_eq!(task.error_messages(), vec!["input not readable"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_is_honored() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result = await_completion(
            || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(status(JobStatus::Running))
                }
            },
            &PollConfig::default().with_deadline(Duration::from_secs(12)),
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(result, Err(ClientError::DeadlineExceeded(_))));
        // Fetches at t=5 and t=10; the third sleep would overrun
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_aborts_before_fetching() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = await_completion(
            || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(status(JobStatus::Running))
                }
            },
            &PollConfig::default(),
            &cancel,
        )
        .await;

        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_errors_propagate() {
        let result: ClientResult<TaskStatus> = await_completion(
            || async { Err(ClientError::Api { status: 404, detail: "gone".into() }) },
            &PollConfig::default(),
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(result, Err(ClientError::Api { status: 404, .. })));
    }
}
