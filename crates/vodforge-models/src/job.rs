//! Remote job status and task messages.
//!
//! A submitted encoding or manifest job is tracked by a [`JobHandle`] and
//! observed through [`TaskStatus`] snapshots until it reaches a terminal
//! state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a remote encoding or manifest job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Job accepted, waiting for capacity
    #[default]
    Queued,
    /// Job is being executed
    Running,
    /// Job completed successfully
    Finished,
    /// Job ended in an error state
    Error,
}

impl JobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::Running => "RUNNING",
            JobStatus::Finished => "FINISHED",
            JobStatus::Error => "ERROR",
        }
    }

    /// Check if this is a terminal state. Polling must stop at the first
    /// terminal observation; no further transitions happen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which remote job family a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Encoding,
    Manifest,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Encoding => "encoding",
            JobKind::Manifest => "manifest",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handle to one submitted unit of remote work. Created once per
/// submission, polled until terminal, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JobHandle {
    /// Remote job identifier
    pub job_id: String,
    /// Job family
    pub kind: JobKind,
}

impl JobHandle {
    pub fn encoding(job_id: impl Into<String>) -> Self {
        Self { job_id: job_id.into(), kind: JobKind::Encoding }
    }

    pub fn manifest(job_id: impl Into<String>) -> Self {
        Self { job_id: job_id.into(), kind: JobKind::Manifest }
    }
}

/// Severity of a message attached to a remote task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// A log message attached to a remote task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskMessage {
    /// Message severity
    #[serde(rename = "type")]
    pub level: MessageLevel,
    /// Message text
    pub text: String,
}

/// Snapshot of a remote job as returned by a status poll.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaskStatus {
    /// Current status
    pub status: JobStatus,
    /// Progress percentage (0-100), when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    /// Message log attached to the task
    #[serde(default)]
    pub messages: Vec<TaskMessage>,
}

impl TaskStatus {
    /// ERROR-severity message texts, in their original order.
    ///
    /// Presentation only: callers decide whether the job as a whole
    /// failed from [`TaskStatus::status`].
    pub fn error_messages(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.level == MessageLevel::Error)
            .map(|m| m.text.as_str())
            .collect()
    }
}
