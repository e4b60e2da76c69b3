//! Jobs and the tasks they are compiled into.

use crate::command::Command;
use crate::settings::JobSettings;
use chrono::{DateTime, Utc};
use renderforge_common::{JobId, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a job is in the compilation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Submitted, not compiled yet.
    Received,
    /// The render format passed validation.
    Validated,
    /// The render output path template was resolved.
    PathResolved,
    /// The frame selection was split into chunks.
    Chunked,
    /// One task per chunk was authored.
    TasksAuthored,
    /// All tasks were handed to the job.
    Emitted,
    /// Compilation failed; the job has no tasks.
    Rejected,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Received => write!(f, "received"),
            Self::Validated => write!(f, "validated"),
            Self::PathResolved => write!(f, "path_resolved"),
            Self::Chunked => write!(f, "chunked"),
            Self::TasksAuthored => write!(f, "tasks_authored"),
            Self::Emitted => write!(f, "emitted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// One unit of distributable work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Capability a worker needs to run this task.
    pub worker_type: String,
    pub command: Command,
}

/// A submitted render job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub created: DateTime<Utc>,
    pub settings: JobSettings,
    status: JobStatus,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Job {
    /// Create a job created now.
    pub fn new(name: impl Into<String>, settings: JobSettings) -> Self {
        Self {
            id: JobId::new(),
            name: name.into(),
            created: Utc::now(),
            settings,
            status: JobStatus::Received,
            tasks: Vec::new(),
        }
    }

    /// Override the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: JobStatus) {
        tracing::debug!("Job {} {} -> {}", self.id, self.status, status);
        self.status = status;
    }

    /// Tasks authored for this job, in emission order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append an authored task.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }
}
