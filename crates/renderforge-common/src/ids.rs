//! Typed identifiers for jobs and tasks.
//!
//! Jobs get a random UUID at submission. Task IDs are derived from the frame
//! chunk a task renders, so they stay readable in scheduler logs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a submitted render job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a new random job ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for JobId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<JobId> for Uuid {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an authored task, unique within its job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Build the ID of the render task covering `chunk`, e.g. `render-1-10`.
    pub fn for_render_chunk(chunk: impl std::fmt::Display) -> Self {
        Self(format!("render-{chunk}"))
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_unique() {
        let id1 = JobId::new();
        let id2 = JobId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_job_id_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let id = JobId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_task_id_embeds_chunk() {
        assert_eq!(TaskId::for_render_chunk("1-10").as_str(), "render-1-10");
        assert_eq!(TaskId::for_render_chunk(47).to_string(), "render-47");
    }

    #[test]
    fn test_task_id_serializes_as_string() {
        let id = TaskId::for_render_chunk("3-4");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"render-3-4\"");
    }
}
