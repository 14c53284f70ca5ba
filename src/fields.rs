//! Fixed vocabularies for status and priority fields.
//!
//! The database stores these as plain text (with CHECK constraints), so
//! every value here must round-trip through its `as_str` form. Stored values
//! that no longer parse must never crash a view: selectors fall back to the
//! first option and displays keep the raw text.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application status of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum JobStatus {
    NotApplied,
    Applied,
    Interviewing,
    Rejected,
    Offer,
}

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        JobStatus::NotApplied,
        JobStatus::Applied,
        JobStatus::Interviewing,
        JobStatus::Rejected,
        JobStatus::Offer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::NotApplied => "Not Applied",
            JobStatus::Applied => "Applied",
            JobStatus::Interviewing => "Interviewing",
            JobStatus::Rejected => "Rejected",
            JobStatus::Offer => "Offer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    /// Editable-selector value for a stored string. Unrecognized values fall
    /// back to the first option instead of erroring.
    pub fn from_stored(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::ALL[0])
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Follow-up task status. `Completed` and `Cancelled` are the closed set
/// excluded from the upcoming-tasks query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum TaskStatus {
    Open,
    InProgress,
    AwaitingFeedback,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Open,
        TaskStatus::InProgress,
        TaskStatus::AwaitingFeedback,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::AwaitingFeedback => "Awaiting Feedback",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn from_stored(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::ALL[0])
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional task priority. Absence is NULL in the database, never a
/// placeholder string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] =
        [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display form for a stored enum-ish value: recognized values print as-is,
/// anything else keeps the raw text with a marker so the mismatch is visible.
pub fn display_stored<T: Copy>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> String {
    if parse(raw).is_some() {
        raw.to_string()
    } else {
        format!("{}?", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_round_trip() {
        for status in JobStatus::ALL {
            assert_eq!(JobStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(JobStatus::parse("applied"), None); // case-sensitive
        assert_eq!(JobStatus::parse("Ghosted"), None);
    }

    #[test]
    fn test_task_status_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn test_priority_round_trip() {
        for prio in TaskPriority::ALL {
            assert_eq!(TaskPriority::parse(prio.as_str()), Some(prio));
        }
        assert_eq!(TaskPriority::parse("---"), None);
    }

    #[test]
    fn test_unrecognized_stored_value_falls_back_to_first_option() {
        assert_eq!(JobStatus::from_stored("Ghosted"), JobStatus::NotApplied);
        assert_eq!(TaskStatus::from_stored("Paused"), TaskStatus::Open);
        assert_eq!(JobStatus::from_stored("Offer"), JobStatus::Offer);
    }

    #[test]
    fn test_display_stored_marks_unknown_values() {
        assert_eq!(display_stored("Applied", JobStatus::parse), "Applied");
        assert_eq!(display_stored("Ghosted", JobStatus::parse), "Ghosted?");
    }
}
