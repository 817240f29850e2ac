//! Entities held by the store.

use std::borrow::Borrow;
use std::fmt;

use jobboard_protocol::{ApplicationStatus, JobPostingPayload};

const JOB_ID_PREFIX: &str = "JOB";
const APPLICATION_ID_PREFIX: &str = "APP";

/// Identifier of a job posting, rendered as `JOB<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub(crate) fn from_sequence(sequence: u64) -> Self {
        Self(format!("{JOB_ID_PREFIX}{sequence}"))
    }

    /// Returns the textual form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for JobId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Identifier of an application, rendered as `APP<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationId(String);

impl ApplicationId {
    pub(crate) fn from_sequence(sequence: u64) -> Self {
        Self(format!("{APPLICATION_ID_PREFIX}{sequence}"))
    }

    /// Returns the textual form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ApplicationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Unauthenticated applicant identity, supplied by the caller or synthesised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobSeekerId(String);

impl JobSeekerId {
    /// Wraps an identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the textual form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobSeekerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Fields supplied when posting a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJobPosting {
    /// Job title.
    pub title: String,
    /// Hiring company.
    pub company: String,
    /// Where the job is based.
    pub location: String,
    /// Free-text description.
    pub description: String,
    /// Required skills, as entered.
    pub skills: String,
    /// Salary range, as entered.
    pub salary: String,
}

impl From<JobPostingPayload> for NewJobPosting {
    fn from(payload: JobPostingPayload) -> Self {
        Self {
            title: payload.title,
            company: payload.company,
            location: payload.location,
            description: payload.description,
            skills: payload.skills,
            salary: payload.salary,
        }
    }
}

/// A job posting. Postings are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    /// Identifier assigned by the store.
    pub id: JobId,
    /// Job title.
    pub title: String,
    /// Hiring company.
    pub company: String,
    /// Where the job is based.
    pub location: String,
    /// Free-text description.
    pub description: String,
    /// Required skills, as entered.
    pub skills: String,
    /// Salary range, as entered.
    pub salary: String,
}

impl JobPosting {
    pub(crate) fn new(id: JobId, posting: NewJobPosting) -> Self {
        Self {
            id,
            title: posting.title,
            company: posting.company,
            location: posting.location,
            description: posting.description,
            skills: posting.skills,
            salary: posting.salary,
        }
    }
}

/// An application to a job posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Identifier assigned by the store.
    pub id: ApplicationId,
    /// Applicant identity.
    pub job_seeker_id: JobSeekerId,
    /// Posting applied to.
    pub job_id: JobId,
    /// Current review status.
    pub status: ApplicationStatus,
    /// Resume text or base64 document, stored verbatim.
    pub resume: String,
}

/// Identifiers assigned when an application is accepted into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationReceipt {
    /// Identifier of the new application.
    pub application_id: ApplicationId,
    /// Identity recorded for the applicant, possibly synthesised.
    pub job_seeker_id: JobSeekerId,
}
