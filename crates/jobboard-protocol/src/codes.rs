//! Command code table.
//!
//! Codes are partitioned by numeric band: job-seeker actions in the 100s,
//! hiring-manager actions in the 200s, application statuses in the 300s, and
//! server result codes in the 400s. The values are part of the wire contract.

use std::borrow::Cow;
use std::fmt;

/// Initial connection state.
pub const WAITING: i32 = 0;
/// Role selection prompt.
pub const SELECT_ROLE: i32 = 1;
/// Client identifies as a job seeker.
pub const ROLE_JOB_SEEKER: i32 = 10;
/// Client identifies as a hiring manager.
pub const ROLE_HIRING_MANAGER: i32 = 11;

/// List every job posting.
pub const VIEW_JOBS: i32 = 100;
/// Apply to a job posting.
pub const APPLY_TO_JOB: i32 = 101;
/// List the caller's applications.
pub const VIEW_MY_APPLICATIONS: i32 = 102;

/// Create a job posting.
pub const POST_JOB: i32 = 200;
/// List every application.
pub const VIEW_APPLICATIONS: i32 = 201;
/// Mark an application accepted.
pub const ACCEPT_APPLICATION: i32 = 202;
/// Mark an application rejected.
pub const REJECT_APPLICATION: i32 = 203;

/// Application awaiting a decision.
pub const STATUS_PENDING: i32 = 300;
/// Application accepted.
pub const STATUS_ACCEPTED: i32 = 301;
/// Application rejected.
pub const STATUS_REJECTED: i32 = 302;

/// Generic success result.
pub const SUCCESS: i32 = 400;
/// Generic failure result.
pub const FAILURE: i32 = 401;

const JOB_SEEKER_BAND: std::ops::RangeInclusive<i32> = 100..=199;
const HIRING_MANAGER_BAND: std::ops::RangeInclusive<i32> = 200..=299;

const KNOWN_CODES: &[(i32, &str)] = &[
    (WAITING, "WAITING"),
    (SELECT_ROLE, "SELECT_ROLE"),
    (ROLE_JOB_SEEKER, "ROLE_JOB_SEEKER"),
    (ROLE_HIRING_MANAGER, "ROLE_HIRING_MANAGER"),
    (VIEW_JOBS, "SEARCH_JOBS"),
    (APPLY_TO_JOB, "APPLY_TO_JOB"),
    (VIEW_MY_APPLICATIONS, "VIEW_MY_APPLICATIONS"),
    (POST_JOB, "POST_JOB"),
    (VIEW_APPLICATIONS, "VIEW_APPLICATIONS"),
    (ACCEPT_APPLICATION, "ACCEPT_APPLICATION"),
    (REJECT_APPLICATION, "REJECT_APPLICATION"),
    (STATUS_PENDING, "STATUS_PENDING"),
    (STATUS_ACCEPTED, "STATUS_ACCEPTED"),
    (STATUS_REJECTED, "STATUS_REJECTED"),
    (SUCCESS, "RESPONSE_SUCCESS"),
    (FAILURE, "RESPONSE_FAILURE"),
];

/// Commands whose frame carries a payload line.
const PAYLOAD_COMMANDS: &[i32] = &[
    POST_JOB,
    APPLY_TO_JOB,
    ACCEPT_APPLICATION,
    REJECT_APPLICATION,
];

/// Role implied by a command code's band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Codes in the job-seeker band.
    JobSeeker,
    /// Codes in the hiring-manager band.
    HiringManager,
    /// Every other code.
    Other,
}

impl Role {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobSeeker => "job_seeker",
            Self::HiringManager => "hiring_manager",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Classification of a command code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandClass {
    /// Role band the code falls in.
    pub role: Role,
    /// Whether the frame carries a payload line.
    pub requires_payload: bool,
    /// Whether the code appears in the table.
    pub is_known: bool,
}

/// Classifies a command code. Unknown codes are classified, not rejected.
#[must_use]
pub fn classify(code: i32) -> CommandClass {
    let role = if JOB_SEEKER_BAND.contains(&code) {
        Role::JobSeeker
    } else if HIRING_MANAGER_BAND.contains(&code) {
        Role::HiringManager
    } else {
        Role::Other
    };
    CommandClass {
        role,
        requires_payload: PAYLOAD_COMMANDS.contains(&code),
        is_known: KNOWN_CODES.iter().any(|(known, _)| *known == code),
    }
}

/// Symbolic name of a code for diagnostics.
#[must_use]
pub fn name(code: i32) -> Cow<'static, str> {
    KNOWN_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or_else(
            || Cow::Owned(format!("UNKNOWN_COMMAND ({code})")),
            |(_, label)| Cow::Borrowed(*label),
        )
}

/// Operations the server dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Role selection prompt.
    SelectRole,
    /// List every job posting.
    ViewJobs,
    /// Apply to a job posting.
    ApplyToJob,
    /// List the caller's applications.
    ViewMyApplications,
    /// Create a job posting.
    PostJob,
    /// List every application.
    ViewApplications,
    /// Mark an application accepted.
    AcceptApplication,
    /// Mark an application rejected.
    RejectApplication,
}

impl Command {
    /// Maps a wire code onto a dispatchable command.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            SELECT_ROLE => Some(Self::SelectRole),
            VIEW_JOBS => Some(Self::ViewJobs),
            APPLY_TO_JOB => Some(Self::ApplyToJob),
            VIEW_MY_APPLICATIONS => Some(Self::ViewMyApplications),
            POST_JOB => Some(Self::PostJob),
            VIEW_APPLICATIONS => Some(Self::ViewApplications),
            ACCEPT_APPLICATION => Some(Self::AcceptApplication),
            REJECT_APPLICATION => Some(Self::RejectApplication),
            _ => None,
        }
    }

    /// Wire code for the command.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::SelectRole => SELECT_ROLE,
            Self::ViewJobs => VIEW_JOBS,
            Self::ApplyToJob => APPLY_TO_JOB,
            Self::ViewMyApplications => VIEW_MY_APPLICATIONS,
            Self::PostJob => POST_JOB,
            Self::ViewApplications => VIEW_APPLICATIONS,
            Self::AcceptApplication => ACCEPT_APPLICATION,
            Self::RejectApplication => REJECT_APPLICATION,
        }
    }

    /// Whether the command's frame carries a payload line.
    #[must_use]
    pub const fn requires_payload(self) -> bool {
        matches!(
            self,
            Self::PostJob | Self::ApplyToJob | Self::AcceptApplication | Self::RejectApplication
        )
    }
}

/// Codes offered to job seekers.
#[must_use]
pub const fn job_seeker_actions() -> &'static [i32] {
    &[VIEW_JOBS, APPLY_TO_JOB, VIEW_MY_APPLICATIONS]
}

/// Codes offered to hiring managers.
#[must_use]
pub const fn hiring_manager_actions() -> &'static [i32] {
    &[
        POST_JOB,
        VIEW_APPLICATIONS,
        ACCEPT_APPLICATION,
        REJECT_APPLICATION,
    ]
}

/// Lifecycle state of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Accepted by a hiring manager.
    Accepted,
    /// Rejected by a hiring manager.
    Rejected,
}

impl ApplicationStatus {
    /// Wire code for the status.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Accepted => STATUS_ACCEPTED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    /// Maps a status code back onto the enum.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            STATUS_PENDING => Some(Self::Pending),
            STATUS_ACCEPTED => Some(Self::Accepted),
            STATUS_REJECTED => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether a hiring manager has already decided the application.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Human-readable label used in listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
