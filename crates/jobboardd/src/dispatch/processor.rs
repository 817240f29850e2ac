//! Command dispatch table.
//!
//! The processor is stateless apart from a shared handle to the store. It
//! maps command codes onto store operations and renders every outcome,
//! failures included, as response text.

use std::sync::Arc;

use tracing::{debug, warn};

use jobboard_protocol::codes::{self, Command};
use jobboard_protocol::payload::{self, ApplicationPayload, JobPostingPayload};
use jobboard_protocol::{ApplicationStatus, classify};

use crate::store::{JobBoardStore, NewJobPosting};

use super::DISPATCH_TARGET;
use super::errors::CommandError;
use super::format;

pub(crate) const SELECT_ROLE_PROMPT: &str =
    "Please select a role (1 for Job Seeker, 2 for Hiring Manager)";
pub(crate) const MISSING_JOB_SEEKER_ID: &str = "Please provide your job seeker ID";
pub(crate) const STATUS_UPDATED: &str = "Application status updated successfully";

/// Executes commands against the shared store.
#[derive(Debug, Clone)]
pub struct CommandProcessor {
    store: Arc<JobBoardStore>,
}

impl CommandProcessor {
    /// Creates a processor bound to the shared store.
    pub fn new(store: Arc<JobBoardStore>) -> Self {
        Self { store }
    }

    /// Store the processor operates on.
    pub fn store(&self) -> &JobBoardStore {
        &self.store
    }

    /// Whether `code` is followed by a payload line on the wire.
    pub fn requires_payload(&self, code: i32) -> bool {
        classify(code).requires_payload
    }

    /// Handles a command frame without a payload line.
    pub fn process_command(&self, code: i32) -> String {
        log_command(code, false);
        let result = match Command::from_code(code) {
            Some(Command::ViewJobs) => self.view_jobs(),
            Some(Command::ViewApplications) => self.view_applications(),
            Some(Command::ViewMyApplications) => Ok(MISSING_JOB_SEEKER_ID.to_owned()),
            Some(Command::SelectRole) => Ok(SELECT_ROLE_PROMPT.to_owned()),
            _ => Ok(format!("Unknown command: {code}")),
        };
        render(code, result)
    }

    /// Handles a command frame that carried a payload line.
    pub fn process_command_with_data(&self, code: i32, data: &str) -> String {
        log_command(code, true);
        let result = match Command::from_code(code) {
            Some(Command::PostJob) => self.post_job(data),
            Some(Command::ApplyToJob) => self.apply_to_job(data),
            Some(Command::AcceptApplication) => {
                self.update_status(data, ApplicationStatus::Accepted)
            }
            Some(Command::RejectApplication) => {
                self.update_status(data, ApplicationStatus::Rejected)
            }
            Some(Command::ViewMyApplications) => self.view_my_applications(data),
            _ => Ok(format!("Unknown command with data: {code}")),
        };
        render(code, result)
    }

    fn view_jobs(&self) -> Result<String, CommandError> {
        let postings = self.store.list_job_postings()?;
        Ok(format::job_postings(&postings))
    }

    fn view_applications(&self) -> Result<String, CommandError> {
        let applications = self.store.list_all_applications()?;
        Ok(format::all_applications(&applications))
    }

    fn view_my_applications(&self, data: &str) -> Result<String, CommandError> {
        let job_seeker_id = data.trim();
        let applications = self.store.list_applications_for_job_seeker(job_seeker_id)?;
        Ok(format::job_seeker_applications(
            job_seeker_id,
            &applications,
        ))
    }

    fn post_job(&self, data: &str) -> Result<String, CommandError> {
        let posting = JobPostingPayload::parse(data).map_err(CommandError::InvalidJobData)?;
        let job_id = self
            .store
            .create_job_posting(NewJobPosting::from(posting))?;
        Ok(format!("Job posted successfully with ID: {job_id}"))
    }

    fn apply_to_job(&self, data: &str) -> Result<String, CommandError> {
        let ApplicationPayload {
            job_id,
            job_seeker_id,
            resume,
        } = ApplicationPayload::parse(data).map_err(CommandError::InvalidApplicationData)?;
        let receipt = self
            .store
            .create_application(job_id.trim(), &job_seeker_id, resume)?;
        Ok(format!(
            "Application submitted successfully with ID: {}\nJob Seeker ID: {}",
            receipt.application_id, receipt.job_seeker_id
        ))
    }

    fn update_status(
        &self,
        data: &str,
        status: ApplicationStatus,
    ) -> Result<String, CommandError> {
        let application_id =
            payload::parse_application_id(data).map_err(CommandError::InvalidApplicationId)?;
        self.store
            .update_application_status(application_id, status)?;
        Ok(STATUS_UPDATED.to_owned())
    }
}

fn log_command(code: i32, with_data: bool) {
    let class = classify(code);
    debug!(
        target: DISPATCH_TARGET,
        code,
        name = %codes::name(code),
        role = %class.role,
        known = class.is_known,
        with_data,
        "processing command"
    );
}

fn render(code: i32, result: Result<String, CommandError>) -> String {
    result.unwrap_or_else(|error| {
        match &error {
            CommandError::Internal(_) => {
                warn!(target: DISPATCH_TARGET, code, %error, "command failed");
            }
            _ => debug!(target: DISPATCH_TARGET, code, %error, "command rejected"),
        }
        error.response_text()
    })
}
