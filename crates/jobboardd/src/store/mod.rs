//! Shared in-memory store of job postings and applications.
//!
//! One mutex guards both collections and both ID counters, so every public
//! method is atomic with respect to every other: concurrent creators never
//! share an ID and listings never observe a half-inserted entry. Listings
//! return point-in-time copies in insertion order.

mod errors;
mod identity;
mod model;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use jobboard_protocol::ApplicationStatus;

pub use self::errors::StoreError;
pub use self::identity::{IdentityResolver, SYNTHETIC_PREFIX, SyntheticIdentityResolver};
pub use self::model::{
    Application, ApplicationId, ApplicationReceipt, JobId, JobPosting, JobSeekerId, NewJobPosting,
};

const STORE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::store");

#[derive(Debug)]
struct StoreState {
    postings: Vec<JobPosting>,
    posting_index: HashMap<JobId, usize>,
    applications: Vec<Application>,
    application_index: HashMap<ApplicationId, usize>,
    next_job: u64,
    next_application: u64,
}

impl StoreState {
    fn new() -> Self {
        Self {
            postings: Vec::new(),
            posting_index: HashMap::new(),
            applications: Vec::new(),
            application_index: HashMap::new(),
            next_job: 1,
            next_application: 1,
        }
    }

    fn allocate_job_id(&mut self) -> JobId {
        let id = JobId::from_sequence(self.next_job);
        self.next_job += 1;
        id
    }

    fn allocate_application_id(&mut self) -> ApplicationId {
        let id = ApplicationId::from_sequence(self.next_application);
        self.next_application += 1;
        id
    }

    fn find_job(&self, job_id: &str) -> Option<&JobPosting> {
        let index = *self.posting_index.get(job_id)?;
        self.postings.get(index)
    }

    fn find_application_mut(&mut self, application_id: &str) -> Option<&mut Application> {
        let index = *self.application_index.get(application_id)?;
        self.applications.get_mut(index)
    }
}

/// Authoritative store shared by every connection.
pub struct JobBoardStore {
    state: Mutex<StoreState>,
    identity: Arc<dyn IdentityResolver>,
}

impl std::fmt::Debug for JobBoardStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("JobBoardStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for JobBoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JobBoardStore {
    /// Creates an empty store that synthesises identities for anonymous
    /// applicants.
    pub fn new() -> Self {
        Self::with_identity_resolver(Arc::new(SyntheticIdentityResolver))
    }

    /// Creates an empty store using the given identity policy.
    pub fn with_identity_resolver(identity: Arc<dyn IdentityResolver>) -> Self {
        Self {
            state: Mutex::new(StoreState::new()),
            identity,
        }
    }

    fn with_state<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut StoreState) -> R,
    {
        let mut guard = self.state.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&mut guard))
    }

    /// Inserts a posting under a freshly allocated ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    pub fn create_job_posting(&self, posting: NewJobPosting) -> Result<JobId, StoreError> {
        let id = self.with_state(|state| {
            let id = state.allocate_job_id();
            state.posting_index.insert(id.clone(), state.postings.len());
            state.postings.push(JobPosting::new(id.clone(), posting));
            id
        })?;
        debug!(target: STORE_TARGET, job_id = %id, "job posting created");
        Ok(id)
    }

    /// Inserts a pending application for an existing posting.
    ///
    /// An empty `job_seeker_id` is replaced by the identity resolver.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::JobNotFound`] when `job_id` is unknown, leaving
    /// the store untouched, or [`StoreError::Poisoned`].
    pub fn create_application(
        &self,
        job_id: &str,
        job_seeker_id: &str,
        resume: String,
    ) -> Result<ApplicationReceipt, StoreError> {
        let receipt = self.with_state(|state| -> Result<ApplicationReceipt, StoreError> {
            let Some(posting) = state.find_job(job_id) else {
                return Err(StoreError::JobNotFound {
                    job_id: job_id.to_owned(),
                });
            };
            let job_id = posting.id.clone();
            let job_seeker_id = self.identity.resolve(job_seeker_id);
            let application_id = state.allocate_application_id();
            state
                .application_index
                .insert(application_id.clone(), state.applications.len());
            state.applications.push(Application {
                id: application_id.clone(),
                job_seeker_id: job_seeker_id.clone(),
                job_id,
                status: ApplicationStatus::Pending,
                resume,
            });
            Ok(ApplicationReceipt {
                application_id,
                job_seeker_id,
            })
        })??;
        debug!(
            target: STORE_TARGET,
            application_id = %receipt.application_id,
            job_seeker_id = %receipt.job_seeker_id,
            "application created"
        );
        Ok(receipt)
    }

    /// Overwrites an application's status and returns the previous one.
    ///
    /// Any transition is permitted, including out of a decided status.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ApplicationNotFound`] when the ID is unknown,
    /// leaving the store untouched, or [`StoreError::Poisoned`].
    pub fn update_application_status(
        &self,
        application_id: &str,
        status: ApplicationStatus,
    ) -> Result<ApplicationStatus, StoreError> {
        let previous = self.with_state(|state| -> Result<ApplicationStatus, StoreError> {
            let application = state.find_application_mut(application_id).ok_or_else(|| {
                StoreError::ApplicationNotFound {
                    application_id: application_id.to_owned(),
                }
            })?;
            Ok(std::mem::replace(&mut application.status, status))
        })??;
        if previous.is_decided() && previous != status {
            debug!(
                target: STORE_TARGET,
                application_id,
                from = %previous,
                to = %status,
                "overriding decided application"
            );
        }
        Ok(previous)
    }

    /// Snapshot of every posting in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    pub fn list_job_postings(&self) -> Result<Vec<JobPosting>, StoreError> {
        self.with_state(|state| state.postings.clone())
    }

    /// Snapshot of every application in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    pub fn list_all_applications(&self) -> Result<Vec<Application>, StoreError> {
        self.with_state(|state| state.applications.clone())
    }

    /// Snapshot of the applications whose job-seeker ID equals
    /// `job_seeker_id` exactly, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    pub fn list_applications_for_job_seeker(
        &self,
        job_seeker_id: &str,
    ) -> Result<Vec<Application>, StoreError> {
        self.with_state(|state| {
            state
                .applications
                .iter()
                .filter(|application| application.job_seeker_id.as_str() == job_seeker_id)
                .cloned()
                .collect()
        })
    }
}
