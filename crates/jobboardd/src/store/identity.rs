//! Applicant identity resolution.
//!
//! The protocol carries no authentication. Applicants may embed an ID in the
//! application payload; anonymous applicants receive a synthetic one. All of
//! that policy lives behind [`IdentityResolver`] so an authenticated identity
//! source can replace it without touching the store.

use uuid::Uuid;

use super::model::JobSeekerId;

/// Prefix of synthesised job-seeker identifiers.
pub const SYNTHETIC_PREFIX: &str = "JS";

const SYNTHETIC_SUFFIX_LEN: usize = 8;

/// Maps the identity supplied with an application onto a job-seeker ID.
pub trait IdentityResolver: Send + Sync {
    /// Resolves the caller-supplied identity, which may be empty.
    fn resolve(&self, supplied: &str) -> JobSeekerId;
}

/// Keeps caller-supplied IDs and synthesises `JS<8 hex digits>` otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticIdentityResolver;

impl IdentityResolver for SyntheticIdentityResolver {
    fn resolve(&self, supplied: &str) -> JobSeekerId {
        let supplied = supplied.trim();
        if !supplied.is_empty() {
            return JobSeekerId::new(supplied);
        }
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(SYNTHETIC_SUFFIX_LEN)
            .collect();
        JobSeekerId::new(format!("{SYNTHETIC_PREFIX}{suffix}"))
    }
}
