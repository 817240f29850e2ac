//! Renders store snapshots into response bodies.

use std::fmt::Write as _;

use crate::store::{Application, JobPosting};

pub(crate) const NO_JOB_POSTINGS: &str = "No job postings available";
pub(crate) const NO_APPLICATIONS: &str = "No applications available";

pub(crate) fn job_postings(postings: &[JobPosting]) -> String {
    if postings.is_empty() {
        return NO_JOB_POSTINGS.to_owned();
    }
    let mut body = String::from("Available Jobs:\n");
    for posting in postings {
        let _ = writeln!(
            body,
            "ID: {}\nTitle: {}\nCompany: {}\nLocation: {}\nDescription: {}\nSkills: {}\nSalary: {}",
            posting.id,
            posting.title,
            posting.company,
            posting.location,
            posting.description,
            posting.skills,
            posting.salary,
        );
    }
    body
}

pub(crate) fn all_applications(applications: &[Application]) -> String {
    if applications.is_empty() {
        return NO_APPLICATIONS.to_owned();
    }
    application_list("All Applications:", applications)
}

pub(crate) fn job_seeker_applications(job_seeker_id: &str, applications: &[Application]) -> String {
    if applications.is_empty() {
        return format!("No applications found for job seeker ID: {job_seeker_id}");
    }
    application_list("Your Applications:", applications)
}

fn application_list(header: &str, applications: &[Application]) -> String {
    let mut body = format!("{header}\n");
    for application in applications {
        let _ = writeln!(
            body,
            "ID: {}\nJob Seeker ID: {}\nJob Posting ID: {}\nStatus: {}",
            application.id, application.job_seeker_id, application.job_id, application.status,
        );
    }
    body
}
