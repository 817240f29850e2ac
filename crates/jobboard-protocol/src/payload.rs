//! Payload line codec.
//!
//! Fields are separated by `|`. Within a field a backslash starts an escape:
//! `\|` is a literal pipe, `\\` a literal backslash, `\n` a newline and `\r`
//! a carriage return. Payloads without backslashes decode exactly like a
//! plain split on `|`, which keeps older clients working, while encoded
//! payloads can carry pipes and multi-line resumes on a single wire line.

use thiserror::Error;

/// Separator between payload fields.
pub const FIELD_SEPARATOR: char = '|';

const ESCAPE: char = '\\';

/// Number of fields in a job posting payload.
pub const JOB_POSTING_FIELDS: usize = 6;

/// Number of fields in an application payload.
pub const APPLICATION_FIELDS: usize = 3;

/// Errors raised while decoding a payload line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The payload carried the wrong number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Fields required by the command.
        expected: usize,
        /// Fields present in the payload.
        found: usize,
    },
    /// A backslash was followed by an unsupported character.
    #[error("unsupported escape sequence '\\{0}'")]
    UnknownEscape(char),
    /// The payload ended with a lone backslash.
    #[error("payload ends with an unterminated escape")]
    DanglingEscape,
    /// A required identifier was blank.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// A field echoed back in listings contained a line break.
    #[error("{0} must not contain line breaks")]
    LineBreak(&'static str),
}

/// Joins fields into a payload line, escaping reserved characters.
#[must_use]
pub fn encode_fields(fields: &[&str]) -> String {
    let mut encoded = String::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            encoded.push(FIELD_SEPARATOR);
        }
        for character in field.chars() {
            match character {
                FIELD_SEPARATOR => encoded.push_str("\\|"),
                ESCAPE => encoded.push_str("\\\\"),
                '\n' => encoded.push_str("\\n"),
                '\r' => encoded.push_str("\\r"),
                other => encoded.push(other),
            }
        }
    }
    encoded
}

/// Splits a payload line into unescaped fields.
///
/// An empty line decodes to a single empty field.
///
/// # Errors
///
/// Returns [`PayloadError::UnknownEscape`] or [`PayloadError::DanglingEscape`]
/// when the line contains a malformed escape sequence.
pub fn decode_fields(line: &str) -> Result<Vec<String>, PayloadError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut characters = line.chars();
    while let Some(character) = characters.next() {
        match character {
            FIELD_SEPARATOR => fields.push(std::mem::take(&mut current)),
            ESCAPE => match characters.next() {
                Some(FIELD_SEPARATOR) => current.push(FIELD_SEPARATOR),
                Some(ESCAPE) => current.push(ESCAPE),
                Some('n') => current.push('\n'),
                Some('r') => current.push('\r'),
                Some(other) => return Err(PayloadError::UnknownEscape(other)),
                None => return Err(PayloadError::DanglingEscape),
            },
            other => current.push(other),
        }
    }
    fields.push(current);
    Ok(fields)
}

/// Rejects line breaks in fields that are echoed one per response line.
fn single_line(field: &'static str, value: String) -> Result<String, PayloadError> {
    if value.contains(['\n', '\r']) {
        return Err(PayloadError::LineBreak(field));
    }
    Ok(value)
}

fn decode_exact<const N: usize>(line: &str) -> Result<[String; N], PayloadError> {
    let fields = decode_fields(line)?;
    let found = fields.len();
    fields
        .try_into()
        .map_err(|_| PayloadError::FieldCount { expected: N, found })
}

/// Fields of a job posting: `title|company|location|description|skills|salary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPostingPayload {
    /// Job title.
    pub title: String,
    /// Hiring company.
    pub company: String,
    /// Job location.
    pub location: String,
    /// Free-text description.
    pub description: String,
    /// Comma-separated skills.
    pub skills: String,
    /// Free-text salary range.
    pub salary: String,
}

impl JobPostingPayload {
    /// Decodes a job posting payload line.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::FieldCount`] unless exactly six fields are
    /// present, an escape error for malformed escapes, or
    /// [`PayloadError::LineBreak`] when a field decodes to more than one
    /// line.
    pub fn parse(line: &str) -> Result<Self, PayloadError> {
        let [title, company, location, description, skills, salary] =
            decode_exact::<JOB_POSTING_FIELDS>(line)?;
        Ok(Self {
            title: single_line("title", title)?,
            company: single_line("company", company)?,
            location: single_line("location", location)?,
            description: single_line("description", description)?,
            skills: single_line("skills", skills)?,
            salary: single_line("salary", salary)?,
        })
    }

    /// Encodes the payload as a single wire line.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_fields(&[
            self.title.as_str(),
            self.company.as_str(),
            self.location.as_str(),
            self.description.as_str(),
            self.skills.as_str(),
            self.salary.as_str(),
        ])
    }
}

/// Fields of an application: `jobId|jobSeekerId|resume`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationPayload {
    /// Posting being applied to.
    pub job_id: String,
    /// Applicant identity; empty when the applicant is anonymous.
    pub job_seeker_id: String,
    /// Resume text or base64-encoded document.
    pub resume: String,
}

impl ApplicationPayload {
    /// Decodes an application payload line.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::FieldCount`] unless exactly three fields are
    /// present, an escape error for malformed escapes, or
    /// [`PayloadError::LineBreak`] when the job or job-seeker ID spans
    /// several lines. The resume may span several lines; it is never echoed.
    pub fn parse(line: &str) -> Result<Self, PayloadError> {
        let [job_id, job_seeker_id, resume] = decode_exact::<APPLICATION_FIELDS>(line)?;
        Ok(Self {
            job_id: single_line("job ID", job_id)?,
            job_seeker_id: single_line("job seeker ID", job_seeker_id)?,
            resume,
        })
    }

    /// Encodes the payload as a single wire line.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_fields(&[self.job_id.as_str(), self.job_seeker_id.as_str(), self.resume.as_str()])
    }
}

/// Extracts the bare application ID carried by accept and reject payloads.
///
/// # Errors
///
/// Returns [`PayloadError::Empty`] when the line is blank.
pub fn parse_application_id(line: &str) -> Result<&str, PayloadError> {
    let id = line.trim();
    if id.is_empty() {
        return Err(PayloadError::Empty("application ID"));
    }
    Ok(id)
}
