use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ApplicationId, CompanyId, InternId, InterviewId, JobId};
use super::job::JobKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Shortlisted,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Submitted,
            Self::UnderReview,
            Self::Shortlisted,
            Self::Accepted,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under Review",
            Self::Shortlisted => "Shortlisted",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }
}

/// The link entity between an intern and a posting, carrying the submission
/// materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub company_id: CompanyId,
    pub intern_id: InternId,
    pub resume_url: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Posting summary nested inside a fetched application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub id: JobId,
    pub title: String,
    pub location: String,
    pub kind: JobKind,
}

/// Applicant summary nested inside a fetched application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternSnapshot {
    pub id: InternId,
    pub full_name: String,
    pub university: String,
    pub email: String,
}

/// The shape returned by the company applications fetch: the application
/// plus the posting and applicant it links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDetail {
    pub application: Application,
    pub job: JobSnapshot,
    pub intern: InternSnapshot,
}

/// Submission payload. The id, company, status, and timestamp are filled in
/// by the serving side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub intern_id: InternId,
    pub resume_url: String,
    pub cover_letter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPatch {
    pub status: Option<ApplicationStatus>,
}

impl ApplicationPatch {
    pub fn merged(&self, application: &Application) -> Application {
        let mut next = application.clone();
        if let Some(status) = self.status {
            next.status = status;
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewKind {
    Phone,
    Video,
    OnSite,
}

impl InterviewKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::Video => "Video",
            Self::OnSite => "On-site",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub application_id: ApplicationId,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u16,
    pub kind: InterviewKind,
    pub status: InterviewStatus,
}

/// Payload for scheduling an interview; the id is issued by the serving side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInterview {
    pub application_id: ApplicationId,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u16,
    pub kind: InterviewKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewPatch {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u16>,
    pub kind: Option<InterviewKind>,
    pub status: Option<InterviewStatus>,
}

impl InterviewPatch {
    pub fn merged(&self, interview: &Interview) -> Interview {
        let mut next = interview.clone();
        if let Some(at) = self.scheduled_at {
            next.scheduled_at = at;
        }
        if let Some(minutes) = self.duration_minutes {
            next.duration_minutes = minutes;
        }
        if let Some(kind) = self.kind {
            next.kind = kind;
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        next
    }
}
