use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{CompanyId, JobId};

/// A hiring company as exposed to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub industry: String,
    pub size: String,
    pub website: Option<String>,
    pub contact_email: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    FullTime,
    PartTime,
    Remote,
    Hybrid,
}

impl JobKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
        }
    }
}

/// Posting lifecycle. Transitions are driven by the company through the
/// serving side; the stores never advance a status on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Closed,
    Draft,
    Paused,
}

impl JobStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Active, Self::Closed, Self::Draft, Self::Paused]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Closed => "Closed",
            Self::Draft => "Draft",
            Self::Paused => "Paused",
        }
    }
}

/// An internship posting owned by a company. `views` only ever grows and is
/// advanced exclusively by the serving side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub company_id: CompanyId,
    pub title: String,
    pub kind: JobKind,
    pub location: String,
    pub monthly_salary: u32,
    pub duration_weeks: u8,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub status: JobStatus,
    pub views: u32,
}

/// Public-facing entry: the posting joined with its company's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub job: Job,
    pub company_name: String,
}

impl Listing {
    /// Case-insensitive substring match over the searchable fields. The
    /// needle is expected to be lowercased already.
    pub fn matches(&self, needle: &str) -> bool {
        self.job.title.to_lowercase().contains(needle)
            || self.company_name.to_lowercase().contains(needle)
            || self.job.location.to_lowercase().contains(needle)
            || self.job.kind.label().to_lowercase().contains(needle)
    }
}

/// Payload for creating a posting. The id and view counter are issued by the
/// serving side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    pub company_id: CompanyId,
    pub title: String,
    pub kind: JobKind,
    pub location: String,
    pub monthly_salary: u32,
    pub duration_weeks: u8,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub status: JobStatus,
}

/// Partial update for a posting. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPatch {
    pub title: Option<String>,
    pub kind: Option<JobKind>,
    pub location: Option<String>,
    pub monthly_salary: Option<u32>,
    pub duration_weeks: Option<u8>,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub description: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub status: Option<JobStatus>,
}

impl JobPatch {
    pub fn merged(&self, job: &Job) -> Job {
        let mut next = job.clone();
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(kind) = self.kind {
            next.kind = kind;
        }
        if let Some(location) = &self.location {
            next.location = location.clone();
        }
        if let Some(salary) = self.monthly_salary {
            next.monthly_salary = salary;
        }
        if let Some(weeks) = self.duration_weeks {
            next.duration_weeks = weeks;
        }
        if let Some(start) = self.start_date {
            next.start_date = start;
        }
        if let Some(deadline) = self.deadline {
            next.deadline = deadline;
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(responsibilities) = &self.responsibilities {
            next.responsibilities = responsibilities.clone();
        }
        if let Some(requirements) = &self.requirements {
            next.requirements = requirements.clone();
        }
        if let Some(benefits) = &self.benefits {
            next.benefits = benefits.clone();
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        next
    }
}
