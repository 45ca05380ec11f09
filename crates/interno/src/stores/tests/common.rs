use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::{
    Application, ApplicationDetail, ApplicationDraft, ApplicationId, ApplicationPatch,
    ApplicationStatus, CompanyId, InternId, InternProfile, InternSnapshot, Interview, InterviewId,
    InterviewPatch, InterviewStatus, Job, JobId, JobKind, JobPatch, JobSnapshot,
    JobStatus, Listing, NewInterview, NewJob, ProfilePatch, SavedListing, SavedListingId,
};
use crate::remote::ApiError;
use crate::stores::{ApplicationGateway, JobGateway, ListingGateway, ProfileGateway};

pub(super) fn company() -> CompanyId {
    CompanyId("co-000001".to_string())
}

pub(super) fn intern() -> InternId {
    InternId("intern-000001".to_string())
}

pub(super) fn moment(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 10, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn job(id: &str, title: &str, kind: JobKind, location: &str) -> Job {
    Job {
        id: JobId(id.to_string()),
        company_id: company(),
        title: title.to_string(),
        kind,
        location: location.to_string(),
        monthly_salary: 1400,
        duration_weeks: 12,
        start_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        deadline: NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date"),
        description: "Build board features".to_string(),
        responsibilities: vec!["Ship weekly".to_string()],
        requirements: vec!["Rust".to_string()],
        benefits: vec!["Mentorship".to_string()],
        status: JobStatus::Active,
        views: 0,
    }
}

pub(super) fn draft_job(title: &str) -> NewJob {
    NewJob {
        company_id: company(),
        title: title.to_string(),
        kind: JobKind::Remote,
        location: "Berlin".to_string(),
        monthly_salary: 1500,
        duration_weeks: 10,
        start_date: NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"),
        deadline: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        description: "New posting".to_string(),
        responsibilities: Vec::new(),
        requirements: Vec::new(),
        benefits: Vec::new(),
        status: JobStatus::Active,
    }
}

pub(super) fn listing(id: &str, title: &str, company_name: &str, location: &str) -> Listing {
    Listing {
        job: job(id, title, JobKind::Hybrid, location),
        company_name: company_name.to_string(),
    }
}

pub(super) fn detail(id: &str, status: ApplicationStatus) -> ApplicationDetail {
    ApplicationDetail {
        application: Application {
            id: ApplicationId(id.to_string()),
            job_id: JobId("job-000001".to_string()),
            company_id: company(),
            intern_id: intern(),
            resume_url: "/uploads/000001-resume.pdf".to_string(),
            cover_letter: "I would like to join".to_string(),
            status,
            submitted_at: moment(8),
        },
        job: JobSnapshot {
            id: JobId("job-000001".to_string()),
            title: "Backend Intern".to_string(),
            location: "Berlin".to_string(),
            kind: JobKind::Remote,
        },
        intern: InternSnapshot {
            id: intern(),
            full_name: "Mira Okafor".to_string(),
            university: "TU Berlin".to_string(),
            email: "mira@example.org".to_string(),
        },
    }
}

pub(super) fn application_draft() -> ApplicationDraft {
    ApplicationDraft {
        intern_id: intern(),
        resume_url: "/uploads/000001-resume.pdf".to_string(),
        cover_letter: "I would like to join".to_string(),
    }
}

pub(super) fn profile_with_eight_fields() -> InternProfile {
    InternProfile {
        intern_id: intern(),
        first_name: "Mira".to_string(),
        last_name: "Okafor".to_string(),
        email: "mira@example.org".to_string(),
        phone: "+49 30 1234".to_string(),
        location: "Berlin".to_string(),
        university: "TU Berlin".to_string(),
        degree: "BSc".to_string(),
        field_of_study: "Informatics".to_string(),
        graduation_year: String::new(),
        bio: String::new(),
        resume_url: String::new(),
        portfolio_url: String::new(),
        skills: vec!["Rust".to_string()],
    }
}

fn rejected() -> ApiError {
    ApiError::Status {
        status: 503,
        message: "backend offline".to_string(),
    }
}

/// In-memory stand-in for the backend. Counts every gateway call so tests
/// can prove that local reads never touch the network, and can be switched
/// into failure modes per operation family.
#[derive(Default)]
pub(super) struct MemoryGateway {
    pub(super) jobs: Mutex<Vec<Job>>,
    pub(super) details: Mutex<Vec<ApplicationDetail>>,
    pub(super) interviews: Mutex<Vec<Interview>>,
    pub(super) listings: Mutex<Vec<Listing>>,
    pub(super) profile: Mutex<Option<InternProfile>>,
    pub(super) saved: Mutex<Vec<SavedListing>>,
    pub(super) calls: AtomicUsize,
    pub(super) fail_fetches: AtomicBool,
    pub(super) fail_mutations: AtomicBool,
    sequence: AtomicU64,
}

impl MemoryGateway {
    pub(super) fn with_jobs(jobs: Vec<Job>) -> Self {
        let gateway = Self::default();
        *gateway.jobs.lock().expect("jobs mutex poisoned") = jobs;
        gateway
    }

    pub(super) fn with_listings(listings: Vec<Listing>) -> Self {
        let gateway = Self::default();
        *gateway.listings.lock().expect("listings mutex poisoned") = listings;
        gateway
    }

    pub(super) fn with_details(details: Vec<ApplicationDetail>) -> Self {
        let gateway = Self::default();
        *gateway.details.lock().expect("details mutex poisoned") = details;
        gateway
    }

    pub(super) fn with_profile(profile: InternProfile) -> Self {
        let gateway = Self::default();
        *gateway.profile.lock().expect("profile mutex poisoned") = Some(profile);
        gateway
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn next_id(&self, prefix: &str) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{id:06}")
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }

    fn fetch_guard(&self) -> Result<(), ApiError> {
        self.record_call();
        if self.fail_fetches.load(Ordering::Relaxed) {
            return Err(rejected());
        }
        Ok(())
    }

    fn mutation_guard(&self) -> Result<(), ApiError> {
        self.record_call();
        if self.fail_mutations.load(Ordering::Relaxed) {
            return Err(rejected());
        }
        Ok(())
    }
}

impl JobGateway for MemoryGateway {
    async fn list_jobs(&self, company: &CompanyId) -> Result<Vec<Job>, ApiError> {
        self.fetch_guard()?;
        let jobs = self.jobs.lock().expect("jobs mutex poisoned");
        Ok(jobs
            .iter()
            .filter(|job| &job.company_id == company)
            .cloned()
            .collect())
    }

    async fn create_job(&self, draft: &NewJob) -> Result<Job, ApiError> {
        self.mutation_guard()?;
        let job = Job {
            id: JobId(self.next_id("job")),
            company_id: draft.company_id.clone(),
            title: draft.title.clone(),
            kind: draft.kind,
            location: draft.location.clone(),
            monthly_salary: draft.monthly_salary,
            duration_weeks: draft.duration_weeks,
            start_date: draft.start_date,
            deadline: draft.deadline,
            description: draft.description.clone(),
            responsibilities: draft.responsibilities.clone(),
            requirements: draft.requirements.clone(),
            benefits: draft.benefits.clone(),
            status: draft.status,
            views: 0,
        };
        self.jobs
            .lock()
            .expect("jobs mutex poisoned")
            .push(job.clone());
        Ok(job)
    }

    async fn update_job(&self, id: &JobId, patch: &JobPatch) -> Result<Job, ApiError> {
        self.mutation_guard()?;
        let mut jobs = self.jobs.lock().expect("jobs mutex poisoned");
        let job = jobs
            .iter_mut()
            .find(|job| &job.id == id)
            .ok_or(ApiError::Status {
                status: 404,
                message: "job not found".to_string(),
            })?;
        *job = patch.merged(job);
        Ok(job.clone())
    }

    async fn delete_job(&self, id: &JobId) -> Result<(), ApiError> {
        self.mutation_guard()?;
        let mut jobs = self.jobs.lock().expect("jobs mutex poisoned");
        jobs.retain(|job| &job.id != id);
        Ok(())
    }
}

impl ApplicationGateway for MemoryGateway {
    async fn list_company_applications(
        &self,
        company: &CompanyId,
    ) -> Result<Vec<ApplicationDetail>, ApiError> {
        self.fetch_guard()?;
        let details = self.details.lock().expect("details mutex poisoned");
        Ok(details
            .iter()
            .filter(|detail| &detail.application.company_id == company)
            .cloned()
            .collect())
    }

    async fn update_application(
        &self,
        id: &ApplicationId,
        patch: &ApplicationPatch,
    ) -> Result<Application, ApiError> {
        self.mutation_guard()?;
        let mut details = self.details.lock().expect("details mutex poisoned");
        let detail = details
            .iter_mut()
            .find(|detail| &detail.application.id == id)
            .ok_or(ApiError::Status {
                status: 404,
                message: "application not found".to_string(),
            })?;
        detail.application = patch.merged(&detail.application);
        Ok(detail.application.clone())
    }

    async fn delete_application(&self, id: &ApplicationId) -> Result<(), ApiError> {
        self.mutation_guard()?;
        let mut details = self.details.lock().expect("details mutex poisoned");
        details.retain(|detail| &detail.application.id != id);
        Ok(())
    }

    async fn schedule_interview(&self, draft: &NewInterview) -> Result<Interview, ApiError> {
        self.mutation_guard()?;
        let interview = Interview {
            id: InterviewId(self.next_id("int")),
            application_id: draft.application_id.clone(),
            scheduled_at: draft.scheduled_at,
            duration_minutes: draft.duration_minutes,
            kind: draft.kind,
            status: InterviewStatus::Scheduled,
        };
        self.interviews
            .lock()
            .expect("interviews mutex poisoned")
            .push(interview.clone());
        Ok(interview)
    }

    async fn update_interview(
        &self,
        id: &InterviewId,
        patch: &InterviewPatch,
    ) -> Result<Interview, ApiError> {
        self.mutation_guard()?;
        let mut interviews = self.interviews.lock().expect("interviews mutex poisoned");
        let interview = interviews
            .iter_mut()
            .find(|interview| &interview.id == id)
            .ok_or(ApiError::Status {
                status: 404,
                message: "interview not found".to_string(),
            })?;
        *interview = patch.merged(interview);
        Ok(interview.clone())
    }
}

impl ListingGateway for MemoryGateway {
    async fn list_listings(&self) -> Result<Vec<Listing>, ApiError> {
        self.fetch_guard()?;
        let listings = self.listings.lock().expect("listings mutex poisoned");
        Ok(listings.clone())
    }

    async fn submit_application(
        &self,
        job: &JobId,
        draft: &ApplicationDraft,
    ) -> Result<Application, ApiError> {
        self.mutation_guard()?;
        Ok(Application {
            id: ApplicationId(self.next_id("app")),
            job_id: job.clone(),
            company_id: company(),
            intern_id: draft.intern_id.clone(),
            resume_url: draft.resume_url.clone(),
            cover_letter: draft.cover_letter.clone(),
            status: ApplicationStatus::Submitted,
            submitted_at: moment(8),
        })
    }
}

impl ProfileGateway for MemoryGateway {
    async fn fetch_profile(&self, _intern: &InternId) -> Result<InternProfile, ApiError> {
        self.fetch_guard()?;
        let profile = self.profile.lock().expect("profile mutex poisoned");
        profile.clone().ok_or(ApiError::Status {
            status: 404,
            message: "profile not found".to_string(),
        })
    }

    async fn update_profile(
        &self,
        _intern: &InternId,
        patch: &ProfilePatch,
    ) -> Result<InternProfile, ApiError> {
        self.mutation_guard()?;
        let mut stored = self.profile.lock().expect("profile mutex poisoned");
        let current = stored.clone().ok_or(ApiError::Status {
            status: 404,
            message: "profile not found".to_string(),
        })?;
        let next = patch.merged(&current);
        *stored = Some(next.clone());
        Ok(next)
    }

    async fn save_listing(
        &self,
        _intern: &InternId,
        job: &JobId,
    ) -> Result<SavedListing, ApiError> {
        self.mutation_guard()?;
        let saved = SavedListing {
            id: SavedListingId(self.next_id("sav")),
            job_id: job.clone(),
            saved_at: moment(10),
        };
        self.saved
            .lock()
            .expect("saved mutex poisoned")
            .push(saved.clone());
        Ok(saved)
    }

    async fn remove_saved(&self, _intern: &InternId, id: &SavedListingId) -> Result<(), ApiError> {
        self.mutation_guard()?;
        let mut saved = self.saved.lock().expect("saved mutex poisoned");
        saved.retain(|existing| &existing.id != id);
        Ok(())
    }
}
