use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Args;

use interno::domain::{
    Application, ApplicationDetail, ApplicationDraft, ApplicationId, ApplicationPatch,
    ApplicationStatus, CompanyId, InternId, InternProfile, Interview, InterviewId, InterviewKind,
    InterviewPatch, Job, JobId, JobPatch, JobStatus, Listing, NewInterview, NewJob, ProfilePatch,
    SavedListing, SavedListingId,
};
use interno::remote::ApiError;
use interno::stores::{
    ApplicationGateway, ApplicationStore, InternProfileStore, JobGateway, JobStore, ListingGateway,
    ListingStore, ProfileGateway,
};

use crate::error::AppError;
use crate::infra::{BoardError, BoardStore};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Search phrase used for the listing search showcase
    #[arg(long, default_value = "remote")]
    pub(crate) query: String,
}

/// Gateway adapter that runs the client stores against an in-process board,
/// so the demo exercises the same code paths as a deployed pairing.
struct LocalBoard {
    board: Arc<BoardStore>,
}

fn remote_error(err: BoardError) -> ApiError {
    let status = match &err {
        BoardError::NotFound { .. } => 404,
        BoardError::DuplicateApplication => 409,
        BoardError::Invalid(_) => 422,
    };
    ApiError::Status {
        status,
        message: err.to_string(),
    }
}

impl JobGateway for LocalBoard {
    async fn list_jobs(&self, company: &CompanyId) -> Result<Vec<Job>, ApiError> {
        Ok(self.board.jobs_for(company))
    }

    async fn create_job(&self, draft: &NewJob) -> Result<Job, ApiError> {
        Ok(self.board.create_job(draft.clone()))
    }

    async fn update_job(&self, id: &JobId, patch: &JobPatch) -> Result<Job, ApiError> {
        self.board.update_job(id, patch).map_err(remote_error)
    }

    async fn delete_job(&self, id: &JobId) -> Result<(), ApiError> {
        self.board.delete_job(id).map_err(remote_error)
    }
}

impl ListingGateway for LocalBoard {
    async fn list_listings(&self) -> Result<Vec<Listing>, ApiError> {
        Ok(self.board.listings())
    }

    async fn submit_application(
        &self,
        job: &JobId,
        draft: &ApplicationDraft,
    ) -> Result<Application, ApiError> {
        self.board
            .submit_application(job, draft)
            .map_err(remote_error)
    }
}

impl ApplicationGateway for LocalBoard {
    async fn list_company_applications(
        &self,
        company: &CompanyId,
    ) -> Result<Vec<ApplicationDetail>, ApiError> {
        Ok(self.board.company_applications(company))
    }

    async fn update_application(
        &self,
        id: &ApplicationId,
        patch: &ApplicationPatch,
    ) -> Result<Application, ApiError> {
        self.board.update_application(id, patch).map_err(remote_error)
    }

    async fn delete_application(&self, id: &ApplicationId) -> Result<(), ApiError> {
        self.board.delete_application(id).map_err(remote_error)
    }

    async fn schedule_interview(&self, draft: &NewInterview) -> Result<Interview, ApiError> {
        self.board
            .create_interview(
                &draft.application_id,
                draft.scheduled_at,
                draft.duration_minutes,
                draft.kind,
            )
            .map_err(remote_error)
    }

    async fn update_interview(
        &self,
        id: &InterviewId,
        patch: &InterviewPatch,
    ) -> Result<Interview, ApiError> {
        self.board.update_interview(id, patch).map_err(remote_error)
    }
}

impl ProfileGateway for LocalBoard {
    async fn fetch_profile(&self, intern: &InternId) -> Result<InternProfile, ApiError> {
        self.board.profile(intern).map_err(remote_error)
    }

    async fn update_profile(
        &self,
        intern: &InternId,
        patch: &ProfilePatch,
    ) -> Result<InternProfile, ApiError> {
        self.board.update_profile(intern, patch).map_err(remote_error)
    }

    async fn save_listing(
        &self,
        intern: &InternId,
        job: &JobId,
    ) -> Result<SavedListing, ApiError> {
        self.board.save_listing(intern, job).map_err(remote_error)
    }

    async fn remove_saved(&self, intern: &InternId, id: &SavedListingId) -> Result<(), ApiError> {
        self.board.remove_saved(intern, id).map_err(remote_error)
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let board = Arc::new(BoardStore::default());
    let seeded = board.seed();
    let gateway = Arc::new(LocalBoard { board });

    println!("Interno board demo");

    let listings = ListingStore::new(gateway.clone());
    listings.refresh().await?;
    println!("\n{} open listings", listings.listings().len());
    println!("Search '{}':", args.query);
    for hit in listings.search(&args.query) {
        println!(
            "  - {} at {} ({}, {})",
            hit.job.title,
            hit.company_name,
            hit.job.location,
            hit.job.kind.label()
        );
    }

    let profile_store = InternProfileStore::new(gateway.clone(), seeded.intern.clone());
    profile_store.refresh().await?;
    println!("\nIntern profile completion: {}%", profile_store.completion());
    profile_store
        .update_profile(ProfilePatch {
            graduation_year: Some("2027".to_string()),
            bio: Some("Systems-minded intern".to_string()),
            resume_url: Some("/uploads/upl-000001-resume.pdf".to_string()),
            portfolio_url: Some("https://mira.dev".to_string()),
            ..ProfilePatch::default()
        })
        .await?;
    println!(
        "After filling the remaining fields: {}%",
        profile_store.completion()
    );

    let Some(first_listing) = listings.listings().first().cloned() else {
        println!("\nNo open listings to apply to; demo ends here.");
        return Ok(());
    };
    let application = listings
        .apply(
            &first_listing.job.id,
            ApplicationDraft {
                intern_id: seeded.intern.clone(),
                resume_url: "/uploads/upl-000001-resume.pdf".to_string(),
                cover_letter: "I would like to join".to_string(),
            },
        )
        .await?;
    profile_store.add_application(application.clone());
    println!(
        "\nApplied to '{}' as {}",
        first_listing.job.title, application.id.0
    );

    let applications = ApplicationStore::new(gateway.clone(), seeded.company.clone());
    applications.refresh().await?;
    applications
        .update(
            &application.id,
            ApplicationPatch {
                status: Some(ApplicationStatus::Shortlisted),
            },
        )
        .await?;
    let interview = applications
        .schedule_interview(NewInterview {
            application_id: application.id.clone(),
            scheduled_at: Utc::now() + Duration::days(3),
            duration_minutes: 45,
            kind: InterviewKind::Video,
        })
        .await?;
    println!(
        "Shortlisted and scheduled a {} interview ({})",
        interview.kind.label(),
        interview.id.0
    );

    println!("\nCompany pipeline:");
    for entry in applications.status_breakdown() {
        println!("  - {}: {}", entry.status_label, entry.count);
    }

    let jobs = JobStore::new(gateway, seeded.company);
    jobs.refresh().await?;
    println!("\nCompany postings:");
    for job in jobs.jobs() {
        println!(
            "  - {} [{}] {} views",
            job.title,
            job.status.label(),
            job.views
        );
    }
    for status in JobStatus::ordered() {
        let count = jobs
            .jobs()
            .iter()
            .filter(|job| job.status == status)
            .count();
        if count > 0 {
            println!("  {}: {}", status.label(), count);
        }
    }

    Ok(())
}
