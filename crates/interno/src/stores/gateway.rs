#![allow(async_fn_in_trait)]

//! Remote seams of the stores. [`crate::remote::ApiClient`] implements all
//! four traits; tests substitute in-memory fakes so the stores can be
//! exercised in isolation.

use crate::domain::{
    Application, ApplicationDetail, ApplicationDraft, ApplicationId, ApplicationPatch, CompanyId,
    InternId, InternProfile, Interview, InterviewId, InterviewPatch, Job, JobId, JobPatch, Listing,
    NewInterview, NewJob, ProfilePatch, SavedListing, SavedListingId,
};
use crate::remote::ApiError;

pub trait JobGateway: Send + Sync {
    async fn list_jobs(&self, company: &CompanyId) -> Result<Vec<Job>, ApiError>;
    async fn create_job(&self, draft: &NewJob) -> Result<Job, ApiError>;
    async fn update_job(&self, id: &JobId, patch: &JobPatch) -> Result<Job, ApiError>;
    async fn delete_job(&self, id: &JobId) -> Result<(), ApiError>;
}

pub trait ApplicationGateway: Send + Sync {
    async fn list_company_applications(
        &self,
        company: &CompanyId,
    ) -> Result<Vec<ApplicationDetail>, ApiError>;
    async fn update_application(
        &self,
        id: &ApplicationId,
        patch: &ApplicationPatch,
    ) -> Result<Application, ApiError>;
    async fn delete_application(&self, id: &ApplicationId) -> Result<(), ApiError>;
    async fn schedule_interview(&self, draft: &NewInterview) -> Result<Interview, ApiError>;
    async fn update_interview(
        &self,
        id: &InterviewId,
        patch: &InterviewPatch,
    ) -> Result<Interview, ApiError>;
}

pub trait ListingGateway: Send + Sync {
    async fn list_listings(&self) -> Result<Vec<Listing>, ApiError>;
    async fn submit_application(
        &self,
        job: &JobId,
        draft: &ApplicationDraft,
    ) -> Result<Application, ApiError>;
}

pub trait ProfileGateway: Send + Sync {
    async fn fetch_profile(&self, intern: &InternId) -> Result<InternProfile, ApiError>;
    async fn update_profile(
        &self,
        intern: &InternId,
        patch: &ProfilePatch,
    ) -> Result<InternProfile, ApiError>;
    async fn save_listing(&self, intern: &InternId, job: &JobId)
        -> Result<SavedListing, ApiError>;
    async fn remove_saved(&self, intern: &InternId, id: &SavedListingId) -> Result<(), ApiError>;
}
