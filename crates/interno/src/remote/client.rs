use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::ApiError;
use crate::config::RemoteConfig;
use crate::domain::{
    Application, ApplicationDetail, ApplicationDraft, ApplicationId, ApplicationPatch, CompanyId,
    InternId, InternProfile, Interview, InterviewId, InterviewPatch, Job, JobId, JobPatch, Listing,
    NewInterview, NewJob, ProfilePatch, SavedListing, SavedListingId, User,
};
use crate::stores::{ApplicationGateway, JobGateway, ListingGateway, ProfileGateway};

/// Response of the upload collaborator: the stored location of the blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub url: String,
}

/// Thin typed client over a shared `reqwest::Client`. Verb helpers are
/// private; the public surface is the endpoint methods backing the store
/// gateway traits.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current session identity, if the backend recognizes the cookie.
    pub async fn fetch_session(&self) -> Result<Option<User>, ApiError> {
        match self.get_json::<User>("/api/v1/session").await {
            Ok(user) => Ok(Some(user)),
            Err(err) if err.status() == Some(404) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Upload a resume or logo blob. The backend enforces the 5 MiB ceiling
    /// and answers with the stored URL; only that string is kept.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadReceipt, ApiError> {
        debug!(filename, size = bytes.len(), "POST /api/v1/uploads");
        let response = self
            .http
            .post(self.url("/api/v1/uploads"))
            .query(&[("filename", filename)])
            .body(bytes)
            .send()
            .await?;
        Self::decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "PATCH");
        let response = self.http.patch(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!(status = status.as_u16(), message, "delete rejected");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!(status = status.as_u16(), message, "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ApiError::Decode)
    }
}

impl JobGateway for ApiClient {
    async fn list_jobs(&self, company: &CompanyId) -> Result<Vec<Job>, ApiError> {
        self.get_json(&format!("/api/v1/jobs?company_id={}", company.0))
            .await
    }

    async fn create_job(&self, draft: &NewJob) -> Result<Job, ApiError> {
        self.post_json("/api/v1/jobs", draft).await
    }

    async fn update_job(&self, id: &JobId, patch: &JobPatch) -> Result<Job, ApiError> {
        self.patch_json(&format!("/api/v1/jobs/{}", id.0), patch)
            .await
    }

    async fn delete_job(&self, id: &JobId) -> Result<(), ApiError> {
        self.delete(&format!("/api/v1/jobs/{}", id.0)).await
    }
}

impl ApplicationGateway for ApiClient {
    async fn list_company_applications(
        &self,
        company: &CompanyId,
    ) -> Result<Vec<ApplicationDetail>, ApiError> {
        self.get_json(&format!("/api/v1/applications?company_id={}", company.0))
            .await
    }

    async fn update_application(
        &self,
        id: &ApplicationId,
        patch: &ApplicationPatch,
    ) -> Result<Application, ApiError> {
        self.patch_json(&format!("/api/v1/applications/{}", id.0), patch)
            .await
    }

    async fn delete_application(&self, id: &ApplicationId) -> Result<(), ApiError> {
        self.delete(&format!("/api/v1/applications/{}", id.0)).await
    }

    async fn schedule_interview(&self, draft: &NewInterview) -> Result<Interview, ApiError> {
        self.post_json(
            &format!("/api/v1/applications/{}/interviews", draft.application_id.0),
            draft,
        )
        .await
    }

    async fn update_interview(
        &self,
        id: &InterviewId,
        patch: &InterviewPatch,
    ) -> Result<Interview, ApiError> {
        self.patch_json(&format!("/api/v1/interviews/{}", id.0), patch)
            .await
    }
}

impl ListingGateway for ApiClient {
    async fn list_listings(&self) -> Result<Vec<Listing>, ApiError> {
        self.get_json("/api/v1/listings").await
    }

    async fn submit_application(
        &self,
        job: &JobId,
        draft: &ApplicationDraft,
    ) -> Result<Application, ApiError> {
        self.post_json(&format!("/api/v1/listings/{}/applications", job.0), draft)
            .await
    }
}

impl ProfileGateway for ApiClient {
    async fn fetch_profile(&self, intern: &InternId) -> Result<InternProfile, ApiError> {
        self.get_json(&format!("/api/v1/interns/{}/profile", intern.0))
            .await
    }

    async fn update_profile(
        &self,
        intern: &InternId,
        patch: &ProfilePatch,
    ) -> Result<InternProfile, ApiError> {
        self.patch_json(&format!("/api/v1/interns/{}/profile", intern.0), patch)
            .await
    }

    async fn save_listing(
        &self,
        intern: &InternId,
        job: &JobId,
    ) -> Result<SavedListing, ApiError> {
        self.post_json(
            &format!("/api/v1/interns/{}/saved", intern.0),
            &json!({ "job_id": job }),
        )
        .await
    }

    async fn remove_saved(&self, intern: &InternId, id: &SavedListingId) -> Result<(), ApiError> {
        self.delete(&format!("/api/v1/interns/{}/saved/{}", intern.0, id.0))
            .await
    }
}
