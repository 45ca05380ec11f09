use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::warn;

use super::gateway::ApplicationGateway;
use super::{RefreshState, StoreError};
use crate::domain::{
    Application, ApplicationDetail, ApplicationId, ApplicationPatch, ApplicationStatus, CompanyId,
    Interview, InterviewId, InterviewPatch, InterviewStatus, NewInterview,
};

/// One row of the hiring-pipeline breakdown, in declared status order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StatusBreakdownEntry {
    pub status: ApplicationStatus,
    pub status_label: String,
    pub count: usize,
}

/// Company-scoped applications with their nested job and intern snapshots,
/// plus the interviews attached to them. Removing an application cascades
/// to its interviews both locally and on the serving side.
pub struct ApplicationStore<G> {
    gateway: Arc<G>,
    company: CompanyId,
    state: Mutex<ApplicationState>,
}

#[derive(Default)]
struct ApplicationState {
    records: Vec<ApplicationDetail>,
    interviews: Vec<Interview>,
    refresh: RefreshState,
}

impl<G: ApplicationGateway> ApplicationStore<G> {
    pub fn new(gateway: Arc<G>, company: CompanyId) -> Self {
        Self {
            gateway,
            company,
            state: Mutex::new(ApplicationState::default()),
        }
    }

    /// Fetch the company's applications. Interviews whose application is no
    /// longer present are pruned so the cascade invariant holds across
    /// refreshes. A failed fetch keeps the previous collection.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let ticket = {
            let mut state = self.state.lock().expect("application store mutex poisoned");
            state.refresh.begin()
        };

        let outcome = self.gateway.list_company_applications(&self.company).await;

        let mut state = self.state.lock().expect("application store mutex poisoned");
        state.refresh.finish();
        match outcome {
            Ok(records) => {
                if state.refresh.try_apply(ticket) {
                    state.records = records;
                    let live: HashSet<ApplicationId> = state
                        .records
                        .iter()
                        .map(|record| record.application.id.clone())
                        .collect();
                    state
                        .interviews
                        .retain(|interview| live.contains(&interview.application_id));
                }
                Ok(())
            }
            Err(err) => {
                warn!(company = %self.company.0, error = %err, "application refresh failed");
                Err(err.into())
            }
        }
    }

    /// Two-phase update: the patch is applied locally first, then confirmed
    /// against the backend. On success the server record replaces the
    /// optimistic one; on failure the original is restored and the error
    /// surfaces to the caller.
    pub async fn update(
        &self,
        id: &ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<Application, StoreError> {
        let original = {
            let mut state = self.state.lock().expect("application store mutex poisoned");
            let record = state
                .records
                .iter_mut()
                .find(|record| &record.application.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    entity: "application",
                    id: id.0.clone(),
                })?;
            let original = record.application.clone();
            record.application = patch.merged(&original);
            original
        };

        match self.gateway.update_application(id, &patch).await {
            Ok(confirmed) => {
                self.write_back(id, confirmed.clone());
                Ok(confirmed)
            }
            Err(err) => {
                self.write_back(id, original);
                Err(err.into())
            }
        }
    }

    /// Delete the application and every interview that references it.
    pub async fn remove(&self, id: &ApplicationId) -> Result<(), StoreError> {
        self.gateway.delete_application(id).await?;
        let mut state = self.state.lock().expect("application store mutex poisoned");
        state.records.retain(|record| &record.application.id != id);
        state
            .interviews
            .retain(|interview| &interview.application_id != id);
        Ok(())
    }

    pub async fn schedule_interview(&self, draft: NewInterview) -> Result<Interview, StoreError> {
        {
            let state = self.state.lock().expect("application store mutex poisoned");
            if !state
                .records
                .iter()
                .any(|record| record.application.id == draft.application_id)
            {
                return Err(StoreError::NotFound {
                    entity: "application",
                    id: draft.application_id.0.clone(),
                });
            }
        }

        let interview = self.gateway.schedule_interview(&draft).await?;
        let mut state = self.state.lock().expect("application store mutex poisoned");
        state.interviews.push(interview.clone());
        Ok(interview)
    }

    pub async fn update_interview(
        &self,
        id: &InterviewId,
        patch: InterviewPatch,
    ) -> Result<Interview, StoreError> {
        let interview = self.gateway.update_interview(id, &patch).await?;
        let mut state = self.state.lock().expect("application store mutex poisoned");
        match state
            .interviews
            .iter()
            .position(|existing| &existing.id == id)
        {
            Some(index) => state.interviews[index] = interview.clone(),
            None => state.interviews.push(interview.clone()),
        }
        Ok(interview)
    }

    /// Local lookup only; never issues a network call.
    pub fn get(&self, id: &ApplicationId) -> Option<ApplicationDetail> {
        let state = self.state.lock().expect("application store mutex poisoned");
        state
            .records
            .iter()
            .find(|record| &record.application.id == id)
            .cloned()
    }

    pub fn applications(&self) -> Vec<ApplicationDetail> {
        let state = self.state.lock().expect("application store mutex poisoned");
        state.records.clone()
    }

    pub fn interviews_for(&self, id: &ApplicationId) -> Vec<Interview> {
        let state = self.state.lock().expect("application store mutex poisoned");
        state
            .interviews
            .iter()
            .filter(|interview| &interview.application_id == id)
            .cloned()
            .collect()
    }

    /// Pipeline counts per status, in declared order, for the dashboard.
    pub fn status_breakdown(&self) -> Vec<StatusBreakdownEntry> {
        let state = self.state.lock().expect("application store mutex poisoned");
        ApplicationStatus::ordered()
            .into_iter()
            .map(|status| StatusBreakdownEntry {
                status,
                status_label: status.label().to_string(),
                count: state
                    .records
                    .iter()
                    .filter(|record| record.application.status == status)
                    .count(),
            })
            .collect()
    }

    /// Interviews still ahead of `now`, soonest first.
    pub fn upcoming_interviews(&self, now: DateTime<Utc>) -> Vec<Interview> {
        let state = self.state.lock().expect("application store mutex poisoned");
        let mut upcoming: Vec<Interview> = state
            .interviews
            .iter()
            .filter(|interview| {
                interview.status == InterviewStatus::Scheduled && interview.scheduled_at >= now
            })
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
        upcoming
    }

    pub fn is_loading(&self) -> bool {
        let state = self.state.lock().expect("application store mutex poisoned");
        state.refresh.is_loading()
    }

    fn write_back(&self, id: &ApplicationId, application: Application) {
        let mut state = self.state.lock().expect("application store mutex poisoned");
        if let Some(record) = state
            .records
            .iter_mut()
            .find(|record| &record.application.id == id)
        {
            record.application = application;
        }
    }
}
