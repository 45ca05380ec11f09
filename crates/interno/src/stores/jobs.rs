use std::sync::{Arc, Mutex};

use tracing::warn;

use super::gateway::JobGateway;
use super::{RefreshState, StoreError};
use crate::domain::{CompanyId, Job, JobId, JobPatch, NewJob};

/// Company-scoped collection of postings. Every mutation goes through the
/// gateway and the collection is reconciled from the server response.
pub struct JobStore<G> {
    gateway: Arc<G>,
    company: CompanyId,
    state: Mutex<JobState>,
}

#[derive(Default)]
struct JobState {
    jobs: Vec<Job>,
    refresh: RefreshState,
}

impl<G: JobGateway> JobStore<G> {
    pub fn new(gateway: Arc<G>, company: CompanyId) -> Self {
        Self {
            gateway,
            company,
            state: Mutex::new(JobState::default()),
        }
    }

    /// Fetch the company's postings and replace the collection. A failed
    /// fetch keeps the previous collection and surfaces the error.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let ticket = {
            let mut state = self.state.lock().expect("job store mutex poisoned");
            state.refresh.begin()
        };

        let outcome = self.gateway.list_jobs(&self.company).await;

        let mut state = self.state.lock().expect("job store mutex poisoned");
        state.refresh.finish();
        match outcome {
            Ok(jobs) => {
                if state.refresh.try_apply(ticket) {
                    state.jobs = jobs;
                }
                Ok(())
            }
            Err(err) => {
                warn!(company = %self.company.0, error = %err, "job refresh failed");
                Err(err.into())
            }
        }
    }

    pub async fn add(&self, draft: NewJob) -> Result<Job, StoreError> {
        let job = self.gateway.create_job(&draft).await?;
        let mut state = self.state.lock().expect("job store mutex poisoned");
        upsert(&mut state.jobs, job.clone());
        Ok(job)
    }

    pub async fn update(&self, id: &JobId, patch: JobPatch) -> Result<Job, StoreError> {
        let job = self.gateway.update_job(id, &patch).await?;
        let mut state = self.state.lock().expect("job store mutex poisoned");
        upsert(&mut state.jobs, job.clone());
        Ok(job)
    }

    pub async fn remove(&self, id: &JobId) -> Result<(), StoreError> {
        self.gateway.delete_job(id).await?;
        let mut state = self.state.lock().expect("job store mutex poisoned");
        state.jobs.retain(|job| &job.id != id);
        Ok(())
    }

    /// Local lookup only; an absent id is `None`, never a fetch.
    pub fn get(&self, id: &JobId) -> Option<Job> {
        let state = self.state.lock().expect("job store mutex poisoned");
        state.jobs.iter().find(|job| &job.id == id).cloned()
    }

    pub fn jobs(&self) -> Vec<Job> {
        let state = self.state.lock().expect("job store mutex poisoned");
        state.jobs.clone()
    }

    pub fn is_loading(&self) -> bool {
        let state = self.state.lock().expect("job store mutex poisoned");
        state.refresh.is_loading()
    }
}

fn upsert(jobs: &mut Vec<Job>, job: Job) {
    match jobs.iter().position(|existing| existing.id == job.id) {
        Some(index) => jobs[index] = job,
        None => jobs.push(job),
    }
}
