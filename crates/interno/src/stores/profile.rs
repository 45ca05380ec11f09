use std::sync::{Arc, Mutex};

use tracing::warn;

use super::gateway::ProfileGateway;
use super::{RefreshState, StoreError};
use crate::domain::{
    Application, InternId, InternProfile, JobId, ProfilePatch, SavedListing, SavedListingId,
};

/// The intern's own profile, submitted applications, and saved listings.
/// The completion percentage is recomputed from the profile on every read.
pub struct InternProfileStore<G> {
    gateway: Arc<G>,
    intern: InternId,
    state: Mutex<ProfileState>,
}

#[derive(Default)]
struct ProfileState {
    profile: Option<InternProfile>,
    applications: Vec<Application>,
    saved: Vec<SavedListing>,
    refresh: RefreshState,
}

impl<G: ProfileGateway> InternProfileStore<G> {
    pub fn new(gateway: Arc<G>, intern: InternId) -> Self {
        Self {
            gateway,
            intern,
            state: Mutex::new(ProfileState::default()),
        }
    }

    pub async fn refresh(&self) -> Result<(), StoreError> {
        let ticket = {
            let mut state = self.state.lock().expect("profile store mutex poisoned");
            state.refresh.begin()
        };

        let outcome = self.gateway.fetch_profile(&self.intern).await;

        let mut state = self.state.lock().expect("profile store mutex poisoned");
        state.refresh.finish();
        match outcome {
            Ok(profile) => {
                if state.refresh.try_apply(ticket) {
                    state.profile = Some(profile);
                }
                Ok(())
            }
            Err(err) => {
                warn!(intern = %self.intern.0, error = %err, "profile refresh failed");
                Err(err.into())
            }
        }
    }

    /// Merge changes through the backend and keep the confirmed record.
    pub async fn update_profile(&self, patch: ProfilePatch) -> Result<InternProfile, StoreError> {
        let profile = self.gateway.update_profile(&self.intern, &patch).await?;
        let mut state = self.state.lock().expect("profile store mutex poisoned");
        state.profile = Some(profile.clone());
        Ok(profile)
    }

    /// Record an application the serving side already accepted. Pure local
    /// bookkeeping; the id was issued by the backend.
    pub fn add_application(&self, application: Application) {
        let mut state = self.state.lock().expect("profile store mutex poisoned");
        match state
            .applications
            .iter()
            .position(|existing| existing.id == application.id)
        {
            Some(index) => state.applications[index] = application,
            None => state.applications.push(application),
        }
    }

    pub async fn save_listing(&self, job: &JobId) -> Result<SavedListing, StoreError> {
        let saved = self.gateway.save_listing(&self.intern, job).await?;
        let mut state = self.state.lock().expect("profile store mutex poisoned");
        if !state.saved.iter().any(|existing| existing.id == saved.id) {
            state.saved.push(saved.clone());
        }
        Ok(saved)
    }

    pub async fn remove_saved(&self, id: &SavedListingId) -> Result<(), StoreError> {
        self.gateway.remove_saved(&self.intern, id).await?;
        let mut state = self.state.lock().expect("profile store mutex poisoned");
        state.saved.retain(|existing| &existing.id != id);
        Ok(())
    }

    /// Derived completion percentage; zero until a profile has been loaded.
    pub fn completion(&self) -> u8 {
        let state = self.state.lock().expect("profile store mutex poisoned");
        state
            .profile
            .as_ref()
            .map(InternProfile::completion)
            .unwrap_or(0)
    }

    pub fn profile(&self) -> Option<InternProfile> {
        let state = self.state.lock().expect("profile store mutex poisoned");
        state.profile.clone()
    }

    pub fn applications(&self) -> Vec<Application> {
        let state = self.state.lock().expect("profile store mutex poisoned");
        state.applications.clone()
    }

    pub fn saved(&self) -> Vec<SavedListing> {
        let state = self.state.lock().expect("profile store mutex poisoned");
        state.saved.clone()
    }

    pub fn is_loading(&self) -> bool {
        let state = self.state.lock().expect("profile store mutex poisoned");
        state.refresh.is_loading()
    }
}
