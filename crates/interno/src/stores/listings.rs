use std::sync::{Arc, Mutex};

use tracing::warn;

use super::gateway::ListingGateway;
use super::{RefreshState, StoreError};
use crate::domain::{Application, ApplicationDraft, JobId, Listing};

/// Public-facing listing collection. Search is a filtered view; the
/// underlying collection is never reordered or mutated by a query.
pub struct ListingStore<G> {
    gateway: Arc<G>,
    state: Mutex<ListingState>,
}

#[derive(Default)]
struct ListingState {
    listings: Vec<Listing>,
    refresh: RefreshState,
}

impl<G: ListingGateway> ListingStore<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Mutex::new(ListingState::default()),
        }
    }

    pub async fn refresh(&self) -> Result<(), StoreError> {
        let ticket = {
            let mut state = self.state.lock().expect("listing store mutex poisoned");
            state.refresh.begin()
        };

        let outcome = self.gateway.list_listings().await;

        let mut state = self.state.lock().expect("listing store mutex poisoned");
        state.refresh.finish();
        match outcome {
            Ok(listings) => {
                if state.refresh.try_apply(ticket) {
                    state.listings = listings;
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "listing refresh failed");
                Err(err.into())
            }
        }
    }

    /// Case-insensitive substring search over title, company name, location,
    /// and kind. A blank or whitespace query returns the full collection in
    /// original order.
    pub fn search(&self, query: &str) -> Vec<Listing> {
        let needle = query.trim().to_lowercase();
        let state = self.state.lock().expect("listing store mutex poisoned");
        if needle.is_empty() {
            return state.listings.clone();
        }
        state
            .listings
            .iter()
            .filter(|listing| listing.matches(&needle))
            .cloned()
            .collect()
    }

    /// Local lookup only; never issues a network call.
    pub fn get(&self, id: &JobId) -> Option<Listing> {
        let state = self.state.lock().expect("listing store mutex poisoned");
        state
            .listings
            .iter()
            .find(|listing| &listing.job.id == id)
            .cloned()
    }

    /// Submit an application to a listing. Atomic from the caller's view:
    /// an unknown id fails before any network traffic, and a backend
    /// rejection propagates unchanged with nothing recorded locally.
    pub async fn apply(
        &self,
        job: &JobId,
        draft: ApplicationDraft,
    ) -> Result<Application, StoreError> {
        let known = {
            let state = self.state.lock().expect("listing store mutex poisoned");
            state.listings.iter().any(|listing| &listing.job.id == job)
        };
        if !known {
            return Err(StoreError::NotFound {
                entity: "listing",
                id: job.0.clone(),
            });
        }

        let application = self.gateway.submit_application(job, &draft).await?;
        Ok(application)
    }

    pub fn listings(&self) -> Vec<Listing> {
        let state = self.state.lock().expect("listing store mutex poisoned");
        state.listings.clone()
    }

    pub fn is_loading(&self) -> bool {
        let state = self.state.lock().expect("listing store mutex poisoned");
        state.refresh.is_loading()
    }
}
