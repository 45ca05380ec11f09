//! In-memory state stores, one per entity family. Each store exclusively
//! owns its collection for the lifetime of the enclosing UI subtree,
//! synchronizes it through a gateway trait, and never shares mutable state
//! with another store.

mod applications;
mod gateway;
mod jobs;
mod listings;
mod profile;

#[cfg(test)]
mod tests;

pub use applications::{ApplicationStore, StatusBreakdownEntry};
pub use gateway::{ApplicationGateway, JobGateway, ListingGateway, ProfileGateway};
pub use jobs::JobStore;
pub use listings::ListingStore;
pub use profile::InternProfileStore;

use crate::remote::ApiError;

/// Error surface of every store operation. Mutations never silently no-op;
/// a failure reaches the caller through this enum.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Remote(#[from] ApiError),
    #[error("{entity} {id} is not in the local collection")]
    NotFound { entity: &'static str, id: String },
}

/// Bookkeeping for interleaved refreshes. Tickets are handed out in issue
/// order; a completed response may replace the collection only while its
/// ticket is newer than the last applied one, so a stale earlier-issued
/// response resolving late is discarded (newest-issued wins).
#[derive(Debug, Default)]
pub(crate) struct RefreshState {
    issued: u64,
    applied: u64,
    in_flight: u32,
}

impl RefreshState {
    pub(crate) fn begin(&mut self) -> u64 {
        self.in_flight += 1;
        self.issued += 1;
        self.issued
    }

    pub(crate) fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub(crate) fn try_apply(&mut self, ticket: u64) -> bool {
        if ticket > self.applied {
            self.applied = ticket;
            true
        } else {
            false
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}
