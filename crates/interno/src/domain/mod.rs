//! Passive entity definitions shared between the remote access layer, the
//! state stores, and consumers. Records are immutable by convention; an
//! update replaces the record wholesale rather than mutating it in place.

mod application;
mod ids;
mod job;
mod profile;
mod user;

pub use application::{
    Application, ApplicationDetail, ApplicationDraft, ApplicationPatch, ApplicationStatus,
    InternSnapshot, Interview, InterviewKind, InterviewPatch, InterviewStatus, JobSnapshot,
    NewInterview,
};
pub use ids::{
    ApplicationId, CompanyId, InternId, InterviewId, JobId, SavedListingId, UserId,
};
pub use job::{Company, Job, JobKind, JobPatch, JobStatus, Listing, NewJob};
pub use profile::{InternProfile, ProfilePatch, SavedListing, PROFILE_FIELD_SLOTS};
pub use user::{User, UserRole};
