use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

use interno::domain::{
    Application, ApplicationDetail, ApplicationDraft, ApplicationId, ApplicationPatch,
    ApplicationStatus, Company, CompanyId, InternId, InternProfile, InternSnapshot, Interview,
    InterviewId, InterviewKind, InterviewPatch, InterviewStatus, Job, JobId, JobKind, JobPatch,
    JobSnapshot, JobStatus, Listing, NewJob, ProfilePatch, SavedListing, SavedListingId, User,
    UserId, UserRole,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum BoardError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("an application for this posting already exists")]
    DuplicateApplication,
    #[error("{0}")]
    Invalid(&'static str),
}

/// Ids issued by the seeding pass, so demos and tests can address the
/// sample data without scraping it back out.
pub(crate) struct SeededBoard {
    pub(crate) company: CompanyId,
    pub(crate) intern: InternId,
}

#[derive(Default)]
struct BoardData {
    companies: HashMap<CompanyId, Company>,
    jobs: HashMap<JobId, Job>,
    profiles: HashMap<InternId, InternProfile>,
    applications: HashMap<ApplicationId, Application>,
    interviews: HashMap<InterviewId, Interview>,
    saved: HashMap<InternId, Vec<SavedListing>>,
    session_user: Option<User>,
}

/// In-memory board repository. Every collection lives behind one mutex and
/// every id is issued from one sequence, so cross-entity cascades stay
/// consistent without further coordination.
#[derive(Default)]
pub(crate) struct BoardStore {
    data: Mutex<BoardData>,
    sequence: AtomicU64,
}

impl BoardStore {
    fn next_id(&self, prefix: &str) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{id:06}")
    }

    pub(crate) fn jobs_for(&self, company: &CompanyId) -> Vec<Job> {
        let data = self.data.lock().expect("board mutex poisoned");
        let mut jobs: Vec<Job> = data
            .jobs
            .values()
            .filter(|job| &job.company_id == company)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        jobs
    }

    pub(crate) fn create_job(&self, draft: NewJob) -> Job {
        let job = Job {
            id: JobId(self.next_id("job")),
            company_id: draft.company_id,
            title: draft.title,
            kind: draft.kind,
            location: draft.location,
            monthly_salary: draft.monthly_salary,
            duration_weeks: draft.duration_weeks,
            start_date: draft.start_date,
            deadline: draft.deadline,
            description: draft.description,
            responsibilities: draft.responsibilities,
            requirements: draft.requirements,
            benefits: draft.benefits,
            status: draft.status,
            views: 0,
        };
        let mut data = self.data.lock().expect("board mutex poisoned");
        data.jobs.insert(job.id.clone(), job.clone());
        job
    }

    pub(crate) fn update_job(&self, id: &JobId, patch: &JobPatch) -> Result<Job, BoardError> {
        let mut data = self.data.lock().expect("board mutex poisoned");
        let job = data.jobs.get_mut(id).ok_or_else(|| BoardError::NotFound {
            entity: "job",
            id: id.0.clone(),
        })?;
        *job = patch.merged(job);
        Ok(job.clone())
    }

    /// Remove the posting and everything hanging off it: its applications
    /// and their interviews.
    pub(crate) fn delete_job(&self, id: &JobId) -> Result<(), BoardError> {
        let mut data = self.data.lock().expect("board mutex poisoned");
        if data.jobs.remove(id).is_none() {
            return Err(BoardError::NotFound {
                entity: "job",
                id: id.0.clone(),
            });
        }
        let removed: Vec<ApplicationId> = data
            .applications
            .values()
            .filter(|application| &application.job_id == id)
            .map(|application| application.id.clone())
            .collect();
        for application_id in &removed {
            data.applications.remove(application_id);
        }
        data.interviews
            .retain(|_, interview| !removed.contains(&interview.application_id));
        Ok(())
    }

    /// Public view: active postings joined with their company's name.
    pub(crate) fn listings(&self) -> Vec<Listing> {
        let data = self.data.lock().expect("board mutex poisoned");
        let mut listings: Vec<Listing> = data
            .jobs
            .values()
            .filter(|job| job.status == JobStatus::Active)
            .filter_map(|job| {
                data.companies.get(&job.company_id).map(|company| Listing {
                    job: job.clone(),
                    company_name: company.name.clone(),
                })
            })
            .collect();
        listings.sort_by(|a, b| a.job.id.0.cmp(&b.job.id.0));
        listings
    }

    /// Fetch one listing and count the view.
    pub(crate) fn view_listing(&self, id: &JobId) -> Result<Listing, BoardError> {
        let mut data = self.data.lock().expect("board mutex poisoned");
        let company_name = {
            let job = data.jobs.get(id).ok_or_else(|| BoardError::NotFound {
                entity: "listing",
                id: id.0.clone(),
            })?;
            data.companies
                .get(&job.company_id)
                .map(|company| company.name.clone())
                .ok_or_else(|| BoardError::NotFound {
                    entity: "company",
                    id: job.company_id.0.clone(),
                })?
        };
        let job = data.jobs.get_mut(id).ok_or_else(|| BoardError::NotFound {
            entity: "listing",
            id: id.0.clone(),
        })?;
        job.views += 1;
        Ok(Listing {
            job: job.clone(),
            company_name,
        })
    }

    pub(crate) fn submit_application(
        &self,
        job_id: &JobId,
        draft: &ApplicationDraft,
    ) -> Result<Application, BoardError> {
        let id = ApplicationId(self.next_id("app"));
        let mut data = self.data.lock().expect("board mutex poisoned");
        let job = data.jobs.get(job_id).ok_or_else(|| BoardError::NotFound {
            entity: "listing",
            id: job_id.0.clone(),
        })?;
        if job.status != JobStatus::Active {
            return Err(BoardError::Invalid("posting is not accepting applications"));
        }
        if !data.profiles.contains_key(&draft.intern_id) {
            return Err(BoardError::NotFound {
                entity: "intern",
                id: draft.intern_id.0.clone(),
            });
        }
        if data
            .applications
            .values()
            .any(|existing| &existing.job_id == job_id && existing.intern_id == draft.intern_id)
        {
            return Err(BoardError::DuplicateApplication);
        }

        let application = Application {
            id,
            job_id: job.id.clone(),
            company_id: job.company_id.clone(),
            intern_id: draft.intern_id.clone(),
            resume_url: draft.resume_url.clone(),
            cover_letter: draft.cover_letter.clone(),
            status: ApplicationStatus::Submitted,
            submitted_at: Utc::now(),
        };
        data.applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    pub(crate) fn company_applications(&self, company: &CompanyId) -> Vec<ApplicationDetail> {
        let data = self.data.lock().expect("board mutex poisoned");
        let mut details: Vec<ApplicationDetail> = data
            .applications
            .values()
            .filter(|application| &application.company_id == company)
            .filter_map(|application| {
                let job = data.jobs.get(&application.job_id)?;
                let profile = data.profiles.get(&application.intern_id)?;
                Some(ApplicationDetail {
                    application: application.clone(),
                    job: JobSnapshot {
                        id: job.id.clone(),
                        title: job.title.clone(),
                        location: job.location.clone(),
                        kind: job.kind,
                    },
                    intern: InternSnapshot {
                        id: profile.intern_id.clone(),
                        full_name: format!("{} {}", profile.first_name, profile.last_name),
                        university: profile.university.clone(),
                        email: profile.email.clone(),
                    },
                })
            })
            .collect();
        details.sort_by(|a, b| a.application.id.0.cmp(&b.application.id.0));
        details
    }

    pub(crate) fn update_application(
        &self,
        id: &ApplicationId,
        patch: &ApplicationPatch,
    ) -> Result<Application, BoardError> {
        let mut data = self.data.lock().expect("board mutex poisoned");
        let application = data
            .applications
            .get_mut(id)
            .ok_or_else(|| BoardError::NotFound {
                entity: "application",
                id: id.0.clone(),
            })?;
        *application = patch.merged(application);
        Ok(application.clone())
    }

    /// Remove the application and cascade to its interviews, mirroring the
    /// client-side cascade so the two never diverge.
    pub(crate) fn delete_application(&self, id: &ApplicationId) -> Result<(), BoardError> {
        let mut data = self.data.lock().expect("board mutex poisoned");
        if data.applications.remove(id).is_none() {
            return Err(BoardError::NotFound {
                entity: "application",
                id: id.0.clone(),
            });
        }
        data.interviews
            .retain(|_, interview| &interview.application_id != id);
        Ok(())
    }

    pub(crate) fn create_interview(
        &self,
        application_id: &ApplicationId,
        scheduled_at: chrono::DateTime<Utc>,
        duration_minutes: u16,
        kind: InterviewKind,
    ) -> Result<Interview, BoardError> {
        let id = InterviewId(self.next_id("int"));
        let mut data = self.data.lock().expect("board mutex poisoned");
        if !data.applications.contains_key(application_id) {
            return Err(BoardError::NotFound {
                entity: "application",
                id: application_id.0.clone(),
            });
        }
        let interview = Interview {
            id,
            application_id: application_id.clone(),
            scheduled_at,
            duration_minutes,
            kind,
            status: InterviewStatus::Scheduled,
        };
        data.interviews
            .insert(interview.id.clone(), interview.clone());
        Ok(interview)
    }

    pub(crate) fn update_interview(
        &self,
        id: &InterviewId,
        patch: &InterviewPatch,
    ) -> Result<Interview, BoardError> {
        let mut data = self.data.lock().expect("board mutex poisoned");
        let interview = data
            .interviews
            .get_mut(id)
            .ok_or_else(|| BoardError::NotFound {
                entity: "interview",
                id: id.0.clone(),
            })?;
        *interview = patch.merged(interview);
        Ok(interview.clone())
    }

    pub(crate) fn interviews_for(&self, application_id: &ApplicationId) -> Vec<Interview> {
        let data = self.data.lock().expect("board mutex poisoned");
        data.interviews
            .values()
            .filter(|interview| &interview.application_id == application_id)
            .cloned()
            .collect()
    }

    pub(crate) fn profile(&self, intern: &InternId) -> Result<InternProfile, BoardError> {
        let data = self.data.lock().expect("board mutex poisoned");
        data.profiles
            .get(intern)
            .cloned()
            .ok_or_else(|| BoardError::NotFound {
                entity: "intern",
                id: intern.0.clone(),
            })
    }

    pub(crate) fn update_profile(
        &self,
        intern: &InternId,
        patch: &ProfilePatch,
    ) -> Result<InternProfile, BoardError> {
        let mut data = self.data.lock().expect("board mutex poisoned");
        let profile = data
            .profiles
            .get_mut(intern)
            .ok_or_else(|| BoardError::NotFound {
                entity: "intern",
                id: intern.0.clone(),
            })?;
        *profile = patch.merged(profile);
        Ok(profile.clone())
    }

    /// Bookmark a posting. Saving the same posting twice hands back the
    /// existing bookmark instead of duplicating it.
    pub(crate) fn save_listing(
        &self,
        intern: &InternId,
        job: &JobId,
    ) -> Result<SavedListing, BoardError> {
        let id = SavedListingId(self.next_id("sav"));
        let mut data = self.data.lock().expect("board mutex poisoned");
        if !data.jobs.contains_key(job) {
            return Err(BoardError::NotFound {
                entity: "listing",
                id: job.0.clone(),
            });
        }
        if !data.profiles.contains_key(intern) {
            return Err(BoardError::NotFound {
                entity: "intern",
                id: intern.0.clone(),
            });
        }
        let bookmarks = data.saved.entry(intern.clone()).or_default();
        if let Some(existing) = bookmarks.iter().find(|saved| &saved.job_id == job) {
            return Ok(existing.clone());
        }
        let saved = SavedListing {
            id,
            job_id: job.clone(),
            saved_at: Utc::now(),
        };
        bookmarks.push(saved.clone());
        Ok(saved)
    }

    pub(crate) fn remove_saved(
        &self,
        intern: &InternId,
        id: &SavedListingId,
    ) -> Result<(), BoardError> {
        let mut data = self.data.lock().expect("board mutex poisoned");
        let bookmarks = data
            .saved
            .get_mut(intern)
            .ok_or_else(|| BoardError::NotFound {
                entity: "intern",
                id: intern.0.clone(),
            })?;
        let before = bookmarks.len();
        bookmarks.retain(|saved| &saved.id != id);
        if bookmarks.len() == before {
            return Err(BoardError::NotFound {
                entity: "saved listing",
                id: id.0.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn store_upload(&self, filename: &str) -> Result<String, BoardError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(BoardError::Invalid("filename must not be empty"));
        }
        Ok(format!("/uploads/{}-{}", self.next_id("upl"), filename))
    }

    pub(crate) fn session(&self) -> Option<User> {
        let data = self.data.lock().expect("board mutex poisoned");
        data.session_user.clone()
    }

    /// Populate the board with a small, internally consistent sample world.
    pub(crate) fn seed(&self) -> SeededBoard {
        let nordwind = Company {
            id: CompanyId("co-000001".to_string()),
            name: "Nordwind Labs".to_string(),
            industry: "Software".to_string(),
            size: "11-50".to_string(),
            website: Some("https://nordwind.example".to_string()),
            contact_email: "talent@nordwind.example".to_string(),
            location: "Berlin".to_string(),
        };
        let kupfer = Company {
            id: CompanyId("co-000002".to_string()),
            name: "Atelier Kupfer".to_string(),
            industry: "Design".to_string(),
            size: "2-10".to_string(),
            website: None,
            contact_email: "hello@kupfer.example".to_string(),
            location: "Hamburg".to_string(),
        };

        let profile = InternProfile {
            intern_id: InternId("intern-000001".to_string()),
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
        };

        let session_user = User {
            id: UserId("user-000001".to_string()),
            name: "Jonas Brandt".to_string(),
            email: "jonas@nordwind.example".to_string(),
            image_url: None,
            role: UserRole::Company,
            completed: true,
        };

        {
            let mut data = self.data.lock().expect("board mutex poisoned");
            data.companies.insert(nordwind.id.clone(), nordwind.clone());
            data.companies.insert(kupfer.id.clone(), kupfer.clone());
            data.profiles.insert(profile.intern_id.clone(), profile);
            data.session_user = Some(session_user);
        }

        self.create_job(seed_job(
            &nordwind.id,
            "Backend Intern",
            JobKind::Remote,
            "Berlin",
            JobStatus::Active,
        ));
        self.create_job(seed_job(
            &kupfer.id,
            "Design Intern",
            JobKind::Hybrid,
            "Hamburg",
            JobStatus::Active,
        ));
        self.create_job(seed_job(
            &nordwind.id,
            "Data Intern",
            JobKind::FullTime,
            "Berlin",
            JobStatus::Draft,
        ));

        SeededBoard {
            company: nordwind.id,
            intern: InternId("intern-000001".to_string()),
        }
    }
}

fn seed_job(
    company: &CompanyId,
    title: &str,
    kind: JobKind,
    location: &str,
    status: JobStatus,
) -> NewJob {
    NewJob {
        company_id: company.clone(),
        title: title.to_string(),
        kind,
        location: location.to_string(),
        monthly_salary: 1400,
        duration_weeks: 12,
        start_date: NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"),
        deadline: NaiveDate::from_ymd_opt(2026, 9, 15).expect("valid date"),
        description: format!("{title} at a growing team"),
        responsibilities: vec!["Ship weekly".to_string()],
        requirements: vec!["Curiosity".to_string()],
        benefits: vec!["Mentorship".to_string()],
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (BoardStore, SeededBoard) {
        let board = BoardStore::default();
        let seeded = board.seed();
        (board, seeded)
    }

    fn draft(intern: &InternId) -> ApplicationDraft {
        ApplicationDraft {
            intern_id: intern.clone(),
            resume_url: "/uploads/upl-000001-resume.pdf".to_string(),
            cover_letter: "I would like to join".to_string(),
        }
    }

    #[test]
    fn seed_exposes_only_active_postings_as_listings() {
        let (board, _) = seeded();
        let listings = board.listings();
        assert_eq!(listings.len(), 2, "draft postings stay hidden");
        assert!(listings
            .iter()
            .all(|listing| listing.job.status == JobStatus::Active));
    }

    #[test]
    fn duplicate_application_for_the_same_posting_is_rejected() {
        let (board, seeded) = seeded();
        let job = board.jobs_for(&seeded.company)[0].id.clone();

        board
            .submit_application(&job, &draft(&seeded.intern))
            .expect("first submission accepted");
        match board.submit_application(&job, &draft(&seeded.intern)) {
            Err(BoardError::DuplicateApplication) => {}
            other => panic!("expected duplicate rejection, got {other:?}"),
        }
    }

    #[test]
    fn deleting_a_job_cascades_applications_and_interviews() {
        let (board, seeded) = seeded();
        let job = board.jobs_for(&seeded.company)[0].id.clone();
        let application = board
            .submit_application(&job, &draft(&seeded.intern))
            .expect("submission accepted");
        board
            .create_interview(&application.id, Utc::now(), 45, InterviewKind::Video)
            .expect("interview created");

        board.delete_job(&job).expect("job removed");

        assert!(board.company_applications(&seeded.company).is_empty());
        assert!(board.interviews_for(&application.id).is_empty());
    }

    #[test]
    fn view_listing_counts_monotonically() {
        let (board, seeded) = seeded();
        let job = board.jobs_for(&seeded.company)[0].id.clone();

        let first = board.view_listing(&job).expect("listing resolves");
        let second = board.view_listing(&job).expect("listing resolves");

        assert_eq!(first.job.views, 1);
        assert_eq!(second.job.views, 2);
    }

    #[test]
    fn saving_the_same_posting_twice_is_idempotent() {
        let (board, seeded) = seeded();
        let job = board.jobs_for(&seeded.company)[0].id.clone();

        let first = board
            .save_listing(&seeded.intern, &job)
            .expect("bookmark created");
        let second = board
            .save_listing(&seeded.intern, &job)
            .expect("bookmark reused");

        assert_eq!(first.id, second.id);
    }
}
