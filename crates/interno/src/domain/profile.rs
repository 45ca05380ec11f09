use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{InternId, JobId, SavedListingId};

/// Slots counted by the completion percentage: twelve required text fields
/// plus one for having any skill at all.
pub const PROFILE_FIELD_SLOTS: usize = 13;

/// The intern's own editable record. Completion is always derived via
/// [`InternProfile::completion`], never carried as a stored field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternProfile {
    pub intern_id: InternId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub university: String,
    pub degree: String,
    pub field_of_study: String,
    pub graduation_year: String,
    pub bio: String,
    pub resume_url: String,
    pub portfolio_url: String,
    pub skills: Vec<String>,
}

impl InternProfile {
    /// Percentage of the thirteen slots considered filled. A text field
    /// counts once it is non-empty after trimming; the skills slot counts
    /// when the list holds at least one entry.
    pub fn completion(&self) -> u8 {
        let filled = self
            .required_fields()
            .iter()
            .filter(|value| !value.trim().is_empty())
            .count();
        let skills_bit = usize::from(!self.skills.is_empty());
        (((filled + skills_bit) as f32 / PROFILE_FIELD_SLOTS as f32) * 100.0).round() as u8
    }

    fn required_fields(&self) -> [&str; 12] {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.location,
            &self.university,
            &self.degree,
            &self.field_of_study,
            &self.graduation_year,
            &self.bio,
            &self.resume_url,
            &self.portfolio_url,
        ]
    }
}

/// Partial profile update; `None` leaves a field untouched, `Some` replaces
/// it (including the whole skills list).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub university: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<String>,
    pub bio: Option<String>,
    pub resume_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl ProfilePatch {
    pub fn merged(&self, profile: &InternProfile) -> InternProfile {
        let mut next = profile.clone();
        if let Some(value) = &self.first_name {
            next.first_name = value.clone();
        }
        if let Some(value) = &self.last_name {
            next.last_name = value.clone();
        }
        if let Some(value) = &self.email {
            next.email = value.clone();
        }
        if let Some(value) = &self.phone {
            next.phone = value.clone();
        }
        if let Some(value) = &self.location {
            next.location = value.clone();
        }
        if let Some(value) = &self.university {
            next.university = value.clone();
        }
        if let Some(value) = &self.degree {
            next.degree = value.clone();
        }
        if let Some(value) = &self.field_of_study {
            next.field_of_study = value.clone();
        }
        if let Some(value) = &self.graduation_year {
            next.graduation_year = value.clone();
        }
        if let Some(value) = &self.bio {
            next.bio = value.clone();
        }
        if let Some(value) = &self.resume_url {
            next.resume_url = value.clone();
        }
        if let Some(value) = &self.portfolio_url {
            next.portfolio_url = value.clone();
        }
        if let Some(value) = &self.skills {
            next.skills = value.clone();
        }
        next
    }
}

/// A bookmarked listing; the id is issued by the serving side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedListing {
    pub id: SavedListingId,
    pub job_id: JobId,
    pub saved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_profile() -> InternProfile {
        InternProfile {
            intern_id: InternId("intern-000001".to_string()),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            university: String::new(),
            degree: String::new(),
            field_of_study: String::new(),
            graduation_year: String::new(),
            bio: String::new(),
            resume_url: String::new(),
            portfolio_url: String::new(),
            skills: Vec::new(),
        }
    }

    #[test]
    fn completion_of_empty_profile_is_zero() {
        assert_eq!(empty_profile().completion(), 0);
    }

    #[test]
    fn completion_counts_eight_fields_and_skills_as_sixty_nine() {
        let mut profile = empty_profile();
        profile.first_name = "Mira".to_string();
        profile.last_name = "Okafor".to_string();
        profile.email = "mira@example.org".to_string();
        profile.phone = "+49 30 1234".to_string();
        profile.location = "Berlin".to_string();
        profile.university = "TU Berlin".to_string();
        profile.degree = "BSc".to_string();
        profile.field_of_study = "Informatics".to_string();
        profile.skills = vec!["Rust".to_string()];

        assert_eq!(profile.completion(), 69);
    }

    #[test]
    fn whitespace_only_fields_do_not_count_as_filled() {
        let mut profile = empty_profile();
        profile.first_name = "   ".to_string();
        profile.bio = "\t".to_string();

        assert_eq!(profile.completion(), 0);
    }

    #[test]
    fn fully_filled_profile_reaches_one_hundred() {
        let mut profile = empty_profile();
        profile.first_name = "Mira".to_string();
        profile.last_name = "Okafor".to_string();
        profile.email = "mira@example.org".to_string();
        profile.phone = "+49 30 1234".to_string();
        profile.location = "Berlin".to_string();
        profile.university = "TU Berlin".to_string();
        profile.degree = "BSc".to_string();
        profile.field_of_study = "Informatics".to_string();
        profile.graduation_year = "2027".to_string();
        profile.bio = "Systems-minded intern".to_string();
        profile.resume_url = "/uploads/000001-resume.pdf".to_string();
        profile.portfolio_url = "https://mira.dev".to_string();
        profile.skills = vec!["Rust".to_string(), "SQL".to_string()];

        assert_eq!(profile.completion(), 100);
    }

    #[test]
    fn patch_replaces_the_skills_list_wholesale() {
        let mut profile = empty_profile();
        profile.skills = vec!["Rust".to_string(), "Go".to_string()];

        let patch = ProfilePatch {
            skills: Some(vec!["SQL".to_string()]),
            ..ProfilePatch::default()
        };

        assert_eq!(patch.merged(&profile).skills, vec!["SQL".to_string()]);
    }
}
