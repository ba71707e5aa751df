//! Resume domain record and its mapping onto the template context
//!
//! [`CvData`] mirrors the shape the resume editor persists (camelCase JSON).
//! [`build_context`] turns it into the snake_case vocabulary templates are
//! written against.

mod context;
pub mod sample;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CvlabError, Result};

pub use context::{build_context, language_percentage, skill_label, skill_percentage};
pub use sample::sample_cv;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvData {
    pub personal_info: PersonalInfo,
    pub professional_summary: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
    pub hobbies: Vec<Hobby>,
    pub references: Vec<Reference>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub photo: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub job_title: String,
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub driving_license: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub job_title: String,
    pub employer: String,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub current_job: bool,
    pub description: String,
    /// On-site, remote or hybrid
    pub work_mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub school: String,
    pub field_of_study: Option<String>,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub current_study: bool,
    pub grade: Option<String>,
    pub description: String,
    pub work_mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// Self-assessed rating, 1 to 5
    pub level: u8,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub id: String,
    pub name: String,
    /// Free-form label such as "Courant (C1)"
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hobby {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub id: String,
    pub name: String,
    pub company: String,
    pub position: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub url: Option<String>,
}

impl CvData {
    /// Parse a resume from its JSON form
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| CvlabError::DataInvalid(e.to_string()))
    }

    /// Read a resume JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// "First Last", trimmed
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.personal_info.first_name, self.personal_info.last_name
        )
        .trim()
        .to_string()
    }
}
