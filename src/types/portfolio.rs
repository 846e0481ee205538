// src/types/portfolio.rs
//! Portfolio record and its collection entries.
//!
//! Field names on the wire are camelCase so snapshots exported from the
//! browser builder load unchanged. Unknown fields are rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

// ===== Portfolio =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Portfolio {
    pub name: String,
    pub major: String,
    /// `data:` URL holding the base64 encoded picture, empty when unset
    pub profile_image: String,
    pub email: String,
    pub github: String,
    pub linkedin: String,
    pub bio: String,
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
    pub certifications: Vec<Certification>,
    pub awards: Vec<Award>,
}

impl Portfolio {
    /// Replace one field, leaving every other field untouched.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Major(v) => self.major = v,
            FieldUpdate::ProfileImage(v) => self.profile_image = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::Github(v) => self.github = v,
            FieldUpdate::Linkedin(v) => self.linkedin = v,
            FieldUpdate::Bio(v) => self.bio = v,
            FieldUpdate::Projects(v) => self.projects = v,
            FieldUpdate::Skills(v) => self.skills = v,
            FieldUpdate::Certifications(v) => self.certifications = v,
            FieldUpdate::Awards(v) => self.awards = v,
        }
    }
}

// ===== Field updates =====

/// A typed `(key, value)` pair for [`Portfolio::apply`].
///
/// Serialized as `{"key": "<field>", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    Name(String),
    Major(String),
    ProfileImage(String),
    Email(String),
    Github(String),
    Linkedin(String),
    Bio(String),
    Projects(Vec<Project>),
    Skills(Vec<String>),
    Certifications(Vec<Certification>),
    Awards(Vec<Award>),
}

impl FieldUpdate {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Major(_) => "major",
            Self::ProfileImage(_) => "profileImage",
            Self::Email(_) => "email",
            Self::Github(_) => "github",
            Self::Linkedin(_) => "linkedin",
            Self::Bio(_) => "bio",
            Self::Projects(_) => "projects",
            Self::Skills(_) => "skills",
            Self::Certifications(_) => "certifications",
            Self::Awards(_) => "awards",
        }
    }
}

// ===== Collection entries =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub period: String,
    pub status: ProjectStatus,
    pub responsibilities: String,
    pub issues: String,
    /// Comma separated, as typed by the user
    pub technologies: String,
    pub link: String,
    pub screenshot: String,
}

impl Project {
    pub fn technology_list(&self) -> Vec<String> {
        self.technologies
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Completed,
    InProgress,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Award {
    pub name: String,
    pub description: String,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Portfolio {
        Portfolio {
            name: "Ada Lovelace".to_string(),
            major: "Mathematics".to_string(),
            email: "ada@example.com".to_string(),
            projects: vec![Project {
                title: "Analytical Engine Simulator".to_string(),
                period: "2024".to_string(),
                status: ProjectStatus::InProgress,
                technologies: "Rust, typst ,  ,WASM".to_string(),
                ..Project::default()
            }],
            skills: vec!["Rust".to_string(), "Notes".to_string()],
            certifications: vec![Certification {
                name: "Royal Society".to_string(),
                issuer: "London".to_string(),
                date: "1843-01-01".to_string(),
            }],
            awards: vec![Award {
                name: "First Program".to_string(),
                ..Award::default()
            }],
            ..Portfolio::default()
        }
    }

    #[test]
    fn test_apply_replaces_only_the_named_field() {
        let mut portfolio = sample();
        let before = portfolio.clone();

        portfolio.apply(FieldUpdate::Bio("Poetical science".to_string()));

        assert_eq!(portfolio.bio, "Poetical science");
        assert_eq!(portfolio.projects, before.projects);
        assert_eq!(portfolio.name, before.name);
        assert_eq!(portfolio.skills, before.skills);
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let portfolio = sample();
        let json = serde_json::to_string(&portfolio).unwrap();
        let loaded: Portfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, portfolio);
    }

    #[test]
    fn test_browser_layout_is_accepted() {
        let json = r#"{
            "name": "Ada",
            "major": "",
            "profileImage": "",
            "email": "",
            "github": "",
            "linkedin": "",
            "bio": "",
            "projects": [{"title": "Engine", "status": "in-progress"}],
            "skills": [],
            "certifications": [],
            "awards": []
        }"#;
        let loaded: Portfolio = serde_json::from_str(json).unwrap();
        assert_eq!(loaded.projects[0].status, ProjectStatus::InProgress);
        assert_eq!(loaded.projects[0].period, "");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let json = r#"{"name": "Ada", "favouriteColour": "green"}"#;
        assert!(serde_json::from_str::<Portfolio>(json).is_err());

        let json = r#"{"projects": [{"title": "x", "stars": 3}]}"#;
        assert!(serde_json::from_str::<Portfolio>(json).is_err());
    }

    #[test]
    fn test_field_update_wire_format() {
        let update: FieldUpdate =
            serde_json::from_str(r#"{"key": "skills", "value": ["Rust"]}"#).unwrap();
        assert_eq!(update, FieldUpdate::Skills(vec!["Rust".to_string()]));
        assert_eq!(update.key(), "skills");

        let update: FieldUpdate =
            serde_json::from_str(r#"{"key": "profileImage", "value": ""}"#).unwrap();
        assert_eq!(update.key(), "profileImage");

        assert!(serde_json::from_str::<FieldUpdate>(r#"{"key": "age", "value": 3}"#).is_err());
    }

    #[test]
    fn test_technology_list_skips_blank_entries() {
        let portfolio = sample();
        assert_eq!(
            portfolio.projects[0].technology_list(),
            vec!["Rust", "typst", "WASM"]
        );
    }
}
