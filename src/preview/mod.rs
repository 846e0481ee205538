// src/preview/mod.rs
//! Projection of a portfolio into a printable document.
//!
//! [`render`] is pure. Empty identity fields and empty collections produce no
//! output at all, never an empty heading. The materializers in [`html`] and
//! [`typst`] turn the document into markup for the print and PDF exports.

pub mod html;
pub mod typst;

use serde::Serialize;

use crate::types::Portfolio;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewDocument {
    pub header: IdentityHeader,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityHeader {
    pub name: Option<String>,
    pub major: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Email,
    Github,
    Linkedin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", content = "items", rename_all = "lowercase")]
pub enum Section {
    Skills(Vec<String>),
    Certifications(Vec<EntryView>),
    Awards(Vec<EntryView>),
    Projects(Vec<ProjectView>),
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Skills(_) => "Skills",
            Self::Certifications(_) => "Certifications",
            Self::Awards(_) => "Awards",
            Self::Projects(_) => "Projects",
        }
    }
}

/// A certification or award: name line plus an optional detail line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryView {
    pub name: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub title: String,
    /// `period • status`
    pub meta: String,
    pub description: Option<String>,
    pub responsibilities: Option<String>,
    pub challenges: Option<String>,
    pub technologies: Vec<String>,
    pub link: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn render(portfolio: &Portfolio) -> PreviewDocument {
    let contacts = [
        (ContactKind::Email, &portfolio.email),
        (ContactKind::Github, &portfolio.github),
        (ContactKind::Linkedin, &portfolio.linkedin),
    ]
    .into_iter()
    .filter_map(|(kind, value)| non_empty(value).map(|value| Contact { kind, value }))
    .collect();

    let header = IdentityHeader {
        name: non_empty(&portfolio.name),
        major: non_empty(&portfolio.major),
        bio: non_empty(&portfolio.bio),
        profile_image: non_empty(&portfolio.profile_image),
        contacts,
    };

    let mut sections = Vec::new();

    if !portfolio.skills.is_empty() {
        sections.push(Section::Skills(portfolio.skills.clone()));
    }

    if !portfolio.certifications.is_empty() {
        sections.push(Section::Certifications(
            portfolio
                .certifications
                .iter()
                .map(|c| EntryView {
                    name: c.name.clone(),
                    detail: non_empty(&c.issuer),
                })
                .collect(),
        ));
    }

    if !portfolio.awards.is_empty() {
        sections.push(Section::Awards(
            portfolio
                .awards
                .iter()
                .map(|a| EntryView {
                    name: a.name.clone(),
                    detail: non_empty(&a.description),
                })
                .collect(),
        ));
    }

    if !portfolio.projects.is_empty() {
        sections.push(Section::Projects(
            portfolio
                .projects
                .iter()
                .map(|p| {
                    let meta = match non_empty(&p.period) {
                        Some(period) => format!("{} • {}", period, p.status),
                        None => p.status.to_string(),
                    };
                    ProjectView {
                        title: p.title.clone(),
                        meta,
                        description: non_empty(&p.description),
                        responsibilities: non_empty(&p.responsibilities),
                        challenges: non_empty(&p.issues),
                        technologies: p.technology_list(),
                        link: non_empty(&p.link),
                    }
                })
                .collect(),
        ));
    }

    PreviewDocument { header, sections }
}
