// src/preview/typst.rs
//! typst source for the PDF export. All user text goes through string
//! literals, so markup characters in the data are never interpreted.

use std::fmt::Write;

use super::{ContactKind, PreviewDocument, Section};

/// Quote `input` as a typst string literal.
pub fn lit(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('"');
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn contact_label(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Email => "Email",
        ContactKind::Github => "GitHub",
        ContactKind::Linkedin => "LinkedIn",
    }
}

/// Full document paginated on A4 with 10 mm margins.
///
/// `profile_image` is the workspace-relative path of the decoded picture, if
/// one was written.
pub fn to_typst(doc: &PreviewDocument, profile_image: Option<&str>) -> String {
    let mut out = String::new();
    let title = doc.header.name.as_deref().unwrap_or("Portfolio");
    let _ = writeln!(out, "#set document(title: {})", lit(title));
    out.push_str("#set page(paper: \"a4\", margin: 10mm)\n");
    out.push_str("#set text(size: 10pt)\n\n");

    let mut identity = String::new();
    let header = &doc.header;
    if let Some(name) = &header.name {
        let _ = writeln!(identity, "  #text(size: 24pt, weight: \"bold\", {})\n", lit(name));
    }
    if let Some(major) = &header.major {
        let _ = writeln!(identity, "  #text(size: 14pt, fill: luma(90), {})\n", lit(major));
    }
    if let Some(bio) = &header.bio {
        let _ = writeln!(identity, "  #{}\n", lit(bio));
    }
    if !header.contacts.is_empty() {
        let contacts: Vec<String> = header
            .contacts
            .iter()
            .map(|c| format!("{}: {}", contact_label(c.kind), c.value))
            .collect();
        let _ = writeln!(identity, "  #text(size: 9pt, {})", lit(&contacts.join("   ")));
    }

    match profile_image {
        Some(path) => {
            let _ = writeln!(
                out,
                "#grid(columns: (32mm, 1fr), column-gutter: 8mm,\n  image({}, width: 32mm),\n  [\n{}  ],\n)",
                lit(path),
                identity
            );
        }
        None => {
            let _ = writeln!(out, "#block[\n{}]", identity);
        }
    }
    out.push_str("#line(length: 100%, stroke: 1pt + luma(200))\n\n");

    for section in &doc.sections {
        let _ = writeln!(out, "#heading(level: 2, {})\n", lit(section.title()));
        match section {
            Section::Skills(skills) => {
                let _ = writeln!(out, "#{}\n", lit(&skills.join("  ·  ")));
            }
            Section::Certifications(entries) | Section::Awards(entries) => {
                for entry in entries {
                    let _ = write!(out, "#strong({})", lit(&entry.name));
                    if let Some(detail) = &entry.detail {
                        let _ = write!(out, " #linebreak() #text(fill: luma(90), {})", lit(detail));
                    }
                    out.push_str("\n\n");
                }
            }
            Section::Projects(projects) => {
                for project in projects {
                    out.push_str(
                        "#block(inset: (left: 4mm), stroke: (left: 2pt + blue), breakable: false)[\n",
                    );
                    let _ = writeln!(out, "  #heading(level: 3, {})", lit(&project.title));
                    let _ = writeln!(out, "  #text(size: 9pt, fill: luma(90), {})\n", lit(&project.meta));
                    if let Some(description) = &project.description {
                        let _ = writeln!(out, "  #{}\n", lit(description));
                    }
                    if let Some(text) = &project.responsibilities {
                        let _ = writeln!(out, "  #strong(\"Responsibilities:\") #{}\n", lit(text));
                    }
                    if let Some(text) = &project.challenges {
                        let _ = writeln!(out, "  #strong(\"Challenges:\") #{}\n", lit(text));
                    }
                    if !project.technologies.is_empty() {
                        let _ = writeln!(
                            out,
                            "  #strong(\"Technologies:\") #{}\n",
                            lit(&project.technologies.join(", "))
                        );
                    }
                    if let Some(link) = &project.link {
                        let _ = writeln!(out, "  #link({})[View Project]", lit(link));
                    }
                    out.push_str("]\n\n");
                }
            }
        }
    }

    out
}
