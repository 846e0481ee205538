// src/preview/html.rs
use std::fmt::Write;

use super::{ContactKind, PreviewDocument, Section};

/// Escape text for HTML element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn safe_href(link: &str) -> Option<&str> {
    let lower = link.to_ascii_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://") || lower.starts_with("mailto:"))
        .then_some(link)
}

fn contact_label(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Email => "Email",
        ContactKind::Github => "GitHub",
        ContactKind::Linkedin => "LinkedIn",
    }
}

/// Body fragment for the preview pane and the print job.
pub fn to_html(doc: &PreviewDocument) -> String {
    let mut out = String::new();
    out.push_str("<div id=\"portfolio-content\">\n");

    let header = &doc.header;
    out.push_str("<header class=\"section identity\">\n");
    if let Some(image) = header
        .profile_image
        .as_deref()
        .filter(|src| src.starts_with("data:image/"))
    {
        let _ = writeln!(
            out,
            "<img class=\"profile\" src=\"{}\" alt=\"{}\">",
            escape(image),
            escape(header.name.as_deref().unwrap_or("Profile"))
        );
    }
    if let Some(name) = &header.name {
        let _ = writeln!(out, "<h1>{}</h1>", escape(name));
    }
    if let Some(major) = &header.major {
        let _ = writeln!(out, "<p class=\"major\">{}</p>", escape(major));
    }
    if let Some(bio) = &header.bio {
        let _ = writeln!(out, "<p class=\"bio\">{}</p>", escape(bio));
    }
    if !header.contacts.is_empty() {
        out.push_str("<ul class=\"contact-info\">\n");
        for contact in &header.contacts {
            let _ = writeln!(
                out,
                "<li class=\"contact-item\"><span>{}:</span> {}</li>",
                contact_label(contact.kind),
                escape(&contact.value)
            );
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</header>\n");

    for section in &doc.sections {
        let _ = writeln!(out, "<section class=\"section\">\n<h2>{}</h2>", section.title());
        match section {
            Section::Skills(skills) => {
                out.push_str("<div class=\"project-tags\">");
                for skill in skills {
                    let _ = write!(out, "<span class=\"tag\">{}</span>", escape(skill));
                }
                out.push_str("</div>\n");
            }
            Section::Certifications(entries) | Section::Awards(entries) => {
                for entry in entries {
                    let _ = write!(out, "<div class=\"entry\"><p><strong>{}</strong></p>", escape(&entry.name));
                    if let Some(detail) = &entry.detail {
                        let _ = write!(out, "<p class=\"detail\">{}</p>", escape(detail));
                    }
                    out.push_str("</div>\n");
                }
            }
            Section::Projects(projects) => {
                for project in projects {
                    out.push_str("<article class=\"project-item\">\n");
                    let _ = writeln!(out, "<h3>{}</h3>", escape(&project.title));
                    let _ = writeln!(out, "<p class=\"meta\">{}</p>", escape(&project.meta));
                    if let Some(description) = &project.description {
                        let _ = writeln!(out, "<p>{}</p>", escape(description));
                    }
                    if let Some(text) = &project.responsibilities {
                        let _ = writeln!(out, "<p><strong>Responsibilities:</strong> {}</p>", escape(text));
                    }
                    if let Some(text) = &project.challenges {
                        let _ = writeln!(out, "<p><strong>Challenges:</strong> {}</p>", escape(text));
                    }
                    if !project.technologies.is_empty() {
                        let _ = writeln!(
                            out,
                            "<p><strong>Technologies:</strong> {}</p>",
                            escape(&project.technologies.join(", "))
                        );
                    }
                    if let Some(link) = &project.link {
                        match safe_href(link) {
                            Some(href) => {
                                let _ = writeln!(out, "<p><a href=\"{}\">View Project</a></p>", escape(href));
                            }
                            None => {
                                let _ = writeln!(out, "<p>{}</p>", escape(link));
                            }
                        }
                    }
                    out.push_str("</article>\n");
                }
            }
        }
        out.push_str("</section>\n");
    }

    out.push_str("</div>\n");
    out
}
