//! HTML preview of the resume.
//!
//! Every section is wrapped in a container with a stable id so the export
//! pipeline can capture either the whole document or a single section.

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::resume::{end_label, non_empty, ResumeData};

pub const RESUME_CONTAINER_ID: &str = "resume-preview";
pub const PERSONAL_CONTAINER_ID: &str = "preview-personal";
pub const EXPERIENCE_CONTAINER_ID: &str = "preview-experience";
pub const EDUCATION_CONTAINER_ID: &str = "preview-education";
pub const SKILLS_CONTAINER_ID: &str = "preview-skills";
pub const PROJECTS_CONTAINER_ID: &str = "preview-projects";

/// Rendered width of the preview in CSS pixels (A4 at 96 dpi).
pub const PAGE_WIDTH_PX: u32 = 794;

const STYLE: &str = "\
body { margin: 0; background: #ffffff; font-family: 'Inter', 'Helvetica Neue', Arial, sans-serif; color: #1f2937; }
#resume-preview { width: 794px; box-sizing: border-box; padding: 48px; }
h1 { margin: 0; font-size: 28px; color: #1e3a8a; }
h2 { font-size: 15px; text-transform: uppercase; letter-spacing: 0.06em; color: #1e3a8a; border-bottom: 1px solid #cbd5e1; padding-bottom: 4px; margin: 20px 0 8px; }
.subtitle { font-size: 16px; color: #475569; margin: 4px 0 8px; }
.contact { font-size: 12px; color: #475569; }
.entry { margin-bottom: 12px; }
.entry-head { display: flex; justify-content: space-between; font-weight: 600; font-size: 14px; }
.entry-sub { font-size: 13px; color: #475569; }
.dates { font-size: 12px; color: #64748b; font-weight: 400; }
.description { font-size: 13px; white-space: pre-line; margin: 4px 0 0; }
.skills { display: flex; flex-wrap: wrap; gap: 6px; padding: 0; margin: 0; list-style: none; }
.skills li { font-size: 12px; background: #e0e7ff; border-radius: 4px; padding: 2px 8px; }
a { color: #2563eb; text-decoration: none; }";

/// Formats a `YYYY-MM` string as "Mar 2021". Unparseable input is returned unchanged.
pub fn format_date(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// "Mar 2021 - Present"; `None` when there is no start date to anchor the range.
pub fn date_range(start: &str, end: &str, current: bool) -> Option<String> {
    if start.is_empty() {
        return None;
    }
    let end = if current {
        end_label(true, end).to_string()
    } else {
        format_date(end)
    };
    Some(format!("{} - {}", format_date(start), end))
}

/// The complete preview page.
pub fn render_page(resume: &ResumeData) -> String {
    wrap_page(&render_document(resume))
}

/// A standalone page holding only the container with `element_id`, if it exists.
pub fn render_element(resume: &ResumeData, element_id: &str) -> Option<String> {
    let fragment = match element_id {
        RESUME_CONTAINER_ID => render_document(resume),
        PERSONAL_CONTAINER_ID => render_personal(resume),
        EXPERIENCE_CONTAINER_ID => render_experience(resume),
        EDUCATION_CONTAINER_ID => render_education(resume),
        SKILLS_CONTAINER_ID => render_skills(resume),
        PROJECTS_CONTAINER_ID => render_projects(resume),
        _ => return None,
    };
    if element_id == RESUME_CONTAINER_ID {
        Some(wrap_page(&fragment))
    } else {
        Some(wrap_page(&format!(
            "<div id=\"{RESUME_CONTAINER_ID}\">{fragment}</div>"
        )))
    }
}

fn wrap_page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Resume Preview</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn render_document(resume: &ResumeData) -> String {
    let mut html = format!("<div id=\"{RESUME_CONTAINER_ID}\">\n");
    html.push_str(&render_personal(resume));
    html.push_str(&render_experience(resume));
    html.push_str(&render_education(resume));
    html.push_str(&render_skills(resume));
    html.push_str(&render_projects(resume));
    html.push_str("</div>");
    html
}

fn text_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

fn link(url: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        encode_double_quoted_attribute(url),
        encode_text(url)
    )
}

fn render_personal(resume: &ResumeData) -> String {
    let info = &resume.personal_info;

    let mut contact: Vec<String> = [&info.email, &info.phone, &info.location]
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .map(|v| encode_text(v).into_owned())
        .collect();
    if let Some(linkedin) = non_empty(&info.linkedin) {
        contact.push(link(linkedin));
    }
    if let Some(website) = non_empty(&info.website) {
        contact.push(link(website));
    }

    let mut html = format!(
        "<header id=\"{PERSONAL_CONTAINER_ID}\">\n<h1>{}</h1>\n<div class=\"subtitle\">{}</div>\n<div class=\"contact\">{}</div>\n",
        encode_text(text_or(&info.full_name, "Your Name")),
        encode_text(text_or(&info.title, "Professional Title")),
        contact.join(" &middot; "),
    );
    if !info.summary.trim().is_empty() {
        html.push_str(&format!(
            "<h2>Summary</h2>\n<p class=\"description\">{}</p>\n",
            encode_text(&info.summary)
        ));
    }
    html.push_str("</header>\n");
    html
}

fn entry_html(heading: &str, sub: &str, dates: Option<String>, body: &str) -> String {
    format!(
        "<div class=\"entry\">\n<div class=\"entry-head\"><span>{}</span><span class=\"dates\">{}</span></div>\n<div class=\"entry-sub\">{}</div>\n{}</div>\n",
        heading,
        dates.map(|d| encode_text(&d).into_owned()).unwrap_or_default(),
        sub,
        body,
    )
}

fn description_html(text: &str) -> String {
    if text.trim().is_empty() {
        String::new()
    } else {
        format!("<p class=\"description\">{}</p>\n", encode_text(text))
    }
}

fn render_experience(resume: &ResumeData) -> String {
    let mut html = format!("<section id=\"{EXPERIENCE_CONTAINER_ID}\">\n<h2>Experience</h2>\n");
    for exp in &resume.experiences {
        let sub = [text_or(&exp.company, "Company"), exp.location.as_str()]
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .map(|v| encode_text(v).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        html.push_str(&entry_html(
            &encode_text(text_or(&exp.title, "Job Title")),
            &sub,
            date_range(&exp.start_date, &exp.end_date, exp.current),
            &description_html(&exp.description),
        ));
    }
    html.push_str("</section>\n");
    html
}

fn render_education(resume: &ResumeData) -> String {
    let mut html = format!("<section id=\"{EDUCATION_CONTAINER_ID}\">\n<h2>Education</h2>\n");
    for edu in &resume.education {
        let heading = if edu.field.trim().is_empty() {
            text_or(&edu.degree, "Degree").to_string()
        } else {
            format!("{} in {}", text_or(&edu.degree, "Degree"), edu.field)
        };
        let mut sub = encode_text(text_or(&edu.institution, "Institution")).into_owned();
        if !edu.location.trim().is_empty() {
            sub.push_str(&format!(", {}", encode_text(&edu.location)));
        }
        let body = non_empty(&edu.gpa)
            .map(|gpa| format!("<p class=\"description\">GPA: {}</p>\n", encode_text(gpa)))
            .unwrap_or_default();
        html.push_str(&entry_html(
            &encode_text(&heading),
            &sub,
            date_range(&edu.start_date, &edu.end_date, false),
            &body,
        ));
    }
    html.push_str("</section>\n");
    html
}

fn render_skills(resume: &ResumeData) -> String {
    let items: String = resume
        .skills
        .iter()
        .map(|s| format!("<li>{}</li>", encode_text(&s.name)))
        .collect();
    format!(
        "<section id=\"{SKILLS_CONTAINER_ID}\">\n<h2>Skills</h2>\n<ul class=\"skills\">{items}</ul>\n</section>\n"
    )
}

fn render_projects(resume: &ResumeData) -> String {
    let mut html = format!("<section id=\"{PROJECTS_CONTAINER_ID}\">\n<h2>Projects</h2>\n");
    for project in &resume.projects {
        let sub = non_empty(&project.url).map(link).unwrap_or_default();
        let body = format!(
            "<p class=\"description\">{}</p>\n",
            encode_text(text_or(&project.description, "No description provided"))
        );
        html.push_str(&entry_html(
            &encode_text(text_or(&project.name, "Project Name")),
            &sub,
            date_range(&project.start_date, &project.end_date, project.current),
            &body,
        ));
    }
    html.push_str("</section>\n");
    html
}
