//! Flattens a `ResumeData` into the plain-text rendition fed to analysis prompts.
//!
//! One-way and deterministic: the same document always yields the same bytes,
//! and list order is preserved.

use crate::models::resume::{end_label, non_empty, ResumeData};

pub fn serialize(resume: &ResumeData) -> String {
    let ResumeData {
        personal_info: info,
        experiences,
        education,
        skills,
        projects,
    } = resume;

    let mut text = format!("# {}\n", info.full_name);
    text.push_str(&format!("{}\n", info.title));
    text.push_str(&format!(
        "{} | {} | {}\n",
        info.email, info.phone, info.location
    ));
    if let Some(linkedin) = non_empty(&info.linkedin) {
        text.push_str(&format!("LinkedIn: {linkedin}\n"));
    }
    if let Some(website) = non_empty(&info.website) {
        text.push_str(&format!("Website: {website}\n"));
    }

    text.push_str(&format!("\n## Summary\n{}\n", info.summary));

    text.push_str("\n## Experience\n");
    for exp in experiences {
        text.push_str(&format!(
            "{} at {}, {}\n",
            exp.title, exp.company, exp.location
        ));
        text.push_str(&format!(
            "{} - {}\n",
            exp.start_date,
            end_label(exp.current, &exp.end_date)
        ));
        text.push_str(&format!("{}\n\n", exp.description));
    }

    text.push_str("\n## Education\n");
    for edu in education {
        text.push_str(&format!(
            "{} in {}, {}, {}\n",
            edu.degree, edu.field, edu.institution, edu.location
        ));
        text.push_str(&format!("{} - {}\n", edu.start_date, edu.end_date));
        if let Some(gpa) = non_empty(&edu.gpa) {
            text.push_str(&format!("GPA: {gpa}\n"));
        }
        text.push('\n');
    }

    text.push_str("\n## Skills\n");
    let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
    text.push_str(&names.join(", "));
    text.push('\n');

    text.push_str("\n## Projects\n");
    for project in projects {
        text.push_str(&format!("{}\n", project.name));
        if let Some(url) = non_empty(&project.url) {
            text.push_str(&format!("URL: {url}\n"));
        }
        text.push_str(&format!(
            "{} - {}\n",
            project.start_date,
            end_label(project.current, &project.end_date)
        ));
        text.push_str(&format!("{}\n\n", project.description));
    }

    text
}
