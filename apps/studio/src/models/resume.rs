use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact header and summary. Exactly one per document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub summary: String,
}

/// Dates are `YYYY-MM` strings as produced by a month picker.
/// When `current` is set, `end_date` is ignored and renders as "Present".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub gpa: Option<String>,
}

/// Duplicate names are allowed; skills are an ordered list, not a set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
}

/// The whole document: the unit of serialization, analysis and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
}

/// A list entity addressable by a stable identity.
pub trait Entry: Clone + Default {
    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
}

/// An entry with a start/end range and an "ongoing" flag.
pub trait DateRanged {
    fn set_current(&mut self, current: bool);
    fn end_date_mut(&mut self) -> &mut String;
}

macro_rules! impl_entry {
    ($($ty:ty),+) => {
        $(
            impl Entry for $ty {
                fn id(&self) -> Uuid {
                    self.id
                }

                fn set_id(&mut self, id: Uuid) {
                    self.id = id;
                }
            }
        )+
    };
}

impl_entry!(Experience, Education, Skill, Project);

macro_rules! impl_date_ranged {
    ($($ty:ty),+) => {
        $(
            impl DateRanged for $ty {
                fn set_current(&mut self, current: bool) {
                    self.current = current;
                }

                fn end_date_mut(&mut self) -> &mut String {
                    &mut self.end_date
                }
            }
        )+
    };
}

impl_date_ranged!(Experience, Project);

/// Text shown in place of an end date: "Present" for ongoing entries.
pub fn end_label<'a>(current: bool, end_date: &'a str) -> &'a str {
    if current {
        "Present"
    } else {
        end_date
    }
}

/// Treats `Some("")` the same as `None`; form fields submit empty strings.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
