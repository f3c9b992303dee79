use serde::{Deserialize, Serialize};

use crate::editor::Editor;
use crate::keystore::KeyStore;
use crate::models::resume::{Education, Experience, Project, ResumeData, Skill};

/// List sections that have an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Experience,
    Education,
    Skills,
    Projects,
}

/// Everything the editing session owns. Lives for the lifetime of the process.
#[derive(Debug, Default)]
pub struct Session {
    pub resume: ResumeData,
    pub experience: Editor<Experience>,
    pub education: Editor<Education>,
    pub skills: Editor<Skill>,
    pub projects: Editor<Project>,
    pub key_store: KeyStore,
}

impl Session {
    pub fn new(key_store: KeyStore) -> Self {
        Self {
            key_store,
            ..Default::default()
        }
    }
}
