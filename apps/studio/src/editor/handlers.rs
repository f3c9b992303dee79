//! Axum route handlers for the resume document and its section editors.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::editor::remove;
use crate::errors::AppError;
use crate::models::resume::{PersonalInfo, ResumeData};
use crate::session::{Section, Session};
use crate::state::AppState;

/// Runs `$body` with the editor and list for `$section`, split-borrowed from the session.
/// Each arm is expanded separately, so `$body` sees the concrete entry type.
macro_rules! with_section {
    ($session:expr, $section:expr, |$editor:ident, $list:ident| $body:expr) => {{
        let Session {
            resume,
            experience,
            education,
            skills,
            projects,
            ..
        } = &mut *$session;
        match $section {
            Section::Experience => {
                let ($editor, $list) = (experience, &mut resume.experiences);
                $body
            }
            Section::Education => {
                let ($editor, $list) = (education, &mut resume.education);
                $body
            }
            Section::Skills => {
                let ($editor, $list) = (skills, &mut resume.skills);
                $body
            }
            Section::Projects => {
                let ($editor, $list) = (projects, &mut resume.projects);
                $body
            }
        }
    }};
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub id: Uuid,
    pub resume: ResumeData,
}

#[derive(Debug, Deserialize)]
pub struct CurrentToggle {
    pub current: bool,
}

fn editor_view<T: Serialize>(draft: &T, editing: bool) -> Value {
    json!({ "draft": draft, "editing": editing })
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeData> {
    Json(state.session.read().await.resume.clone())
}

/// PUT /api/v1/resume/personal
pub async fn handle_put_personal(
    State(state): State<AppState>,
    Json(info): Json<PersonalInfo>,
) -> Json<PersonalInfo> {
    let mut session = state.session.write().await;
    session.resume.personal_info = info;
    Json(session.resume.personal_info.clone())
}

/// GET /api/v1/editors/:section
pub async fn handle_get_editor(
    State(state): State<AppState>,
    Path(section): Path<Section>,
) -> Json<Value> {
    let session = state.session.read().await;
    Json(match section {
        Section::Experience => editor_view(session.experience.draft(), session.experience.is_editing()),
        Section::Education => editor_view(session.education.draft(), session.education.is_editing()),
        Section::Skills => editor_view(session.skills.draft(), session.skills.is_editing()),
        Section::Projects => editor_view(session.projects.draft(), session.projects.is_editing()),
    })
}

/// PUT /api/v1/editors/:section/draft
pub async fn handle_put_draft(
    State(state): State<AppState>,
    Path(section): Path<Section>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let mut session = state.session.write().await;
    let view = with_section!(session, section, |editor, _list| {
        let draft = serde_json::from_value(body)
            .map_err(|e| AppError::Validation(format!("Invalid {section:?} draft: {e}")))?;
        editor.set_draft(draft);
        editor_view(editor.draft(), editor.is_editing())
    });
    Ok(Json(view))
}

/// POST /api/v1/editors/:section/save
pub async fn handle_save(
    State(state): State<AppState>,
    Path(section): Path<Section>,
) -> Json<SaveResponse> {
    let mut session = state.session.write().await;
    let id = with_section!(session, section, |editor, list| {
        let editing = editor.is_editing();
        let id = editor.save(list);
        info!(
            "{section:?} entry {id} {}",
            if editing { "updated" } else { "added" }
        );
        id
    });
    Json(SaveResponse {
        id,
        resume: session.resume.clone(),
    })
}

/// POST /api/v1/editors/:section/edit/:id
pub async fn handle_edit(
    State(state): State<AppState>,
    Path((section, id)): Path<(Section, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let mut session = state.session.write().await;
    let view = with_section!(session, section, |editor, list| {
        if !editor.edit_by_id(list, id) {
            return Err(AppError::NotFound(format!("{section:?} entry {id} not found")));
        }
        editor_view(editor.draft(), editor.is_editing())
    });
    Ok(Json(view))
}

/// POST /api/v1/editors/:section/cancel
pub async fn handle_cancel(
    State(state): State<AppState>,
    Path(section): Path<Section>,
) -> Json<Value> {
    let mut session = state.session.write().await;
    Json(with_section!(session, section, |editor, _list| {
        editor.cancel();
        editor_view(editor.draft(), editor.is_editing())
    }))
}

/// POST /api/v1/editors/:section/current
/// Only experience and projects have an ongoing flag.
pub async fn handle_set_current(
    State(state): State<AppState>,
    Path(section): Path<Section>,
    Json(req): Json<CurrentToggle>,
) -> Result<Json<Value>, AppError> {
    let mut session = state.session.write().await;
    let view = match section {
        Section::Experience => {
            session.experience.set_current(req.current);
            editor_view(session.experience.draft(), session.experience.is_editing())
        }
        Section::Projects => {
            session.projects.set_current(req.current);
            editor_view(session.projects.draft(), session.projects.is_editing())
        }
        Section::Education | Section::Skills => {
            return Err(AppError::Validation(format!(
                "{section:?} entries have no current flag"
            )));
        }
    };
    Ok(Json(view))
}

/// DELETE /api/v1/editors/:section/:id
/// Idempotent: deleting an absent id still succeeds.
pub async fn handle_delete(
    State(state): State<AppState>,
    Path((section, id)): Path<(Section, Uuid)>,
) -> StatusCode {
    let mut session = state.session.write().await;
    let removed = with_section!(session, section, |_editor, list| remove(list, id).is_some());
    if removed {
        info!("{section:?} entry {id} deleted");
    }
    StatusCode::NO_CONTENT
}
