use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    Form,
};
use cms_core::{routes, CmsError, Section, SectionField, SectionId, VERSION};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;
use tracing::{error, info, instrument, warn};

use crate::flash::Flash;
use crate::validation::{self, Violations, DUPLICATE_CODE_MESSAGE};
use crate::views::{self, FormTemplate, IndexTemplate, NotFoundTemplate};
use crate::AdminState;

/// Submitted section form. A disabled input is not submitted at all.
#[derive(Debug, Default, Deserialize)]
pub struct SectionForm {
    #[serde(rename = "section[code]", default)]
    code: Option<String>,
    #[serde(rename = "section[name]", default)]
    name: Option<String>,
}

#[instrument]
pub async fn health_check() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "service": "cms-admin",
        "version": VERSION
    })))
}

#[instrument(skip(state))]
pub async fn list_sections(State(state): State<AdminState>) -> Json<Value> {
    let sections: Vec<Section> = state
        .sections
        .list()
        .iter()
        .map(|section| Section::clone(section))
        .collect();
    Json(json!({
        "total": sections.len(),
        "sections": sections,
    }))
}

#[instrument(skip(state, session))]
pub async fn index(State(state): State<AdminState>, session: Session) -> Response {
    let flash = Flash::take(&session).await;
    match IndexTemplate::new(&state.sections.list(), flash) {
        Ok(page) => views::render(StatusCode::OK, &page),
        Err(e) => internal_error(e),
    }
}

#[instrument(skip(session))]
pub async fn create_form(session: Session) -> Response {
    let flash = Flash::take(&session).await;
    let page = FormTemplate::create("", "", &Violations::default(), flash);
    views::render(StatusCode::OK, &page)
}

#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AdminState>,
    session: Session,
    Form(form): Form<SectionForm>,
) -> Response {
    let code = form.code.unwrap_or_default();
    let name = form.name.unwrap_or_default();

    let mut violations = validation::validate_new_section(&code, &name, &state.sections);
    if violations.is_empty() {
        match state.sections.add(Section::new(code.clone(), name.clone())) {
            Ok(section) => {
                info!("Section '{}' created", section.code);
                return redirect_with_flash(&session, routes::SECTION_INDEX.path, Flash::Created)
                    .await;
            }
            Err(CmsError::DuplicateCode { .. }) => {
                violations.push(SectionField::Code, DUPLICATE_CODE_MESSAGE);
            }
            Err(e) => return internal_error(e),
        }
    }

    warn!(
        violations = violations.len(),
        "Section form rejected for code '{}'", code
    );
    let page = FormTemplate::create(&code, &name, &violations, None);
    views::render(StatusCode::UNPROCESSABLE_ENTITY, &page)
}

#[instrument(skip(state, session))]
pub async fn update_form(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    session: Session,
) -> Response {
    let Some(section) = find_section(&state, &id) else {
        return not_found();
    };
    let flash = Flash::take(&session).await;
    match FormTemplate::update(&section, &section.name, &Violations::default(), flash) {
        Ok(page) => views::render(StatusCode::OK, &page),
        Err(e) => internal_error(e),
    }
}

#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    session: Session,
    Form(form): Form<SectionForm>,
) -> Response {
    let Some(section) = find_section(&state, &id) else {
        return not_found();
    };
    // The code input is disabled; anything posted for it is discarded.
    let name = form.name.unwrap_or_default();

    let violations = validation::validate_section_update(&name);
    if !violations.is_empty() {
        warn!(
            violations = violations.len(),
            "Section form rejected for code '{}'", section.code
        );
        return match FormTemplate::update(&section, &name, &violations, None) {
            Ok(page) => views::render(StatusCode::UNPROCESSABLE_ENTITY, &page),
            Err(e) => internal_error(e),
        };
    }

    let section = match state.sections.rename(&section.id, name) {
        Ok(section) => section,
        Err(_) => return not_found(),
    };
    info!("Section '{}' updated", section.code);
    match routes::SECTION_UPDATE.generate(&[("id", section.id.to_string().as_str())]) {
        Ok(location) => redirect_with_flash(&session, &location, Flash::Updated).await,
        Err(e) => internal_error(e),
    }
}

#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    session: Session,
) -> Response {
    let Ok(id) = id.parse::<SectionId>() else {
        return not_found();
    };
    match state.sections.remove(&id) {
        Ok(section) => {
            info!("Section '{}' deleted", section.code);
            redirect_with_flash(&session, routes::SECTION_INDEX.path, Flash::Deleted).await
        }
        Err(e) => {
            warn!("Cannot delete section: {}", e);
            not_found()
        }
    }
}

fn find_section(state: &AdminState, id: &str) -> Option<Arc<Section>> {
    id.parse::<SectionId>()
        .ok()
        .and_then(|id| state.sections.get(&id))
}

async fn redirect_with_flash(session: &Session, location: &str, flash: Flash) -> Response {
    match flash.push(session).await {
        Ok(()) => Redirect::to(location).into_response(),
        Err(status) => status.into_response(),
    }
}

fn not_found() -> Response {
    views::render(StatusCode::NOT_FOUND, &NotFoundTemplate::default())
}

fn internal_error(e: CmsError) -> Response {
    error!("Failed to serve section page: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
