//! HTML rendering with askama templates
//!
//! Flash messages, validation errors and the empty-listing notice are the
//! only `div` elements on a page and contain text only; the page driver
//! locates them with a non-nesting matcher.

use std::sync::Arc;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use cms_core::{routes, Result, Section, SectionField};
use tracing::error;

use crate::flash::Flash;
use crate::validation::Violations;

struct SectionRow {
    code: String,
    name: String,
    edit_url: String,
    delete_url: String,
}

impl SectionRow {
    fn new(section: &Section) -> Result<Self> {
        let id = section.id.to_string();
        Ok(Self {
            code: section.code.clone(),
            name: section.name.clone(),
            edit_url: routes::SECTION_UPDATE.generate(&[("id", id.as_str())])?,
            delete_url: routes::SECTION_DELETE.generate(&[("id", id.as_str())])?,
        })
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    title: &'static str,
    flash: Option<Flash>,
    create_url: &'static str,
    rows: Vec<SectionRow>,
}

impl IndexTemplate {
    pub fn new(sections: &[Arc<Section>], flash: Option<Flash>) -> Result<Self> {
        Ok(Self {
            title: "Sections",
            flash,
            create_url: routes::SECTION_CREATE.path,
            rows: sections
                .iter()
                .map(|section| SectionRow::new(section))
                .collect::<Result<_>>()?,
        })
    }
}

struct FieldRow {
    id: &'static str,
    name: &'static str,
    label: &'static str,
    value: String,
    disabled: bool,
    errors: Vec<String>,
}

impl FieldRow {
    fn new(field: SectionField, value: &str, disabled: bool, violations: &Violations) -> Self {
        Self {
            id: field.input_id(),
            name: field.input_name(),
            label: field.label(),
            value: value.to_string(),
            disabled,
            errors: violations.for_field(field).map(str::to_string).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    title: &'static str,
    flash: Option<Flash>,
    action: String,
    submit_label: &'static str,
    cancel_url: &'static str,
    fields: Vec<FieldRow>,
}

impl FormTemplate {
    pub fn create(code: &str, name: &str, violations: &Violations, flash: Option<Flash>) -> Self {
        Self {
            title: "New section",
            flash,
            action: routes::SECTION_CREATE.path.to_string(),
            submit_label: "Create",
            cancel_url: routes::SECTION_INDEX.path,
            fields: vec![
                FieldRow::new(SectionField::Code, code, false, violations),
                FieldRow::new(SectionField::Name, name, false, violations),
            ],
        }
    }

    /// The code is immutable once created, so its input is disabled.
    pub fn update(
        section: &Section,
        name: &str,
        violations: &Violations,
        flash: Option<Flash>,
    ) -> Result<Self> {
        Ok(Self {
            title: "Edit section",
            flash,
            action: routes::SECTION_UPDATE.generate(&[("id", section.id.to_string().as_str())])?,
            submit_label: "Save changes",
            cancel_url: routes::SECTION_INDEX.path,
            fields: vec![
                FieldRow::new(SectionField::Code, &section.code, true, violations),
                FieldRow::new(SectionField::Name, name, false, violations),
            ],
        })
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    title: &'static str,
    flash: Option<Flash>,
}

impl Default for NotFoundTemplate {
    fn default() -> Self {
        Self {
            title: "Not found",
            flash: None,
        }
    }
}

pub fn render(status: StatusCode, template: &impl Template) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
