use std::sync::Arc;

use cms_core::{routes, Result, Route, SectionField};
use tracing::instrument;

use crate::page::{SectionForm, SymfonyPage};
use crate::session::Session;

/// Section edition form. The code input is rendered disabled.
pub struct UpdatePage {
    form: SectionForm,
}

impl std::fmt::Debug for UpdatePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdatePage").finish_non_exhaustive()
    }
}

impl UpdatePage {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            form: SectionForm { session },
        }
    }

    /// The code input is disabled: a value can be set but is never submitted.
    pub fn fill_code(&self, code: &str) -> Result<()> {
        self.fill_field(SectionField::Code.label(), code)
    }

    pub fn fill_name(&self, name: &str) -> Result<()> {
        self.fill_field(SectionField::Name.label(), name)
    }

    pub fn fill_field(&self, field: &str, value: &str) -> Result<()> {
        self.form.fill_field(field, value)
    }

    #[instrument(skip(self))]
    pub async fn save_changes(&self) -> Result<()> {
        self.form.submit(self.name()).await
    }

    pub fn is_code_disabled(&self) -> Result<bool> {
        self.form
            .is_field_disabled(self.name(), SectionField::Code.label())
    }

    pub fn contains_error_with_message(&self, message: &str, strict: bool) -> Result<bool> {
        self.form.contains_error_with_message(message, strict)
    }
}

impl SymfonyPage for UpdatePage {
    fn name(&self) -> &'static str {
        "section update page"
    }

    fn route(&self) -> &'static Route {
        &routes::SECTION_UPDATE
    }

    fn session(&self) -> &Session {
        &self.form.session
    }
}
