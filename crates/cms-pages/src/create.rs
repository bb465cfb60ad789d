use std::sync::Arc;

use cms_core::{routes, Result, Route, SectionField};
use tracing::instrument;

use crate::page::{SectionForm, SymfonyPage};
use crate::session::Session;

/// Section creation form.
pub struct CreatePage {
    form: SectionForm,
}

impl std::fmt::Debug for CreatePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatePage").finish_non_exhaustive()
    }
}

impl CreatePage {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            form: SectionForm { session },
        }
    }

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
    pub async fn create(&self) -> Result<()> {
        self.form.submit(self.name()).await
    }

    pub fn contains_error_with_message(&self, message: &str, strict: bool) -> Result<bool> {
        self.form.contains_error_with_message(message, strict)
    }
}

impl SymfonyPage for CreatePage {
    fn name(&self) -> &'static str {
        "section create page"
    }

    fn route(&self) -> &'static Route {
        &routes::SECTION_CREATE
    }

    fn session(&self) -> &Session {
        &self.form.session
    }
}
