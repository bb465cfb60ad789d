//! Page object foundation

use std::sync::Arc;

use async_trait::async_trait;
use cms_core::{CmsError, Result, Route};
use tracing::info;

use crate::html::Tag;
use crate::session::Session;

/// A screen reachable through a named route.
#[async_trait]
pub trait SymfonyPage: Send + Sync {
    /// Name used in errors and logs
    fn name(&self) -> &'static str;

    fn route(&self) -> &'static Route;

    fn session(&self) -> &Session;

    /// Navigates to the route and verifies the page actually rendered.
    async fn open(&self, parameters: &[(&str, &str)]) -> Result<()> {
        let path = self.route().generate(parameters)?;
        self.session().visit(&path).await?;
        self.verify()?;
        info!(page = self.name(), "Opened {}", path);
        Ok(())
    }

    fn verify(&self) -> Result<()> {
        let document = self.session().document()?;
        if document.status() == 200 && self.route().matches(document.url().path()) {
            Ok(())
        } else {
            Err(CmsError::PageNotOpen {
                page: self.name(),
                url: document.url().to_string(),
                status: document.status(),
            })
        }
    }

    /// Whether the session currently displays this page
    fn is_open(&self) -> bool {
        self.session()
            .current_url()
            .is_some_and(|url| self.route().matches(url.path()))
    }
}

/// Behaviour shared by pages that render the section form.
pub(crate) struct SectionForm {
    pub(crate) session: Arc<Session>,
}

impl SectionForm {
    pub(crate) const NAME: &'static str = "section";

    pub(crate) fn fill_field(&self, field: &str, value: &str) -> Result<()> {
        self.session.fill_field(field, value)
    }

    pub(crate) async fn submit(&self, page: &'static str) -> Result<()> {
        let document = self.session.document()?;
        let form = document
            .form_named(Self::NAME)
            .ok_or_else(|| CmsError::ElementNotFound {
                page: page.to_string(),
                element: format!("form '{}'", Self::NAME),
            })?;
        self.session.submit(&form).await
    }

    /// Exact comparison when `strict`, substring match otherwise.
    pub(crate) fn contains_error_with_message(&self, message: &str, strict: bool) -> Result<bool> {
        let document = self.session.document()?;
        Ok(document
            .find_all(Tag::Div)
            .iter()
            .filter(|element| element.has_class("sylius-validation-error"))
            .map(|element| element.text())
            .any(|text| {
                if strict {
                    text == message
                } else {
                    text.contains(message)
                }
            }))
    }

    pub(crate) fn is_field_disabled(&self, page: &'static str, field: &str) -> Result<bool> {
        let document = self.session.document()?;
        let input = document
            .find_field(field)
            .ok_or_else(|| CmsError::ElementNotFound {
                page: page.to_string(),
                element: format!("field '{field}'"),
            })?;
        Ok(input.attribute("disabled").is_some())
    }
}
