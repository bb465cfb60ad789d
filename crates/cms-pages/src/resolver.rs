//! Current page resolution
//!
//! Field-filling and assertion steps are shared between the listing and both
//! forms, so they act on whichever candidate the session is showing.

use std::sync::Arc;

use cms_core::{CmsError, Result, SectionField};
use tracing::debug;

use crate::create::CreatePage;
use crate::index::IndexPage;
use crate::page::SymfonyPage;
use crate::session::Session;
use crate::update::UpdatePage;

#[derive(Debug, Clone, Copy)]
pub enum CurrentPage<'a> {
    Index(&'a IndexPage),
    Create(&'a CreatePage),
    Update(&'a UpdatePage),
}

impl<'a> CurrentPage<'a> {
    pub fn page(&self) -> &'a dyn SymfonyPage {
        match *self {
            CurrentPage::Index(page) => page as &dyn SymfonyPage,
            CurrentPage::Create(page) => page as &dyn SymfonyPage,
            CurrentPage::Update(page) => page as &dyn SymfonyPage,
        }
    }

    pub fn name(&self) -> &'static str {
        self.page().name()
    }

    pub fn fill_field(&self, field: SectionField, value: &str) -> Result<()> {
        match (self, field) {
            (CurrentPage::Create(page), SectionField::Code) => page.fill_code(value),
            (CurrentPage::Create(page), SectionField::Name) => page.fill_name(value),
            (CurrentPage::Update(page), SectionField::Code) => page.fill_code(value),
            (CurrentPage::Update(page), SectionField::Name) => page.fill_name(value),
            (CurrentPage::Index(_), _) => Err(self.unsupported("fill_field")),
        }
    }

    pub fn contains_error_with_message(&self, message: &str, strict: bool) -> Result<bool> {
        match self {
            CurrentPage::Create(page) => page.contains_error_with_message(message, strict),
            CurrentPage::Update(page) => page.contains_error_with_message(message, strict),
            CurrentPage::Index(_) => Err(self.unsupported("contains_error_with_message")),
        }
    }

    pub fn is_code_disabled(&self) -> Result<bool> {
        match self {
            CurrentPage::Update(page) => page.is_code_disabled(),
            _ => Err(self.unsupported("is_code_disabled")),
        }
    }

    pub fn is_empty(&self) -> Result<bool> {
        match self {
            CurrentPage::Index(page) => page.is_empty(),
            _ => Err(self.unsupported("is_empty")),
        }
    }

    fn unsupported(&self, operation: &'static str) -> CmsError {
        CmsError::UnsupportedOperation {
            page: self.name(),
            operation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CurrentPageResolver {
    session: Arc<Session>,
}

impl CurrentPageResolver {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// First candidate whose route matches the session's current URL.
    pub fn current_page_with_form<'a>(
        &self,
        candidates: impl IntoIterator<Item = CurrentPage<'a>>,
    ) -> Result<CurrentPage<'a>> {
        let url = self.session.current_url().ok_or(CmsError::NoPageLoaded)?;
        let page = candidates
            .into_iter()
            .find(|candidate| candidate.page().route().matches(url.path()))
            .ok_or_else(|| CmsError::PageResolution {
                url: url.to_string(),
            })?;
        debug!(page = page.name(), %url, "Resolved current page");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pages {
        session: Arc<Session>,
        index: IndexPage,
        create: CreatePage,
        update: UpdatePage,
    }

    impl Pages {
        fn new() -> Self {
            let session = Arc::new(Session::new("http://127.0.0.1:8081").unwrap());
            Self {
                index: IndexPage::new(session.clone()),
                create: CreatePage::new(session.clone()),
                update: UpdatePage::new(session.clone()),
                session,
            }
        }

        fn candidates(&self) -> [CurrentPage<'_>; 3] {
            [
                CurrentPage::Index(&self.index),
                CurrentPage::Create(&self.create),
                CurrentPage::Update(&self.update),
            ]
        }
    }

    #[test]
    fn resolves_the_page_matching_the_current_url() {
        let pages = Pages::new();
        let resolver = CurrentPageResolver::new(pages.session.clone());

        pages.session.show("/admin/sections/new", 422, "");
        let page = resolver.current_page_with_form(pages.candidates()).unwrap();
        assert!(matches!(page, CurrentPage::Create(_)));

        pages.session.show("/admin/sections/abc/edit", 200, "");
        let page = resolver.current_page_with_form(pages.candidates()).unwrap();
        assert!(matches!(page, CurrentPage::Update(_)));
    }

    #[test]
    fn no_matching_candidate_is_an_error() {
        let pages = Pages::new();
        let resolver = CurrentPageResolver::new(pages.session.clone());

        pages.session.show("/admin/pages/", 200, "");
        let err = resolver.current_page_with_form(pages.candidates()).unwrap_err();
        assert!(matches!(err, CmsError::PageResolution { url } if url.ends_with("/admin/pages/")));

        pages.session.show("/admin/sections/new", 200, "");
        let err = resolver
            .current_page_with_form([CurrentPage::Index(&pages.index)])
            .unwrap_err();
        assert!(matches!(err, CmsError::PageResolution { .. }));
    }

    #[test]
    fn exact_and_partial_error_matching() {
        let pages = Pages::new();
        pages.session.show(
            "/admin/sections/new",
            422,
            r#"<div class="sylius-validation-error">Code can not be longer than 250 characters.</div>"#,
        );
        let page = CurrentPage::Create(&pages.create);

        assert!(page
            .contains_error_with_message("Code can not be longer than", false)
            .unwrap());
        assert!(!page
            .contains_error_with_message("Code can not be longer than", true)
            .unwrap());
        assert!(page
            .contains_error_with_message("Code can not be longer than 250 characters.", true)
            .unwrap());
    }

    #[test]
    fn role_specific_operations_are_refused_elsewhere() {
        let pages = Pages::new();
        pages.session.show("/admin/sections/", 200, "");

        let err = CurrentPage::Index(&pages.index).is_code_disabled().unwrap_err();
        assert!(matches!(
            err,
            CmsError::UnsupportedOperation { operation: "is_code_disabled", .. }
        ));
        assert!(CurrentPage::Create(&pages.create).is_empty().is_err());
    }

    const EDIT_FORM: &str = r#"<form name="section" method="post" action="/admin/sections/abc/edit">
<label for="section_code">Code</label><input type="text" id="section_code" name="section[code]" value="blog" disabled>
</form>"#;

    #[test]
    fn bare_disabled_attribute_marks_the_code_disabled() {
        let pages = Pages::new();
        let page = CurrentPage::Update(&pages.update);

        pages.session.show("/admin/sections/abc/edit", 200, EDIT_FORM);
        assert!(page.is_code_disabled().unwrap());

        pages.session.show(
            "/admin/sections/abc/edit",
            200,
            &EDIT_FORM.replace(" disabled>", r#" disabled="disabled">"#),
        );
        assert!(page.is_code_disabled().unwrap());

        pages.session.show("/admin/sections/abc/edit", 200, &EDIT_FORM.replace(" disabled>", ">"));
        assert!(!page.is_code_disabled().unwrap());
    }

    #[test]
    fn fields_are_filled_through_the_matching_input() {
        let pages = Pages::new();
        pages.session.show("/admin/sections/abc/edit", 200, EDIT_FORM);

        let page = CurrentPage::Update(&pages.update);
        assert!(page.fill_field(SectionField::Code, "news").is_ok());
        assert!(matches!(
            page.fill_field(SectionField::Name, "News"),
            Err(CmsError::ElementNotFound { .. })
        ));

        let err = CurrentPage::Index(&pages.index)
            .fill_field(SectionField::Name, "News")
            .unwrap_err();
        assert!(matches!(err, CmsError::UnsupportedOperation { operation: "fill_field", .. }));
    }
}
