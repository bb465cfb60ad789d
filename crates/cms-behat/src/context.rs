//! Steps for the section admin screen
//!
//! Each operation backs one step phrase and is a short sequence of page
//! object calls. Assertions report `CmsError::AssertionFailed` with the
//! expectation that was not met.

use std::sync::Arc;

use cms_core::{CmsError, FieldList, NotificationType, Result, Section, SectionField};
use cms_pages::{
    AlphanumericGenerator, CreatePage, CurrentPage, CurrentPageResolver, IndexPage,
    NotificationChecker, RandomStringGenerator, Session, SymfonyPage, UpdatePage,
};
use tracing::{debug, instrument};

use crate::storage::SharedStorage;

/// Shared storage key of the section the scenario is about
pub const SECTION_KEY: &str = "section";

const MIN_LENGTH: usize = 2;

pub struct SectionContext {
    index_page: IndexPage,
    create_page: CreatePage,
    update_page: UpdatePage,
    notification_checker: NotificationChecker,
    current_page_resolver: CurrentPageResolver,
    random_string_generator: Box<dyn RandomStringGenerator>,
}

impl std::fmt::Debug for SectionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionContext")
            .field("session", self.index_page.session())
            .finish_non_exhaustive()
    }
}

impl SectionContext {
    pub fn new(
        index_page: IndexPage,
        create_page: CreatePage,
        update_page: UpdatePage,
        notification_checker: NotificationChecker,
        current_page_resolver: CurrentPageResolver,
        random_string_generator: Box<dyn RandomStringGenerator>,
    ) -> Self {
        Self {
            index_page,
            create_page,
            update_page,
            notification_checker,
            current_page_resolver,
            random_string_generator,
        }
    }

    /// Wires every collaborator to one browser session.
    pub fn for_session(session: Arc<Session>) -> Self {
        Self::with_generator(session, Box::new(AlphanumericGenerator))
    }

    pub fn with_generator(
        session: Arc<Session>,
        random_string_generator: Box<dyn RandomStringGenerator>,
    ) -> Self {
        Self::new(
            IndexPage::new(session.clone()),
            CreatePage::new(session.clone()),
            UpdatePage::new(session.clone()),
            NotificationChecker::new(session.clone()),
            CurrentPageResolver::new(session),
            random_string_generator,
        )
    }

    pub async fn go_to_sections_page(&self) -> Result<()> {
        self.index_page.open(&[]).await
    }

    pub async fn go_to_create_section_page(&self) -> Result<()> {
        self.create_page.open(&[]).await
    }

    #[instrument(skip_all)]
    pub async fn delete_this_section(&self, storage: &SharedStorage) -> Result<()> {
        let section = storage.get::<Section>(SECTION_KEY)?;
        self.index_page.delete_section(section.code()).await
    }

    #[instrument(skip_all)]
    pub async fn want_to_edit_this_section(&self, storage: &SharedStorage) -> Result<()> {
        let section = storage.get::<Section>(SECTION_KEY)?;
        let id = section.id().to_string();
        self.update_page.open(&[("id", id.as_str())]).await
    }

    pub fn fill_code_with(&self, code: &str) -> Result<()> {
        self.resolve_current_page()?
            .fill_field(SectionField::Code, code)
    }

    pub fn fill_name_with(&self, name: &str) -> Result<()> {
        self.resolve_current_page()?
            .fill_field(SectionField::Name, name)
    }

    pub async fn add_it(&self) -> Result<()> {
        self.create_page.create().await
    }

    pub async fn save_changes(&self) -> Result<()> {
        self.update_page.save_changes().await
    }

    /// Fills every listed field with its own freshly generated value.
    pub fn fill_fields_with_characters(&self, fields: &FieldList, length: usize) -> Result<()> {
        for field in fields {
            let value = self.random_string_generator.generate(length);
            debug!(%field, length, "Filling field with generated value");
            self.resolve_current_page()?.fill_field(field, &value)?;
        }
        Ok(())
    }

    pub fn should_be_notified_that_fields_cannot_be_blank(&self, fields: &FieldList) -> Result<()> {
        for field in fields {
            self.expect_error(&format!("{field} cannot be blank."), true)?;
        }
        Ok(())
    }

    pub fn should_be_notified_that_fields_are_too_short(&self, fields: &FieldList) -> Result<()> {
        for field in fields {
            self.expect_error(
                &format!("{field} must be at least {MIN_LENGTH} characters long."),
                true,
            )?;
        }
        Ok(())
    }

    /// Only the message prefix is compared; the limit it names is not.
    pub fn should_be_notified_that_fields_are_too_long(&self, fields: &FieldList) -> Result<()> {
        for field in fields {
            self.expect_error(&format!("{field} can not be longer than"), false)?;
        }
        Ok(())
    }

    pub fn should_be_notified_that_there_is_already_an_existing_section_with_code(
        &self,
    ) -> Result<()> {
        self.expect_error("There is an existing section with this code.", false)
    }

    pub fn should_be_notified_that_new_section_has_been_created(&self) -> Result<()> {
        self.notification_checker.check_notification(
            "Section has been successfully created.",
            NotificationType::Success,
        )
    }

    pub fn should_be_notified_that_the_section_has_been_deleted(&self) -> Result<()> {
        self.notification_checker.check_notification(
            "Section has been successfully deleted.",
            NotificationType::Success,
        )
    }

    pub fn should_be_notified_that_the_section_has_been_updated(&self) -> Result<()> {
        self.notification_checker.check_notification(
            "Section has been successfully updated.",
            NotificationType::Success,
        )
    }

    pub fn the_code_field_should_be_disabled(&self) -> Result<()> {
        ensure(
            self.resolve_current_page()?.is_code_disabled()?,
            "the code field to be disabled",
        )
    }

    pub fn should_see_empty_list_of_sections(&self) -> Result<()> {
        ensure(
            self.resolve_current_page()?.is_empty()?,
            "an empty list of sections",
        )
    }

    pub fn section_should_appear_in_the_list(&self, code: &str) -> Result<()> {
        ensure(
            self.index_page.has_section_with_code(code)?,
            format!("section '{code}' in the list"),
        )
    }

    fn expect_error(&self, message: &str, strict: bool) -> Result<()> {
        let found = self
            .resolve_current_page()?
            .contains_error_with_message(message, strict)?;
        let mode = if strict { "" } else { "containing " };
        ensure(found, format!("a validation error {mode}'{message}'"))
    }

    fn resolve_current_page(&self) -> Result<CurrentPage<'_>> {
        self.current_page_resolver.current_page_with_form([
            CurrentPage::Index(&self.index_page),
            CurrentPage::Create(&self.create_page),
            CurrentPage::Update(&self.update_page),
        ])
    }
}

fn ensure(condition: bool, expectation: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(CmsError::assertion(expectation))
    }
}
