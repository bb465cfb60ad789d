use std::sync::Arc;

use cms_core::{routes, CmsError, Result, Route};
use tracing::{info, instrument};

use crate::html::{Element, Tag};
use crate::page::SymfonyPage;
use crate::session::Session;

const EMPTY_LISTING: &str = "There are no results to display";

/// Listing of all sections with per-row delete buttons.
#[derive(Debug, Clone)]
pub struct IndexPage {
    session: Arc<Session>,
}

impl IndexPage {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Presses the delete button on the row showing `code`.
    #[instrument(skip(self))]
    pub async fn delete_section(&self, code: &str) -> Result<()> {
        let row = self
            .row_with_code(code)?
            .ok_or_else(|| self.missing(format!("row with code '{code}'")))?;
        let form = row
            .find_all(Tag::Form)
            .into_iter()
            .next()
            .ok_or_else(|| self.missing(format!("delete button for '{code}'")))?;
        self.session.submit(&form).await?;
        info!("Deleted section '{}' from the listing", code);
        Ok(())
    }

    pub fn is_empty(&self) -> Result<bool> {
        let document = self.session.document()?;
        Ok(document
            .find_all(Tag::Div)
            .iter()
            .any(|element| element.has_class("message") && element.text().contains(EMPTY_LISTING)))
    }

    pub fn has_section_with_code(&self, code: &str) -> Result<bool> {
        Ok(self.row_with_code(code)?.is_some())
    }

    pub fn count_items(&self) -> Result<usize> {
        Ok(self.rows()?.len())
    }

    fn rows(&self) -> Result<Vec<Element>> {
        let document = self.session.document()?;
        Ok(document
            .find_all(Tag::Row)
            .into_iter()
            .filter(|row| row.has_class("item"))
            .collect())
    }

    fn row_with_code(&self, code: &str) -> Result<Option<Element>> {
        Ok(self.rows()?.into_iter().find(|row| {
            row.find_all(Tag::Cell)
                .iter()
                .any(|cell| cell.has_class("code") && cell.text() == code)
        }))
    }

    fn missing(&self, element: String) -> CmsError {
        CmsError::ElementNotFound {
            page: self.name().to_string(),
            element,
        }
    }
}

impl SymfonyPage for IndexPage {
    fn name(&self) -> &'static str {
        "section index page"
    }

    fn route(&self) -> &'static Route {
        &routes::SECTION_INDEX
    }

    fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<table><thead><tr><th>Code</th></tr></thead><tbody>
<tr class="item" data-code="blog"><td class="code">blog</td><td class="name">Blog</td><td><form method="post" action="/admin/sections/1/delete"><button type="submit">Delete</button></form></td></tr>
<tr class="item" data-code="faq"><td class="code">faq</td><td class="name">blog</td><td><form method="post" action="/admin/sections/2/delete"><button type="submit">Delete</button></form></td></tr>
</tbody></table>"#;

    fn page_showing(html: &str) -> IndexPage {
        let session = Arc::new(Session::new("http://127.0.0.1:8081").unwrap());
        session.show("/admin/sections/", 200, html);
        IndexPage::new(session)
    }

    #[test]
    fn rows_are_matched_on_the_code_column() {
        let page = page_showing(LISTING);
        assert_eq!(page.count_items().unwrap(), 2);
        assert!(page.has_section_with_code("faq").unwrap());
        assert!(!page.has_section_with_code("Blog").unwrap());
        assert!(!page.is_empty().unwrap());
    }

    #[test]
    fn empty_listing_notice() {
        let page = page_showing(
            r#"<div class="ui icon info message">There are no results to display</div>"#,
        );
        assert!(page.is_empty().unwrap());
        assert_eq!(page.count_items().unwrap(), 0);
    }

    #[tokio::test]
    async fn deleting_an_unlisted_section_fails_before_any_request() {
        let page = page_showing(LISTING);
        let err = page.delete_section("news").await.unwrap_err();
        assert!(matches!(err, CmsError::ElementNotFound { .. }));
    }

    #[test]
    fn resolves_as_open_on_its_route() {
        let page = page_showing(LISTING);
        assert!(page.is_open());
        assert!(page.verify().is_ok());
    }
}
