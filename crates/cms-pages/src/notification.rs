use std::sync::Arc;

use cms_core::{CmsError, NotificationType, Result};
use tracing::debug;

use crate::html::Tag;
use crate::session::Session;

/// Looks for a flash message of the expected type on the current page.
#[derive(Debug, Clone)]
pub struct NotificationChecker {
    session: Arc<Session>,
}

impl NotificationChecker {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    pub fn check_notification(&self, message: &str, kind: NotificationType) -> Result<()> {
        let document = self.session.document()?;
        let flashes: Vec<_> = document
            .find_all(Tag::Div)
            .into_iter()
            .filter(|element| element.has_class("sylius-flash-message"))
            .collect();

        if flashes
            .iter()
            .any(|flash| flash.has_class(kind.css_class()) && flash.text().contains(message))
        {
            debug!(%kind, expected = message, "Notification found");
            return Ok(());
        }

        Err(CmsError::NotificationMismatch {
            expected: message.to_string(),
            kind: kind.to_string(),
            found: flashes.iter().map(|flash| flash.text()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_showing(html: &str) -> NotificationChecker {
        let session = Arc::new(Session::new("http://127.0.0.1:8081").unwrap());
        session.show("/admin/sections/", 200, html);
        NotificationChecker::new(session)
    }

    #[test]
    fn matches_type_and_text() {
        let checker = checker_showing(
            r#"<div class="sylius-flash-message ui icon positive message">Section has been successfully deleted.</div>"#,
        );
        assert!(checker
            .check_notification("Section has been successfully deleted.", NotificationType::Success)
            .is_ok());

        let err = checker
            .check_notification("Section has been successfully deleted.", NotificationType::Failure)
            .unwrap_err();
        assert!(matches!(err, CmsError::NotificationMismatch { found, .. } if found.len() == 1));

        assert!(checker
            .check_notification("Section has been successfully created.", NotificationType::Success)
            .is_err());
    }

    #[test]
    fn missing_notification_fails() {
        let checker = checker_showing("<p>Nothing here</p>");
        assert!(matches!(
            checker.check_notification("Anything", NotificationType::Success),
            Err(CmsError::NotificationMismatch { found, .. }) if found.is_empty()
        ));
    }
}
