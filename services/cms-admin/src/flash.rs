//! One-shot flash notifications kept in the browser session

use axum::http::StatusCode;
use cms_core::NotificationType;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{error, warn};

const SESSION_KEY_FLASH: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flash {
    Created,
    Updated,
    Deleted,
}

impl Flash {
    pub fn kind(self) -> NotificationType {
        match self {
            Flash::Created | Flash::Updated | Flash::Deleted => NotificationType::Success,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::Created => "Section has been successfully created.",
            Flash::Updated => "Section has been successfully updated.",
            Flash::Deleted => "Section has been successfully deleted.",
        }
    }

    /// Queues the notification for the next rendered page.
    pub async fn push(self, session: &Session) -> Result<(), StatusCode> {
        session.insert(SESSION_KEY_FLASH, self).await.map_err(|e| {
            error!(error = %e, "failed to store flash in session");
            StatusCode::INTERNAL_SERVER_ERROR
        })
    }

    /// Removes and returns the pending notification, if any.
    pub async fn take(session: &Session) -> Option<Self> {
        session
            .remove::<Flash>(SESSION_KEY_FLASH)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to read flash from session");
                None
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn flash_is_read_once() {
        let session = session();
        Flash::Deleted.push(&session).await.unwrap();

        assert_eq!(Flash::take(&session).await, Some(Flash::Deleted));
        assert_eq!(Flash::take(&session).await, None);
    }

    #[tokio::test]
    async fn later_flash_replaces_pending_one() {
        let session = session();
        Flash::Created.push(&session).await.unwrap();
        Flash::Updated.push(&session).await.unwrap();

        assert_eq!(Flash::take(&session).await, Some(Flash::Updated));
    }

    #[test]
    fn every_flash_is_a_success() {
        for flash in [Flash::Created, Flash::Updated, Flash::Deleted] {
            assert_eq!(flash.kind(), NotificationType::Success);
            assert!(flash.message().starts_with("Section has been successfully"));
        }
    }
}
