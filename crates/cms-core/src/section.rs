//! Section entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SectionId = Uuid;

/// A content block grouping, identified by a unique code that never changes
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub code: String,
    pub name: String,
}

impl Section {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
