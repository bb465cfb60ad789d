//! Flash notification severities

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Success,
    Failure,
}

impl NotificationType {
    /// CSS class carried by flash messages of this type
    pub fn css_class(self) -> &'static str {
        match self {
            NotificationType::Success => "positive",
            NotificationType::Failure => "negative",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::Success => f.write_str("success"),
            NotificationType::Failure => f.write_str("failure"),
        }
    }
}
