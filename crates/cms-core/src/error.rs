//! Error types for the section admin suite

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CmsError>;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("Section not found: {section_id}")]
    SectionNotFound { section_id: String },

    #[error("There is an existing section with code '{code}'")]
    DuplicateCode { code: String },

    #[error("Unknown section field: '{name}'")]
    UnknownField { name: String },

    #[error("Invalid field list: '{input}'")]
    InvalidFieldList { input: String },

    #[error("Nothing stored in shared storage under '{key}'")]
    MissingSharedValue { key: String },

    #[error("Shared storage value under '{key}' is not a {expected}")]
    SharedValueTypeMismatch { key: String, expected: &'static str },

    #[error("No matching page found for {url}")]
    PageResolution { url: String },

    #[error("Page {page} is not open (current url: {url}, status: {status})")]
    PageNotOpen {
        page: &'static str,
        url: String,
        status: u16,
    },

    #[error("No page has been loaded in the session yet")]
    NoPageLoaded,

    #[error("Element {element} not found on {page}")]
    ElementNotFound { page: String, element: String },

    #[error("Page {page} does not support {operation}")]
    UnsupportedOperation {
        page: &'static str,
        operation: &'static str,
    },

    #[error("Missing parameter '{parameter}' for route {route}")]
    MissingRouteParameter {
        route: &'static str,
        parameter: String,
    },

    #[error("Expected {expectation}")]
    AssertionFailed { expectation: String },

    #[error("Expected {kind} notification containing '{expected}', found {found:?}")]
    NotificationMismatch {
        expected: String,
        kind: String,
        found: Vec<String>,
    },

    #[error("Browser driver failed: {reason}")]
    Driver { reason: String },
}

impl CmsError {
    pub fn assertion(expectation: impl Into<String>) -> Self {
        Self::AssertionFailed {
            expectation: expectation.into(),
        }
    }

    pub fn driver(reason: impl std::fmt::Display) -> Self {
        Self::Driver {
            reason: reason.to_string(),
        }
    }
}
