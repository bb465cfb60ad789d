//! # CMS Core
//!
//! Core types shared by the section admin screen and its acceptance suite.
//!
//! ## Admin screen
//! - Sections identified by a unique, immutable code
//! - Index, create, update and delete pages under `/admin/sections/`
//!
//! ## Acceptance suite
//! - Typed field lists for multi-field step phrases
//! - One error type for precondition, assertion and driver failures

pub mod error;
pub mod field;
pub mod notification;
pub mod repository;
pub mod routes;
pub mod section;

pub use error::{CmsError, Result};
pub use field::{FieldList, SectionField};
pub use notification::NotificationType;
pub use repository::SectionRepository;
pub use routes::Route;
pub use section::{Section, SectionId};

/// Current crate version for compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information for logs
pub const BUILD_INFO: &str = concat!(
    "CMS ",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_NAME"),
    ")"
);

/// Non-page endpoints exposed by the admin service
pub mod endpoints {
    pub const HEALTH: &str = "/health";
    pub const API_V1_SECTIONS: &str = "/api/v1/sections";
}
