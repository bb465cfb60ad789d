//! # CMS Behat
//!
//! Step operations for the section admin screen, plus the scenario-scoped
//! storage they use to hand entities from one step to the next.

pub use cms_core;
pub use cms_pages;

pub mod context;
pub mod setup;
pub mod storage;

pub use context::{SectionContext, SECTION_KEY};
pub use setup::SectionSetupContext;
pub use storage::SharedStorage;
