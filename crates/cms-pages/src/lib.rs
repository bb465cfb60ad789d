//! # CMS Pages
//!
//! Page objects for the section admin screen, driven by an HTTP session
//! that behaves like a headless browser.

pub use cms_core;

mod create;
pub mod html;
mod index;
mod notification;
mod page;
mod random;
mod resolver;
mod session;
mod update;

pub use create::CreatePage;
pub use index::IndexPage;
pub use notification::NotificationChecker;
pub use page::SymfonyPage;
pub use random::{AlphanumericGenerator, RandomStringGenerator};
pub use resolver::{CurrentPage, CurrentPageResolver};
pub use session::{Document, Session};
pub use update::UpdatePage;
