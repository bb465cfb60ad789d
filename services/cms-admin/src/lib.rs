//! # CMS Admin
//!
//! Server-rendered section management screen: listing, creation, edition
//! and deletion, with form validation and flash notifications.

mod flash;
mod handlers;
pub mod validation;
mod views;

use axum::{
    routing::{get, post},
    Router,
};
use cms_core::{endpoints, routes, SectionRepository};
use tokio::net::TcpListener;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::info;

pub use flash::Flash;

pub const SESSION_COOKIE: &str = "cms_session";

#[derive(Clone, Debug, Default)]
pub struct AdminState {
    pub sections: SectionRepository,
}

impl AdminState {
    pub fn new(sections: SectionRepository) -> Self {
        Self { sections }
    }
}

pub fn router(state: AdminState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_secure(false);

    Router::new()
        .route(endpoints::HEALTH, get(handlers::health_check))
        .route(endpoints::API_V1_SECTIONS, get(handlers::list_sections))
        .route(routes::SECTION_INDEX.path, get(handlers::index))
        .route(
            routes::SECTION_CREATE.path,
            get(handlers::create_form).post(handlers::create),
        )
        .route(
            routes::SECTION_UPDATE.path,
            get(handlers::update_form).post(handlers::update),
        )
        .route(routes::SECTION_DELETE.path, post(handlers::delete))
        .layer(session_layer)
        .with_state(state)
}

/// Serves the admin screen on an already bound listener until the task is
/// dropped.
pub async fn serve(listener: TcpListener, state: AdminState) -> std::io::Result<()> {
    info!("CMS admin listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
