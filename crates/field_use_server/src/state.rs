//! Shared application state

use std::sync::Arc;

use field_use_core::nonce::NonceIssuer;
use field_use_core::{FieldUseReporter, REPORTER_MENU};

use crate::menu::AdminMenu;
use crate::render::PageRenderer;

/// Shared application state for the admin routes
#[derive(Clone)]
pub struct AppState {
    pub reporter: Arc<FieldUseReporter>,
    pub nonces: Arc<NonceIssuer>,
    pub pages: Arc<PageRenderer>,
    pub menu: Arc<AdminMenu>,
}

impl AppState {
    /// Wire the reporter in and register its menu entry.
    pub fn new(reporter: Arc<FieldUseReporter>, nonces: NonceIssuer) -> anyhow::Result<Self> {
        let mut menu = AdminMenu::default();
        menu.register(REPORTER_MENU);

        Ok(Self {
            reporter,
            nonces: Arc::new(nonces),
            pages: Arc::new(PageRenderer::new()?),
            menu: Arc::new(menu),
        })
    }
}
