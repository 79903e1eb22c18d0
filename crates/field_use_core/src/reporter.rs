//! FieldUseReporter: the one service behind the admin page.
//!
//! Built once at startup from injected ports and shared through router
//! state. There is no global instance.

use std::sync::Arc;

use crate::{
    ports::{FieldUseStore, LinkResolver, PluginProbe, Result},
    principal::MANAGE_OPTIONS,
    types::{FieldName, FieldUse, FieldUseReport, MenuEntry, ReportRow},
};

/// Admin menu registration for the report page.
pub const REPORTER_MENU: MenuEntry = MenuEntry {
    slug: "check-acf-field-use",
    page_title: "Check ACF Field Use",
    menu_title: "Check ACF Field Use",
    capability: MANAGE_OPTIONS,
    icon: "dashicons-list-view",
    position: 99,
};

/// Action name of the form submission; also the nonce action.
pub const SUBMIT_ACTION: &str = "check_acf_page_use";

pub struct FieldUseReporter {
    store: Arc<dyn FieldUseStore>,
    links: Arc<dyn LinkResolver>,
    probe: Arc<dyn PluginProbe>,
}

impl FieldUseReporter {
    pub fn new(
        store: Arc<dyn FieldUseStore>,
        links: Arc<dyn LinkResolver>,
        probe: Arc<dyn PluginProbe>,
    ) -> Self {
        Self {
            store,
            links,
            probe,
        }
    }

    /// Raw distinct matches for `field`. Store errors propagate unchanged.
    pub async fn lookup(&self, field: &FieldName) -> Result<Vec<FieldUse>> {
        let uses = self.store.find_field_uses(field).await?;
        tracing::debug!(field = %field, matches = uses.len(), "field-use lookup");
        Ok(uses)
    }

    pub async fn report(&self, field: &FieldName) -> Result<FieldUseReport> {
        let rows: Vec<ReportRow> = self
            .lookup(field)
            .await?
            .into_iter()
            .map(|u| ReportRow {
                post_id: u.post_id,
                edit_link: self.links.edit_link(u.post_id),
                permalink: self.links.permalink(u.post_id),
                title: u.post_title,
                value: u.meta_value,
            })
            .collect();

        Ok(FieldUseReport {
            field: field.clone(),
            count: rows.len(),
            rows,
        })
    }

    /// Whether the custom-fields framework looks active. Only drives a
    /// warning banner, so a failed probe is logged and reported as inactive.
    pub async fn custom_fields_active(&self) -> bool {
        match self.probe.custom_fields_active().await {
            Ok(active) => active,
            Err(e) => {
                tracing::warn!("custom-fields plugin probe failed: {e}");
                false
            }
        }
    }
}
