//! Admin menu registry. Modules register their entries at startup; pages
//! show only the entries the current principal may open.

use field_use_core::principal::Principal;
use field_use_core::MenuEntry;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct AdminMenu {
    entries: Vec<MenuEntry>,
}

/// A menu entry as rendered into the page navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLink {
    pub title: &'static str,
    pub icon: &'static str,
    pub href: String,
}

impl AdminMenu {
    pub fn register(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
        self.entries.sort_by_key(|e| e.position);
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn links_for(&self, principal: &Principal) -> Vec<MenuLink> {
        self.entries
            .iter()
            .filter(|e| principal.can(e.capability))
            .map(|e| MenuLink {
                title: e.menu_title,
                icon: e.icon,
                href: e.path(),
            })
            .collect()
    }
}
