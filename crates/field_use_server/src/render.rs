//! Handlebars page rendering.
//!
//! Every `{{value}}` is HTML-escaped by the default escape function, so
//! titles, field values and links from the database are safe to emit. Link
//! targets come from `SiteLinks`, which only accepts http(s) site URLs.

use anyhow::anyhow;
use field_use_core::{FieldUseError, FieldUseReport};
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;

use crate::menu::MenuLink;

const FIELD_USE_PAGE: &str = "field_use_page";
const ADMIN_INDEX: &str = "admin_index";

/// View model for the report page.
#[derive(Debug, Serialize)]
pub struct FieldUsePage<'a> {
    pub page_title: &'static str,
    pub menu: Vec<MenuLink>,
    pub custom_fields_active: bool,
    pub form_action: String,
    pub submit_action: &'static str,
    /// Pre-filled, sanitized value of the field input.
    pub field_value: String,
    pub no_field: bool,
    pub report: Option<&'a FieldUseReport>,
}

/// View model for the admin landing page.
#[derive(Debug, Serialize)]
pub struct AdminIndexPage {
    pub page_title: &'static str,
    pub user: String,
    pub menu: Vec<MenuLink>,
}

pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_partial("admin_header", include_str!("../templates/admin_header.hbs"))?;
        handlebars.register_partial("admin_footer", include_str!("../templates/admin_footer.hbs"))?;
        handlebars.register_template_string(
            FIELD_USE_PAGE,
            include_str!("../templates/field_use_page.hbs"),
        )?;
        handlebars.register_template_string(ADMIN_INDEX, include_str!("../templates/admin_index.hbs"))?;
        Ok(Self { handlebars })
    }

    pub fn field_use_page(&self, page: &FieldUsePage<'_>) -> Result<String, FieldUseError> {
        self.render(FIELD_USE_PAGE, page)
    }

    pub fn admin_index(&self, page: &AdminIndexPage) -> Result<String, FieldUseError> {
        self.render(ADMIN_INDEX, page)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, FieldUseError> {
        self.handlebars
            .render(name, data)
            .map_err(|e| FieldUseError::Internal(anyhow!("rendering {name}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_use_core::{FieldName, ReportRow};

    fn page<'a>(report: Option<&'a FieldUseReport>) -> FieldUsePage<'a> {
        FieldUsePage {
            page_title: "Check ACF Field Use",
            menu: vec![MenuLink {
                title: "Check ACF Field Use",
                icon: "dashicons-list-view",
                href: "/admin/check-acf-field-use".into(),
            }],
            custom_fields_active: true,
            form_action: "/admin/admin-post/check_acf_page_use?page=check-acf-field-use&nonce=abc".into(),
            submit_action: "check_acf_page_use",
            field_value: String::new(),
            no_field: false,
            report,
        }
    }

    fn row(id: u64, title: &str, value: &str) -> ReportRow {
        ReportRow {
            post_id: id,
            title: title.into(),
            edit_link: format!("https://example.com/wp-admin/post.php?post={id}&action=edit"),
            permalink: format!("https://example.com/?p={id}"),
            value: value.into(),
        }
    }

    #[test]
    fn renders_count_and_one_row_per_use() {
        let report = FieldUseReport {
            field: FieldName::parse("subtitle").unwrap(),
            count: 2,
            rows: vec![row(1, "About", "Who we are"), row(2, "Contact", "Say hi")],
        };
        let html = PageRenderer::new().unwrap().field_use_page(&page(Some(&report))).unwrap();

        assert!(html.contains("Your field is used 2 times."));
        assert_eq!(html.matches("<tr class=\"field-use-row\">").count(), 2);
        assert!(html.contains(">About</a>"));
        assert!(html.contains("<td>Say hi</td>"));
        assert!(html.contains("<tfoot>"));
    }

    #[test]
    fn escapes_untrusted_values() {
        let report = FieldUseReport {
            field: FieldName::parse("subtitle").unwrap(),
            count: 1,
            rows: vec![row(1, "<script>alert(1)</script>", "\"><img src=x onerror=alert(1)>")],
        };
        let html = PageRenderer::new().unwrap().field_use_page(&page(Some(&report))).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<img src=x"));
    }

    #[test]
    fn no_report_means_no_table() {
        let html = PageRenderer::new().unwrap().field_use_page(&page(None)).unwrap();
        assert!(!html.contains("Field Use Count"));
        assert!(!html.contains("<table"));
        assert!(!html.contains("notice-warning"));
    }

    #[test]
    fn warning_and_notice_flags_render() {
        let mut p = page(None);
        p.custom_fields_active = false;
        p.no_field = true;
        let html = PageRenderer::new().unwrap().field_use_page(&p).unwrap();
        assert!(html.contains("notice-warning"));
        assert!(html.contains("You have to input a field."));
    }

    #[test]
    fn admin_index_lists_menu() {
        let html = PageRenderer::new()
            .unwrap()
            .admin_index(&AdminIndexPage {
                page_title: "Dashboard",
                user: "admin".into(),
                menu: page(None).menu,
            })
            .unwrap();
        assert!(html.contains("href=\"/admin/check-acf-field-use\""));
        assert!(html.contains("Howdy, admin"));
    }
}
