//! Handlebars template registry.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Handlebars escapes every `{{value}}` expansion, so user-supplied names and
//! emails are safe to render.

use std::sync::Arc;

use anyhow::anyhow;
use axum::response::Html;
use farmmarket_core::AppError;
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("login", include_str!("../templates/login.hbs")),
    ("register", include_str!("../templates/register.hbs")),
    ("admin_dashboard", include_str!("../templates/admin_dashboard.hbs")),
    ("admin_users", include_str!("../templates/admin_users.hbs")),
    (
        "admin_pending_farmers",
        include_str!("../templates/admin_pending_farmers.hbs"),
    ),
    ("farmer_dashboard", include_str!("../templates/farmer_dashboard.hbs")),
    ("buyer_home", include_str!("../templates/buyer_home.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[
    ("layout_head", include_str!("../templates/partials/layout_head.hbs")),
    ("logout_form", include_str!("../templates/partials/logout_form.hbs")),
];

#[derive(Clone)]
pub struct Views {
    registry: Arc<Handlebars<'static>>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();

        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }

        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, AppError> {
        self.registry
            .render(name, data)
            .map(Html)
            .map_err(|e| AppError::internal(anyhow!("Failed to render template {}: {}", name, e)))
    }
}
