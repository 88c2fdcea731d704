//! HTML template rendering for outbound e-mail.
//!
//! Templates live in `templates/emails/` and are compiled into the binary.
//! The `.html` suffix turns on minijinja's HTML auto-escaping, so values
//! submitted through public forms are never injected as markup.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    (
        "emails/contact_admin.html",
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/emails/contact_admin.html"
        )),
    ),
    (
        "emails/contact_confirmation.html",
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/emails/contact_confirmation.html"
        )),
    ),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in EMBEDDED_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a named template with a serializable context.
///
/// ```ignore
/// let html = render_template("emails/contact_admin.html", minijinja::context! { name => "Budi" })?;
/// ```
pub fn render_template(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}
