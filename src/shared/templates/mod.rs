//! E-mail templates and their render contexts.

pub mod engine;

pub use engine::{render_template, TemplateError};

use chrono::{DateTime, FixedOffset, Utc};
use minijinja::context;
use uuid::Uuid;

const WIB_OFFSET_SECS: i32 = 7 * 3600;
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Surabaya local time (WIB, UTC+7)
fn to_wib(at: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(WIB_OFFSET_SECS) {
        Some(wib) => at.with_timezone(&wib).format(TIMESTAMP_FORMAT).to_string(),
        None => at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// Fields shared by both contact e-mails
pub struct ContactEmailContext<'a> {
    pub contact_id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub site_url: &'a str,
    pub sent_at: DateTime<Utc>,
}

impl ContactEmailContext<'_> {
    fn message_lines(&self) -> Vec<&str> {
        self.message.lines().collect()
    }
}

/// Notification sent to the site administrator
pub fn render_contact_admin_email(ctx: &ContactEmailContext<'_>) -> Result<String, TemplateError> {
    render_template(
        "emails/contact_admin.html",
        context! {
            contact_id => ctx.contact_id.to_string(),
            name => ctx.name,
            email => ctx.email,
            subject => ctx.subject,
            message_lines => ctx.message_lines(),
            site_url => ctx.site_url,
            sent_at => to_wib(ctx.sent_at),
        },
    )
}

/// Receipt sent back to whoever filled in the contact form
pub fn render_contact_confirmation_email(
    ctx: &ContactEmailContext<'_>,
) -> Result<String, TemplateError> {
    render_template(
        "emails/contact_confirmation.html",
        context! {
            contact_id => ctx.contact_id.to_string(),
            name => ctx.name,
            subject => ctx.subject,
            site_url => ctx.site_url,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample<'a>(message: &'a str, name: &'a str) -> ContactEmailContext<'a> {
        ContactEmailContext {
            contact_id: Uuid::nil(),
            name,
            email: "budi@example.com",
            subject: "Jam besuk",
            message,
            site_url: "https://rs-gis.web.id",
            sent_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 0).unwrap(),
        }
    }

    #[test]
    fn test_admin_email_escapes_user_input() {
        let html = render_contact_admin_email(&sample("<script>x</script>", "Budi")).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_admin_email_keeps_line_breaks() {
        let html = render_contact_admin_email(&sample("baris satu\nbaris dua", "Budi")).unwrap();
        assert!(html.contains("baris satu<br>"));
        assert!(html.contains("baris dua"));
        assert!(html.contains("02-01-2025 10:04"));
    }

    #[test]
    fn test_confirmation_email_mentions_reference() {
        let html = render_contact_confirmation_email(&sample("halo", "Siti")).unwrap();
        assert!(html.contains("Siti"));
        assert!(html.contains(&Uuid::nil().to_string()));
    }
}
