//! HTML and plain-text bodies for expiry mail.

use chrono::NaiveDate;

/// Which notice is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The item is due within its lead window.
    ExpiringSoon,
    /// The item's due date has passed.
    Expired,
}

/// Everything an expiry email needs.
#[derive(Debug, Clone)]
pub struct ExpiryNotice<'a> {
    /// Notice variant.
    pub kind: NoticeKind,
    /// Greeting name.
    pub user_name: &'a str,
    /// Item display name.
    pub item_name: &'a str,
    /// Capitalized item kind, e.g. `"Document"`.
    pub item_label: &'a str,
    /// The resolved due date.
    pub due_date: NaiveDate,
    /// Days remaining (expiring soon) or days overdue (expired).
    pub days: i64,
}

/// A rendered email, not yet addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text body.
    pub plain: String,
}

/// `"1 day"`, `"3 days"`.
pub fn day_count(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Long date format used in mail bodies, e.g. `"June 08, 2024"`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

struct Style {
    frame: &'static str,
    alert_bg: &'static str,
    alert_border: &'static str,
    alert_text: &'static str,
    counter_color: &'static str,
    alert_title: &'static str,
    lead: &'static str,
    closing: &'static str,
    plain_label: &'static str,
    plain_action: &'static str,
}

const WARNING: Style = Style {
    frame: "linear-gradient(135deg, #14b8a6 0%, #06b6d4 100%)",
    alert_bg: "#fef3c7",
    alert_border: "#f59e0b",
    alert_text: "#92400e",
    counter_color: "#f59e0b",
    alert_title: "⚠️ Expiry Warning",
    lead: "This is a friendly reminder about an upcoming expiry:",
    closing: "Please take action to renew or update this item before it expires.",
    plain_label: "Days Remaining",
    plain_action: "Please take action to renew or update this item.",
};

const EXPIRED: Style = Style {
    frame: "linear-gradient(135deg, #ef4444 0%, #dc2626 100%)",
    alert_bg: "#fee2e2",
    alert_border: "#dc2626",
    alert_text: "#991b1b",
    counter_color: "#dc2626",
    alert_title: "❌ Item Expired",
    lead: "This is an urgent reminder about an expired item:",
    closing: "Please renew or update this item as soon as possible.",
    plain_label: "Days Overdue",
    plain_action: "Please take immediate action to renew or update this item.",
};

impl ExpiryNotice<'_> {
    /// Render subject, HTML and plain text. Links point into `frontend_url`.
    pub fn render(&self, frontend_url: &str) -> RenderedEmail {
        let base = frontend_url.trim_end_matches('/');
        let date = long_date(self.due_date);
        let days = day_count(self.days);
        let name = escape_html(self.item_name);
        let user = escape_html(self.user_name);
        let label = escape_html(self.item_label);

        let (style, subject, plain_intro, alert_line, counter) = match self.kind {
            NoticeKind::ExpiringSoon => (
                &WARNING,
                format!("⚠️ {} expiring in {}", self.item_name, days),
                format!(
                    "This is a reminder that your {} \"{}\" is expiring soon.",
                    self.item_label, self.item_name
                ),
                format!("Your {label} is expiring soon and needs your attention."),
                format!("{days} remaining"),
            ),
            NoticeKind::Expired => (
                &EXPIRED,
                format!("❌ {} has expired", self.item_name),
                format!(
                    "This is an urgent reminder that your {} \"{}\" has expired.",
                    self.item_label, self.item_name
                ),
                format!("Your {label} has expired and requires immediate attention."),
                format!("Expired {days} ago"),
            ),
        };

        let plain = format!(
            "Hello {user_name},\n\n{plain_intro}\n\nExpiry Date: {date}\n{plain_label}: {days}\n\n\
             {plain_action}\n\n---\nRemindes - Never miss an important date\n",
            user_name = self.user_name,
            plain_label = style.plain_label,
            plain_action = style.plain_action,
        );

        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head>
<style>
  body {{ font-family: -apple-system, 'Segoe UI', Roboto, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; }}
  .frame {{ background: {frame}; border-radius: 16px; padding: 1px; margin: 20px 0; }}
  .content {{ background: white; border-radius: 15px; padding: 30px; }}
  .alert {{ background: {alert_bg}; border-left: 4px solid {alert_border}; padding: 20px; border-radius: 8px; margin: 20px 0; color: {alert_text}; }}
  .details {{ background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0; }}
  .counter {{ font-size: 32px; font-weight: bold; color: {counter_color}; text-align: center; margin: 20px 0; }}
  .button {{ display: inline-block; background: linear-gradient(135deg, #14b8a6 0%, #06b6d4 100%); color: white; padding: 12px 30px; border-radius: 8px; text-decoration: none; font-weight: 600; }}
  .footer {{ text-align: center; color: #6b7280; font-size: 14px; margin-top: 30px; padding-top: 20px; border-top: 1px solid #e5e7eb; }}
</style>
</head>
<body>
<div class="frame"><div class="content">
  <h1 style="text-align: center;">✨ Remindes</h1>
  <div class="alert"><strong>{alert_title}</strong><p style="margin: 0;">{alert_line}</p></div>
  <p>Hello <strong>{user}</strong>,</p>
  <p>{lead}</p>
  <div class="details">
    <p><strong>Item Name:</strong> {name}</p>
    <p><strong>Type:</strong> {label}</p>
    <p><strong>Expiry Date:</strong> {date}</p>
  </div>
  <div class="counter">{counter}</div>
  <p style="text-align: center;"><a href="{base}/dashboard" class="button">View in Dashboard</a></p>
  <p style="color: #6b7280;">{closing}</p>
  <div class="footer">
    <p>You're receiving this email because you have email notifications enabled in Remindes.</p>
    <p><a href="{base}/settings" style="color: #14b8a6;">Manage notification preferences</a></p>
  </div>
</div></div>
</body>
</html>
"#,
            frame = style.frame,
            alert_bg = style.alert_bg,
            alert_border = style.alert_border,
            alert_text = style.alert_text,
            counter_color = style.counter_color,
            alert_title = style.alert_title,
            lead = style.lead,
            closing = style.closing,
        );

        RenderedEmail {
            subject,
            html,
            plain,
        }
    }
}

/// Minimal escaping for user-supplied text placed into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
