//! Titles and messages for in-app notifications.

use remindes_entity::notification::NotificationKind;

use remindes_mailer::templates::day_count;

/// Title and body for a notification about `item_name`.
///
/// `noun` is the item's kind noun ("document", "subscription", "item");
/// `days` is days remaining for warnings and days overdue for expired.
pub fn compose(
    kind: NotificationKind,
    item_name: &str,
    noun: &str,
    days: i64,
) -> (String, String) {
    match kind {
        NotificationKind::ExpiryWarning => (
            format!("⚠️ {item_name} expiring soon"),
            format!("Your {noun} '{item_name}' expires in {}.", day_count(days)),
        ),
        NotificationKind::Expired => (
            format!("❌ {item_name} has expired"),
            format!("Your {noun} '{item_name}' expired {} ago.", day_count(days)),
        ),
    }
}
