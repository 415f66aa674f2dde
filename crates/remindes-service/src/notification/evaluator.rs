//! Pure due-date resolution and classification.
//!
//! Nothing here touches a store, so every rule is unit-testable against
//! a fixed "today".

use chrono::NaiveDate;

use remindes_entity::item::Item;
use remindes_entity::user::User;

/// Dynamic attribute keys checked for a due date, in priority order.
pub const DYNAMIC_DUE_DATE_KEYS: [&str; 2] = ["expiration_date", "renewal_date"];

/// Where an item stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// Due today or within the lead window.
    DueSoon {
        /// Days from today until the due date (0 = due today).
        days_until: i64,
    },
    /// The due date is in the past.
    Overdue {
        /// Days since the due date (at least 1).
        days_overdue: i64,
    },
    /// Further away than the lead window.
    NotDue,
}

/// Resolve the date an item is due.
///
/// Dynamic attributes win when they hold a parseable `YYYY-MM-DD` date
/// (`expiration_date` before `renewal_date`); otherwise the kind-specific
/// legacy column is used. `None` means the item is inert.
pub fn resolve_due_date(item: &Item) -> Option<NaiveDate> {
    DYNAMIC_DUE_DATE_KEYS
        .iter()
        .filter_map(|key| item.dynamic_str(key))
        .find_map(parse_iso_date)
        .or_else(|| item.legacy_due_date())
}

/// Lead time in days: the item override if set, else the owner's default.
pub fn lead_days(item: &Item, user: &User) -> i64 {
    let days = item
        .reminder_days_before
        .unwrap_or(user.notification_days_before);
    i64::from(days.max(0))
}

/// Classify a due date against today.
pub fn classify(due: NaiveDate, today: NaiveDate, lead_days: i64) -> DueStatus {
    let delta = (due - today).num_days();
    if delta < 0 {
        DueStatus::Overdue {
            days_overdue: -delta,
        }
    } else if delta <= lead_days {
        DueStatus::DueSoon { days_until: delta }
    } else {
        DueStatus::NotDue
    }
}

/// Resolve and classify in one step. `None` for items without a due date.
pub fn evaluate(item: &Item, user: &User, today: NaiveDate) -> Option<(NaiveDate, DueStatus)> {
    let due = resolve_due_date(item)?;
    Some((due, classify(due, today, lead_days(item, user))))
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use remindes_entity::item::ItemKind;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn document(user: &User) -> Item {
        Item::new(user.id, "Passport", ItemKind::Document)
    }

    #[test]
    fn test_dynamic_date_wins_over_legacy_column() {
        let user = User::new(None, None);
        let mut item = document(&user);
        item.expiration_date = Some(date(2030, 1, 1));
        item.dynamic_fields = Some(json!({ "expiration_date": "2024-06-05" }));
        assert_eq!(resolve_due_date(&item), Some(date(2024, 6, 5)));
    }

    #[test]
    fn test_legacy_column_used_without_dynamic_value() {
        let user = User::new(None, None);
        let mut item = document(&user);
        item.expiration_date = Some(date(2030, 1, 1));
        assert_eq!(resolve_due_date(&item), Some(date(2030, 1, 1)));

        item.dynamic_fields = Some(json!({ "issuer": "Gov" }));
        assert_eq!(resolve_due_date(&item), Some(date(2030, 1, 1)));
    }

    #[test]
    fn test_expiration_key_checked_before_renewal_key() {
        let user = User::new(None, None);
        let mut item = Item::new(user.id, "Gym", ItemKind::Subscription);
        item.dynamic_fields = Some(json!({
            "renewal_date": "2024-07-01",
            "expiration_date": "2024-08-01",
        }));
        assert_eq!(resolve_due_date(&item), Some(date(2024, 8, 1)));
    }

    #[test]
    fn test_unparseable_dynamic_value_falls_through() {
        let user = User::new(None, None);
        let mut item = Item::new(user.id, "Gym", ItemKind::Subscription);
        item.renewal_date = Some(date(2024, 9, 1));
        item.dynamic_fields = Some(json!({
            "expiration_date": "next tuesday",
            "renewal_date": 20240701,
        }));
        assert_eq!(resolve_due_date(&item), Some(date(2024, 9, 1)));

        item.dynamic_fields = Some(json!({
            "expiration_date": "garbage",
            "renewal_date": "2024-07-01",
        }));
        assert_eq!(resolve_due_date(&item), Some(date(2024, 7, 1)));
    }

    #[test]
    fn test_padded_dynamic_value_is_not_a_date() {
        let user = User::new(None, None);
        let mut item = document(&user);
        item.expiration_date = Some(date(2030, 1, 1));
        item.dynamic_fields = Some(json!({ "expiration_date": "2024-06-05 " }));
        assert_eq!(resolve_due_date(&item), Some(date(2030, 1, 1)));
    }

    #[test]
    fn test_kind_selects_legacy_column() {
        let user = User::new(None, None);
        let mut doc = document(&user);
        doc.renewal_date = Some(date(2024, 1, 1));
        assert_eq!(resolve_due_date(&doc), None);

        let mut other = Item::new(user.id, "Warranty", ItemKind::Other);
        other.expiration_date = Some(date(2024, 1, 1));
        assert_eq!(resolve_due_date(&other), None);
    }

    #[test]
    fn test_classification_boundaries() {
        let today = date(2024, 6, 1);
        assert_eq!(
            classify(date(2024, 6, 8), today, 7),
            DueStatus::DueSoon { days_until: 7 }
        );
        assert_eq!(classify(date(2024, 6, 9), today, 7), DueStatus::NotDue);
        assert_eq!(
            classify(date(2024, 5, 31), today, 7),
            DueStatus::Overdue { days_overdue: 1 }
        );
        assert_eq!(
            classify(today, today, 0),
            DueStatus::DueSoon { days_until: 0 }
        );
    }

    #[test]
    fn test_item_override_beats_user_default() {
        let mut user = User::new(None, None);
        user.notification_days_before = 7;
        let mut item = document(&user);
        assert_eq!(lead_days(&item, &user), 7);

        item.reminder_days_before = Some(30);
        assert_eq!(lead_days(&item, &user), 30);

        item.reminder_days_before = Some(-3);
        assert_eq!(lead_days(&item, &user), 0);
    }

    #[test]
    fn test_evaluate_skips_inert_items() {
        let user = User::new(None, None);
        let item = document(&user);
        assert!(evaluate(&item, &user, date(2024, 6, 1)).is_none());
    }
}
