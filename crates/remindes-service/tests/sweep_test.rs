//! End-to-end sweep scenarios against the in-memory store.

mod helpers;

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;

use helpers::{TestApp, at, date};
use remindes_entity::item::{Item, ItemKind};
use remindes_entity::notification::{EmailStatus, NotificationKind};
use remindes_entity::user::User;
use remindes_service::{NotificationService, SweepPolicy};

#[tokio::test]
async fn test_warning_is_deduplicated_for_a_day() {
    let app = TestApp::new();
    let user = app.create_user("Ada");
    app.create_document(&user, "Passport", date(2024, 6, 8));

    let t0 = at(2024, 6, 1);
    let first = app.sweep.run_at(t0).await.unwrap();
    assert_eq!(first.notifications_created, 1);

    let same_day = app.sweep.run_at(t0 + Duration::hours(2)).await.unwrap();
    assert_eq!(same_day.notifications_created, 0);

    let next_day = app.sweep.run_at(t0 + Duration::hours(25)).await.unwrap();
    assert_eq!(next_day.notifications_created, 1);

    let all = app.store.all_notifications();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|n| n.kind == NotificationKind::ExpiryWarning));
    assert_eq!(all[0].message, "Your document 'Passport' expires in 7 days.");
    assert_eq!(all[1].message, "Your document 'Passport' expires in 6 days.");
}

#[tokio::test]
async fn test_expired_is_deduplicated_for_a_week() {
    let app = TestApp::new();
    let user = app.create_user("Ada");
    app.create_document(&user, "Visa", date(2024, 5, 25));

    assert_eq!(
        app.sweep.run_at(at(2024, 6, 1)).await.unwrap().notifications_created,
        1
    );
    assert_eq!(
        app.sweep.run_at(at(2024, 6, 4)).await.unwrap().notifications_created,
        0
    );
    assert_eq!(
        app.sweep.run_at(at(2024, 6, 9)).await.unwrap().notifications_created,
        1
    );

    let all = app.store.all_notifications();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|n| n.kind == NotificationKind::Expired));
    assert_eq!(all[0].title, "❌ Visa has expired");
    assert_eq!(all[0].message, "Your document 'Visa' expired 7 days ago.");
}

#[tokio::test]
async fn test_delivered_email_marks_notification_sent() {
    let app = TestApp::new();
    let user = app.create_user("Ada");
    app.create_document(&user, "Passport", date(2024, 6, 8));

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.emails_sent, 1);
    assert_eq!(report.emails_failed, 0);

    let sent = app.mailer.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, "⚠️ Passport expiring in 7 days");
    let plain = sent[0].plain_body.as_deref().unwrap();
    assert!(plain.contains("Hello Ada,"));
    assert!(plain.contains("June 08, 2024"));

    let stored = &app.store.all_notifications()[0];
    assert_eq!(stored.email_status, EmailStatus::Sent);
    assert!(stored.is_sent_via_email());
    assert!(stored.is_unread());
}

#[tokio::test]
async fn test_failed_email_still_creates_notification() {
    let app = TestApp::with(SweepPolicy::default(), false);
    let user = app.create_user("Ada");
    app.create_document(&user, "Passport", date(2024, 6, 3));

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.notifications_created, 1);
    assert_eq!(report.emails_sent, 0);
    assert_eq!(report.emails_failed, 1);

    let stored = &app.store.all_notifications()[0];
    assert_eq!(stored.email_status, EmailStatus::SendFailed);
    assert!(!stored.is_sent_via_email());
}

#[tokio::test]
async fn test_opted_out_user_gets_nothing_by_default() {
    let app = TestApp::new();
    let mut user = app.create_user("Ada");
    user.email_notifications_enabled = false;
    app.store.put_user(user.clone());
    app.create_document(&user, "Passport", date(2024, 6, 2));
    app.create_document(&user, "Visa", date(2024, 5, 1));

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.users_scanned, 0);
    assert_eq!(report.notifications_created, 0);
    assert!(app.store.all_notifications().is_empty());
    assert!(app.mailer.messages().is_empty());
}

#[tokio::test]
async fn test_scanning_all_users_keeps_email_gated() {
    let policy = SweepPolicy {
        scan_requires_email_opt_in: false,
        ..SweepPolicy::default()
    };
    let app = TestApp::with(policy, true);

    let mut quiet = app.create_user("Quiet");
    quiet.email_notifications_enabled = false;
    app.store.put_user(quiet.clone());
    let quiet_item = app.create_document(&quiet, "Licence", date(2024, 6, 4));

    let loud = app.create_user("Loud");
    app.create_document(&loud, "Passport", date(2024, 6, 4));

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.users_scanned, 2);
    assert_eq!(report.notifications_created, 2);
    assert_eq!(report.emails_sent, 1);

    let sent = app.mailer.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "loud@example.com");

    let quiet_note = app
        .store
        .all_notifications()
        .into_iter()
        .find(|n| n.item_id == quiet_item.id)
        .unwrap();
    assert_eq!(quiet_note.user_id, quiet.id);
    assert_eq!(quiet_note.email_status, EmailStatus::Skipped);
}

#[tokio::test]
async fn test_missing_address_is_skipped() {
    let app = TestApp::new();
    let user = User::new(None, Some("Ada".into()));
    app.store.put_user(user.clone());
    app.create_document(&user, "Passport", date(2024, 6, 5));

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.notifications_created, 1);
    assert_eq!(report.emails_sent + report.emails_failed, 0);
    assert!(app.mailer.messages().is_empty());
    assert_eq!(
        app.store.all_notifications()[0].email_status,
        EmailStatus::Skipped
    );
}

#[tokio::test]
async fn test_insert_failure_does_not_stop_the_sweep() {
    let app = TestApp::new();
    let user = app.create_user("Ada");
    let broken = app.create_document(&user, "Broken", date(2024, 6, 2));
    let fine = app.create_document(&user, "Fine", date(2024, 6, 3));
    app.faults.fail_inserts_for(broken.id);

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.errors, 1);
    assert_eq!(report.items_evaluated, 2);
    assert_eq!(report.notifications_created, 1);

    let all = app.store.all_notifications();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].item_id, fine.id);
}

#[tokio::test]
async fn test_item_listing_failure_skips_only_that_user() {
    let app = TestApp::new();
    let broken = app.create_user("Ada");
    let fine = app.create_user("Grace");
    app.create_document(&broken, "Passport", date(2024, 6, 3));
    let visa = app.create_document(&fine, "Visa", date(2024, 6, 3));
    app.faults.fail_item_listing_for(broken.id);

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.errors, 1);
    assert_eq!(report.users_scanned, 1);
    assert_eq!(report.items_evaluated, 1);
    assert_eq!(report.notifications_created, 1);
    assert_eq!(report.emails_sent, 1);

    let all = app.store.all_notifications();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].user_id, fine.id);
    assert_eq!(all[0].item_id, visa.id);
}

#[tokio::test]
async fn test_dedup_lookup_failure_skips_only_that_item() {
    let app = TestApp::new();
    let user = app.create_user("Ada");
    let other = app.create_user("Grace");
    let broken = app.create_document(&user, "Broken", date(2024, 6, 2));
    let fine = app.create_document(&user, "Fine", date(2024, 6, 3));
    let visa = app.create_document(&other, "Visa", date(2024, 6, 4));
    app.faults.fail_dedup_lookup_for(broken.id);

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.errors, 1);
    assert_eq!(report.users_scanned, 2);
    assert_eq!(report.items_evaluated, 3);
    assert_eq!(report.notifications_created, 2);
    assert_eq!(report.emails_sent, 2);

    let notified: Vec<_> = app
        .store
        .all_notifications()
        .into_iter()
        .map(|n| n.item_id)
        .collect();
    assert_eq!(notified.len(), 2);
    assert!(notified.contains(&fine.id));
    assert!(notified.contains(&visa.id));
    assert!(!notified.contains(&broken.id));
}

#[tokio::test]
async fn test_status_update_failure_keeps_the_notification() {
    let app = TestApp::new();
    let user = app.create_user("Ada");
    let broken = app.create_document(&user, "Broken", date(2024, 6, 2));
    let fine = app.create_document(&user, "Fine", date(2024, 6, 3));
    app.faults.fail_status_updates_for(broken.id);

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.errors, 1);
    assert_eq!(report.notifications_created, 2);
    assert_eq!(report.emails_sent, 2);
    assert_eq!(app.mailer.messages().len(), 2);

    let all = app.store.all_notifications();
    assert_eq!(all.len(), 2);
    let stuck = all.iter().find(|n| n.item_id == broken.id).unwrap();
    assert_eq!(stuck.email_status, EmailStatus::Pending);
    assert!(stuck.is_unread());
    let recorded = all.iter().find(|n| n.item_id == fine.id).unwrap();
    assert_eq!(recorded.email_status, EmailStatus::Sent);
}

#[tokio::test]
async fn test_item_lead_time_overrides_user_default() {
    let app = TestApp::new();
    let user = app.create_user("Ada");

    let mut early = app.create_document(&user, "Mortgage", date(2024, 6, 21));
    early.reminder_days_before = Some(30);
    app.store.put_item(early.clone());

    let mut late = app.create_document(&user, "Library card", date(2024, 6, 4));
    late.reminder_days_before = Some(1);
    app.store.put_item(late);

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.items_evaluated, 2);
    assert_eq!(report.notifications_created, 1);
    assert_eq!(app.store.all_notifications()[0].item_id, early.id);
}

#[tokio::test]
async fn test_undated_items_are_inert_and_other_kind_uses_dynamic_date() {
    let app = TestApp::new();
    let user = app.create_user("Ada");

    let mut undated = Item::new(user.id, "Birth certificate", ItemKind::Document);
    undated.dynamic_fields = Some(json!({ "issuer": "Registry" }));
    app.store.put_item(undated);

    let mut warranty = Item::new(user.id, "Warranty", ItemKind::Other);
    warranty.dynamic_fields = Some(json!({ "expiration_date": "2024-06-03" }));
    app.store.put_item(warranty);

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    assert_eq!(report.items_evaluated, 1);
    assert_eq!(report.notifications_created, 1);

    let note = &app.store.all_notifications()[0];
    assert_eq!(note.title, "⚠️ Warranty expiring soon");
    assert_eq!(note.message, "Your item 'Warranty' expires in 2 days.");
}

#[tokio::test]
async fn test_notifications_outlive_their_item() {
    let app = TestApp::new();
    let user = app.create_user("Ada");
    let item = app.create_document(&user, "Passport", date(2024, 6, 2));
    app.sweep.run_at(at(2024, 6, 1)).await.unwrap();

    app.store.remove_item(item.id);

    let service = NotificationService::new(Arc::new(app.store.clone()));
    let listed = service.list_notifications(user.id, true).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].item_id, item.id);
    assert_eq!(service.unread_count(user.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_report_serializes_counters() {
    let app = TestApp::new();
    let user = app.create_user("Ada");
    app.create_document(&user, "Passport", date(2024, 6, 2));

    let report = app.sweep.run_at(at(2024, 6, 1)).await.unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["users_scanned"], 1);
    assert_eq!(value["notifications_created"], 1);
    assert_eq!(value["errors"], 0);
}

#[tokio::test]
async fn test_send_test_email() {
    let app = TestApp::new();
    let user = app.create_user("Ada");
    assert!(app.sweep.send_test_email(&user).await);

    let sent = app.mailer.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "⚠️ Test Document expiring in 3 days");
    assert!(app.store.all_notifications().is_empty());

    let nobody = User::new(None, None);
    assert!(!app.sweep.send_test_email(&nobody).await);
}
