use order_watch::mock::{MockOrderSource, NotifierEvent, RecordingNotifier};
use order_watch::{
    MonitorActor, MonitorClient, MonitorContext, MonitorSettings, PollReport, PollTrigger,
    StaticToken, Transition, WatchError,
};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::task::JoinHandle;

const MINUTE: Duration = Duration::from_secs(60);

fn spawn_monitor(
    source: &MockOrderSource,
    notifier: &RecordingNotifier,
    token: StaticToken,
) -> (MonitorClient, JoinHandle<()>) {
    let (actor, client) = MonitorActor::new(MonitorSettings::default());
    let handle = tokio::spawn(actor.run(MonitorContext::new(
        source.clone(),
        notifier.clone(),
        token,
    )));
    (client, handle)
}

fn nested(statuses: &[&str]) -> Value {
    let orders: Vec<Value> = statuses.iter().map(|s| json!({ "status": s })).collect();
    json!({ "success": true, "data": { "orders": orders } })
}

#[tokio::test]
async fn test_example_body_raises_alert_sound_and_badge() {
    let source = MockOrderSource::new();
    source.expect_body(json!({
        "success": true,
        "data": { "orders": [{ "status": "active" }, { "status": "shipped" }, null] }
    }));
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    let report = client.poll_now(PollTrigger::Startup).await.unwrap();
    assert_eq!(
        report,
        PollReport::Completed {
            pending: 1,
            transition: Transition::Raised
        }
    );

    let events = notifier.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[0], NotifierEvent::AlertShown(alert) if alert.total == 1));
    assert_eq!(events[1], NotifierEvent::Sound);
    assert!(matches!(&events[2], NotifierEvent::BadgeSet(badge) if badge.label == "1"));

    let snapshot = client.snapshot().await.unwrap();
    assert!(snapshot.has_pending_orders);
    assert_eq!(snapshot.pending_count, 1);
    assert!(snapshot.last_check_ms.is_some());
    assert_eq!(source.tokens_seen(), vec!["secret".to_string()]);
    source.verify();
}

#[tokio::test]
async fn test_alert_and_sound_fire_once_per_raise() {
    let source = MockOrderSource::new();
    source
        .expect_body(nested(&["active"]))
        .expect_body(nested(&["active", "pending"]))
        .expect_body(nested(&["closed"]))
        .expect_body(nested(&["pending_profit"]));
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    let transitions: Vec<Transition> = {
        let mut out = Vec::new();
        for _ in 0..4 {
            match client.poll_now(PollTrigger::Interval).await.unwrap() {
                PollReport::Completed { transition, .. } => out.push(transition),
                other => panic!("unexpected report: {:?}", other),
            }
        }
        out
    };
    assert_eq!(
        transitions,
        vec![
            Transition::Raised,
            Transition::Refreshed,
            Transition::Cleared,
            Transition::Raised
        ]
    );

    // One alert and one sound per false -> true, none for the refresh.
    assert_eq!(notifier.alerts().len(), 2);
    assert_eq!(notifier.sounds(), 2);
    assert_eq!(notifier.badge_label().as_deref(), Some("1"));
    assert!(notifier.events().contains(&NotifierEvent::BadgeCleared));
    source.verify();
}

#[tokio::test]
async fn test_refresh_updates_badge_only() {
    let source = MockOrderSource::new();
    source
        .expect_body(nested(&["active"]))
        .expect_body(Value::Array(vec![json!({ "status": "active" }); 120]));
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    client.poll_now(PollTrigger::Startup).await.unwrap();
    notifier.clear();
    client.poll_now(PollTrigger::Interval).await.unwrap();

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        NotifierEvent::BadgeSet(badge) => {
            assert_eq!(badge.label, "99+");
            assert_eq!(badge.title, "120 pending order(s)");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_unrecognized_envelope_counts_as_zero_orders() {
    let source = MockOrderSource::new();
    source
        .expect_body(json!({ "success": true, "data": { "items": [{ "status": "active" }] } }))
        .expect_body(json!({ "error": "maintenance" }));
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    for _ in 0..2 {
        let report = client.poll_now(PollTrigger::Interval).await.unwrap();
        assert_eq!(
            report,
            PollReport::Completed {
                pending: 0,
                transition: Transition::Quiet
            }
        );
    }
    assert!(notifier.events().is_empty());
    assert_eq!(client.snapshot().await.unwrap().consecutive_failures, 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_poll_keeps_flag_but_advances_last_check() {
    let source = MockOrderSource::new();
    source.expect_body(nested(&["pending"]));
    source.expect_failure(WatchError::UnexpectedStatus {
        status: 503,
        reason: "Service Unavailable".into(),
    });
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    client.poll_now(PollTrigger::Startup).await.unwrap();
    tokio::time::advance(29 * MINUTE).await;

    let report = client.poll_now(PollTrigger::Interval).await.unwrap();
    assert!(matches!(report, PollReport::Failed { ref reason } if reason.contains("503")));

    let snapshot = client.snapshot().await.unwrap();
    assert!(snapshot.has_pending_orders, "flag must hold over a failed poll");
    assert_eq!(snapshot.pending_count, 1);
    assert_eq!(snapshot.polls, 2);
    assert_eq!(snapshot.consecutive_failures, 1);

    // 58 minutes after the last success but only 29 after the failed attempt:
    // the failed attempt counts as a check, so no out-of-band poll happens.
    tokio::time::advance(29 * MINUTE).await;
    assert_eq!(client.visibility_changed(true).await.unwrap(), None);

    // Only the original raise reached the notifier.
    assert_eq!(notifier.alerts().len(), 1);
    source.verify();
}

#[tokio::test]
async fn test_missing_token_skips_silently() {
    let source = MockOrderSource::new();
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::absent());

    assert_eq!(
        client.poll_now(PollTrigger::Manual).await.unwrap(),
        PollReport::Skipped
    );
    assert_eq!(
        client.visibility_changed(true).await.unwrap(),
        Some(PollReport::Skipped)
    );

    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.polls, 0);
    assert_eq!(snapshot.last_check_ms, None);
    assert_eq!(source.calls(), 0);
    assert!(notifier.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_visibility_polls_only_when_stale() {
    let source = MockOrderSource::new();
    source
        .expect_body(nested(&[]))
        .expect_body(nested(&["active"]));
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    // Never checked: regaining visibility polls right away.
    let report = client.visibility_changed(true).await.unwrap();
    assert_eq!(
        report,
        Some(PollReport::Completed {
            pending: 0,
            transition: Transition::Quiet
        })
    );

    // Hidden events never poll. Exactly 30 minutes is not "more than" 30.
    tokio::time::advance(30 * MINUTE).await;
    assert_eq!(client.visibility_changed(false).await.unwrap(), None);
    assert_eq!(client.visibility_changed(true).await.unwrap(), None);

    tokio::time::advance(Duration::from_secs(1)).await;
    let report = client.visibility_changed(true).await.unwrap();
    assert_eq!(
        report,
        Some(PollReport::Completed {
            pending: 1,
            transition: Transition::Raised
        })
    );
    assert_eq!(source.calls(), 2);
    source.verify();
}

#[tokio::test(start_paused = true)]
async fn test_alert_auto_dismisses_after_ttl() {
    let source = MockOrderSource::new();
    source.expect_body(nested(&["active"]));
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    client.poll_now(PollTrigger::Startup).await.unwrap();
    assert_eq!(client.snapshot().await.unwrap().alert_id, Some(1));

    tokio::time::advance(4 * MINUTE).await;
    assert_eq!(client.snapshot().await.unwrap().alert_id, Some(1));
    assert_eq!(notifier.visible_alert(), Some(1));

    tokio::time::advance(MINUTE + Duration::from_millis(1)).await;
    assert_eq!(client.snapshot().await.unwrap().alert_id, None);
    assert_eq!(notifier.visible_alert(), None);

    // The badge outlives the alert.
    assert_eq!(notifier.badge_label().as_deref(), Some("1"));
}

#[tokio::test(start_paused = true)]
async fn test_replaced_alert_timer_does_not_dismiss_successor() {
    let source = MockOrderSource::new();
    source
        .expect_body(nested(&["active"]))
        .expect_body(nested(&[]))
        .expect_body(nested(&["pending", "pending"]));
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    client.poll_now(PollTrigger::Startup).await.unwrap();
    tokio::time::advance(MINUTE).await;
    client.poll_now(PollTrigger::Interval).await.unwrap();
    // Clearing the flag removes the badge but leaves the alert up.
    assert_eq!(notifier.visible_alert(), Some(1));

    tokio::time::advance(2 * MINUTE).await;
    client.poll_now(PollTrigger::Interval).await.unwrap();
    let events = notifier.events();
    let removed = events
        .iter()
        .position(|e| *e == NotifierEvent::AlertRemoved(1))
        .expect("first alert replaced");
    let shown = events
        .iter()
        .position(|e| matches!(e, NotifierEvent::AlertShown(a) if a.alert_id == 2))
        .expect("second alert shown");
    assert!(removed < shown);

    // Past the first alert's deadline, before the second's.
    tokio::time::advance(3 * MINUTE).await;
    assert_eq!(client.snapshot().await.unwrap().alert_id, Some(2));

    tokio::time::advance(2 * MINUTE + Duration::from_millis(1)).await;
    assert_eq!(client.snapshot().await.unwrap().alert_id, None);
    assert_eq!(notifier.visible_alert(), None);
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_alert_ttl_keeps_alert_and_actor_alive() {
    let source = MockOrderSource::new();
    source
        .expect_body(json!([{ "status": "active" }]))
        .expect_body(json!([{ "status": "active" }, { "status": "pending" }]));
    let notifier = RecordingNotifier::new();
    let settings = MonitorSettings {
        alert_ttl: Duration::from_secs(u64::MAX),
        ..MonitorSettings::default()
    };
    let (actor, client) = MonitorActor::new(settings);
    let handle = tokio::spawn(actor.run(MonitorContext::new(
        source.clone(),
        notifier.clone(),
        StaticToken::new("secret"),
    )));

    let report = client.poll_now(PollTrigger::Startup).await.unwrap();
    assert!(matches!(report, PollReport::Completed { transition: Transition::Raised, .. }));

    tokio::time::advance(24 * 60 * MINUTE).await;
    assert_eq!(client.snapshot().await.unwrap().alert_id, Some(1));
    assert_eq!(notifier.visible_alert(), Some(1));

    let report = client.poll_now(PollTrigger::Interval).await.unwrap();
    assert!(matches!(report, PollReport::Completed { pending: 2, .. }));
    assert!(client.dismiss_alert().await.unwrap());

    drop(client);
    handle.await.unwrap();
    source.verify();
}

#[tokio::test]
async fn test_manual_dismiss_and_view_all() {
    let source = MockOrderSource::new();
    source.expect_body(nested(&["active", "pending", "active", "pending"]));
    let notifier = RecordingNotifier::new();
    let (client, _handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    client.poll_now(PollTrigger::Startup).await.unwrap();
    let alert = &notifier.alerts()[0];
    assert_eq!(alert.previews.len(), 3);
    assert_eq!(alert.hidden, 1);

    client.view_all().await.unwrap();
    assert!(notifier
        .events()
        .contains(&NotifierEvent::Navigated("trading-management.html".into())));

    assert!(client.dismiss_alert().await.unwrap());
    assert!(!client.dismiss_alert().await.unwrap());
    assert_eq!(notifier.visible_alert(), None);
    assert_eq!(client.snapshot().await.unwrap().alert_id, None);
}

#[tokio::test]
async fn test_monitor_stops_when_clients_dropped() {
    let source = MockOrderSource::new();
    let notifier = RecordingNotifier::new();
    let (client, handle) = spawn_monitor(&source, &notifier, StaticToken::new("secret"));

    let second = client.clone();
    drop(client);
    assert!(second.snapshot().await.is_ok());
    drop(second);

    handle.await.unwrap();
}
