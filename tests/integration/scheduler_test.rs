//! Integration tests for periodic promotion alongside the HTTP API.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use xflow_core::config::SchedulerConfig;
use xflow_worker::PromotionScheduler;

fn enabled() -> SchedulerConfig {
    SchedulerConfig {
        enabled: true,
        ..SchedulerConfig::default()
    }
}

#[tokio::test]
async fn test_tick_promotes_every_active_queue() {
    let app = helpers::TestApp::new();
    for user in 0..4 {
        app.register("a", user).await;
        app.register("b", user).await;
        app.clock.advance(1);
    }
    app.register("c", 1).await;

    let scheduler = PromotionScheduler::new(Arc::clone(&app.admission), enabled());
    let report = scheduler.tick().await;

    assert_eq!(report.promoted("a"), Some(3));
    assert_eq!(report.promoted("b"), Some(3));
    assert_eq!(report.promoted("c"), Some(1));

    // The earliest arrivals went first.
    let resp = app.request("GET", "/api/v1/queue/rank?queue=a&user_id=3").await;
    assert_eq!(resp.body["rank"], 1);
    assert!(app.admission.is_admitted("a", "0").await.unwrap());
}

#[tokio::test]
async fn test_queue_names_with_colons_are_discovered() {
    let app = helpers::TestApp::new();
    app.register("tenant:sale", 1).await;

    let scheduler = PromotionScheduler::new(Arc::clone(&app.admission), enabled());
    let report = scheduler.tick().await;

    assert_eq!(report.promoted("tenant:sale"), Some(1));
    assert!(app.admission.is_admitted("tenant:sale", "1").await.unwrap());
}

#[tokio::test]
async fn test_disabled_scheduler_leaves_queues_untouched() {
    let app = helpers::TestApp::new();
    app.register("sale", 1).await;

    let scheduler = PromotionScheduler::new(Arc::clone(&app.admission), SchedulerConfig::default());
    assert!(scheduler.tick().await.skipped);
    assert_eq!(app.admission.waiting_count("sale").await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_run_stops_on_shutdown_signal() {
    let app = helpers::TestApp::new();
    for user in 0..6 {
        app.register("sale", user).await;
    }

    let scheduler = PromotionScheduler::new(Arc::clone(&app.admission), enabled());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(app.admission.waiting_count("sale").await.unwrap(), 3);

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(app.admission.waiting_count("sale").await.unwrap(), 3);
}
