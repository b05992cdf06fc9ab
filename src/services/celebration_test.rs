use super::*;

#[test]
fn starts_inactive() {
    let celebration = Celebration::default();
    assert!(!celebration.is_active());
    assert_eq!(celebration.window(), DEFAULT_CELEBRATION_WINDOW);
}

#[tokio::test(start_paused = true)]
async fn trigger_raises_then_resets_after_window() {
    let mut celebration = Celebration::new(Duration::from_secs(5));
    celebration.trigger();
    assert!(celebration.is_active());

    tokio::time::sleep(Duration::from_millis(4_900)).await;
    assert!(celebration.is_active());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!celebration.is_active());
}

#[tokio::test(start_paused = true)]
async fn retrigger_restarts_window() {
    let mut celebration = Celebration::new(Duration::from_secs(5));
    celebration.trigger();

    tokio::time::sleep(Duration::from_secs(3)).await;
    celebration.trigger();

    // 6s after the first trigger, 3s after the second.
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(celebration.is_active());

    tokio::time::sleep(Duration::from_millis(2_100)).await;
    assert!(!celebration.is_active());
}

#[tokio::test(start_paused = true)]
async fn cancel_lowers_pulse_and_drops_pending_reset() {
    let mut celebration = Celebration::new(Duration::from_secs(5));
    celebration.trigger();
    celebration.cancel();
    assert!(!celebration.is_active());

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(!celebration.is_active());
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_both_edges() {
    let mut celebration = Celebration::new(Duration::from_secs(5));
    let mut rx = celebration.subscribe();

    celebration.trigger();
    rx.changed().await.unwrap();
    assert!(*rx.borrow_and_update());

    rx.changed().await.unwrap();
    assert!(!*rx.borrow_and_update());
}
