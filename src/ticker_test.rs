use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

fn counter() -> (Arc<AtomicU32>, impl FnMut() + Send + 'static) {
    let count = Arc::new(AtomicU32::new(0));
    let inner = count.clone();
    (count, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn first_tick_waits_one_full_period() {
    let (count, on_tick) = counter();
    let _task = RepeatingTask::spawn(Duration::from_millis(10), on_tick).unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn ticks_once_per_period() {
    let (count, on_tick) = counter();
    let _task = RepeatingTask::spawn(Duration::from_millis(10), on_tick).unwrap();

    tokio::time::sleep(Duration::from_millis(105)).await;
    assert_eq!(count.load(Ordering::SeqCst), 10);
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_ticking() {
    let (count, on_tick) = counter();
    let mut task = RepeatingTask::spawn(Duration::from_millis(10), on_tick).unwrap();

    tokio::time::sleep(Duration::from_millis(35)).await;
    task.cancel();
    assert!(!task.is_active());
    let seen = count.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), seen);
}

#[tokio::test(start_paused = true)]
async fn drop_cancels_task() {
    let (count, on_tick) = counter();
    {
        let _task = RepeatingTask::spawn(Duration::from_millis(10), on_tick).unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    let seen = count.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), seen);
}

#[test]
fn spawn_outside_runtime_errors() {
    let result = RepeatingTask::spawn(Duration::from_millis(10), || {});
    assert!(matches!(result, Err(TickerError::NoRuntime)));
}

#[tokio::test]
async fn zero_period_is_rejected() {
    let result = RepeatingTask::spawn(Duration::ZERO, || {});
    assert!(matches!(result, Err(TickerError::ZeroPeriod)));
}
