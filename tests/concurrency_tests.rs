// Concurrent outcome recording

use apireport::time::FixedClock;
use apireport::{LifecycleListener, ResultAggregator, TestOutcome, TestStatus};
use std::collections::HashSet;
use std::sync::Arc;

const WORKERS: usize = 10;
const TESTS_PER_WORKER: usize = 10;

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at("2024-03-01 10:00:00").expect("valid instant"))
}

#[test]
fn test_concurrent_appends_lose_nothing() {
    // Arrange
    let aggregator = ResultAggregator::new();

    // Act
    std::thread::scope(|scope| {
        for worker in 0..WORKERS {
            let aggregator = &aggregator;
            scope.spawn(move || {
                for i in 0..TESTS_PER_WORKER {
                    aggregator.append(TestOutcome::pass(format!("w{}-t{}", worker, i), None, 10));
                }
            });
        }
    });

    // Assert
    let snapshot = aggregator.snapshot();
    assert_eq!(snapshot.total(), WORKERS * TESTS_PER_WORKER);
    assert_eq!(snapshot.passed(), WORKERS * TESTS_PER_WORKER);
    assert_eq!(snapshot.pass_rate(), 100.0);

    let unique: HashSet<_> = snapshot.outcomes().iter().map(|o| &o.name).collect();
    assert_eq!(unique.len(), WORKERS * TESTS_PER_WORKER);
    assert_eq!(snapshot.duration_stats().avg_ms, 10.0);
}

#[test]
fn test_per_worker_order_is_preserved() {
    let aggregator = ResultAggregator::new();

    std::thread::scope(|scope| {
        for worker in 0..WORKERS {
            let aggregator = &aggregator;
            scope.spawn(move || {
                for i in 0..TESTS_PER_WORKER {
                    aggregator.append(TestOutcome::pass(format!("w{}", worker), None, i as u64));
                }
            });
        }
    });

    // Appends from one worker are ordered by happens-before, so their
    // durations must appear increasing.
    let snapshot = aggregator.snapshot();
    for worker in 0..WORKERS {
        let name = format!("w{}", worker);
        let durations: Vec<u64> = snapshot
            .outcomes()
            .iter()
            .filter(|o| o.name == name)
            .map(|o| o.duration_ms)
            .collect();
        assert_eq!(durations, (0..TESTS_PER_WORKER as u64).collect::<Vec<_>>());
    }
}

#[test]
fn test_snapshot_during_appends_is_consistent() {
    let aggregator = ResultAggregator::new();

    std::thread::scope(|scope| {
        for worker in 0..WORKERS {
            let aggregator = &aggregator;
            scope.spawn(move || {
                for i in 0..TESTS_PER_WORKER {
                    let outcome = if i % 2 == 0 {
                        TestOutcome::pass(format!("w{}-t{}", worker, i), None, 10)
                    } else {
                        TestOutcome::fail(format!("w{}-t{}", worker, i), None, 10, "boom")
                    };
                    aggregator.append(outcome);
                }
            });
        }

        let aggregator = &aggregator;
        scope.spawn(move || {
            let mut last = 0;
            for _ in 0..50 {
                let snapshot = aggregator.snapshot();
                assert_eq!(
                    snapshot.passed() + snapshot.failed() + snapshot.skipped(),
                    snapshot.total()
                );
                assert!(snapshot.total() >= last);
                assert!((0.0..=100.0).contains(&snapshot.pass_rate()));
                last = snapshot.total();
            }
        });
    });

    assert_eq!(aggregator.len(), WORKERS * TESTS_PER_WORKER);
}

#[test]
fn test_listener_callbacks_from_worker_threads() {
    let listener = LifecycleListener::new(clock());
    listener.on_suite_start("Parallel").expect("start");

    std::thread::scope(|scope| {
        for worker in 0..WORKERS {
            let listener = &listener;
            scope.spawn(move || {
                for i in 0..TESTS_PER_WORKER {
                    let id = format!("w{}-t{}", worker, i);
                    listener.on_test_start(&id, None).expect("test start");
                    let ended = match i % 3 {
                        0 => listener.on_test_success(&id, None, 10),
                        1 => listener.on_test_failure(&id, None, 10, "assert mismatch"),
                        _ => listener.on_test_skipped(&id, None, Some("disabled")),
                    };
                    ended.expect("test end");
                }
            });
        }
    });

    let report = listener.on_suite_finish("Parallel").expect("finish");
    let snapshot = report.snapshot;
    assert_eq!(snapshot.total(), 100);
    assert_eq!(snapshot.passed(), 40);
    assert_eq!(snapshot.failed(), 30);
    assert_eq!(snapshot.skipped(), 30);
    assert!(
        snapshot
            .outcomes()
            .iter()
            .filter(|o| o.status == TestStatus::Skipped)
            .all(|o| o.duration_ms == 0)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_listener_callbacks_from_async_runner() {
    let listener = Arc::new(LifecycleListener::new(clock()));
    listener.on_suite_start("Async").expect("start");

    let mut handles = Vec::new();
    for worker in 0..WORKERS {
        let listener = Arc::clone(&listener);
        handles.push(tokio::spawn(async move {
            for i in 0..TESTS_PER_WORKER {
                let id = format!("w{}-t{}", worker, i);
                listener
                    .on_test_success(&id, Some("async"), 10)
                    .expect("pass");
                tokio::task::yield_now().await;
            }
        }));
    }
    for handle in handles {
        handle.await.expect("worker task");
    }

    let report = listener.on_suite_finish("Async").expect("finish");
    assert_eq!(report.snapshot.total(), 100);
    assert!(report.snapshot.all_passed());
}
