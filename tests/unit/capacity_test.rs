//! Tests for capacity probes

use prometheus_batch_scheduler::core::{
    AvailableParallelism, CapacityProbe, FixedCapacity, ProcessThreads,
};

#[test]
fn test_fixed_capacity_probe() {
    let probe: Box<dyn CapacityProbe> = Box::new(FixedCapacity(12));
    assert_eq!(probe.capacity_hint(), 12);
}

#[test]
fn test_available_parallelism_matches_num_cpus() {
    let expected = i64::try_from(num_cpus::get()).expect("cpu count fits i64");
    assert_eq!(AvailableParallelism.capacity_hint(), expected);
}

#[test]
fn test_process_threads_counts_spawned_thread() {
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    let handle = std::thread::spawn(move || {
        let _ = rx.recv();
    });

    let hint = ProcessThreads.capacity_hint();
    drop(tx);
    handle.join().expect("thread joined");

    if cfg!(target_os = "linux") {
        // the test thread plus the parked one
        assert!(hint >= 2);
    } else {
        assert!(hint >= 1);
    }
}
