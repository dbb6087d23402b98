//! Independent uploads processed on separate threads share no state.

use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use contract_intake::{FixedClock, IngestConfig, IngestEnv, SeededRandom, import_csv};

#[test]
fn parallel_imports_match_sequential_ones() {
    let config = Arc::new(IngestConfig::default());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
    ));

    let uploads: Vec<String> = (0..8)
        .map(|t| {
            let mut csv = String::from("name,supplier,referenceNumber\n");
            for i in 0..25 {
                csv.push_str(&format!("Contract {t}-{i},Supplier {t},REF-{}\n", i % 20));
            }
            csv
        })
        .collect();

    let sequential: Vec<_> = uploads
        .iter()
        .map(|csv| {
            let random = SeededRandom::new(1);
            import_csv(csv, &IngestEnv::new(&config, clock.as_ref(), &random)).unwrap()
        })
        .collect();

    let handles: Vec<_> = uploads
        .into_iter()
        .map(|csv| {
            let config = Arc::clone(&config);
            let clock = Arc::clone(&clock);
            thread::spawn(move || {
                let random = SeededRandom::new(1);
                import_csv(&csv, &IngestEnv::new(&config, clock.as_ref(), &random))
                    .expect("import should succeed")
            })
        })
        .collect();

    for (handle, expected) in handles.into_iter().zip(sequential) {
        let report = handle.join().expect("thread should not panic");
        assert_eq!(report.inserted, 20);
        assert_eq!(report.failed, 5);
        assert_eq!(report, expected);
    }
}

#[test]
fn system_environment_is_shareable_across_threads() {
    let config = Arc::new(IngestConfig::default());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                let env = IngestEnv::system(&config);
                let csv = format!("name,supplier,referenceNumber\nA{t},S,A-{t}\nB{t},S,\n");
                import_csv(&csv, &env).expect("import should succeed")
            })
        })
        .collect();

    for handle in handles {
        let report = handle.join().expect("thread should not panic");
        assert_eq!(report.inserted, 2);
        assert!(report.records[1].reference_number.starts_with("AUTO-"));
    }
}
