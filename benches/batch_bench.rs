use contract_intake::{
    FixedClock, IngestConfig, IngestEnv, SeededRandom, import_csv, import_json, parse_csv, process,
};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;

fn fixed_clock() -> FixedClock {
    let Some(at) = chrono::DateTime::from_timestamp_millis(1_704_067_200_000) else {
        panic!("invalid bench timestamp");
    };
    FixedClock::new(at)
}

/// Generate an upload of `rows` data rows; every tenth row misses its supplier
/// and every twentieth repeats an earlier reference.
fn generate_csv(rows: usize) -> String {
    let mut csv = String::from(
        "name,supplier,type,endDate,status,contractValue,durationMonths,area,referenceNumber,lastReviewed\n",
    );
    for i in 0..rows {
        let supplier = if i % 10 == 9 { "" } else { "Supplier Ltd" };
        let reference = if i % 20 == 19 { i - 1 } else { i };
        let _ = writeln!(
            csv,
            "Contract {i},{supplier},FOOD,2025-{:02}-15,Active,{},12,North Region,REF-{reference},01/15/2024",
            i % 12 + 1,
            1000 + i
        );
    }
    csv
}

fn generate_json(rows: usize) -> String {
    let records: Vec<serde_json::Value> = (0..rows)
        .map(|i| {
            serde_json::json!({
                "name": format!("Contract {i}"),
                "supplier": "Supplier Ltd",
                "contractValue": 1000 + i,
                "endDate": "2025-06-30",
                "referenceNumber": format!("REF-{i}"),
            })
        })
        .collect();
    serde_json::json!({ "records": records }).to_string()
}

/// Benchmark the CSV adapter alone at different upload sizes
fn bench_parse_csv(c: &mut Criterion) {
    let config = IngestConfig::default();
    let mut group = c.benchmark_group("parse_csv");

    for rows in [100, 1000, 10000].iter() {
        let csv = generate_csv(*rows);
        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_function(format!("rows_{rows}"), |b| {
            b.iter(|| {
                let _ = parse_csv(black_box(&csv), black_box(&config)).expect("csv should parse");
            });
        });
    }

    group.finish();
}

/// Benchmark sanitization and duplicate detection on pre-parsed rows
fn bench_process(c: &mut Criterion) {
    let config = IngestConfig::default();
    let clock = fixed_clock();
    let random = SeededRandom::new(17);
    let env = IngestEnv::new(&config, &clock, &random);
    let mut group = c.benchmark_group("process");

    for rows in [100, 1000, 10000].iter() {
        let raw = parse_csv(&generate_csv(*rows), &config).expect("csv should parse");
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_function(format!("rows_{rows}"), |b| {
            b.iter(|| process(black_box(&raw), black_box(&env)));
        });
    }

    group.finish();
}

/// Benchmark full uploads through the umbrella API
fn bench_end_to_end(c: &mut Criterion) {
    let config = IngestConfig::default();
    let clock = fixed_clock();
    let random = SeededRandom::new(17);
    let env = IngestEnv::new(&config, &clock, &random);
    let mut group = c.benchmark_group("end_to_end");

    let csv = generate_csv(1000);
    let json = generate_json(1000);
    group.throughput(Throughput::Elements(1000));

    group.bench_function("csv_1000", |b| {
        b.iter(|| import_csv(black_box(&csv), black_box(&env)).expect("csv should import"));
    });
    group.bench_function("json_1000", |b| {
        b.iter(|| {
            import_json(black_box(json.as_bytes()), black_box(&env)).expect("json should import")
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse_csv, bench_process, bench_end_to_end);
criterion_main!(benches);
