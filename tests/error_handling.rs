//! Upload-level rejections: each aborts the request before any row is processed.

use contract_intake::{
    BatchReport, IngestConfig, IngestEnv, IngestError, SourceFormat, import, import_csv,
    import_json,
};

#[test]
fn ragged_csv_is_a_parse_error() {
    let config = IngestConfig::default();
    let env = IngestEnv::system(&config);

    let err = import_csv("name,supplier,type\nA,S,food\nB,S\n", &env).unwrap_err();
    assert_eq!(err.format(), SourceFormat::Csv);
    assert!(matches!(err.ingest_error(), IngestError::Parse(_)));
    assert!(!err.is_bad_request());
    assert_eq!(err.ingest_error().http_status_code(), 422);
    assert!(err.to_string().starts_with("csv upload rejected: "));
}

#[test]
fn non_utf8_csv_is_a_parse_error() {
    let config = IngestConfig::default();
    let env = IngestEnv::system(&config);

    let err = import(b"name,supplier\n\xff\xfe,S\n", SourceFormat::Csv, &env).unwrap_err();
    assert!(matches!(err.ingest_error(), IngestError::Parse(msg) if msg.contains("UTF-8")));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let config = IngestConfig::default();
    let env = IngestEnv::system(&config);

    let err = import_json(b"{\"records\": [", &env).unwrap_err();
    assert_eq!(err.format(), SourceFormat::Json);
    assert!(matches!(err.ingest_error(), IngestError::Parse(_)));
}

#[test]
fn wrong_json_shapes_are_bad_requests() {
    let config = IngestConfig::default();
    let env = IngestEnv::system(&config);

    let bodies: [&[u8]; 7] = [
        b"",
        b"   ",
        b"[]",
        b"{}",
        b"{\"records\": null}",
        b"{\"records\": \"rows\"}",
        b"{\"records\": []}",
    ];
    for body in bodies {
        let err = import_json(body, &env).unwrap_err();
        assert!(err.is_bad_request(), "body {:?}", String::from_utf8_lossy(body));
        assert_eq!(err.ingest_error().http_status_code(), 400);
    }
}

#[test]
fn record_ceiling_applies_to_both_formats() {
    let config = IngestConfig {
        max_records: Some(2),
        ..Default::default()
    };
    let env = IngestEnv::system(&config);

    let csv = "name,supplier\nA,S\nB,S\nC,S\n";
    let err = import_csv(csv, &env).unwrap_err();
    assert_eq!(
        err.ingest_error(),
        &IngestError::TooManyRecords { limit: 2, got: 3 }
    );
    assert_eq!(err.ingest_error().http_status_code(), 413);

    let json = br#"{"records":[{},{},{}]}"#;
    let err = import_json(json, &env).unwrap_err();
    assert!(matches!(
        err.ingest_error(),
        IngestError::TooManyRecords { limit: 2, got: 3 }
    ));

    let within = import_csv("name,supplier\nA,S\nB,S\n", &env).unwrap();
    assert_eq!(within.inserted, 2);
}

#[test]
fn header_only_csv_is_an_empty_report() {
    let config = IngestConfig::default();
    let env = IngestEnv::system(&config);

    let report = import_csv("name,supplier\n", &env).unwrap();
    assert_eq!(report, BatchReport::default());
}
