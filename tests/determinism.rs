use chrono::{TimeZone, Utc};
use contract_intake::{
    Field, FixedClock, IngestConfig, IngestEnv, RawRecord, SeededRandom, import_csv, sanitize,
};

const UPLOAD: &str = "name,supplier,type,endDate,status,contractValue,referenceNumber\n\
    Food Supply,Brakes,FOOD,12/31/2024,Active,65000,\n\
    Laundry,Johnsons,,2025-06-30T10:00:00Z,,,LND-1\n\
    ,Nobody,,,,,\n\
    Cleaning,Bright Ltd,cleaning,,expired,-10,LND-1\n";

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap())
}

#[test]
fn frozen_environment_yields_identical_reports() {
    let config = IngestConfig::default();
    let clock = clock();

    let first_random = SeededRandom::new(17);
    let first = import_csv(UPLOAD, &IngestEnv::new(&config, &clock, &first_random))
        .expect("first import");

    let second_random = SeededRandom::new(17);
    let second = import_csv(UPLOAD, &IngestEnv::new(&config, &clock, &second_random))
        .expect("second import");

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.inserted, 2);
    assert_eq!(first.failed, 2);
}

#[test]
fn sanitizing_a_sanitized_contract_changes_nothing() {
    let config = IngestConfig::default();
    let clock = clock();
    let random = SeededRandom::new(5);
    let env = IngestEnv::new(&config, &clock, &random);

    let raw = RawRecord::new()
        .with(Field::Name, "  Waste Collection ")
        .with(Field::Supplier, "Green Bins")
        .with(Field::Type, "WASTE")
        .with(Field::EndDate, "Mar 15 2026")
        .with(Field::Status, " Pending ")
        .with(Field::ContractValue, 1200.0)
        .with(Field::Area, " East ")
        .with(Field::Notes, "   ");
    let once = sanitize(&raw, 0, &env).unwrap();

    let value = serde_json::to_value(&once).unwrap();
    let again_raw = RawRecord::from_json_value(&value);
    let twice = sanitize(&again_raw, 0, &env).unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.notes, None);
    assert_eq!(once.area.as_deref(), Some("East"));
}
