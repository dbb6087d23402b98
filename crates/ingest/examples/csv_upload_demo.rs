use chrono::{DateTime, NaiveDate, Utc};
use ingest::{parse_csv, process, FixedClock, IngestConfig, IngestEnv, SeededRandom};

fn fixed_timestamp() -> DateTime<Utc> {
    let Some(date) = NaiveDate::from_ymd_opt(2024, 1, 1) else {
        panic!("invalid date components");
    };
    let Some(date_time) = date.and_hms_opt(12, 0, 0) else {
        panic!("invalid time components");
    };
    DateTime::<Utc>::from_naive_utc_and_offset(date_time, Utc)
}

const UPLOAD: &str = "\
name,supplier,type,endDate,status,contractValue,referenceNumber
Food Supply Contract,Brakes,FOOD,2025-03-31,Active,65000,REF-001
Waste Collection,Biffa,waste,31/13/2025,,abc,
,Bidfood,food,,,,REF-003
Linen Hire,Johnsons,linen,2025-06-30,pending,,REF-001
";

fn main() {
    let config = IngestConfig::default();
    let clock = FixedClock::new(fixed_timestamp());
    let random = SeededRandom::new(7);
    let env = IngestEnv::new(&config, &clock, &random);

    match parse_csv(UPLOAD, &config) {
        Ok(rows) => {
            let report = process(&rows, &env);
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("failed to render report: {err}"),
            }
        }
        Err(err) => eprintln!("upload rejected: {err}"),
    }
}
