//! Examples for using the Contract Intake Server API

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:4000";

const SAMPLE_CSV: &str = "\
name,supplier,type,endDate,status,contractValue,referenceNumber
Food Supply Contract,Brakes,food,2025-03-31,active,65000,REF-001
Waste Collection,Biffa,waste,,,,
,Bidfood,food,,,,REF-003
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Download the template
    println!("2. Upload Template:");
    let resp = client
        .get(format!("{SERVER_URL}/api/contracts/bulk-upload/template"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 3: CSV upload
    println!("3. CSV Upload:");
    let part = Part::text(SAMPLE_CSV)
        .file_name("contracts.csv")
        .mime_str("text/csv")?;
    let resp = client
        .post(format!("{SERVER_URL}/api/contracts/bulk-upload"))
        .multipart(Form::new().part("file", part))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 4: JSON upload
    println!("4. JSON Upload:");
    let resp = client
        .post(format!("{SERVER_URL}/api/contracts/bulk-upload/json"))
        .json(&json!({
            "records": [
                {
                    "name": "Linen Hire",
                    "supplier": "Johnsons",
                    "type": "linen",
                    "contractValue": 12000,
                    "durationMonths": 24,
                    "referenceNumber": "REF-100"
                },
                {
                    "name": "Linen Hire (duplicate)",
                    "supplier": "Johnsons",
                    "referenceNumber": "REF-100"
                }
            ]
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 5: Rejected upload
    println!("5. Missing records array:");
    let resp = client
        .post(format!("{SERVER_URL}/api/contracts/bulk-upload/json"))
        .json(&json!({ "records": [] }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 6: Metrics
    println!("6. Prometheus Metrics:");
    let resp = client.get(format!("{SERVER_URL}/metrics")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("All examples completed!");
    Ok(())
}
