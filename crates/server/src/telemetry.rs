//! Prometheus-backed [`IntakeMetrics`] observer.
//!
//! | Metric | Kind | Labels |
//! |--------|------|--------|
//! | `intake_batches_total` | counter | `format` |
//! | `intake_rows_total` | counter | `format`, `outcome` (`inserted` / `failed`) |
//! | `intake_adapter_failures_total` | counter | `format`, `kind` |
//! | `intake_batch_seconds` | histogram | `format` |

use contract_intake::{BatchReport, IngestError, IntakeMetrics, SourceFormat};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Forwards intake observations to the global `metrics` recorder.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusIntakeMetrics;

impl IntakeMetrics for PrometheusIntakeMetrics {
    fn record_adapter(
        &self,
        format: SourceFormat,
        _latency: Duration,
        result: Result<(), IngestError>,
    ) {
        if let Err(err) = result {
            counter!(
                "intake_adapter_failures_total",
                "format" => format.as_str(),
                "kind" => failure_kind(&err)
            )
            .increment(1);
        }
    }

    fn record_batch(&self, format: SourceFormat, latency: Duration, report: &BatchReport) {
        counter!("intake_batches_total", "format" => format.as_str()).increment(1);
        counter!("intake_rows_total", "format" => format.as_str(), "outcome" => "inserted")
            .increment(report.inserted as u64);
        counter!("intake_rows_total", "format" => format.as_str(), "outcome" => "failed")
            .increment(report.failed as u64);
        histogram!("intake_batch_seconds", "format" => format.as_str())
            .record(latency.as_secs_f64());
    }
}

fn failure_kind(err: &IngestError) -> &'static str {
    match err {
        IngestError::Parse(_) => "parse",
        IngestError::TooManyRecords { .. } => "too_many_records",
        _ => "input",
    }
}

/// Install the process-wide Prometheus recorder.
pub fn install_prometheus() -> anyhow::Result<PrometheusHandle> {
    Ok(PrometheusBuilder::new().install_recorder()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kinds() {
        assert_eq!(failure_kind(&IngestError::Parse("x".into())), "parse");
        assert_eq!(failure_kind(&IngestError::Input("x".into())), "input");
        assert_eq!(
            failure_kind(&IngestError::TooManyRecords { limit: 1, got: 2 }),
            "too_many_records"
        );
    }

    #[test]
    fn recording_without_installed_recorder_is_a_no_op() {
        let observer = PrometheusIntakeMetrics;
        observer.record_adapter(
            SourceFormat::Csv,
            Duration::from_millis(1),
            Err(IngestError::Parse("x".into())),
        );
        observer.record_batch(
            SourceFormat::Json,
            Duration::from_millis(2),
            &BatchReport::default(),
        );
    }
}
