//! Filtering accepted records against references the caller already stores.
//!
//! The batch processor only deduplicates within one upload. Callers that keep
//! a store can use [`partition_known`] to skip records whose reference number
//! is already present there.
use std::collections::HashSet;

use serde::Serialize;

use crate::types::Contract;

/// Accepted records split by whether the caller already knows their reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePlan {
    pub fresh: Vec<Contract>,
    pub already_known: Vec<Contract>,
}

/// Splits `records` by reference number. Both halves keep input order.
///
/// ```rust
/// use std::collections::HashSet;
/// use ingest::{partition_known, process, Field, IngestConfig, IngestEnv, RawRecord};
///
/// let config = IngestConfig::default();
/// let rows = vec![
///     RawRecord::new().with(Field::Name, "A").with(Field::Supplier, "S").with(Field::ReferenceNumber, "REF-1"),
///     RawRecord::new().with(Field::Name, "B").with(Field::Supplier, "S").with(Field::ReferenceNumber, "REF-2"),
/// ];
/// let report = process(&rows, &IngestEnv::system(&config));
///
/// let known: HashSet<String> = ["REF-1".to_string()].into();
/// let plan = partition_known(report.records, &known);
/// assert_eq!(plan.fresh[0].reference_number, "REF-2");
/// assert_eq!(plan.already_known[0].reference_number, "REF-1");
/// ```
pub fn partition_known(records: Vec<Contract>, known: &HashSet<String>) -> MergePlan {
    let (already_known, fresh) = records
        .into_iter()
        .partition(|contract| known.contains(&contract.reference_number));
    MergePlan {
        fresh,
        already_known,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn contract(reference: &str) -> Contract {
        Contract {
            id: 1,
            name: "Deal".into(),
            supplier: "Acme".into(),
            contract_type: "other".into(),
            end_date: None,
            status: "active".into(),
            contract_value: None,
            duration_months: None,
            area: None,
            reminder: None,
            internal_contact: None,
            reference_number: reference.into(),
            notes: None,
            last_reviewed: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn splits_by_reference_and_keeps_order() {
        let known: HashSet<String> = ["B".to_string(), "D".to_string()].into();
        let records = ["A", "B", "C", "D", "E"].map(contract).to_vec();

        let plan = partition_known(records, &known);

        let fresh: Vec<&str> = plan.fresh.iter().map(|c| c.reference_number.as_str()).collect();
        let known: Vec<&str> = plan
            .already_known
            .iter()
            .map(|c| c.reference_number.as_str())
            .collect();
        assert_eq!(fresh, ["A", "C", "E"]);
        assert_eq!(known, ["B", "D"]);
    }

    #[test]
    fn empty_known_set_keeps_everything_fresh() {
        let plan = partition_known(vec![contract("A")], &HashSet::new());
        assert_eq!(plan.fresh.len(), 1);
        assert!(plan.already_known.is_empty());
    }
}
