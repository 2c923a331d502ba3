use std::collections::HashMap;

use super::classify;
use crate::domain::{MooringRecord, MooringStatus};

/// A mooring record with its status at the active typhoon speed
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedMooring {
    pub record: MooringRecord,
    pub status: MooringStatus,
}

/// Mooring records keyed by quay name
///
/// Built wholesale from the current schedule; when a quay appears more than
/// once the last record wins.
#[derive(Debug, Clone, Default)]
pub struct MooringIndex {
    by_quay: HashMap<String, ClassifiedMooring>,
    typhoon_speed: f64,
}

impl MooringIndex {
    pub fn build(records: &[MooringRecord], typhoon_speed: f64) -> Self {
        let by_quay = records
            .iter()
            .map(|record| {
                let status = classify(record, typhoon_speed);
                (
                    record.quay_name.clone(),
                    ClassifiedMooring {
                        record: record.clone(),
                        status,
                    },
                )
            })
            .collect();

        Self {
            by_quay,
            typhoon_speed,
        }
    }

    pub fn get(&self, quay_name: &str) -> Option<&ClassifiedMooring> {
        self.by_quay.get(quay_name)
    }

    pub fn contains(&self, quay_name: &str) -> bool {
        self.by_quay.contains_key(quay_name)
    }

    pub fn typhoon_speed(&self) -> f64 {
        self.typhoon_speed
    }

    pub fn len(&self) -> usize {
        self.by_quay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_quay.is_empty()
    }

    pub fn quay_names(&self) -> impl Iterator<Item = &str> {
        self.by_quay.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_classifies_records() {
        let records = vec![
            MooringRecord::with_thresholds("K1", Some(30.0), None, None),
            MooringRecord::with_thresholds("K2", Some(10.0), Some(30.0), None),
        ];
        let index = MooringIndex::build(&records, 25.0);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("K1").unwrap().status, MooringStatus::Satisfied);
        assert_eq!(index.get("K2").unwrap().status, MooringStatus::Marginal);
        assert!(index.get("K9").is_none());
        assert_eq!(index.typhoon_speed(), 25.0);
    }

    #[test]
    fn test_duplicate_quay_last_wins() {
        let records = vec![
            MooringRecord::with_thresholds("K1", Some(30.0), None, None),
            MooringRecord::with_thresholds("K1", Some(5.0), None, None),
        ];
        let index = MooringIndex::build(&records, 25.0);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("K1").unwrap().status, MooringStatus::Impossible);
    }

    #[test]
    fn test_empty_index() {
        let index = MooringIndex::build(&[], 25.0);
        assert!(index.is_empty());
        assert!(!index.contains("K1"));
    }
}
