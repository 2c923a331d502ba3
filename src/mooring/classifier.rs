use serde::Serialize;

use crate::domain::{MooringRecord, MooringStatus};

fn covers(threshold: Option<f64>, speed: f64) -> bool {
    threshold.is_some_and(|t| t >= speed)
}

/// Classify a mooring record against the forecast typhoon speed
///
/// Rules, first match wins:
/// 1. realized threshold >= speed -> Satisfied
/// 2. maximum or safety-limit threshold >= speed -> Marginal
/// 3. otherwise -> Impossible
///
/// A missing threshold never covers the speed.
pub fn classify(record: &MooringRecord, typhoon_speed: f64) -> MooringStatus {
    if covers(record.real_wind, typhoon_speed) {
        MooringStatus::Satisfied
    } else if covers(record.max_wind, typhoon_speed) || covers(record.safety_wind, typhoon_speed) {
        MooringStatus::Marginal
    } else {
        MooringStatus::Impossible
    }
}

/// Status counts across a mooring schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MooringSummary {
    pub satisfied: usize,
    pub impossible: usize,
    /// Everything that is neither satisfied nor impossible
    pub editable: usize,
    pub total: usize,
}

pub fn aggregate(records: &[MooringRecord], typhoon_speed: f64) -> MooringSummary {
    let total = records.len();
    let mut satisfied = 0;
    let mut impossible = 0;

    for record in records {
        match classify(record, typhoon_speed) {
            MooringStatus::Satisfied => satisfied += 1,
            MooringStatus::Impossible => impossible += 1,
            MooringStatus::Marginal => {}
        }
    }

    MooringSummary {
        satisfied,
        impossible,
        editable: total - satisfied - impossible,
        total,
    }
}
